// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.2 Function Objects](https://tc39.es/ecma262/#sec-function-objects)

use crate::ecmascript::{
    abstract_operations::{operations_on_objects::call, testing_and_comparison::is_callable},
    builtins::{
        ArgumentsList, Behaviour, BuiltinFunctionArgs, builders::IntrinsicsBuilder,
        create_builtin_function,
    },
    execution::{Agent, JsResult, Realm, agent::ExceptionType},
    types::{Object, PropertyKey, Value},
};

/// ### [20.2.3 Properties of the Function Prototype Object](https://tc39.es/ecma262/#sec-properties-of-the-function-prototype-object)
///
/// The Function prototype object is itself a built-in function object that
/// accepts any arguments and returns undefined when invoked. Its
/// \[\[Prototype]] is %Object.prototype% and it has no `prototype` property.
pub(crate) fn create_function_prototype(
    agent: &mut Agent,
    realm: Realm,
    object_prototype: Object,
) -> Object {
    create_builtin_function(
        agent,
        Behaviour::Regular(function_prototype_behaviour),
        BuiltinFunctionArgs::new(0, "")
            .with_realm(realm)
            .with_prototype(object_prototype),
    )
}

fn function_prototype_behaviour(
    _agent: &mut Agent,
    _this_value: Value,
    _arguments: ArgumentsList,
) -> JsResult<Value> {
    Ok(Value::Undefined)
}

pub(crate) fn create_prototype_methods(agent: &mut Agent, builder: &IntrinsicsBuilder) {
    let function_prototype = builder.function_prototype();
    builder.method(agent, function_prototype, "call", 1, function_prototype_call);
}

/// ### [20.2.3.3 Function.prototype.call ( thisArg, ...args )](https://tc39.es/ecma262/#sec-function.prototype.call)
fn function_prototype_call(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let func be the this value.
    // 2. If IsCallable(func) is false, throw a TypeError exception.
    if !is_callable(agent, this_value) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Function.prototype.call called on a non-callable value",
        ));
    }
    // 3. Perform PrepareForTailCall().
    // 4. Return ? Call(func, thisArg, args).
    let (this_arg, args) = match arguments.split_first() {
        Some((this_arg, args)) => (*this_arg, args),
        None => (Value::Undefined, &[][..]),
    };
    call(agent, this_value, this_arg, Some(args))
}

/// ### [10.2.4.1 %ThrowTypeError% ( )](https://tc39.es/ecma262/#sec-%throwtypeerror%)
///
/// The `length` and `name` properties are non-configurable and the function
/// is not extensible.
pub(crate) fn create_throw_type_error(agent: &mut Agent, builder: &IntrinsicsBuilder) -> Object {
    let function = builder.function(agent, "", 0, Behaviour::Regular(throw_type_error));
    for name in ["length", "name"] {
        let key = PropertyKey::from_str(agent, name);
        if let Some(entry) = agent[function].find_property_mut(key) {
            entry.configurable = false;
        }
    }
    agent[function].extensible = false;
    function
}

fn throw_type_error(
    agent: &mut Agent,
    _this_value: Value,
    _arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Throw a TypeError exception.
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "'caller', 'callee', and 'arguments' properties may not be accessed",
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{call_function, get},
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    fn this_and_first(agent: &mut Agent, this: Value, args: ArgumentsList) -> JsResult<Value> {
        let Value::Number(this) = this else {
            return Err(agent.throw_exception_with_static_message(ExceptionType::TypeError, "this"));
        };
        let Value::Number(first) = args.get(0) else {
            return Ok(Value::from(this));
        };
        Ok(Value::from(this + first))
    }

    #[test]
    fn function_prototype_is_callable_and_returns_undefined() {
        let mut agent = agent();
        let function_prototype = agent
            .current_realm_record()
            .intrinsics()
            .function_prototype();
        assert!(function_prototype.is_callable(&agent));
        assert!(!function_prototype.is_constructor(&agent));
        assert_eq!(
            call_function(&mut agent, function_prototype, Value::Null, None).unwrap(),
            Value::Undefined
        );
    }

    #[test]
    fn call_forwards_this_and_arguments() {
        let mut agent = agent();
        let f = create_builtin_function(
            &mut agent,
            Behaviour::Regular(this_and_first),
            BuiltinFunctionArgs::new(1, "f"),
        );
        let key = PropertyKey::from_str(&mut agent, "call");
        let Value::Object(call) = get(&mut agent, f, key).unwrap() else {
            panic!("Function.prototype.call is missing");
        };
        let result = call_function(
            &mut agent,
            call,
            f.into_value(),
            Some(&[Value::from(2), Value::from(3)]),
        )
        .unwrap();
        assert_eq!(result, Value::from(5));
        assert!(call_function(&mut agent, call, Value::from(1), None).is_err());
    }

    #[test]
    fn throw_type_error_is_frozen() {
        let mut agent = agent();
        let thrower = agent.current_realm_record().intrinsics().throw_type_error();
        assert!(!agent[thrower].extensible);
        let length = PropertyKey::from_str(&mut agent, "length");
        let descriptor = thrower
            .internal_get_own_property(&mut agent, length)
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.configurable, Some(false));
        let error = call_function(&mut agent, thrower, Value::Undefined, None).unwrap_err();
        assert!(error.to_string(&mut agent).starts_with("TypeError"));
    }
}
