// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use core::{fmt, ops::Deref};
use std::rc::Rc;

use crate::ecmascript::{
    execution::{Agent, ExecutionContext, JsResult, Realm, agent::ExceptionType},
    types::{Object, ObjectHeapData, ObjectKind, PropertyKey, String, Value},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub(crate) &'a [Value]);

impl<'a> ArgumentsList<'a> {
    pub fn new(arguments: &'a [Value]) -> Self {
        Self(arguments)
    }

    /// The argument at `index`, or undefined if it was not passed.
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        self.0.get(index).copied().unwrap_or(Value::Undefined)
    }
}

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>;
pub type ConstructorFn =
    fn(&mut Agent, Value, ArgumentsList<'_>, Option<Object>) -> JsResult<Value>;
/// Host-supplied native steps that need to capture state.
pub type NativeClosure = Rc<dyn Fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>>;

#[derive(Clone)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
    Closure(NativeClosure),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behaviour::Regular(_) => f.write_str("Regular"),
            Behaviour::Constructor(_) => f.write_str("Constructor"),
            Behaviour::Closure(_) => f.write_str("Closure"),
        }
    }
}

#[derive(Debug, Default)]
pub struct BuiltinFunctionArgs {
    pub length: u32,
    pub name: &'static str,
    pub realm: Option<Realm>,
    pub prototype: Option<Object>,
    pub prefix: Option<&'static str>,
}

impl BuiltinFunctionArgs {
    pub fn new(length: u32, name: &'static str) -> Self {
        Self {
            length,
            name,
            ..Default::default()
        }
    }

    pub fn with_realm(mut self, realm: Realm) -> Self {
        self.realm = Some(realm);
        self
    }

    pub fn with_prototype(mut self, prototype: Object) -> Self {
        self.prototype = Some(prototype);
        self
    }

    pub fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BuiltinFunctionHeapData {
    pub(crate) behaviour: Behaviour,
    /// ### \[\[Realm]]
    pub(crate) realm: Realm,
    /// ### \[\[InitialName]]
    pub(crate) initial_name: Option<String>,
}

impl BuiltinFunctionHeapData {
    /// A builtin function has the \[\[Construct]] method if its behaviour is
    /// a constructor behaviour.
    pub(crate) fn is_constructor(&self) -> bool {
        self.behaviour.is_constructor()
    }
}

/// ### [10.3.3 BuiltinCallOrConstruct ( F, thisArgument, argumentsList, newTarget )](https://tc39.es/ecma262/#sec-builtincallorconstruct)
///
/// The abstract operation BuiltinCallOrConstruct takes arguments F (a built-in
/// function object), thisArgument (an ECMAScript language value or
/// uninitialized), argumentsList (a List of ECMAScript language values), and
/// newTarget (a constructor or undefined) and returns either a normal
/// completion containing an ECMAScript language value or a throw completion.
pub fn builtin_call_or_construct(
    agent: &mut Agent,
    f: Object,
    this_argument: Option<Value>,
    arguments_list: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    let ObjectKind::BuiltinFunction(heap_data) = &agent[f].kind else {
        panic!("BuiltinCallOrConstruct on a non-builtin function");
    };
    // 5. Let calleeRealm be F.[[Realm]].
    let callee_realm = heap_data.realm;
    let behaviour = heap_data.behaviour.clone();
    // 1. Let callerContext be the running execution context.
    // 2. If callerContext is not already suspended, suspend callerContext.
    // 3. Let calleeContext be a new execution context.
    let callee_context = ExecutionContext {
        // 4. Set the Function of calleeContext to F.
        function: Some(f),
        // 6. Set the Realm of calleeContext to calleeRealm.
        // 7. Set the ScriptOrModule of calleeContext to null.
        // 8. Perform any necessary implementation-defined initialization of
        //    calleeContext.
        ..ExecutionContext::new(callee_realm)
    };
    // 9. Push calleeContext onto the execution context stack; calleeContext
    //    is now the running execution context.
    // 12. Remove calleeContext from the execution context stack and restore
    //     callerContext as the running execution context.
    agent.run_in_execution_context(callee_context, |agent| {
        // 10. Let result be the Completion Record that is the result of
        //     evaluating F in a manner that conforms to the specification of
        //     F. If thisArgument is uninitialized, the this value is
        //     uninitialized; otherwise, thisArgument provides the this value.
        //     argumentsList provides the named parameters. newTarget provides
        //     the NewTarget value.
        let this_argument = this_argument.unwrap_or(Value::Undefined);
        match behaviour {
            Behaviour::Constructor(func) => func(agent, this_argument, arguments_list, new_target),
            _ if new_target.is_some() => Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Not a constructor",
            )),
            Behaviour::Regular(func) => func(agent, this_argument, arguments_list),
            Behaviour::Closure(func) => func(agent, this_argument, arguments_list),
        }
    })
    // 13. Return ? result.
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
///
/// The abstract operation CreateBuiltinFunction takes arguments behaviour (an
/// Abstract Closure, a set of algorithm steps, or some other definition of a
/// function's behaviour provided in this specification), length (a
/// non-negative integer or +∞), name (a property key or a Private Name), and
/// additionalInternalSlotsList (a List of names of internal slots) and
/// optional arguments realm (a Realm Record), prototype (an Object or null),
/// and prefix (a String) and returns a function object.
pub fn create_builtin_function(
    agent: &mut Agent,
    behaviour: Behaviour,
    args: BuiltinFunctionArgs,
) -> Object {
    // 1. If realm is not present, set realm to the current Realm Record.
    let realm = args.realm.unwrap_or_else(|| agent.current_realm());
    // 2. If prototype is not present, set prototype to
    //    realm.[[Intrinsics]].[[%Function.prototype%]].
    let prototype = args
        .prototype
        .unwrap_or_else(|| agent[realm].intrinsics().function_prototype());
    // 11. If prefix is not present, then
    //     a. Perform SetFunctionName(func, name).
    // 12. Else,
    //     a. Perform SetFunctionName(func, name, prefix).
    let initial_name = match args.prefix {
        Some(prefix) => String::from_string(agent, format!("{prefix} {}", args.name)),
        None => String::from_str(agent, args.name),
    };
    let length_key = PropertyKey::from_str(agent, "length");
    let name_key = PropertyKey::from_str(agent, "name");

    // 5. Let func be a new built-in function object that, when called,
    //    performs the action described by behaviour using the provided
    //    arguments as the values of the corresponding parameters specified
    //    by behaviour. The new function object has internal slots whose
    //    names are the elements of internalSlotsList, and an [[InitialName]]
    //    internal slot.
    // 6. Set func.[[Prototype]] to prototype.
    // 7. Set func.[[Extensible]] to true.
    // 8. Set func.[[Realm]] to realm.
    // 9. Set func.[[InitialName]] to null.
    let mut data = ObjectHeapData::new(
        Some(prototype),
        ObjectKind::BuiltinFunction(BuiltinFunctionHeapData {
            behaviour,
            realm,
            initial_name: Some(initial_name),
        }),
    );
    // 10. Perform SetFunctionLength(func, length).
    data.push_data_property(length_key, Value::from(args.length), false, false, true);
    data.push_data_property(name_key, initial_name.into_value(), false, false, true);
    // 13. Return func.
    agent.heap.create_object(data)
}
