// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [22.1 String Objects](https://tc39.es/ecma262/#sec-string-objects)

use super::this_primitive_value;
use crate::ecmascript::{
    abstract_operations::type_conversion::to_string,
    builtins::{
        ArgumentsList,
        builders::IntrinsicsBuilder,
        ordinary::get_prototype_from_constructor,
        primitive_objects::{PrimitiveObjectData, create_primitive_object_with_prototype},
    },
    execution::{Agent, JsResult, ProtoIntrinsics},
    types::{Object, String, Value},
};

/// %String% and %String.prototype%, which is itself a String exotic object
/// whose \[\[StringData]] is the empty String.
pub(crate) fn create_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
) -> (Object, Object) {
    let empty = String::from_str(agent, "");
    let prototype = create_primitive_object_with_prototype(
        agent,
        Some(builder.object_prototype()),
        PrimitiveObjectData::String(empty),
    );
    let constructor = builder.constructor(agent, "String", 1, string_constructor, prototype);
    builder.method(agent, prototype, "toString", 0, value_of);
    builder.method(agent, prototype, "valueOf", 0, value_of);
    (constructor, prototype)
}

/// ### [22.1.1.1 String ( value )](https://tc39.es/ecma262/#sec-string-constructor-string-value)
fn string_constructor(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. If value is not present, then
    let s = if arguments.is_empty() {
        // a. Let s be the empty String.
        String::from_str(agent, "")
    } else {
        // 2. Else,
        let value = arguments.get(0);
        match (new_target, value) {
            // a. If NewTarget is undefined and value is a Symbol, return
            //    SymbolDescriptiveString(value).
            (None, Value::Symbol(symbol)) => {
                return Ok(symbol.descriptive_string(agent).into_value());
            }
            // b. Let s be ? ToString(value).
            _ => to_string(agent, value)?,
        }
    };
    // 3. If NewTarget is undefined, return s.
    let Some(new_target) = new_target else {
        return Ok(s.into_value());
    };
    // 4. Return StringCreate(s, ? GetPrototypeFromConstructor(NewTarget,
    //    "%String.prototype%")).
    let prototype = get_prototype_from_constructor(agent, new_target, ProtoIntrinsics::String)?;
    let object = create_primitive_object_with_prototype(
        agent,
        Some(prototype),
        PrimitiveObjectData::String(s),
    );
    Ok(object.into_value())
}

/// ### [22.1.3.35.1 ThisStringValue ( value )](https://tc39.es/ecma262/#sec-thisstringvalue)
fn this_string_value(agent: &mut Agent, value: Value) -> JsResult<String> {
    this_primitive_value(
        agent,
        value,
        |data| match data {
            PrimitiveObjectData::String(s) => Some(s),
            _ => None,
        },
        "this is not a String",
    )
}

/// ### [22.1.3.35 String.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-string.prototype.valueof)
///
/// String.prototype.toString (22.1.3.29) has the same steps.
fn value_of(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Return ? ThisStringValue(this value).
    this_string_value(agent, this_value).map(String::into_value)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{call_function, construct, get},
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
        types::{PropertyKey, Symbol},
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    fn rendered(agent: &Agent, value: Value) -> &str {
        let Value::String(string) = value else {
            panic!("expected a string, got {value:?}");
        };
        string.as_str(agent)
    }

    #[test]
    fn string_call_converts_and_describes_symbols() {
        let mut agent = agent();
        let string = agent.current_realm_record().intrinsics().string();
        let result = call_function(&mut agent, string, Value::Undefined, None).unwrap();
        assert_eq!(rendered(&agent, result), "");
        let result =
            call_function(&mut agent, string, Value::Undefined, Some(&[Value::from(1.5)])).unwrap();
        assert_eq!(rendered(&agent, result), "1.5");

        let description = String::from_str(&mut agent, "tag");
        let symbol = Symbol::new(&mut agent, Some(description)).into_value();
        let result = call_function(&mut agent, string, Value::Undefined, Some(&[symbol])).unwrap();
        assert_eq!(rendered(&agent, result), "Symbol(tag)");
        // Constructing from a Symbol goes through ToString and throws.
        assert!(construct(&mut agent, string, Some(&[symbol]), None).is_err());
    }

    #[test]
    fn constructed_strings_are_exotic_wrappers() {
        let mut agent = agent();
        let string = agent.current_realm_record().intrinsics().string();
        let abc = Value::from_str(&mut agent, "abc");
        let wrapper = construct(&mut agent, string, Some(&[abc]), None).unwrap();
        let length = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(get(&mut agent, wrapper, length).unwrap(), Value::from(3));
        let one = PropertyKey::from_str(&mut agent, "1");
        let result = get(&mut agent, wrapper, one).unwrap();
        assert_eq!(rendered(&agent, result), "b");
        let result = value_of(&mut agent, wrapper.into_value(), ArgumentsList::default()).unwrap();
        assert_eq!(result, abc);

        let prototype = agent.current_realm_record().intrinsics().string_prototype();
        assert_eq!(get(&mut agent, prototype, length).unwrap(), Value::from(0));
    }
}
