// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.3 Boolean Objects](https://tc39.es/ecma262/#sec-boolean-objects)

use super::this_primitive_value;
use crate::ecmascript::{
    abstract_operations::type_conversion::to_boolean,
    builtins::{
        ArgumentsList,
        builders::IntrinsicsBuilder,
        ordinary::ordinary_create_from_constructor_with_kind,
        primitive_objects::{PrimitiveObjectData, create_primitive_object_with_prototype},
    },
    execution::{Agent, JsResult, ProtoIntrinsics},
    types::{Object, ObjectKind, Value},
};

/// %Boolean% and %Boolean.prototype%, which is itself a Boolean object
/// whose \[\[BooleanData]] is false.
pub(crate) fn create_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
) -> (Object, Object) {
    let prototype = create_primitive_object_with_prototype(
        agent,
        Some(builder.object_prototype()),
        PrimitiveObjectData::Boolean(false),
    );
    let constructor = builder.constructor(agent, "Boolean", 1, boolean_constructor, prototype);
    builder.method(agent, prototype, "toString", 0, to_string);
    builder.method(agent, prototype, "valueOf", 0, value_of);
    (constructor, prototype)
}

/// ### [20.3.1.1 Boolean ( value )](https://tc39.es/ecma262/#sec-boolean-constructor-boolean-value)
fn boolean_constructor(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. Let b be ToBoolean(value).
    let b = to_boolean(agent, arguments.get(0));
    // 2. If NewTarget is undefined, return b.
    let Some(new_target) = new_target else {
        return Ok(Value::Boolean(b));
    };
    // 3. Let O be ? OrdinaryCreateFromConstructor(NewTarget,
    //    "%Boolean.prototype%", « [[BooleanData]] »).
    // 4. Set O.[[BooleanData]] to b.
    // 5. Return O.
    ordinary_create_from_constructor_with_kind(
        agent,
        new_target,
        ProtoIntrinsics::Boolean,
        ObjectKind::Primitive(PrimitiveObjectData::Boolean(b)),
    )
    .map(Object::into_value)
}

/// ### [20.3.3.3.1 ThisBooleanValue ( value )](https://tc39.es/ecma262/#sec-thisbooleanvalue)
fn this_boolean_value(agent: &mut Agent, value: Value) -> JsResult<bool> {
    this_primitive_value(
        agent,
        value,
        |data| match data {
            PrimitiveObjectData::Boolean(b) => Some(b),
            _ => None,
        },
        "this is not a Boolean",
    )
}

/// ### [20.3.3.2 Boolean.prototype.toString ( )](https://tc39.es/ecma262/#sec-boolean.prototype.tostring)
fn to_string(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Let b be ? ThisBooleanValue(this value).
    let b = this_boolean_value(agent, this_value)?;
    // 2. If b is true, return "true"; else return "false".
    Ok(Value::from_str(agent, if b { "true" } else { "false" }))
}

/// ### [20.3.3.3 Boolean.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-boolean.prototype.valueof)
fn value_of(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Return ? ThisBooleanValue(this value).
    this_boolean_value(agent, this_value).map(Value::Boolean)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{call_function, construct},
        builtins::primitive_objects::primitive_object_data,
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
    };

    #[test]
    fn boolean_call_and_construct() {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        let boolean = agent.current_realm_record().intrinsics().boolean();
        let empty = Value::from_str(&mut agent, "");
        assert_eq!(
            call_function(&mut agent, boolean, Value::Undefined, Some(&[empty])).unwrap(),
            Value::Boolean(false)
        );
        let wrapper = construct(&mut agent, boolean, Some(&[Value::from(1)]), None).unwrap();
        assert_eq!(
            primitive_object_data(&agent, wrapper),
            Some(PrimitiveObjectData::Boolean(true))
        );
        assert_eq!(
            value_of(&mut agent, wrapper.into_value(), ArgumentsList::default()).unwrap(),
            Value::Boolean(true)
        );
        let prototype = agent.current_realm_record().intrinsics().boolean_prototype();
        assert_eq!(
            value_of(&mut agent, prototype.into_value(), ArgumentsList::default()).unwrap(),
            Value::Boolean(false)
        );
        assert!(to_string(&mut agent, Value::from(1), ArgumentsList::default()).is_err());
    }
}
