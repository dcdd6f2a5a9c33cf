// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.1 Object Objects](https://tc39.es/ecma262/#sec-object-objects)

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{get, has_own_property},
        testing_and_comparison::require_object_coercible,
        type_conversion::{to_object, to_property_key},
    },
    builtins::{
        ArgumentsList,
        builders::IntrinsicsBuilder,
        ordinary::{ordinary_create_from_constructor, ordinary_object_create},
        primitive_objects::PrimitiveObjectData,
    },
    execution::{Agent, JsResult, ProtoIntrinsics, agent::ExceptionType},
    types::{Object, ObjectKind, PropertyKey, String, Value},
};
use crate::heap::WellKnownSymbolIndexes;

/// %Object% with its static methods; %Object.prototype% gets its methods
/// here too.
pub(crate) fn create_intrinsics(agent: &mut Agent, builder: &IntrinsicsBuilder) -> Object {
    let prototype = builder.object_prototype();
    let constructor = builder.constructor(agent, "Object", 1, object_constructor, prototype);

    builder.method(agent, constructor, "getPrototypeOf", 1, get_prototype_of);
    builder.method(agent, constructor, "isExtensible", 1, is_extensible);
    builder.method(agent, constructor, "preventExtensions", 1, prevent_extensions);
    builder.method(agent, constructor, "setPrototypeOf", 2, set_prototype_of);

    builder.method(agent, prototype, "hasOwnProperty", 1, has_own_property_method);
    builder.method(agent, prototype, "isPrototypeOf", 1, is_prototype_of);
    builder.method(agent, prototype, "propertyIsEnumerable", 1, property_is_enumerable);
    builder.method(agent, prototype, "toString", 0, to_string);
    builder.method(agent, prototype, "valueOf", 0, value_of);
    constructor
}

/// ### [20.1.1.1 Object ( \[ value \] )](https://tc39.es/ecma262/#sec-object-value)
fn object_constructor(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    let value = arguments.get(0);
    let active_function = agent
        .running_execution_context()
        .and_then(|context| context.function);
    // 1. If NewTarget is neither undefined nor the active function object, then
    if let Some(new_target) = new_target {
        if Some(new_target) != active_function {
            // a. Return ? OrdinaryCreateFromConstructor(NewTarget, "%Object.prototype%").
            return ordinary_create_from_constructor(agent, new_target, ProtoIntrinsics::Object)
                .map(Object::into_value);
        }
    }
    // 2. If value is either undefined or null, return OrdinaryObjectCreate(%Object.prototype%).
    if value.is_nullish() {
        let prototype = agent
            .current_realm_record()
            .intrinsics()
            .object_prototype();
        return Ok(ordinary_object_create(agent, Some(prototype)).into_value());
    }
    // 3. Return ! ToObject(value).
    to_object(agent, value).map(Object::into_value)
}

/// ### [20.1.2.12 Object.getPrototypeOf ( O )](https://tc39.es/ecma262/#sec-object.getprototypeof)
fn get_prototype_of(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let obj be ? ToObject(O).
    let object = to_object(agent, arguments.get(0))?;
    // 2. Return ? obj.[[GetPrototypeOf]]().
    Ok(object
        .internal_get_prototype_of(agent)?
        .map_or(Value::Null, Object::into_value))
}

/// ### [20.1.2.16 Object.isExtensible ( O )](https://tc39.es/ecma262/#sec-object.isextensible)
fn is_extensible(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. If O is not an Object, return false.
    let Value::Object(object) = arguments.get(0) else {
        return Ok(Value::Boolean(false));
    };
    // 2. Return ? IsExtensible(O).
    object.internal_is_extensible(agent).map(Value::Boolean)
}

/// ### [20.1.2.20 Object.preventExtensions ( O )](https://tc39.es/ecma262/#sec-object.preventextensions)
fn prevent_extensions(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. If O is not an Object, return O.
    let Value::Object(object) = arguments.get(0) else {
        return Ok(arguments.get(0));
    };
    // 2. Let status be ? O.[[PreventExtensions]]().
    // 3. If status is false, throw a TypeError exception.
    if !object.internal_prevent_extensions(agent)? {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not prevent extensions",
        ));
    }
    // 4. Return O.
    Ok(object.into_value())
}

/// ### [20.1.2.23 Object.setPrototypeOf ( O, proto )](https://tc39.es/ecma262/#sec-object.setprototypeof)
fn set_prototype_of(
    agent: &mut Agent,
    _this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Set O to ? RequireObjectCoercible(O).
    let value = require_object_coercible(agent, arguments.get(0))?;
    // 2. If proto is not an Object and proto is not null, throw a TypeError exception.
    let prototype = match arguments.get(1) {
        Value::Object(prototype) => Some(prototype),
        Value::Null => None,
        _ => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Object prototype may only be an Object or null",
            ));
        }
    };
    // 3. If O is not an Object, return O.
    let Value::Object(object) = value else {
        return Ok(value);
    };
    // 4. Let status be ? O.[[SetPrototypeOf]](proto).
    // 5. If status is false, throw a TypeError exception.
    if !object.internal_set_prototype_of(agent, prototype)? {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not set prototype",
        ));
    }
    // 6. Return O.
    Ok(value)
}

/// ### [20.1.3.2 Object.prototype.hasOwnProperty ( V )](https://tc39.es/ecma262/#sec-object.prototype.hasownproperty)
fn has_own_property_method(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let P be ? ToPropertyKey(V).
    let property_key = to_property_key(agent, arguments.get(0))?;
    // 2. Let O be ? ToObject(this value).
    let object = to_object(agent, this_value)?;
    // 3. Return ? HasOwnProperty(O, P).
    has_own_property(agent, object, property_key).map(Value::Boolean)
}

/// ### [20.1.3.3 Object.prototype.isPrototypeOf ( V )](https://tc39.es/ecma262/#sec-object.prototype.isprototypeof)
fn is_prototype_of(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. If V is not an Object, return false.
    let Value::Object(mut value) = arguments.get(0) else {
        return Ok(Value::Boolean(false));
    };
    // 2. Let O be ? ToObject(this value).
    let object = to_object(agent, this_value)?;
    // 3. Repeat,
    loop {
        // a. Set V to ? V.[[GetPrototypeOf]]().
        // b. If V is null, return false.
        let Some(prototype) = value.internal_get_prototype_of(agent)? else {
            return Ok(Value::Boolean(false));
        };
        // c. If SameValue(O, V) is true, return true.
        if prototype == object {
            return Ok(Value::Boolean(true));
        }
        value = prototype;
    }
}

/// ### [20.1.3.4 Object.prototype.propertyIsEnumerable ( V )](https://tc39.es/ecma262/#sec-object.prototype.propertyisenumerable)
fn property_is_enumerable(
    agent: &mut Agent,
    this_value: Value,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let P be ? ToPropertyKey(V).
    let property_key = to_property_key(agent, arguments.get(0))?;
    // 2. Let O be ? ToObject(this value).
    let object = to_object(agent, this_value)?;
    // 3. Let desc be ? O.[[GetOwnProperty]](P).
    // 4. If desc is undefined, return false.
    // 5. Return desc.[[Enumerable]].
    let descriptor = object.internal_get_own_property(agent, property_key)?;
    Ok(Value::Boolean(
        descriptor.is_some_and(|descriptor| descriptor.enumerable == Some(true)),
    ))
}

/// ### [20.1.3.6 Object.prototype.toString ( )](https://tc39.es/ecma262/#sec-object.prototype.tostring)
fn to_string(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. If the this value is undefined, return "[object Undefined]".
    if this_value.is_undefined() {
        return Ok(Value::from_str(agent, "[object Undefined]"));
    }
    // 2. If the this value is null, return "[object Null]".
    if this_value.is_null() {
        return Ok(Value::from_str(agent, "[object Null]"));
    }
    // 3. Let O be ! ToObject(this value).
    let object = to_object(agent, this_value)?;
    // 4. Let isArray be ? IsArray(O).
    // 5-14. Let builtinTag be the tag of O's internal slots.
    let builtin_tag = match agent[object].kind {
        ObjectKind::Error(_) => "Error",
        ObjectKind::BuiltinFunction(_) | ObjectKind::ECMAScriptFunction(_) => "Function",
        ObjectKind::Primitive(PrimitiveObjectData::Boolean(_)) => "Boolean",
        ObjectKind::Primitive(PrimitiveObjectData::Number(_)) => "Number",
        ObjectKind::Primitive(PrimitiveObjectData::String(_)) => "String",
        ObjectKind::Primitive(PrimitiveObjectData::Symbol(_)) | ObjectKind::Ordinary => "Object",
    };
    // 15. Let tag be ? Get(O, %Symbol.toStringTag%).
    let tag = get(
        agent,
        object,
        PropertyKey::from(WellKnownSymbolIndexes::ToStringTag),
    )?;
    // 16. If tag is not a String, set tag to builtinTag.
    let tag = match tag {
        Value::String(tag) => tag.as_str(agent).to_owned(),
        _ => builtin_tag.to_owned(),
    };
    // 17. Return the string-concatenation of "[object ", tag, and "]".
    Ok(String::from_string(agent, format!("[object {tag}]")).into_value())
}

/// ### [20.1.3.7 Object.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-object.prototype.valueof)
fn value_of(agent: &mut Agent, this_value: Value, _arguments: ArgumentsList) -> JsResult<Value> {
    // 1. Return ? ToObject(this value).
    to_object(agent, this_value).map(Object::into_value)
}
