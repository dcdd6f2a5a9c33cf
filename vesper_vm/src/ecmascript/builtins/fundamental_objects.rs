// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20 Fundamental Objects](https://tc39.es/ecma262/#sec-fundamental-objects)
//!
//! Together with the primitive wrapper constructors and the global
//! functions, these are the intrinsics every realm is created with.

pub(crate) mod boolean_objects;
pub(crate) mod function_objects;
pub(crate) mod global_functions;
pub(crate) mod number_objects;
pub(crate) mod object_objects;
pub(crate) mod string_objects;
pub(crate) mod symbol_objects;

use crate::ecmascript::{
    builtins::primitive_objects::{PrimitiveObjectData, primitive_object_data},
    execution::{Agent, JsResult, agent::ExceptionType},
    types::Value,
};

/// The thisBooleanValue, thisNumberValue, thisStringValue and
/// thisSymbolValue abstract operations: `value` itself if it is a primitive
/// of the wanted type, else the data of a matching wrapper object.
pub(crate) fn this_primitive_value<T>(
    agent: &mut Agent,
    value: Value,
    extract: fn(PrimitiveObjectData) -> Option<T>,
    error_message: &'static str,
) -> JsResult<T> {
    let data = match value {
        Value::Boolean(data) => Some(PrimitiveObjectData::Boolean(data)),
        Value::Number(data) => Some(PrimitiveObjectData::Number(data)),
        Value::String(data) => Some(PrimitiveObjectData::String(data)),
        Value::Symbol(data) => Some(PrimitiveObjectData::Symbol(data)),
        Value::Object(object) => primitive_object_data(agent, object),
        Value::Undefined | Value::Null => None,
    };
    data.and_then(extract).ok_or_else(|| {
        agent.throw_exception_with_static_message(ExceptionType::TypeError, error_message)
    })
}
