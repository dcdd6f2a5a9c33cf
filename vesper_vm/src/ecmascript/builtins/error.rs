// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.5 Error Objects](https://tc39.es/ecma262/#sec-error-objects)

use super::{
    ArgumentsList, Behaviour, ConstructorFn,
    builders::IntrinsicsBuilder,
    ordinary::{ordinary_create_from_constructor_with_kind, ordinary_object_create_with_kind},
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{create_non_enumerable_data_property_or_throw, get, has_property},
        type_conversion::to_string,
    },
    execution::{Agent, JsResult, ProtoIntrinsics, agent::ExceptionType},
    types::{Object, ObjectKind, PropertyKey, String, Value},
};

/// Creates an error object of `kind` with the current realm's matching
/// prototype and an optional own `message` property.
pub fn create_error_object(
    agent: &mut Agent,
    kind: ExceptionType,
    message: Option<String>,
) -> Object {
    let prototype = agent
        .current_realm_record()
        .intrinsics()
        .get_intrinsic_default_proto(kind.into());
    let object = ordinary_object_create_with_kind(agent, Some(prototype), ObjectKind::Error(kind));
    if let Some(message) = message {
        let key = PropertyKey::from_str(agent, "message");
        agent[object].push_data_property(key, message.into_value(), true, false, true);
    }
    object
}

/// The \[\[ErrorData]] kind of `object`, if it is an error instance.
pub fn error_kind(agent: &Agent, object: Object) -> Option<ExceptionType> {
    match agent[object].kind {
        ObjectKind::Error(kind) => Some(kind),
        _ => None,
    }
}

/// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
///
/// Steps 3 through 9, applied to an object.
pub fn error_to_string(agent: &mut Agent, object: Object) -> JsResult<String> {
    // 3. Let name be ? Get(O, "name").
    let key = PropertyKey::from_str(agent, "name");
    let name = get(agent, object, key)?;
    // 4. If name is undefined, set name to "Error"; otherwise set name to ? ToString(name).
    let name = if name.is_undefined() {
        String::from_str(agent, "Error")
    } else {
        to_string(agent, name)?
    };
    // 5. Let msg be ? Get(O, "message").
    let key = PropertyKey::from_str(agent, "message");
    let message = get(agent, object, key)?;
    // 6. If msg is undefined, set msg to the empty String; otherwise set msg to ? ToString(msg).
    let message = if message.is_undefined() {
        String::from_str(agent, "")
    } else {
        to_string(agent, message)?
    };
    // 7. If name is the empty String, return msg.
    if name.is_empty(agent) {
        return Ok(message);
    }
    // 8. If msg is the empty String, return name.
    if message.is_empty(agent) {
        return Ok(name);
    }
    // 9. Return the string-concatenation of name, the code unit 0x003A
    //    (COLON), the code unit 0x0020 (SPACE), and msg.
    let separator = String::from_str(agent, ": ");
    Ok(String::concat(agent, &[name, separator, message]))
}

/// ### [20.5.1.1 Error ( message \[ , options \] )](https://tc39.es/ecma262/#sec-error-message)
///
/// Shared by %Error% and the NativeError constructors of 20.5.6.1.1.
fn error_constructor_steps(
    agent: &mut Agent,
    kind: ExceptionType,
    arguments: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 1. If NewTarget is undefined, let newTarget be the active function
    //    object; else let newTarget be NewTarget.
    let Some(new_target) = new_target.or_else(|| {
        agent
            .running_execution_context()
            .and_then(|context| context.function)
    }) else {
        panic!("Error constructor called without an active function");
    };
    // 2. Let O be ? OrdinaryCreateFromConstructor(newTarget,
    //    "%Error.prototype%", « [[ErrorData]] »).
    let object = ordinary_create_from_constructor_with_kind(
        agent,
        new_target,
        ProtoIntrinsics::from(kind),
        ObjectKind::Error(kind),
    )?;
    let message = arguments.get(0);
    // 3. If message is not undefined, then
    if !message.is_undefined() {
        // a. Let msg be ? ToString(message).
        let message = to_string(agent, message)?;
        // b. Perform CreateNonEnumerableDataPropertyOrThrow(O, "message", msg).
        let key = PropertyKey::from_str(agent, "message");
        create_non_enumerable_data_property_or_throw(agent, object, key, message.into_value());
    }
    // 4. Perform ? InstallErrorCause(O, options).
    install_error_cause(agent, object, arguments.get(1))?;
    // 5. Return O.
    Ok(object.into_value())
}

/// ### [20.5.8.1 InstallErrorCause ( O, options )](https://tc39.es/ecma262/#sec-installerrorcause)
fn install_error_cause(agent: &mut Agent, object: Object, options: Value) -> JsResult<()> {
    // 1. If options is an Object and ? HasProperty(options, "cause") is true, then
    let Value::Object(options) = options else {
        return Ok(());
    };
    let key = PropertyKey::from_str(agent, "cause");
    if has_property(agent, options, key)? {
        // a. Let cause be ? Get(options, "cause").
        let cause = get(agent, options, key)?;
        // b. Perform CreateNonEnumerableDataPropertyOrThrow(O, "cause", cause).
        create_non_enumerable_data_property_or_throw(agent, object, key, cause);
    }
    // 2. Return unused.
    Ok(())
}

macro_rules! error_constructor {
    ($name:ident, $kind:expr) => {
        fn $name(
            agent: &mut Agent,
            _this_value: Value,
            arguments: ArgumentsList,
            new_target: Option<Object>,
        ) -> JsResult<Value> {
            error_constructor_steps(agent, $kind, arguments, new_target)
        }
    };
}

error_constructor!(error_constructor, ExceptionType::Error);
error_constructor!(eval_error_constructor, ExceptionType::EvalError);
error_constructor!(range_error_constructor, ExceptionType::RangeError);
error_constructor!(reference_error_constructor, ExceptionType::ReferenceError);
error_constructor!(syntax_error_constructor, ExceptionType::SyntaxError);
error_constructor!(type_error_constructor, ExceptionType::TypeError);
error_constructor!(uri_error_constructor, ExceptionType::UriError);

/// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
fn error_prototype_to_string(
    agent: &mut Agent,
    this_value: Value,
    _arguments: ArgumentsList,
) -> JsResult<Value> {
    // 1. Let O be the this value.
    // 2. If O is not an Object, throw a TypeError exception.
    let Value::Object(object) = this_value else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Error.prototype.toString called on a non-object",
        ));
    };
    error_to_string(agent, object).map(String::into_value)
}

/// %Error% and %Error.prototype%.
pub(crate) fn create_error_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
) -> (Object, Object) {
    // ### [20.5.3 Properties of the Error Prototype Object](https://tc39.es/ecma262/#sec-properties-of-the-error-prototype-object)
    // The Error prototype object is an ordinary object. It is not an Error
    // instance and does not have an [[ErrorData]] internal slot.
    let prototype = builder.object(agent, ObjectKind::Ordinary);
    let constructor = builder.constructor(agent, "Error", 1, error_constructor, prototype);
    let message = Value::from_str(agent, "");
    IntrinsicsBuilder::property(agent, prototype, "message", message);
    let name = Value::from_str(agent, "Error");
    IntrinsicsBuilder::property(agent, prototype, "name", name);
    builder.method(agent, prototype, "toString", 0, error_prototype_to_string);
    (constructor, prototype)
}

/// ### [20.5.6 NativeError Object Structure](https://tc39.es/ecma262/#sec-nativeerror-object-structure)
///
/// The constructor inherits from %Error% and its prototype from
/// %Error.prototype%.
pub(crate) fn create_native_error_intrinsics(
    agent: &mut Agent,
    builder: &IntrinsicsBuilder,
    kind: ExceptionType,
    error: Object,
    error_prototype: Object,
) -> (Object, Object) {
    let behaviour: ConstructorFn = match kind {
        ExceptionType::Error => error_constructor,
        ExceptionType::EvalError => eval_error_constructor,
        ExceptionType::RangeError => range_error_constructor,
        ExceptionType::ReferenceError => reference_error_constructor,
        ExceptionType::SyntaxError => syntax_error_constructor,
        ExceptionType::TypeError => type_error_constructor,
        ExceptionType::UriError => uri_error_constructor,
    };
    let prototype =
        ordinary_object_create_with_kind(agent, Some(error_prototype), ObjectKind::Ordinary);
    let constructor = builder.function_with_prototype(
        agent,
        kind.name(),
        1,
        Behaviour::Constructor(behaviour),
        error,
    );
    IntrinsicsBuilder::link_constructor(agent, constructor, prototype);
    let message = Value::from_str(agent, "");
    IntrinsicsBuilder::property(agent, prototype, "message", message);
    let name = Value::from_str(agent, kind.name());
    IntrinsicsBuilder::property(agent, prototype, "name", name);
    (constructor, prototype)
}
