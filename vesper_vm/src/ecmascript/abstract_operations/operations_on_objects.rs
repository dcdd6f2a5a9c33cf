// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)

use super::{testing_and_comparison::is_callable, type_conversion::to_object};
use crate::ecmascript::{
    builtins::ArgumentsList,
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{Object, PropertyDescriptor, PropertyKey, Value},
};

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of a
/// specific property of an object.
pub fn get(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<Value> {
    // 1. Return ? O.[[Get]](P, O).
    o.internal_get(agent, p, o.into_value())
}

/// ### [7.3.3 GetV ( V, P )](https://tc39.es/ecma262/#sec-getv)
///
/// The abstract operation GetV takes arguments V (an ECMAScript language
/// value) and P (a property key) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion. If the value
/// is not an object, the property lookup is performed using a wrapper object
/// appropriate for the type of the value.
pub fn get_v(agent: &mut Agent, v: Value, p: PropertyKey) -> JsResult<Value> {
    // 1. Let O be ? ToObject(V).
    let o = to_object(agent, v)?;
    // 2. Return ? O.[[Get]](P, V).
    o.internal_get(agent, p, v)
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
///
/// The abstract operation Set takes arguments O (an Object), P (a property
/// key), V (an ECMAScript language value), and Throw (a Boolean) and returns
/// either a normal completion containing UNUSED or a throw completion. It is
/// used to set the value of a specific property of an object. V is the new
/// value for the property.
pub fn set(agent: &mut Agent, o: Object, p: PropertyKey, v: Value, throw: bool) -> JsResult<()> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    let success = o.internal_set(agent, p, v, o.into_value())?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not set property",
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
///
/// > NOTE: This abstract operation creates a property whose attributes are set
/// > to the same defaults used for properties created by the ECMAScript
/// > language assignment operator. Normally, the property will not already
/// > exist. If it does exist and is not configurable or if O is not
/// > extensible, \[\[DefineOwnProperty]] will return false.
pub fn create_data_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
    let new_desc = PropertyDescriptor {
        value: Some(value),
        writable: Some(true),
        get: None,
        set: None,
        enumerable: Some(true),
        configurable: Some(true),
    };
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    object.internal_define_own_property(agent, property_key, new_desc)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub fn create_data_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<()> {
    // 1. Let success be ? CreateDataProperty(O, P, V).
    let success = create_data_property(agent, object, property_key, value)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not create property",
        ))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.8 CreateNonEnumerableDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createnonenumerabledatapropertyorthrow)
///
/// Only for ordinary extensible objects without non-configurable
/// properties, where the definition cannot fail.
pub fn create_non_enumerable_data_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) {
    // 1. Assert: O is an ordinary, extensible object with no non-configurable properties.
    debug_assert!(agent[object].extensible);
    // 2. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: true }.
    let new_desc = PropertyDescriptor {
        value: Some(value),
        writable: Some(true),
        get: None,
        set: None,
        enumerable: Some(false),
        configurable: Some(true),
    };
    // 3. Perform ! DefinePropertyOrThrow(O, P, newDesc).
    let Ok(()) = define_property_or_throw(agent, object, property_key, new_desc) else {
        panic!("defining a non-enumerable data property cannot fail");
    };
}

/// ### [7.3.9 DefinePropertyOrThrow ( O, P, desc )](https://tc39.es/ecma262/#sec-definepropertyorthrow)
///
/// The abstract operation DefinePropertyOrThrow takes arguments O (an Object),
/// P (a property key), and desc (a Property Descriptor) and returns either a
/// normal completion containing UNUSED or a throw completion. It is used to
/// call the \[\[DefineOwnProperty]] internal method of an object in a manner
/// that will throw a TypeError exception if the requested property update
/// cannot be performed.
pub fn define_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    desc: PropertyDescriptor,
) -> JsResult<()> {
    // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
    let success = object.internal_define_own_property(agent, property_key, desc)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot redefine property",
        ))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.10 DeletePropertyOrThrow ( O, P )](https://tc39.es/ecma262/#sec-deletepropertyorthrow)
pub fn delete_property_or_throw(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<()> {
    // 1. Let success be ? O.[[Delete]](P).
    let success = o.internal_delete(agent, p)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot delete property",
        ))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.11 GetMethod ( V, P )](https://tc39.es/ecma262/#sec-getmethod)
///
/// The abstract operation GetMethod takes arguments V (an ECMAScript language
/// value) and P (a property key) and returns either a normal completion
/// containing either a function object or undefined, or a throw completion. It
/// is used to get the value of a specific property of an ECMAScript language
/// value when the value of the property is expected to be a function.
pub fn get_method(agent: &mut Agent, v: Value, p: PropertyKey) -> JsResult<Option<Object>> {
    // 1. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 2. If func is either undefined or null, return undefined.
    if func.is_nullish() {
        return Ok(None);
    }
    // 3. If IsCallable(func) is false, throw a TypeError exception.
    // 4. Return func.
    match func {
        Value::Object(func) if func.is_callable(agent) => Ok(Some(func)),
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not a callable object",
        )),
    }
}

/// ### [7.3.12 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
///
/// The property may be either own or inherited.
pub fn has_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Return ? O.[[HasProperty]](P).
    o.internal_has_property(agent, p)
}

/// ### [7.3.13 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
pub fn has_own_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let desc = o.internal_get_own_property(agent, p)?;
    // 2. If desc is undefined, return false.
    // 3. Return true.
    Ok(desc.is_some())
}

/// ### [7.3.14 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// The abstract operation Call takes arguments F (an ECMAScript language
/// value) and V (an ECMAScript language value) and optional argument
/// argumentsList (a List of ECMAScript language values) and returns either a
/// normal completion containing an ECMAScript language value or a throw
/// completion. It is used to call the \[\[Call]] internal method of a function
/// object. F is the function object, V is an ECMAScript language value that is
/// the this value of the \[\[Call]], and argumentsList is the value passed to
/// the corresponding argument of the internal method. If argumentsList is not
/// present, a new empty List is used as its value.
pub fn call(
    agent: &mut Agent,
    f: Value,
    v: Value,
    arguments_list: Option<&[Value]>,
) -> JsResult<Value> {
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    match f {
        Value::Object(f) if is_callable(agent, f.into_value()) => {
            // 3. Return ? F.[[Call]](V, argumentsList).
            call_function(agent, f, v, arguments_list)
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not a callable object",
        )),
    }
}

/// Abstract operation Call specialized for an Object already known to be a
/// function.
pub fn call_function(
    agent: &mut Agent,
    f: Object,
    v: Value,
    arguments_list: Option<&[Value]>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = ArgumentsList::new(arguments_list.unwrap_or_default());
    f.internal_call(agent, v, arguments_list)
}

/// ### [7.3.15 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
///
/// The abstract operation Construct takes argument F (a constructor) and
/// optional arguments argumentsList (a List of ECMAScript language values)
/// and newTarget (a constructor) and returns either a normal completion
/// containing an Object or a throw completion. It is used to call the
/// \[\[Construct]] internal method of a function object.
pub fn construct(
    agent: &mut Agent,
    f: Object,
    arguments_list: Option<&[Value]>,
    new_target: Option<Object>,
) -> JsResult<Object> {
    // 1. If newTarget is not present, set newTarget to F.
    let new_target = new_target.unwrap_or(f);
    // 2. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = ArgumentsList::new(arguments_list.unwrap_or_default());
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    f.internal_construct(agent, arguments_list, new_target)
}

/// ### [7.3.21 Invoke ( V, P \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-invoke)
pub fn invoke(
    agent: &mut Agent,
    v: Value,
    p: PropertyKey,
    arguments_list: Option<&[Value]>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    // 2. Let func be ? GetV(V, P).
    let func = get_v(agent, v, p)?;
    // 3. Return ? Call(func, V, argumentsList).
    call(agent, func, v, arguments_list)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        builtins::{
            Behaviour, BuiltinFunctionArgs, create_builtin_function, error::error_kind,
            ordinary::ordinary_object_create,
        },
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
        types::String,
    };

    fn new_agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    fn is_type_error(agent: &Agent, value: Value) -> bool {
        let Value::Object(object) = value else {
            return false;
        };
        error_kind(agent, object) == Some(ExceptionType::TypeError)
    }

    #[test]
    fn get_v_reads_through_the_wrapper_prototype() {
        let mut agent = new_agent();
        let string = Value::from_str(&mut agent, "vesper");
        let length = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(get_v(&mut agent, string, length).unwrap(), Value::from(6));
        let to_string_key = PropertyKey::from_str(&mut agent, "toString");
        let method = get_method(&mut agent, string, to_string_key).unwrap();
        assert!(method.is_some());
        let result = invoke(&mut agent, string, to_string_key, None).unwrap();
        assert_eq!(result, string);

        let missing = PropertyKey::from_str(&mut agent, "missing");
        assert_eq!(get_method(&mut agent, string, missing).unwrap(), None);
        let error = get_v(&mut agent, Value::Undefined, missing).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
    }

    #[test]
    fn get_method_rejects_non_callables() {
        let mut agent = new_agent();
        let object = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "notAFunction");
        create_data_property_or_throw(&mut agent, object, key, Value::from(1)).unwrap();
        let error = get_method(&mut agent, object.into_value(), key).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
        let error = call(&mut agent, Value::from(1), Value::Undefined, None).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
    }

    #[test]
    fn set_and_define_failures() {
        let mut agent = new_agent();
        let object = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "fixed");
        let desc = PropertyDescriptor {
            value: Some(Value::from(1)),
            writable: Some(false),
            enumerable: Some(true),
            configurable: Some(false),
            ..Default::default()
        };
        define_property_or_throw(&mut agent, object, key, desc).unwrap();

        // Sloppy writes fail silently, strict writes throw.
        set(&mut agent, object, key, Value::from(2), false).unwrap();
        let error = set(&mut agent, object, key, Value::from(2), true).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
        assert_eq!(get(&mut agent, object, key).unwrap(), Value::from(1));

        assert!(!create_data_property(&mut agent, object, key, Value::from(3)).unwrap());
        let error =
            create_data_property_or_throw(&mut agent, object, key, Value::from(3)).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
        let error = delete_property_or_throw(&mut agent, object, key).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
    }

    #[test]
    fn own_and_inherited_properties() {
        let mut agent = new_agent();
        let parent = ordinary_object_create(&mut agent, None);
        let child = ordinary_object_create(&mut agent, Some(parent));
        let key = PropertyKey::from_str(&mut agent, "inherited");
        create_data_property_or_throw(&mut agent, parent, key, Value::Null).unwrap();
        assert!(has_property(&mut agent, child, key).unwrap());
        assert!(!has_own_property(&mut agent, child, key).unwrap());

        let hidden = PropertyKey::from_str(&mut agent, "hidden");
        create_non_enumerable_data_property_or_throw(&mut agent, child, hidden, Value::from(1));
        let desc = child
            .internal_get_own_property(&mut agent, hidden)
            .unwrap()
            .unwrap();
        assert_eq!(desc.enumerable, Some(false));
        assert_eq!(desc.writable, Some(true));
        delete_property_or_throw(&mut agent, child, hidden).unwrap();
        assert!(!has_own_property(&mut agent, child, hidden).unwrap());
    }

    #[test]
    fn call_passes_this_and_arguments() {
        let mut agent = new_agent();
        fn concat_this(agent: &mut Agent, this: Value, args: ArgumentsList<'_>) -> JsResult<Value> {
            let Value::String(this) = this else {
                return Ok(Value::Undefined);
            };
            let Value::String(arg) = args.get(0) else {
                return Ok(Value::Undefined);
            };
            Ok(String::concat(agent, &[this, arg]).into_value())
        }
        let f = create_builtin_function(
            &mut agent,
            Behaviour::Regular(concat_this),
            BuiltinFunctionArgs::new(1, "concatThis"),
        );
        let this = Value::from_str(&mut agent, "ves");
        let arg = Value::from_str(&mut agent, "per");
        let result = call(&mut agent, f.into_value(), this, Some(&[arg])).unwrap();
        let expected = Value::from_str(&mut agent, "vesper");
        assert_eq!(result, expected);
        let result = call_function(&mut agent, f, this, None).unwrap();
        assert_eq!(result, Value::Undefined);
    }

    #[test]
    fn construct_defaults_new_target() {
        let mut agent = new_agent();
        let intrinsics = agent.current_realm_record().intrinsics();
        let error_ctor = intrinsics.error();
        let error_prototype = intrinsics.error_prototype();
        let object = construct(&mut agent, error_ctor, None, None).unwrap();
        assert_eq!(agent[object].prototype, Some(error_prototype));

        let plain = ordinary_object_create(&mut agent, None);
        let error = construct(&mut agent, plain, None, None).unwrap_err();
        assert!(is_type_error(&agent, error.value()));
    }
}
