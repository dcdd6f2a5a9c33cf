// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)

use crate::ecmascript::{
    abstract_operations::operations_on_objects::{call_function, get},
    execution::{Agent, JsResult, ProtoIntrinsics, Realm, agent::ExceptionType},
    types::{
        Object, ObjectHeapData, ObjectKind, PropertyDescriptor, PropertyEntry, PropertyKey,
        PropertySlot, Value,
    },
};

/// ### [10.1.1.1 OrdinaryGetPrototypeOf ( O )](https://tc39.es/ecma262/#sec-ordinarygetprototypeof)
pub(crate) fn ordinary_get_prototype_of(agent: &Agent, object: Object) -> Option<Object> {
    // 1. Return O.[[Prototype]].
    agent[object].prototype
}

/// ### [10.1.2.1 OrdinarySetPrototypeOf ( O, V )](https://tc39.es/ecma262/#sec-ordinarysetprototypeof)
pub(crate) fn ordinary_set_prototype_of(
    agent: &mut Agent,
    object: Object,
    prototype: Option<Object>,
) -> bool {
    // 1. Let current be O.[[Prototype]].
    let current = agent[object].prototype;

    // 2. If SameValue(V, current) is true, return true.
    if prototype == current {
        return true;
    }

    // 3. Let extensible be O.[[Extensible]].
    // 4. If extensible is false, return false.
    if !agent[object].extensible {
        return false;
    }

    // 5. Let p be V.
    let mut parent = prototype;
    // 6. Let done be false.
    // 7. Repeat, while done is false,
    while let Some(p) = parent {
        // a. If p is null, then
        //    i. Set done to true.
        // b. Else if SameValue(p, O) is true, then
        if p == object {
            // i. Return false.
            return false;
        }
        // c. Else,
        //    i. If p.[[GetPrototypeOf]] is not the ordinary object internal
        //       method defined in 10.1.1, set done to true.
        //    ii. Else, set p to p.[[Prototype]].
        parent = agent[p].prototype;
    }

    // 8. Set O.[[Prototype]] to V.
    agent[object].prototype = prototype;

    // 9. Return true.
    true
}

/// ### [10.1.3.1 OrdinaryIsExtensible ( O )](https://tc39.es/ecma262/#sec-ordinaryisextensible)
pub(crate) fn ordinary_is_extensible(agent: &Agent, object: Object) -> bool {
    // 1. Return O.[[Extensible]].
    agent[object].extensible
}

/// ### [10.1.4.1 OrdinaryPreventExtensions ( O )](https://tc39.es/ecma262/#sec-ordinarypreventextensions)
pub(crate) fn ordinary_prevent_extensions(agent: &mut Agent, object: Object) -> bool {
    // 1. Set O.[[Extensible]] to false.
    agent[object].extensible = false;

    // 2. Return true.
    true
}

/// ### [10.1.5.1 OrdinaryGetOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinarygetownproperty)
pub(crate) fn ordinary_get_own_property(
    agent: &Agent,
    object: Object,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If O does not have an own property with key P, return undefined.
    // 2. Let D be a newly created Property Descriptor with no fields.
    // 3. Let X be O's own property whose key is P.
    // 4. If X is a data property, then
    //    a. Set D.[[Value]] to the value of X's [[Value]] attribute.
    //    b. Set D.[[Writable]] to the value of X's [[Writable]] attribute.
    // 5. Else,
    //    a. Assert: X is an accessor property.
    //    b. Set D.[[Get]] to the value of X's [[Get]] attribute.
    //    c. Set D.[[Set]] to the value of X's [[Set]] attribute.
    // 6. Set D.[[Enumerable]] to the value of X's [[Enumerable]] attribute.
    // 7. Set D.[[Configurable]] to the value of X's [[Configurable]] attribute.
    // 8. Return D.
    agent[object]
        .find_property(property_key)
        .map(PropertyEntry::to_descriptor)
}

/// ### [10.1.6.1 OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
pub(crate) fn ordinary_define_own_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = ordinary_get_own_property(agent, object, property_key);

    // 2. Let extensible be ? IsExtensible(O).
    let extensible = ordinary_is_extensible(agent, object);

    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc, current).
    validate_and_apply_property_descriptor(
        agent,
        Some(object),
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.2 IsCompatiblePropertyDescriptor ( Extensible, Desc, Current )](https://tc39.es/ecma262/#sec-iscompatiblepropertydescriptor)
pub(crate) fn is_compatible_property_descriptor(
    agent: &mut Agent,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Return ValidateAndApplyPropertyDescriptor(undefined, "", Extensible, Desc, Current).
    let property_key = PropertyKey::from_str(agent, "");
    validate_and_apply_property_descriptor(
        agent,
        None,
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.3 ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )](https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor)
///
/// The abstract operation ValidateAndApplyPropertyDescriptor takes arguments
/// O (an Object or undefined), P (a property key), extensible (a Boolean),
/// Desc (a Property Descriptor), and current (a Property Descriptor or
/// undefined) and returns a Boolean. It returns true if and only if Desc can
/// be applied as the property of an object with specified extensibility and
/// current property current while upholding invariants. When such
/// application is possible and O is not undefined, it is performed for the
/// property named P (which is created if necessary).
fn validate_and_apply_property_descriptor(
    agent: &mut Agent,
    object: Option<Object>,
    property_key: PropertyKey,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Assert: IsPropertyKey(P) is true.

    // 2. If current is undefined, then
    let Some(current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return false;
        }

        // b. If O is undefined, return true.
        let Some(object) = object else {
            return true;
        };

        // c. If IsAccessorDescriptor(Desc) is true, then
        let slot = if descriptor.is_accessor_descriptor() {
            // i. Create an own accessor property named P of object O whose
            //    [[Get]], [[Set]], [[Enumerable]], and [[Configurable]]
            //    attributes are set to the value of the corresponding field
            //    in Desc if Desc has that field, or to the attribute's
            //    default value otherwise.
            PropertySlot::Accessor {
                get: descriptor.get.flatten(),
                set: descriptor.set.flatten(),
            }
        }
        // d. Else,
        else {
            // i. Create an own data property named P of object O whose
            //    [[Value]], [[Writable]], [[Enumerable]], and [[Configurable]]
            //    attributes are set to the value of the corresponding field
            //    in Desc if Desc has that field, or to the attribute's
            //    default value otherwise.
            PropertySlot::Data {
                value: descriptor.value.unwrap_or(Value::Undefined),
                writable: descriptor.writable.unwrap_or(false),
            }
        };
        agent[object].properties.push(PropertyEntry {
            key: property_key,
            slot,
            enumerable: descriptor.enumerable.unwrap_or(false),
            configurable: descriptor.configurable.unwrap_or(false),
        });

        // e. Return true.
        return true;
    };

    // 3. Assert: current is a fully populated Property Descriptor.
    debug_assert!(current.enumerable.is_some() && current.configurable.is_some());

    // 4. If Desc does not have any fields, return true.
    if !descriptor.has_fields() {
        return true;
    }

    // 5. If current.[[Configurable]] is false, then
    if current.configurable == Some(false) {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is
        //    true, return false.
        if descriptor.configurable == Some(true) {
            return false;
        }

        // b. If Desc has an [[Enumerable]] field and Desc.[[Enumerable]] is not
        //    current.[[Enumerable]], return false.
        if descriptor
            .enumerable
            .is_some_and(|enumerable| Some(enumerable) != current.enumerable)
        {
            return false;
        }

        // c. If IsGenericDescriptor(Desc) is false and
        //    IsAccessorDescriptor(Desc) is not IsAccessorDescriptor(current),
        //    return false.
        if !descriptor.is_generic_descriptor()
            && descriptor.is_accessor_descriptor() != current.is_accessor_descriptor()
        {
            return false;
        }

        // d. If IsAccessorDescriptor(current) is true, then
        if current.is_accessor_descriptor() {
            // i. If Desc has a [[Get]] field and SameValue(Desc.[[Get]],
            //    current.[[Get]]) is false, return false.
            if descriptor.get.is_some_and(|get| Some(get) != current.get) {
                return false;
            }

            // ii. If Desc has a [[Set]] field and SameValue(Desc.[[Set]],
            //     current.[[Set]]) is false, return false.
            if descriptor.set.is_some_and(|set| Some(set) != current.set) {
                return false;
            }
        }
        // e. Else if current.[[Writable]] is false, then
        else if current.writable == Some(false) {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is
            //    true, return false.
            if descriptor.writable == Some(true) {
                return false;
            }

            // ii. If Desc has a [[Value]] field and SameValue(Desc.[[Value]],
            //     current.[[Value]]) is false, return false.
            if let (Some(value), Some(current_value)) = (descriptor.value, current.value) {
                if !same_value_for_descriptor(value, current_value) {
                    return false;
                }
            }
        }
    }

    // 6. If O is not undefined, then
    let Some(object) = object else {
        // 7. Return true.
        return true;
    };
    let Some(entry) = agent[object].find_property_mut(property_key) else {
        panic!("ValidateAndApplyPropertyDescriptor: current property vanished");
    };

    // a. If IsDataDescriptor(current) is true and IsAccessorDescriptor(Desc)
    //    is true, then
    if current.is_data_descriptor() && descriptor.is_accessor_descriptor() {
        // i. If Desc has a [[Configurable]] field, let configurable be
        //    Desc.[[Configurable]]; else let configurable be
        //    current.[[Configurable]].
        // ii. If Desc has a [[Enumerable]] field, let enumerable be
        //     Desc.[[Enumerable]]; else let enumerable be
        //     current.[[Enumerable]].
        // iii. Replace the property named P of object O with an accessor
        //      property whose [[Configurable]] and [[Enumerable]] attributes
        //      are set to configurable and enumerable, respectively, and
        //      whose [[Get]] and [[Set]] attributes are set to the value of
        //      the corresponding field in Desc if Desc has that field, or to
        //      the attribute's default value otherwise.
        entry.slot = PropertySlot::Accessor {
            get: descriptor.get.flatten(),
            set: descriptor.set.flatten(),
        };
    }
    // b. Else if IsAccessorDescriptor(current) is true and
    //    IsDataDescriptor(Desc) is true, then
    else if current.is_accessor_descriptor() && descriptor.is_data_descriptor() {
        // iii. Replace the property named P of object O with a data property
        //      whose [[Configurable]] and [[Enumerable]] attributes are set to
        //      configurable and enumerable, respectively, and whose [[Value]]
        //      and [[Writable]] attributes are set to the value of the
        //      corresponding field in Desc if Desc has that field, or to the
        //      attribute's default value otherwise.
        entry.slot = PropertySlot::Data {
            value: descriptor.value.unwrap_or(Value::Undefined),
            writable: descriptor.writable.unwrap_or(false),
        };
    }
    // c. Else,
    else {
        // i. For each field of Desc, set the corresponding attribute of the
        //    property named P of object O to the value of the field.
        match &mut entry.slot {
            PropertySlot::Data { value, writable } => {
                if let Some(new_value) = descriptor.value {
                    *value = new_value;
                }
                if let Some(new_writable) = descriptor.writable {
                    *writable = new_writable;
                }
            }
            PropertySlot::Accessor { get, set } => {
                if let Some(new_get) = descriptor.get {
                    *get = new_get;
                }
                if let Some(new_set) = descriptor.set {
                    *set = new_set;
                }
            }
        }
    }
    if let Some(enumerable) = descriptor.enumerable {
        entry.enumerable = enumerable;
    }
    if let Some(configurable) = descriptor.configurable {
        entry.configurable = configurable;
    }

    // 7. Return true.
    true
}

/// SameValue restricted to the values a descriptor can hold; NaN equals NaN
/// and the zeroes differ.
fn same_value_for_descriptor(x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Number(x), Value::Number(y)) => {
            (x.is_nan() && y.is_nan()) || (x == y && x.is_sign_negative() == y.is_sign_negative())
        }
        _ => x == y,
    }
}

/// ### [10.1.7.1 OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
pub(crate) fn ordinary_has_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    let has_own = object.internal_get_own_property(agent, property_key)?;

    // 2. If hasOwn is not undefined, return true.
    if has_own.is_some() {
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    let parent = object.internal_get_prototype_of(agent)?;

    // 4. If parent is not null, then
    if let Some(parent) = parent {
        // a. Return ? parent.[[HasProperty]](P).
        return parent.internal_has_property(agent, property_key);
    }

    // 5. Return false.
    Ok(false)
}

/// ### [10.1.8.1 OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
pub(crate) fn ordinary_get(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(descriptor) = object.internal_get_own_property(agent, property_key)? else {
        // 2. If desc is undefined, then

        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let Some(parent) = object.internal_get_prototype_of(agent)? else {
            // b. If parent is null, return undefined.
            return Ok(Value::Undefined);
        };

        // c. Return ? parent.[[Get]](P, Receiver).
        return parent.internal_get(agent, property_key, receiver);
    };

    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    if let Some(value) = descriptor.value {
        debug_assert!(descriptor.is_data_descriptor());
        return Ok(value);
    }

    // 4. Assert: IsAccessorDescriptor(desc) is true.
    debug_assert!(descriptor.is_accessor_descriptor());

    // 5. Let getter be desc.[[Get]].
    // 6. If getter is undefined, return undefined.
    let Some(getter) = descriptor.get.flatten() else {
        return Ok(Value::Undefined);
    };

    // 7. Return ? Call(getter, Receiver).
    call_function(agent, getter, receiver, None)
}

/// ### [10.1.9.1 OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
pub(crate) fn ordinary_set(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_descriptor = object.internal_get_own_property(agent, property_key)?;

    // 2. Return ? OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
    ordinary_set_with_own_descriptor(agent, object, property_key, value, receiver, own_descriptor)
}

/// ### [10.1.9.2 OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )](https://tc39.es/ecma262/#sec-ordinarysetwithowndescriptor)
fn ordinary_set_with_own_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
    own_descriptor: Option<PropertyDescriptor>,
) -> JsResult<bool> {
    let own_descriptor = if let Some(own_descriptor) = own_descriptor {
        own_descriptor
    } else {
        // 1. If ownDesc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let parent = object.internal_get_prototype_of(agent)?;

        // b. If parent is not null, then
        if let Some(parent) = parent {
            // i. Return ? parent.[[Set]](P, V, Receiver).
            return parent.internal_set(agent, property_key, value, receiver);
        }
        // c. Else,
        // i. Set ownDesc to the PropertyDescriptor {
        //      [[Value]]: undefined, [[Writable]]: true,
        //      [[Enumerable]]: true, [[Configurable]]: true
        //    }.
        PropertyDescriptor::new_data_descriptor(Value::Undefined, true, true, true)
    };

    // 2. If IsDataDescriptor(ownDesc) is true, then
    if own_descriptor.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if own_descriptor.writable == Some(false) {
            return Ok(false);
        }

        // b. If Receiver is not an Object, return false.
        let Value::Object(receiver) = receiver else {
            return Ok(false);
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        let existing_descriptor = receiver.internal_get_own_property(agent, property_key)?;

        // d. If existingDescriptor is not undefined, then
        if let Some(existing_descriptor) = existing_descriptor {
            // i. If IsAccessorDescriptor(existingDescriptor) is true, return false.
            if existing_descriptor.is_accessor_descriptor() {
                return Ok(false);
            }

            // ii. If existingDescriptor.[[Writable]] is false, return false.
            if existing_descriptor.writable == Some(false) {
                return Ok(false);
            }

            // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
            let value_descriptor = PropertyDescriptor::new_value(value);

            // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            return receiver.internal_define_own_property(agent, property_key, value_descriptor);
        }
        // e. Else,
        else {
            // i. Assert: Receiver does not currently have a property P.
            // ii. Return ? CreateDataProperty(Receiver, P, V).
            let descriptor = PropertyDescriptor::new_data_descriptor(value, true, true, true);
            return receiver.internal_define_own_property(agent, property_key, descriptor);
        }
    }

    // 3. Assert: IsAccessorDescriptor(ownDesc) is true.
    debug_assert!(own_descriptor.is_accessor_descriptor());

    // 4. Let setter be ownDesc.[[Set]].
    // 5. If setter is undefined, return false.
    let Some(setter) = own_descriptor.set.flatten() else {
        return Ok(false);
    };

    // 6. Perform ? Call(setter, Receiver, « V »).
    call_function(agent, setter, receiver, Some(&[value]))?;

    // 7. Return true.
    Ok(true)
}

/// ### [10.1.10.1 OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
pub(crate) fn ordinary_delete(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let descriptor = object.internal_get_own_property(agent, property_key)?;

    // 2. If desc is undefined, return true.
    let Some(descriptor) = descriptor else {
        return Ok(true);
    };

    // 3. If desc.[[Configurable]] is true, then
    if descriptor.configurable == Some(true) {
        // a. Remove the own property with name P from O.
        agent[object].remove_property(property_key);

        // b. Return true.
        return Ok(true);
    }

    // 4. Return false.
    Ok(false)
}

/// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
pub(crate) fn ordinary_own_property_keys(agent: &Agent, object: Object) -> Vec<PropertyKey> {
    let properties = &agent[object].properties;
    // 1. Let keys be a new empty List.
    // 2. For each own property key P of O such that P is an array index, in
    //    ascending numeric index order, do
    //    a. Append P to keys.
    let mut integer_keys = properties
        .iter()
        .filter_map(|entry| entry.key.as_array_index(agent).map(|index| (index, entry.key)))
        .collect::<Vec<_>>();
    integer_keys.sort_unstable_by_key(|(index, _)| *index);
    let mut keys = integer_keys
        .into_iter()
        .map(|(_, key)| key)
        .collect::<Vec<_>>();

    // 3. For each own property key P of O such that P is a String and P is
    //    not an array index, in ascending chronological order of property
    //    creation, do
    //    a. Append P to keys.
    keys.extend(properties.iter().map(|entry| entry.key).filter(|key| {
        matches!(key, PropertyKey::String(_)) && key.as_array_index(agent).is_none()
    }));

    // 4. For each own property key P of O such that P is a Symbol, in
    //    ascending chronological order of property creation, do
    //    a. Append P to keys.
    keys.extend(
        properties
            .iter()
            .map(|entry| entry.key)
            .filter(|key| matches!(key, PropertyKey::Symbol(_))),
    );

    // 5. Return keys.
    keys
}

/// ### [10.1.12 OrdinaryObjectCreate ( proto \[ , additionalInternalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinaryobjectcreate)
///
/// The abstract operation OrdinaryObjectCreate takes argument proto (an Object
/// or null) and optional argument additionalInternalSlotsList (a List of
/// names of internal slots) and returns an Object. It is used to specify the
/// runtime creation of new ordinary objects.
pub fn ordinary_object_create(agent: &mut Agent, proto: Option<Object>) -> Object {
    ordinary_object_create_with_kind(agent, proto, ObjectKind::Ordinary)
}

/// OrdinaryObjectCreate with the additional internal slots of `kind`.
pub(crate) fn ordinary_object_create_with_kind(
    agent: &mut Agent,
    proto: Option<Object>,
    kind: ObjectKind,
) -> Object {
    // 1. Let internalSlotsList be « [[Prototype]], [[Extensible]] ».
    // 2. If additionalInternalSlotsList is present, set internalSlotsList to
    //    the list-concatenation of internalSlotsList and
    //    additionalInternalSlotsList.
    // 3. Let O be MakeBasicObject(internalSlotsList).
    // 4. Set O.[[Prototype]] to proto.
    // 5. Return O.
    agent.heap.create_object(ObjectHeapData::new(proto, kind))
}

/// ### [10.1.13 OrdinaryCreateFromConstructor ( constructor, intrinsicDefaultProto \[ , internalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinarycreatefromconstructor)
///
/// The abstract operation OrdinaryCreateFromConstructor takes arguments
/// constructor (a constructor) and intrinsicDefaultProto (a String) and
/// optional argument internalSlotsList (a List of names of internal slots)
/// and returns either a normal completion containing an Object or a throw
/// completion. It creates an ordinary object whose \[\[Prototype]] value is
/// retrieved from a constructor's "prototype" property, if it exists.
/// Otherwise the intrinsic named by intrinsicDefaultProto is used for
/// \[\[Prototype]].
pub fn ordinary_create_from_constructor(
    agent: &mut Agent,
    constructor: Object,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<Object> {
    ordinary_create_from_constructor_with_kind(
        agent,
        constructor,
        intrinsic_default_proto,
        ObjectKind::Ordinary,
    )
}

pub(crate) fn ordinary_create_from_constructor_with_kind(
    agent: &mut Agent,
    constructor: Object,
    intrinsic_default_proto: ProtoIntrinsics,
    kind: ObjectKind,
) -> JsResult<Object> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    //    intrinsic object. The corresponding object must be an intrinsic that
    //    is intended to be used as the [[Prototype]] value of an object.
    // 2. Let proto be ? GetPrototypeFromConstructor(constructor, intrinsicDefaultProto).
    let proto = get_prototype_from_constructor(agent, constructor, intrinsic_default_proto)?;
    // 3. If internalSlotsList is present, let slotsList be internalSlotsList.
    // 4. Else, let slotsList be a new empty List.
    // 5. Return OrdinaryObjectCreate(proto, slotsList).
    Ok(ordinary_object_create_with_kind(agent, Some(proto), kind))
}

/// ### [10.1.14 GetPrototypeFromConstructor ( constructor, intrinsicDefaultProto )](https://tc39.es/ecma262/#sec-getprototypefromconstructor)
///
/// The abstract operation GetPrototypeFromConstructor takes arguments
/// constructor (a function object) and intrinsicDefaultProto (a String) and
/// returns either a normal completion containing an Object or a throw
/// completion. It determines the \[\[Prototype]] value that should be used to
/// create an object corresponding to a specific constructor. The value is
/// retrieved from the constructor's "prototype" property, if it exists.
/// Otherwise the intrinsic named by intrinsicDefaultProto is used for
/// \[\[Prototype]].
pub fn get_prototype_from_constructor(
    agent: &mut Agent,
    constructor: Object,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<Object> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    //    intrinsic object.
    // 2. Let proto be ? Get(constructor, "prototype").
    let prototype_key = PropertyKey::from_str(agent, "prototype");
    let proto = get(agent, constructor, prototype_key)?;
    match proto {
        Value::Object(proto) => Ok(proto),
        // 3. If proto is not an Object, then
        _ => {
            // a. Let realm be ? GetFunctionRealm(constructor).
            let realm = get_function_realm(agent, constructor)?;
            // b. Set proto to realm's intrinsic object named intrinsicDefaultProto.
            Ok(agent[realm]
                .intrinsics()
                .get_intrinsic_default_proto(intrinsic_default_proto))
        }
    }
    // 4. Return proto.
}

/// ### [7.3.24 GetFunctionRealm ( obj )](https://tc39.es/ecma262/#sec-getfunctionrealm)
pub(crate) fn get_function_realm(agent: &mut Agent, object: Object) -> JsResult<Realm> {
    // 1. If obj has a [[Realm]] internal slot, then
    //    a. Return obj.[[Realm]].
    let realm = match &agent[object].kind {
        ObjectKind::BuiltinFunction(data) => Some(data.realm),
        ObjectKind::ECMAScriptFunction(data) => Some(data.realm),
        _ => None,
    };
    if let Some(realm) = realm {
        return Ok(realm);
    }
    if !object.is_callable(agent) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "GetFunctionRealm called on a non-function",
        ));
    }
    // 4. Return the current Realm Record.
    Ok(agent.current_realm())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        execution::{DefaultHostHooks, agent::Options, initialize_default_realm},
        types::Symbol,
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn prototype_cycles_are_rejected() {
        let mut agent = agent();
        let a = ordinary_object_create(&mut agent, None);
        let b = ordinary_object_create(&mut agent, Some(a));
        assert!(!ordinary_set_prototype_of(&mut agent, a, Some(b)));
        assert!(ordinary_set_prototype_of(&mut agent, b, None));
        assert!(ordinary_set_prototype_of(&mut agent, a, Some(b)));

        ordinary_prevent_extensions(&mut agent, b);
        assert!(!ordinary_set_prototype_of(&mut agent, b, Some(a)));
        // Setting the same prototype succeeds even when non-extensible.
        assert!(ordinary_set_prototype_of(&mut agent, b, None));
    }

    #[test]
    fn non_configurable_properties_resist_redefinition() {
        let mut agent = agent();
        let o = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "frozen");
        let desc = PropertyDescriptor::new_data_descriptor(Value::from(1), false, false, false);
        assert!(ordinary_define_own_property(&mut agent, o, key, desc.clone()));
        // Re-applying the identical descriptor is allowed.
        assert!(ordinary_define_own_property(&mut agent, o, key, desc));
        assert!(!ordinary_define_own_property(
            &mut agent,
            o,
            key,
            PropertyDescriptor::new_value(Value::from(2))
        ));
        assert!(!ordinary_define_own_property(
            &mut agent,
            o,
            key,
            PropertyDescriptor {
                configurable: Some(true),
                ..Default::default()
            }
        ));
        assert!(!ordinary_delete(&mut agent, o, key).unwrap());
        assert_eq!(
            ordinary_get_own_property(&agent, o, key).unwrap().value,
            Some(Value::from(1))
        );
    }

    #[test]
    fn nan_values_compare_equal_for_frozen_properties() {
        let mut agent = agent();
        let o = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "nan");
        let desc = PropertyDescriptor::new_data_descriptor(Value::nan(), false, false, false);
        assert!(ordinary_define_own_property(&mut agent, o, key, desc));
        assert!(ordinary_define_own_property(
            &mut agent,
            o,
            key,
            PropertyDescriptor::new_value(Value::nan())
        ));
        assert!(!is_compatible_property_descriptor(
            &mut agent,
            false,
            PropertyDescriptor::new_value(Value::from(0)),
            None
        ));
    }

    #[test]
    fn data_to_accessor_conversion() {
        let mut agent = agent();
        let o = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "x");
        let desc = PropertyDescriptor::new_data_descriptor(Value::from(1), true, true, true);
        assert!(ordinary_define_own_property(&mut agent, o, key, desc));
        let accessor = PropertyDescriptor {
            get: Some(None),
            ..Default::default()
        };
        assert!(ordinary_define_own_property(&mut agent, o, key, accessor));
        let current = ordinary_get_own_property(&agent, o, key).unwrap();
        assert!(current.is_accessor_descriptor());
        assert_eq!(current.enumerable, Some(true));
        assert_eq!(
            ordinary_get(&mut agent, o, key, o.into_value()).unwrap(),
            Value::Undefined
        );
    }

    #[test]
    fn set_walks_the_prototype_chain_and_defines_on_receiver() {
        let mut agent = agent();
        let proto = ordinary_object_create(&mut agent, None);
        let o = ordinary_object_create(&mut agent, Some(proto));
        let key = PropertyKey::from_str(&mut agent, "inherited");
        let desc = PropertyDescriptor::new_data_descriptor(Value::from(1), true, true, true);
        ordinary_define_own_property(&mut agent, proto, key, desc);

        assert!(ordinary_set(&mut agent, o, key, Value::from(2), o.into_value()).unwrap());
        assert_eq!(
            ordinary_get(&mut agent, proto, key, proto.into_value()).unwrap(),
            Value::from(1)
        );
        assert_eq!(
            ordinary_get(&mut agent, o, key, o.into_value()).unwrap(),
            Value::from(2)
        );
        assert!(!ordinary_set(&mut agent, o, key, Value::from(3), Value::Null).unwrap());

        let read_only = PropertyKey::from_str(&mut agent, "readOnly");
        let desc = PropertyDescriptor::new_data_descriptor(Value::from(1), false, true, true);
        ordinary_define_own_property(&mut agent, proto, read_only, desc);
        assert!(!ordinary_set(&mut agent, o, read_only, Value::from(2), o.into_value()).unwrap());
    }

    #[test]
    fn own_property_key_order() {
        let mut agent = agent();
        let o = ordinary_object_create(&mut agent, None);
        let symbol = Symbol::new(&mut agent, None);
        let names = ["b", "10", "a", "2", "01"];
        let define = |agent: &mut Agent, key: PropertyKey| {
            let desc = PropertyDescriptor::new_data_descriptor(Value::Null, true, true, true);
            assert!(ordinary_define_own_property(agent, o, key, desc));
        };
        define(&mut agent, symbol.into());
        for name in names {
            let key = PropertyKey::from_str(&mut agent, name);
            define(&mut agent, key);
        }
        let keys = ordinary_own_property_keys(&agent, o);
        let rendered = keys
            .iter()
            .map(|key| match key {
                PropertyKey::String(s) => s.as_str(&agent).to_owned(),
                PropertyKey::Symbol(_) => "@@".to_owned(),
            })
            .collect::<Vec<_>>();
        assert_eq!(rendered, ["2", "10", "b", "a", "01", "@@"]);
    }
}
