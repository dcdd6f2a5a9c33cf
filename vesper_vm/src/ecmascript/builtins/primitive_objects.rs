// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean, Number, String and Symbol wrapper objects.
//!
//! String wrappers are exotic: they expose one read-only, enumerable
//! property per UTF-16 code unit of their \[\[StringData]].

use super::ordinary::{
    is_compatible_property_descriptor, ordinary_define_own_property, ordinary_get_own_property,
    ordinary_object_create_with_kind, ordinary_own_property_keys,
};
use crate::ecmascript::{
    execution::{Agent, ProtoIntrinsics},
    types::{Object, ObjectKind, PropertyDescriptor, PropertyKey, String, Symbol, Value},
};

/// The \[\[BooleanData]], \[\[NumberData]], \[\[StringData]] or
/// \[\[SymbolData]] internal slot of a wrapper object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveObjectData {
    Boolean(bool),
    Number(f64),
    String(String),
    Symbol(Symbol),
}

impl PrimitiveObjectData {
    pub fn into_value(self) -> Value {
        match self {
            PrimitiveObjectData::Boolean(data) => Value::Boolean(data),
            PrimitiveObjectData::Number(data) => Value::Number(data),
            PrimitiveObjectData::String(data) => Value::String(data),
            PrimitiveObjectData::Symbol(data) => Value::Symbol(data),
        }
    }

    fn proto_intrinsic(self) -> ProtoIntrinsics {
        match self {
            PrimitiveObjectData::Boolean(_) => ProtoIntrinsics::Boolean,
            PrimitiveObjectData::Number(_) => ProtoIntrinsics::Number,
            PrimitiveObjectData::String(_) => ProtoIntrinsics::String,
            PrimitiveObjectData::Symbol(_) => ProtoIntrinsics::Symbol,
        }
    }
}

/// Wrap a primitive using the current realm's matching prototype.
pub fn create_primitive_object(agent: &mut Agent, data: PrimitiveObjectData) -> Object {
    let prototype = agent
        .current_realm_record()
        .intrinsics()
        .get_intrinsic_default_proto(data.proto_intrinsic());
    create_primitive_object_with_prototype(agent, Some(prototype), data)
}

pub(crate) fn create_primitive_object_with_prototype(
    agent: &mut Agent,
    prototype: Option<Object>,
    data: PrimitiveObjectData,
) -> Object {
    let object =
        ordinary_object_create_with_kind(agent, prototype, ObjectKind::Primitive(data));
    if let PrimitiveObjectData::String(string) = data {
        // ### [10.4.3.4 StringCreate ( value, prototype )](https://tc39.es/ecma262/#sec-stringcreate)
        // 8. Let length be the length of value.
        // 9. Perform ! DefinePropertyOrThrow(S, "length", PropertyDescriptor {
        //    [[Value]]: 𝔽(length), [[Writable]]: false, [[Enumerable]]: false,
        //    [[Configurable]]: false }).
        let length = string.utf16_len(agent) as f64;
        let key = PropertyKey::from_str(agent, "length");
        agent[object].push_data_property(key, Value::Number(length), false, false, false);
    }
    object
}

/// The wrapped primitive, if `object` is a wrapper object.
pub fn primitive_object_data(agent: &Agent, object: Object) -> Option<PrimitiveObjectData> {
    match agent[object].kind {
        ObjectKind::Primitive(data) => Some(data),
        _ => None,
    }
}

/// ### [10.4.3.1 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-string-exotic-objects-getownproperty-p)
pub(crate) fn string_exotic_get_own_property(
    agent: &mut Agent,
    object: Object,
    string: String,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. Let desc be OrdinaryGetOwnProperty(S, P).
    // 2. If desc is not undefined, return desc.
    if let Some(descriptor) = ordinary_get_own_property(agent, object, property_key) {
        return Some(descriptor);
    }
    // 3. Return StringGetOwnProperty(S, P).
    string_get_own_property(agent, string, property_key)
}

/// ### [10.4.3.5 StringGetOwnProperty ( S, P )](https://tc39.es/ecma262/#sec-stringgetownproperty)
fn string_get_own_property(
    agent: &mut Agent,
    string: String,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If P is not a String, return undefined.
    // 2. Let index be CanonicalNumericIndexString(P).
    // 3. If index is not an integral Number, return undefined.
    // 4. If index is -0𝔽 or index < -0𝔽, return undefined.
    let index = property_key.as_array_index(agent)?;
    // 5. Let str be S.[[StringData]].
    // 6. Assert: str is a String.
    // 7. Let len be the length of str.
    // 8. If ℝ(index) ≥ len, return undefined.
    // 9. Let resultStr be the substring of str from ℝ(index) to ℝ(index) + 1.
    let result = string.code_unit_at(agent, index as usize)?;
    // 10. Return the PropertyDescriptor { [[Value]]: resultStr,
    //     [[Writable]]: false, [[Enumerable]]: true, [[Configurable]]: false }.
    Some(PropertyDescriptor::new_data_descriptor(
        result.into_value(),
        false,
        true,
        false,
    ))
}

/// ### [10.4.3.2 \[\[DefineOwnProperty\]\] ( P, Desc )](https://tc39.es/ecma262/#sec-string-exotic-objects-defineownproperty-p-desc)
pub(crate) fn string_exotic_define_own_property(
    agent: &mut Agent,
    object: Object,
    string: String,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    // 1. Let stringDesc be StringGetOwnProperty(S, P).
    // 2. If stringDesc is not undefined, then
    if let Some(string_descriptor) = string_get_own_property(agent, string, property_key) {
        // a. Let extensible be S.[[Extensible]].
        // b. Return IsCompatiblePropertyDescriptor(extensible, Desc, stringDesc).
        let extensible = agent[object].extensible;
        return is_compatible_property_descriptor(
            agent,
            extensible,
            descriptor,
            Some(string_descriptor),
        );
    }
    // 3. Return ! OrdinaryDefineOwnProperty(S, P, Desc).
    ordinary_define_own_property(agent, object, property_key, descriptor)
}

/// ### [10.4.3.3 \[\[OwnPropertyKeys\]\] ( )](https://tc39.es/ecma262/#sec-string-exotic-objects-ownpropertykeys)
pub(crate) fn string_exotic_own_property_keys(
    agent: &mut Agent,
    object: Object,
    string: String,
) -> Vec<PropertyKey> {
    // 1. Let keys be a new empty List.
    // 2. Let str be O.[[StringData]].
    // 3. Assert: str is a String.
    // 4. Let len be the length of str.
    let len = string.utf16_len(agent);
    // 5. For each integer i such that 0 ≤ i < len, in ascending order, do
    //    a. Append ! ToString(𝔽(i)) to keys.
    let mut keys = (0..len)
        .map(|index| PropertyKey::from_str(agent, &index.to_string()))
        .collect::<Vec<_>>();
    // 6. For each own property key P of O such that P is an array index and
    //    ToIntegerOrInfinity(P) ≥ len, in ascending numeric index order, do
    // 7. For each own property key P of O such that P is a String and P is not
    //    an array index, in ascending chronological order of property creation, do
    // 8. For each own property key P of O such that P is a Symbol, in
    //    ascending chronological order of property creation, do
    keys.extend(ordinary_own_property_keys(agent, object));
    // 9. Return keys.
    keys
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::{
        DefaultHostHooks, agent::Options, initialize_default_realm,
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn string_wrapper_exposes_code_units() {
        let mut agent = agent();
        let string = String::from_str(&mut agent, "hé");
        let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::String(string));

        let zero = PropertyKey::from_str(&mut agent, "0");
        let descriptor = wrapper
            .internal_get_own_property(&mut agent, zero)
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.writable, Some(false));
        assert_eq!(descriptor.enumerable, Some(true));
        assert_eq!(descriptor.configurable, Some(false));
        let Some(Value::String(unit)) = descriptor.value else {
            panic!("expected a string");
        };
        assert_eq!(unit.as_str(&agent), "h");

        let two = PropertyKey::from_str(&mut agent, "2");
        assert!(
            wrapper
                .internal_get_own_property(&mut agent, two)
                .unwrap()
                .is_none()
        );
        let leading_zero = PropertyKey::from_str(&mut agent, "01");
        assert!(
            wrapper
                .internal_get_own_property(&mut agent, leading_zero)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn string_wrapper_index_properties_are_read_only() {
        let mut agent = agent();
        let string = String::from_str(&mut agent, "ab");
        let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::String(string));
        let zero = PropertyKey::from_str(&mut agent, "0");
        let replacement = Value::from_str(&mut agent, "z");
        assert!(
            !wrapper
                .internal_define_own_property(
                    &mut agent,
                    zero,
                    PropertyDescriptor::new_value(replacement)
                )
                .unwrap()
        );
        let extra = PropertyKey::from_str(&mut agent, "5");
        assert!(
            wrapper
                .internal_define_own_property(
                    &mut agent,
                    extra,
                    PropertyDescriptor::new_data_descriptor(Value::Null, true, true, true)
                )
                .unwrap()
        );
        let keys = wrapper.internal_own_property_keys(&mut agent).unwrap();
        let rendered = keys
            .iter()
            .map(|key| key.as_string().unwrap().as_str(&agent).to_owned())
            .collect::<Vec<_>>();
        assert_eq!(rendered, ["0", "1", "5", "length"]);
    }

    #[test]
    fn wrappers_use_the_realm_prototypes() {
        let mut agent = agent();
        let wrapper = create_primitive_object(&mut agent, PrimitiveObjectData::Number(1.5));
        let number_prototype = agent.current_realm_record().intrinsics().number_prototype();
        assert_eq!(agent[wrapper].prototype, Some(number_prototype));
        assert_eq!(
            primitive_object_data(&agent, wrapper),
            Some(PrimitiveObjectData::Number(1.5))
        );
        assert_eq!(
            PrimitiveObjectData::Boolean(true).into_value(),
            Value::Boolean(true)
        );
    }
}
