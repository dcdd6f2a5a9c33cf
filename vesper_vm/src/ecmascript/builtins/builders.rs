// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Helpers for populating freshly created intrinsic objects. The objects are
//! new and hold no conflicting keys, so properties are appended without
//! going through \[\[DefineOwnProperty]].

use super::{Behaviour, BuiltinFunctionArgs, ConstructorFn, RegularFn, create_builtin_function};
use crate::ecmascript::{
    execution::{Agent, Realm},
    types::{Object, ObjectHeapData, ObjectKind, PropertyEntry, PropertyKey, PropertySlot, Value},
};

pub(crate) struct IntrinsicsBuilder {
    realm: Realm,
    object_prototype: Object,
    function_prototype: Object,
}

impl IntrinsicsBuilder {
    pub(crate) fn new(realm: Realm, object_prototype: Object, function_prototype: Object) -> Self {
        Self {
            realm,
            object_prototype,
            function_prototype,
        }
    }

    pub(crate) fn object_prototype(&self) -> Object {
        self.object_prototype
    }

    pub(crate) fn function_prototype(&self) -> Object {
        self.function_prototype
    }

    /// A plain object inheriting from %Object.prototype%.
    pub(crate) fn object(&self, agent: &mut Agent, kind: ObjectKind) -> Object {
        agent
            .heap
            .create_object(ObjectHeapData::new(Some(self.object_prototype), kind))
    }

    pub(crate) fn function(
        &self,
        agent: &mut Agent,
        name: &'static str,
        length: u32,
        behaviour: Behaviour,
    ) -> Object {
        self.function_with_prototype(agent, name, length, behaviour, self.function_prototype)
    }

    pub(crate) fn function_with_prototype(
        &self,
        agent: &mut Agent,
        name: &'static str,
        length: u32,
        behaviour: Behaviour,
        prototype: Object,
    ) -> Object {
        create_builtin_function(
            agent,
            behaviour,
            BuiltinFunctionArgs::new(length, name)
                .with_realm(self.realm)
                .with_prototype(prototype),
        )
    }

    /// Creates a constructor and links it with `prototype` through the
    /// `prototype` and `constructor` properties.
    pub(crate) fn constructor(
        &self,
        agent: &mut Agent,
        name: &'static str,
        length: u32,
        behaviour: ConstructorFn,
        prototype: Object,
    ) -> Object {
        let constructor = self.function(agent, name, length, Behaviour::Constructor(behaviour));
        Self::link_constructor(agent, constructor, prototype);
        constructor
    }

    pub(crate) fn link_constructor(agent: &mut Agent, constructor: Object, prototype: Object) {
        let prototype_key = PropertyKey::from_str(agent, "prototype");
        let constructor_key = PropertyKey::from_str(agent, "constructor");
        agent[constructor].push_data_property(
            prototype_key,
            prototype.into_value(),
            false,
            false,
            false,
        );
        agent[prototype].push_data_property(
            constructor_key,
            constructor.into_value(),
            true,
            false,
            true,
        );
    }

    /// A writable, configurable, non-enumerable method property.
    pub(crate) fn method(
        &self,
        agent: &mut Agent,
        target: Object,
        name: &'static str,
        length: u32,
        behaviour: RegularFn,
    ) -> Object {
        let function = self.function(agent, name, length, Behaviour::Regular(behaviour));
        Self::property(agent, target, name, function.into_value());
        function
    }

    /// A configurable, non-enumerable accessor with only a getter.
    pub(crate) fn getter(
        &self,
        agent: &mut Agent,
        target: Object,
        name: &'static str,
        behaviour: RegularFn,
    ) {
        let getter = create_builtin_function(
            agent,
            Behaviour::Regular(behaviour),
            BuiltinFunctionArgs::new(0, name)
                .with_realm(self.realm)
                .with_prototype(self.function_prototype)
                .with_prefix("get"),
        );
        let key = PropertyKey::from_str(agent, name);
        agent[target].properties.push(PropertyEntry {
            key,
            slot: PropertySlot::Accessor {
                get: Some(getter),
                set: None,
            },
            enumerable: false,
            configurable: true,
        });
    }

    /// A writable, configurable, non-enumerable data property.
    pub(crate) fn property(agent: &mut Agent, target: Object, name: &str, value: Value) {
        let key = PropertyKey::from_str(agent, name);
        agent[target].push_data_property(key, value, true, false, true);
    }

    /// A data property with all attributes false.
    pub(crate) fn constant(agent: &mut Agent, target: Object, key: PropertyKey, value: Value) {
        agent[target].push_data_property(key, value, false, false, false);
    }
}
