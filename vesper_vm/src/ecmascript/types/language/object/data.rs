// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, PropertyKey};
use crate::ecmascript::{
    builtins::{
        BuiltinFunctionHeapData, ECMAScriptFunctionHeapData, primitive_objects::PrimitiveObjectData,
    },
    execution::agent::ExceptionType,
    types::{PropertyDescriptor, Value},
};

#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    /// ### \[\[Extensible]]
    pub(crate) extensible: bool,
    /// ### \[\[Prototype]]
    pub(crate) prototype: Option<Object>,
    /// Own properties in creation order.
    pub(crate) properties: Vec<PropertyEntry>,
    pub(crate) kind: ObjectKind,
}

/// Internal slots that distinguish the few object kinds the core knows.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Ordinary,
    BuiltinFunction(BuiltinFunctionHeapData),
    ECMAScriptFunction(ECMAScriptFunctionHeapData),
    /// Boolean, Number, String and Symbol wrapper objects.
    Primitive(PrimitiveObjectData),
    /// ### \[\[ErrorData]]
    Error(ExceptionType),
}

#[derive(Debug, Clone)]
pub struct PropertyEntry {
    pub(crate) key: PropertyKey,
    pub(crate) slot: PropertySlot,
    pub(crate) enumerable: bool,
    pub(crate) configurable: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertySlot {
    Data { value: Value, writable: bool },
    Accessor { get: Option<Object>, set: Option<Object> },
}

impl ObjectHeapData {
    pub(crate) fn new(prototype: Option<Object>, kind: ObjectKind) -> Self {
        Self {
            extensible: true,
            prototype,
            properties: Vec::new(),
            kind,
        }
    }

    pub(crate) fn find_property(&self, key: PropertyKey) -> Option<&PropertyEntry> {
        self.properties.iter().find(|entry| entry.key == key)
    }

    pub(crate) fn find_property_mut(&mut self, key: PropertyKey) -> Option<&mut PropertyEntry> {
        self.properties.iter_mut().find(|entry| entry.key == key)
    }

    pub(crate) fn remove_property(&mut self, key: PropertyKey) {
        self.properties.retain(|entry| entry.key != key);
    }

    /// Appends a property without validation. Only for freshly created
    /// objects that cannot already hold `key`.
    pub(crate) fn push_data_property(
        &mut self,
        key: PropertyKey,
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) {
        debug_assert!(self.find_property(key).is_none());
        self.properties.push(PropertyEntry {
            key,
            slot: PropertySlot::Data { value, writable },
            enumerable,
            configurable,
        });
    }
}

impl PropertyEntry {
    /// The fully populated descriptor for this property.
    pub(crate) fn to_descriptor(&self) -> PropertyDescriptor {
        match self.slot {
            PropertySlot::Data { value, writable } => PropertyDescriptor {
                value: Some(value),
                writable: Some(writable),
                get: None,
                set: None,
                enumerable: Some(self.enumerable),
                configurable: Some(self.configurable),
            },
            PropertySlot::Accessor { get, set } => PropertyDescriptor {
                value: None,
                writable: None,
                get: Some(get),
                set: Some(set),
                enumerable: Some(self.enumerable),
                configurable: Some(self.configurable),
            },
        }
    }
}
