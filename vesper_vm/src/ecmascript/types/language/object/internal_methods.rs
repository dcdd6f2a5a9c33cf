// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
//!
//! Dispatch of the essential internal methods. String wrapper objects are
//! the only exotic objects; everything else takes the ordinary path.

use super::{Object, ObjectKind, PropertyKey};
use crate::ecmascript::{
    builtins::{
        ArgumentsList, builtin_call_or_construct,
        ecmascript_function::{ecmascript_function_call, ecmascript_function_construct},
        ordinary::{
            ordinary_define_own_property, ordinary_delete, ordinary_get,
            ordinary_get_own_property, ordinary_get_prototype_of, ordinary_has_property,
            ordinary_is_extensible, ordinary_own_property_keys, ordinary_prevent_extensions,
            ordinary_set, ordinary_set_prototype_of,
        },
        primitive_objects::{
            PrimitiveObjectData, string_exotic_define_own_property,
            string_exotic_get_own_property, string_exotic_own_property_keys,
        },
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{PropertyDescriptor, String, Value},
};

impl Object {
    fn string_data(self, agent: &Agent) -> Option<String> {
        match agent[self].kind {
            ObjectKind::Primitive(PrimitiveObjectData::String(string)) => Some(string),
            _ => None,
        }
    }

    /// ### \[\[GetPrototypeOf]] ( )
    pub fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        Ok(ordinary_get_prototype_of(agent, self))
    }

    /// ### \[\[SetPrototypeOf]] ( V )
    pub fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        Ok(ordinary_set_prototype_of(agent, self, prototype))
    }

    /// ### \[\[IsExtensible]] ( )
    pub fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        Ok(ordinary_is_extensible(agent, self))
    }

    /// ### \[\[PreventExtensions]] ( )
    pub fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        Ok(ordinary_prevent_extensions(agent, self))
    }

    /// ### \[\[GetOwnProperty]] ( P )
    pub fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        if let Some(string) = self.string_data(agent) {
            return Ok(string_exotic_get_own_property(
                agent,
                self,
                string,
                property_key,
            ));
        }
        Ok(ordinary_get_own_property(agent, self, property_key))
    }

    /// ### \[\[DefineOwnProperty]] ( P, Desc )
    pub fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        if let Some(string) = self.string_data(agent) {
            return Ok(string_exotic_define_own_property(
                agent,
                self,
                string,
                property_key,
                property_descriptor,
            ));
        }
        Ok(ordinary_define_own_property(
            agent,
            self,
            property_key,
            property_descriptor,
        ))
    }

    /// ### \[\[HasProperty]] ( P )
    pub fn internal_has_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<bool> {
        ordinary_has_property(agent, self, property_key)
    }

    /// ### \[\[Get]] ( P, Receiver )
    pub fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        ordinary_get(agent, self, property_key, receiver)
    }

    /// ### \[\[Set]] ( P, V, Receiver )
    pub fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        ordinary_set(agent, self, property_key, value, receiver)
    }

    /// ### \[\[Delete]] ( P )
    pub fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        ordinary_delete(agent, self, property_key)
    }

    /// ### \[\[OwnPropertyKeys]] ( )
    pub fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        if let Some(string) = self.string_data(agent) {
            return Ok(string_exotic_own_property_keys(agent, self, string));
        }
        Ok(ordinary_own_property_keys(agent, self))
    }

    /// ### \[\[Call]] ( thisArgument, argumentsList )
    pub fn internal_call(
        self,
        agent: &mut Agent,
        this_argument: Value,
        arguments_list: ArgumentsList,
    ) -> JsResult<Value> {
        if matches!(agent[self].kind, ObjectKind::ECMAScriptFunction(_)) {
            ecmascript_function_call(agent, self, this_argument, arguments_list)
        } else if matches!(agent[self].kind, ObjectKind::BuiltinFunction(_)) {
            builtin_call_or_construct(agent, self, Some(this_argument), arguments_list, None)
        } else {
            Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Not a callable object",
            ))
        }
    }

    /// ### \[\[Construct]] ( argumentsList, newTarget )
    pub fn internal_construct(
        self,
        agent: &mut Agent,
        arguments_list: ArgumentsList,
        new_target: Object,
    ) -> JsResult<Object> {
        if !self.is_constructor(agent) {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Not a constructor",
            ));
        }
        if matches!(agent[self].kind, ObjectKind::ECMAScriptFunction(_)) {
            return ecmascript_function_construct(agent, self, arguments_list, new_target);
        }
        let result =
            builtin_call_or_construct(agent, self, None, arguments_list, Some(new_target))?;
        // Built-in constructors always produce an object.
        match result {
            Value::Object(object) => Ok(object),
            _ => Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Constructor did not return an object",
            )),
        }
    }
}
