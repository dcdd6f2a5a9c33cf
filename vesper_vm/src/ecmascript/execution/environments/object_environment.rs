// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{ObjectEnvironmentIndex, OuterEnv, throw_already_declared, throw_not_defined};
use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{define_property_or_throw, get, has_property, set},
            type_conversion::to_boolean,
        },
        execution::{Agent, JsResult, agent::ExceptionType},
        types::{Object, PropertyDescriptor, PropertyKey, String, Value},
    },
    heap::WellKnownSymbolIndexes,
};

/// ### [9.1.1.2 Object Environment Records](https://tc39.es/ecma262/#sec-object-environment-records)
///
/// Each Object Environment Record is associated with an object called its
/// binding object. An Object Environment Record binds the set of string
/// identifier names that directly correspond to the property names of its
/// binding object. Property keys that are not strings in the form of an
/// IdentifierName are not included in the set of bound identifiers. Both own
/// and inherited properties are included in the set regardless of the
/// setting of their \[\[Enumerable\]\] attribute. Because properties can be
/// dynamically added and deleted from objects, the set of identifiers bound
/// by an Object Environment Record may potentially change as a side-effect
/// of any operation that adds or deletes properties.
#[derive(Debug, Clone)]
pub struct ObjectEnvironmentRecord {
    /// ### \[\[BindingObject\]\]
    ///
    /// The binding object of this Environment Record.
    pub(crate) binding_object: Object,

    /// ### \[\[IsWithEnvironment\]\]
    ///
    /// Indicates whether this Environment Record is created for a with
    /// statement.
    pub(crate) is_with_environment: bool,

    /// ### \[\[OuterEnv\]\]
    ///
    /// See [OuterEnv].
    pub(crate) outer_env: OuterEnv,
}

impl ObjectEnvironmentRecord {
    pub(crate) fn outer_env(&self) -> OuterEnv {
        self.outer_env
    }

    /// ### [9.1.1.2.10 WithBaseObject ( )](https://tc39.es/ecma262/#sec-object-environment-records-withbaseobject)
    pub(crate) fn with_base_object(&self) -> Option<Object> {
        // 1. If envRec.[[IsWithEnvironment]] is true, return envRec.[[BindingObject]].
        // 2. Otherwise, return undefined.
        self.is_with_environment.then_some(self.binding_object)
    }
}

/// ### [9.1.2.3 NewObjectEnvironment ( O, W, E )](https://tc39.es/ecma262/#sec-newobjectenvironment)
///
/// The abstract operation NewObjectEnvironment takes arguments O (an Object),
/// W (a Boolean), and E (an Environment Record or null) and returns an Object
/// Environment Record.
pub fn new_object_environment(
    agent: &mut Agent,
    binding_object: Object,
    is_with_environment: bool,
    outer_env: OuterEnv,
) -> ObjectEnvironmentIndex {
    // 1. Let env be a new Object Environment Record.
    let env = ObjectEnvironmentRecord {
        // 2. Set env.[[BindingObject]] to O.
        binding_object,
        // 3. Set env.[[IsWithEnvironment]] to W.
        is_with_environment,
        // 4. Set env.[[OuterEnv]] to E.
        outer_env,
    };
    // 5. Return env.
    agent.heap.environments.push_object_environment(env)
}

impl ObjectEnvironmentIndex {
    pub fn binding_object(self, agent: &Agent) -> Object {
        agent[self].binding_object
    }

    /// ### [9.1.1.2.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-object-environment-records-hasbinding-n)
    ///
    /// The HasBinding concrete method of an Object Environment Record envRec
    /// takes argument N (a String) and returns either a normal completion
    /// containing a Boolean or a throw completion. It determines if its
    /// associated binding object has a property whose name is N.
    pub fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = env_rec.binding_object;
        let is_with_environment = env_rec.is_with_environment;
        let name = PropertyKey::from(name);
        // 2. Let foundBinding be ? HasProperty(bindingObject, N).
        let found_binding = has_property(agent, binding_object, name)?;
        // 3. If foundBinding is false, return false.
        if !found_binding {
            return Ok(false);
        }
        // 4. If envRec.[[IsWithEnvironment]] is false, return true.
        if !is_with_environment {
            return Ok(true);
        }
        // 5. Let unscopables be ? Get(bindingObject, @@unscopables).
        let unscopables = get(
            agent,
            binding_object,
            WellKnownSymbolIndexes::Unscopables.into(),
        )?;
        // 6. If unscopables is an Object, then
        if let Value::Object(unscopables) = unscopables {
            // a. Let blocked be ToBoolean(? Get(unscopables, N)).
            let blocked = get(agent, unscopables, name)?;
            // b. If blocked is true, return false.
            if to_boolean(agent, blocked) {
                return Ok(false);
            }
        }
        // 7. Return true.
        Ok(true)
    }

    /// ### [9.1.1.2.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-object-environment-records-createmutablebinding-n-d)
    ///
    /// The CreateMutableBinding concrete method of an Object Environment
    /// Record envRec takes arguments N (a String) and D (a Boolean) and
    /// returns either a normal completion containing UNUSED or a throw
    /// completion. It creates in an Environment Record's associated binding
    /// object a property whose name is N and initializes it to the value
    /// undefined. If D is true, the new property's \[\[Configurable\]\]
    /// attribute is set to true; otherwise it is set to false.
    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        let key = PropertyKey::from(name);
        if binding_object
            .internal_get_own_property(agent, key)?
            .is_some()
        {
            return Err(throw_already_declared(agent, name));
        }
        // 2. Perform ? DefinePropertyOrThrow(bindingObject, N,
        //    PropertyDescriptor { [[Value]]: undefined, [[Writable]]: true,
        //    [[Enumerable]]: true, [[Configurable]]: D }).
        define_property_or_throw(
            agent,
            binding_object,
            key,
            PropertyDescriptor::new_data_descriptor(Value::Undefined, true, true, is_deletable),
        )?;
        // 3. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.2.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-object-environment-records-createimmutablebinding-n-s)
    ///
    /// The CreateImmutableBinding concrete method of an Object Environment
    /// Record is never used within this specification.
    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        _name: String,
        _is_strict: bool,
    ) -> JsResult<()> {
        Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Object environments cannot hold immutable bindings",
        ))
    }

    /// ### [9.1.1.2.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-object-environment-records-initializebinding-n-v)
    ///
    /// The InitializeBinding concrete method of an Object Environment Record
    /// envRec takes arguments N (a String) and V (an ECMAScript language
    /// value) and returns either a normal completion containing UNUSED or a
    /// throw completion. It is used to set the bound value of the current
    /// binding of the identifier whose name is N to the value V.
    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) -> JsResult<()> {
        // 1. Perform ? envRec.SetMutableBinding(N, V, false).
        self.set_mutable_binding(agent, name, value, false)
        // 2. Return UNUSED.
    }

    /// ### [9.1.1.2.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-object-environment-records-setmutablebinding-n-v-s)
    ///
    /// The SetMutableBinding concrete method of an Object Environment Record
    /// envRec takes arguments N (a String), V (an ECMAScript language value),
    /// and S (a Boolean) and returns either a normal completion containing
    /// UNUSED or a throw completion. It attempts to set the value of the
    /// Environment Record's associated binding object's property whose name
    /// is N to the value V. A property named N normally already exists but
    /// if it does not or is not currently writable, error handling is
    /// determined by S.
    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        let key = PropertyKey::from(name);
        // 2. Let stillExists be ? HasProperty(bindingObject, N).
        let still_exists = has_property(agent, binding_object, key)?;
        // 3. If stillExists is false and S is true, throw a ReferenceError exception.
        if !still_exists && is_strict {
            return Err(throw_not_defined(agent, name));
        }
        // 4. Perform ? Set(bindingObject, N, V, S).
        set(agent, binding_object, key, value, is_strict)?;
        // 5. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.2.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-object-environment-records-getbindingvalue-n-s)
    ///
    /// The GetBindingValue concrete method of an Object Environment Record
    /// envRec takes arguments N (a String) and S (a Boolean) and returns
    /// either a normal completion containing an ECMAScript language value or
    /// a throw completion. It returns the value of its associated binding
    /// object's property whose name is N. The property should already exist
    /// but if it does not the result depends upon S.
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        let key = PropertyKey::from(name);
        // 2. Let value be ? HasProperty(bindingObject, N).
        let value = has_property(agent, binding_object, key)?;
        // 3. If value is false, then
        if !value {
            // a. If S is false, return undefined; otherwise throw a ReferenceError exception.
            if !is_strict {
                return Ok(Value::Undefined);
            }
            return Err(throw_not_defined(agent, name));
        }
        // 4. Return ? Get(bindingObject, N).
        get(agent, binding_object, key)
    }

    /// ### [9.1.1.2.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-object-environment-records-deletebinding-n)
    ///
    /// The DeleteBinding concrete method of an Object Environment Record
    /// envRec takes argument N (a String) and returns either a normal
    /// completion containing a Boolean or a throw completion. It can only
    /// delete bindings that correspond to properties of the environment
    /// object whose \[\[Configurable\]\] attribute have the value true.
    pub fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let bindingObject be envRec.[[BindingObject]].
        let binding_object = agent[self].binding_object;
        // 2. Return ? bindingObject.[[Delete]](N).
        binding_object.internal_delete(agent, name.into())
    }

    /// ### [9.1.1.2.8 HasThisBinding ( )](https://tc39.es/ecma262/#sec-object-environment-records-hasthisbinding)
    pub fn has_this_binding(self) -> bool {
        // 1. Return false.
        false
    }

    /// ### [9.1.1.2.9 HasSuperBinding ( )](https://tc39.es/ecma262/#sec-object-environment-records-hassuperbinding)
    pub fn has_super_binding(self) -> bool {
        // 1. Return false.
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::create_data_property_or_throw,
        builtins::ordinary::ordinary_object_create,
        execution::{DefaultHostHooks, EnvironmentIndex, agent::Options, initialize_default_realm},
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn bindings_follow_the_object() {
        let mut agent = agent();
        let proto = ordinary_object_create(&mut agent, None);
        let object = ordinary_object_create(&mut agent, Some(proto));
        let env = new_object_environment(&mut agent, object, false, None);
        let inherited = String::from_str(&mut agent, "inherited");

        assert!(!env.has_binding(&mut agent, inherited).unwrap());
        // Mutating the object after creating the environment is visible.
        create_data_property_or_throw(&mut agent, proto, inherited.into(), Value::from(4))
            .unwrap();
        assert!(env.has_binding(&mut agent, inherited).unwrap());
        assert_eq!(
            env.get_binding_value(&mut agent, inherited, true).unwrap(),
            Value::from(4)
        );
        assert!(!EnvironmentIndex::from(env).has_this_binding(&agent));
    }

    #[test]
    fn missing_properties_depend_on_strictness() {
        let mut agent = agent();
        let object = ordinary_object_create(&mut agent, None);
        let env = new_object_environment(&mut agent, object, false, None);
        let gone = String::from_str(&mut agent, "gone");
        assert_eq!(
            env.get_binding_value(&mut agent, gone, false).unwrap(),
            Value::Undefined
        );
        assert!(env.get_binding_value(&mut agent, gone, true).is_err());
        assert!(env.set_mutable_binding(&mut agent, gone, Value::Null, true).is_err());
        env.set_mutable_binding(&mut agent, gone, Value::Null, false)
            .unwrap();
        assert!(env.has_binding(&mut agent, gone).unwrap());
    }

    #[test]
    fn create_and_delete() {
        let mut agent = agent();
        let object = ordinary_object_create(&mut agent, None);
        let env = new_object_environment(&mut agent, object, false, None);
        let a = String::from_str(&mut agent, "a");
        let b = String::from_str(&mut agent, "b");
        env.create_mutable_binding(&mut agent, a, true).unwrap();
        env.create_mutable_binding(&mut agent, b, false).unwrap();
        assert!(env.create_mutable_binding(&mut agent, a, true).is_err());
        let c = String::from_str(&mut agent, "c");
        assert!(env.create_immutable_binding(&mut agent, c, true).is_err());
        env.initialize_binding(&mut agent, a, Value::from(1)).unwrap();
        assert!(env.delete_binding(&mut agent, a).unwrap());
        assert!(!env.delete_binding(&mut agent, b).unwrap());
    }

    #[test]
    fn with_environments_honour_unscopables() {
        let mut agent = agent();
        let object = ordinary_object_create(&mut agent, None);
        let env = new_object_environment(&mut agent, object, true, None);
        let hidden = String::from_str(&mut agent, "hidden");
        let visible = String::from_str(&mut agent, "visible");
        create_data_property_or_throw(&mut agent, object, hidden.into(), Value::from(1)).unwrap();
        create_data_property_or_throw(&mut agent, object, visible.into(), Value::from(2)).unwrap();

        let unscopables = ordinary_object_create(&mut agent, None);
        create_data_property_or_throw(&mut agent, unscopables, hidden.into(), Value::from(true))
            .unwrap();
        create_data_property_or_throw(
            &mut agent,
            object,
            WellKnownSymbolIndexes::Unscopables.into(),
            unscopables.into_value(),
        )
        .unwrap();

        assert!(!env.has_binding(&mut agent, hidden).unwrap());
        assert!(env.has_binding(&mut agent, visible).unwrap());
        assert_eq!(agent[env].with_base_object(), Some(object));
    }
}
