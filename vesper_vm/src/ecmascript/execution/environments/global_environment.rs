// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    DeclarativeEnvironmentIndex, GlobalEnvironmentIndex, ObjectEnvironmentIndex,
    new_declarative_environment, new_object_environment, throw_already_declared,
};
use crate::ecmascript::{
    abstract_operations::operations_on_objects::{
        define_property_or_throw, has_own_property, set,
    },
    execution::{Agent, JsResult},
    types::{Object, PropertyDescriptor, PropertyKey, String, Value},
};

/// ### [9.1.1.4 Global Environment Records](https://tc39.es/ecma262/#sec-global-environment-records)
///
/// A Global Environment Record is used to represent the outer most scope that
/// is shared by all of the ECMAScript Script elements that are processed in a
/// common realm. A Global Environment Record provides the bindings for
/// built-in globals, properties of the global object, and for all top-level
/// declarations that occur within a Script.
#[derive(Debug, Clone)]
pub struct GlobalEnvironmentRecord {
    /// ### \[\[ObjectRecord\]\]
    ///
    /// Binding object is the global object. It contains global built-in
    /// bindings as well as FunctionDeclaration and VariableDeclaration
    /// bindings in global code for the associated realm.
    pub(crate) object_record: ObjectEnvironmentIndex,

    /// ### \[\[GlobalThisValue\]\]
    ///
    /// The value returned by this in global scope. Hosts may provide any
    /// ECMAScript Object value.
    pub(crate) global_this_value: Object,

    /// ### \[\[DeclarativeRecord\]\]
    ///
    /// Contains bindings for all declarations in global code for the
    /// associated realm code except for FunctionDeclaration and
    /// VariableDeclaration bindings.
    pub(crate) declarative_record: DeclarativeEnvironmentIndex,

    /// ### \[\[VarNames\]\]
    ///
    /// The string names bound by FunctionDeclaration and VariableDeclaration
    /// declarations in global code for the associated realm. Order is not
    /// significant.
    pub(crate) var_names: Vec<String>,
}

impl GlobalEnvironmentRecord {
    pub(crate) fn get_this_binding(&self) -> Object {
        self.global_this_value
    }
}

/// ### [9.1.2.5 NewGlobalEnvironment ( G, thisValue )](https://tc39.es/ecma262/#sec-newglobalenvironment)
///
/// The abstract operation NewGlobalEnvironment takes arguments G (an Object)
/// and thisValue (an Object) and returns a Global Environment Record.
pub fn new_global_environment(
    agent: &mut Agent,
    global: Object,
    this_value: Object,
) -> GlobalEnvironmentIndex {
    // 1. Let objRec be NewObjectEnvironment(G, false, null).
    let object_record = new_object_environment(agent, global, false, None);

    // 2. Let dclRec be NewDeclarativeEnvironment(null).
    let declarative_record = new_declarative_environment(agent, None);

    // 3. Let env be a new Global Environment Record.
    let env = GlobalEnvironmentRecord {
        // 4. Set env.[[ObjectRecord]] to objRec.
        object_record,
        // 5. Set env.[[GlobalThisValue]] to thisValue.
        global_this_value: this_value,
        // 6. Set env.[[DeclarativeRecord]] to dclRec.
        declarative_record,
        // 7. Set env.[[VarNames]] to a new empty List.
        var_names: Vec::new(),
    };
    // 8. Set env.[[OuterEnv]] to null.
    // 9. Return env.
    agent.heap.environments.push_global_environment(env)
}

impl GlobalEnvironmentIndex {
    /// The global object, i.e. the binding object of \[\[ObjectRecord\]\].
    pub fn global_object(self, agent: &Agent) -> Object {
        agent[agent[self].object_record].binding_object
    }

    pub fn declarative_record(self, agent: &Agent) -> DeclarativeEnvironmentIndex {
        agent[self].declarative_record
    }

    pub fn object_record(self, agent: &Agent) -> ObjectEnvironmentIndex {
        agent[self].object_record
    }

    pub fn var_names(self, agent: &Agent) -> &[String] {
        &agent[self].var_names
    }

    /// ### [9.1.1.4.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-global-environment-records-hasbinding-n)
    ///
    /// The HasBinding concrete method of a Global Environment Record envRec
    /// takes argument N (a String) and returns either a normal completion
    /// containing a Boolean or a throw completion. It determines if the
    /// argument identifier is one of the identifiers bound by the record.
    pub fn has_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = env_rec.declarative_record;
        let obj_rec = env_rec.object_record;
        // 2. If ! DclRec.HasBinding(N) is true, return true.
        if dcl_rec.has_binding(agent, name) {
            return Ok(true);
        }
        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Return ? ObjRec.HasBinding(N).
        obj_rec.has_binding(agent, name)
    }

    /// ### [9.1.1.4.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-global-environment-records-createmutablebinding-n-d)
    ///
    /// The CreateMutableBinding concrete method of a Global Environment
    /// Record envRec takes arguments N (a String) and D (a Boolean) and
    /// returns either a normal completion containing UNUSED or a throw
    /// completion. It creates a new mutable binding for the name N that is
    /// uninitialized. The binding is created in the associated
    /// DeclarativeRecord.
    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = agent[self].declarative_record;
        // 2. If ! DclRec.HasBinding(N) is true, throw a TypeError exception.
        if dcl_rec.has_binding(agent, name) {
            return Err(throw_already_declared(agent, name));
        }
        // 3. Return ! DclRec.CreateMutableBinding(N, D).
        dcl_rec.create_mutable_binding(agent, name, is_deletable)
    }

    /// ### [9.1.1.4.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-global-environment-records-createimmutablebinding-n-s)
    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = agent[self].declarative_record;
        // 2. If ! DclRec.HasBinding(N) is true, throw a TypeError exception.
        if dcl_rec.has_binding(agent, name) {
            return Err(throw_already_declared(agent, name));
        }
        // 3. Return ! DclRec.CreateImmutableBinding(N, S).
        dcl_rec.create_immutable_binding(agent, name, is_strict)
    }

    /// ### [9.1.1.4.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-global-environment-records-initializebinding-n-v)
    ///
    /// The InitializeBinding concrete method of a Global Environment Record
    /// envRec takes arguments N (a String) and V (an ECMAScript language
    /// value) and returns either a normal completion containing UNUSED or a
    /// throw completion. An uninitialized binding for N must already exist.
    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) -> JsResult<()> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = env_rec.declarative_record;
        let obj_rec = env_rec.object_record;
        // 2. If ! DclRec.HasBinding(N) is true, then
        if dcl_rec.has_binding(agent, name) {
            // a. Return ! DclRec.InitializeBinding(N, V).
            dcl_rec.initialize_binding(agent, name, value);
            return Ok(());
        }
        // 3. Assert: If the binding exists, it must be in the Object
        //    Environment Record.
        // 4. Let ObjRec be envRec.[[ObjectRecord]].
        // 5. Return ? ObjRec.InitializeBinding(N, V).
        obj_rec.initialize_binding(agent, name, value)
    }

    /// ### [9.1.1.4.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-global-environment-records-setmutablebinding-n-v-s)
    ///
    /// The SetMutableBinding concrete method of a Global Environment Record
    /// envRec takes arguments N (a String), V (an ECMAScript language value),
    /// and S (a Boolean) and returns either a normal completion containing
    /// UNUSED or a throw completion. If the binding is an immutable binding
    /// and S is true, a TypeError is thrown.
    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = env_rec.declarative_record;
        let obj_rec = env_rec.object_record;
        // 2. If ! DclRec.HasBinding(N) is true, then
        if dcl_rec.has_binding(agent, name) {
            // a. Return ? DclRec.SetMutableBinding(N, V, S).
            return dcl_rec.set_mutable_binding(agent, name, value, is_strict);
        }
        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Return ? ObjRec.SetMutableBinding(N, V, S).
        obj_rec.set_mutable_binding(agent, name, value, is_strict)
    }

    /// ### [9.1.1.4.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-global-environment-records-getbindingvalue-n-s)
    ///
    /// The GetBindingValue concrete method of a Global Environment Record
    /// envRec takes arguments N (a String) and S (a Boolean) and returns
    /// either a normal completion containing an ECMAScript language value or
    /// a throw completion. If the binding is an uninitialized binding throw a
    /// ReferenceError exception.
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = env_rec.declarative_record;
        let obj_rec = env_rec.object_record;
        // 2. If ! DclRec.HasBinding(N) is true, then
        if dcl_rec.has_binding(agent, name) {
            // a. Return ? DclRec.GetBindingValue(N, S).
            return dcl_rec.get_binding_value(agent, name, is_strict);
        }
        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Return ? ObjRec.GetBindingValue(N, S).
        obj_rec.get_binding_value(agent, name, is_strict)
    }

    /// ### [9.1.1.4.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-global-environment-records-deletebinding-n)
    ///
    /// The DeleteBinding concrete method of a Global Environment Record
    /// envRec takes argument N (a String) and returns either a normal
    /// completion containing a Boolean or a throw completion. It can only
    /// delete bindings that have been explicitly designated as being subject
    /// to deletion.
    pub fn delete_binding(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        let env_rec = &agent[self];
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        let dcl_rec = env_rec.declarative_record;
        let obj_rec = env_rec.object_record;
        // 2. If ! DclRec.HasBinding(N) is true, then
        if dcl_rec.has_binding(agent, name) {
            // a. Return ! DclRec.DeleteBinding(N).
            return Ok(dcl_rec.delete_binding(agent, name));
        }
        // 3. Let ObjRec be envRec.[[ObjectRecord]].
        // 4. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[obj_rec].binding_object;
        // 5. Let existingProp be ? HasOwnProperty(globalObject, N).
        let existing_prop = has_own_property(agent, global_object, name.into())?;
        // 6. If existingProp is true, then
        if existing_prop {
            // a. Let status be ? ObjRec.DeleteBinding(N).
            let status = obj_rec.delete_binding(agent, name)?;
            // b. If status is true and envRec.[[VarNames]] contains N, then
            if status {
                let var_names = &mut agent[self].var_names;
                // i. Remove N from envRec.[[VarNames]].
                if let Some(index) = var_names.iter().position(|n| *n == name) {
                    var_names.swap_remove(index);
                }
            }
            // c. Return status.
            return Ok(status);
        }
        // 7. Return true.
        Ok(true)
    }

    /// ### [9.1.1.4.8 HasThisBinding ( )](https://tc39.es/ecma262/#sec-global-environment-records-hasthisbinding)
    pub fn has_this_binding(self) -> bool {
        // 1. Return true.
        true
    }

    /// ### [9.1.1.4.9 HasSuperBinding ( )](https://tc39.es/ecma262/#sec-global-environment-records-hassuperbinding)
    pub fn has_super_binding(self) -> bool {
        // 1. Return false.
        false
    }

    /// ### [9.1.1.4.10 WithBaseObject ( )](https://tc39.es/ecma262/#sec-global-environment-records-withbaseobject)
    pub fn with_base_object(self) -> Option<Object> {
        // 1. Return undefined.
        None
    }

    /// ### [9.1.1.4.11 GetThisBinding ( )](https://tc39.es/ecma262/#sec-global-environment-records-getthisbinding)
    pub fn get_this_binding(self, agent: &Agent) -> Object {
        // 1. Return envRec.[[GlobalThisValue]].
        agent[self].global_this_value
    }

    /// ### [9.1.1.4.12 HasVarDeclaration ( N )](https://tc39.es/ecma262/#sec-hasvardeclaration)
    ///
    /// The HasVarDeclaration concrete method of a Global Environment Record
    /// envRec takes argument N (a String) and returns a Boolean. It determines
    /// if the argument identifier has a binding in this record that was
    /// created using a VariableStatement or a FunctionDeclaration.
    pub fn has_var_declaration(self, agent: &Agent, name: String) -> bool {
        // 1. Let varDeclaredNames be envRec.[[VarNames]].
        // 2. If varDeclaredNames contains N, return true.
        // 3. Return false.
        agent[self].var_names.contains(&name)
    }

    /// ### [9.1.1.4.13 HasLexicalDeclaration ( N )](https://tc39.es/ecma262/#sec-haslexicaldeclaration)
    ///
    /// The HasLexicalDeclaration concrete method of a Global Environment
    /// Record envRec takes argument N (a String) and returns a Boolean. It
    /// determines if the argument identifier has a binding in this record that
    /// was created using a lexical declaration such as a LexicalDeclaration or
    /// a ClassDeclaration.
    pub fn has_lexical_declaration(self, agent: &Agent, name: String) -> bool {
        // 1. Let DclRec be envRec.[[DeclarativeRecord]].
        // 2. Return ! DclRec.HasBinding(N).
        agent[self].declarative_record.has_binding(agent, name)
    }

    /// ### [9.1.1.4.14 HasRestrictedGlobalProperty ( N )](https://tc39.es/ecma262/#sec-hasrestrictedglobalproperty)
    ///
    /// The HasRestrictedGlobalProperty concrete method of a Global Environment
    /// Record envRec takes argument N (a String) and returns either a normal
    /// completion containing a Boolean or a throw completion. It determines if
    /// the argument identifier is the name of a property of the global object
    /// that must not be shadowed by a global lexical binding.
    pub fn has_restricted_global_property(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = self.global_object(agent);
        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let existing_prop = global_object.internal_get_own_property(agent, name.into())?;
        // 4. If existingProp is undefined, return false.
        let Some(existing_prop) = existing_prop else {
            return Ok(false);
        };
        // 5. If existingProp.[[Configurable]] is true, return false.
        // 6. Return true.
        Ok(existing_prop.configurable != Some(true))
    }

    /// ### [9.1.1.4.15 CanDeclareGlobalVar ( N )](https://tc39.es/ecma262/#sec-candeclareglobalvar)
    ///
    /// The CanDeclareGlobalVar concrete method of a Global Environment Record
    /// envRec takes argument N (a String) and returns either a normal
    /// completion containing a Boolean or a throw completion. It determines if
    /// a corresponding CreateGlobalVarBinding call would succeed if called for
    /// the same argument N. Redundant var declarations and var declarations
    /// for pre-existing global object properties are allowed.
    pub fn can_declare_global_var(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = self.global_object(agent);
        // 3. Let hasProperty be ? HasOwnProperty(globalObject, N).
        let has_property = has_own_property(agent, global_object, name.into())?;
        // 4. If hasProperty is true, return true.
        if has_property {
            return Ok(true);
        }
        // 5. Return ? IsExtensible(globalObject).
        global_object.internal_is_extensible(agent)
    }

    /// ### [9.1.1.4.16 CanDeclareGlobalFunction ( N )](https://tc39.es/ecma262/#sec-candeclareglobalfunction)
    ///
    /// The CanDeclareGlobalFunction concrete method of a Global Environment
    /// Record envRec takes argument N (a String) and returns either a normal
    /// completion containing a Boolean or a throw completion. It determines if
    /// a corresponding CreateGlobalFunctionBinding call would succeed if
    /// called for the same argument N.
    pub fn can_declare_global_function(self, agent: &mut Agent, name: String) -> JsResult<bool> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = self.global_object(agent);
        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let existing_prop = global_object.internal_get_own_property(agent, name.into())?;
        // 4. If existingProp is undefined, return ? IsExtensible(globalObject).
        let Some(existing_prop) = existing_prop else {
            return global_object.internal_is_extensible(agent);
        };
        // 5. If existingProp.[[Configurable]] is true, return true.
        if existing_prop.configurable == Some(true) {
            return Ok(true);
        }
        // 6. If IsDataDescriptor(existingProp) is true and existingProp has
        //    attribute values { [[Writable]]: true, [[Enumerable]]: true },
        //    return true.
        // 7. Return false.
        Ok(existing_prop.is_data_descriptor()
            && existing_prop.writable == Some(true)
            && existing_prop.enumerable == Some(true))
    }

    /// ### [9.1.1.4.17 CreateGlobalVarBinding ( N, D )](https://tc39.es/ecma262/#sec-createglobalvarbinding)
    ///
    /// The CreateGlobalVarBinding concrete method of a Global Environment
    /// Record envRec takes arguments N (a String) and D (a Boolean) and
    /// returns either a normal completion containing UNUSED or a throw
    /// completion. It creates and initializes a mutable binding in the
    /// associated Object Environment Record and records the bound name in the
    /// associated \[\[VarNames\]\] List. If a binding already exists, it is
    /// reused and assumed to be initialized.
    pub fn create_global_var_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        let obj_rec = agent[self].object_record;
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = agent[obj_rec].binding_object;
        // 3. Let hasProperty be ? HasOwnProperty(globalObject, N).
        let has_property = has_own_property(agent, global_object, name.into())?;
        // 4. Let extensible be ? IsExtensible(globalObject).
        let extensible = global_object.internal_is_extensible(agent)?;
        // 5. If hasProperty is false and extensible is true, then
        if !has_property && extensible {
            // a. Perform ? ObjRec.CreateMutableBinding(N, D).
            obj_rec.create_mutable_binding(agent, name, is_deletable)?;
            // b. Perform ? ObjRec.InitializeBinding(N, undefined).
            obj_rec.initialize_binding(agent, name, Value::Undefined)?;
        }
        // 6. If envRec.[[VarNames]] does not contain N, then
        let var_names = &mut agent[self].var_names;
        if !var_names.contains(&name) {
            // a. Append N to envRec.[[VarNames]].
            var_names.push(name);
        }
        // 7. Return UNUSED.
        Ok(())
    }

    /// ### [9.1.1.4.18 CreateGlobalFunctionBinding ( N, V, D )](https://tc39.es/ecma262/#sec-createglobalfunctionbinding)
    ///
    /// The CreateGlobalFunctionBinding concrete method of a Global Environment
    /// Record envRec takes arguments N (a String), V (an ECMAScript language
    /// value), and D (a Boolean) and returns either a normal completion
    /// containing UNUSED or a throw completion. It creates and initializes a
    /// mutable binding in the associated Object Environment Record and
    /// records the bound name in the associated \[\[VarNames\]\] List. If a
    /// binding already exists, it is replaced.
    pub fn create_global_function_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Let ObjRec be envRec.[[ObjectRecord]].
        // 2. Let globalObject be ObjRec.[[BindingObject]].
        let global_object = self.global_object(agent);
        let key = PropertyKey::from(name);
        // 3. Let existingProp be ? globalObject.[[GetOwnProperty]](N).
        let existing_prop = global_object.internal_get_own_property(agent, key)?;
        // 4. If existingProp is undefined or existingProp.[[Configurable]] is true, then
        let desc = if existing_prop.is_none_or(|prop| prop.configurable == Some(true)) {
            // a. Let desc be the PropertyDescriptor { [[Value]]: V,
            //    [[Writable]]: true, [[Enumerable]]: true,
            //    [[Configurable]]: D }.
            PropertyDescriptor::new_data_descriptor(value, true, true, is_deletable)
        } else {
            // 5. Else,
            // a. Let desc be the PropertyDescriptor { [[Value]]: V }.
            PropertyDescriptor::new_value(value)
        };
        // 6. Perform ? DefinePropertyOrThrow(globalObject, N, desc).
        define_property_or_throw(agent, global_object, key, desc)?;
        // 7. Perform ? Set(globalObject, N, V, false).
        set(agent, global_object, key, value, false)?;
        // 8. If envRec.[[VarNames]] does not contain N, then
        let var_names = &mut agent[self].var_names;
        if !var_names.contains(&name) {
            // a. Append N to envRec.[[VarNames]].
            var_names.push(name);
        }
        // 9. Return UNUSED.
        Ok(())
    }
}
