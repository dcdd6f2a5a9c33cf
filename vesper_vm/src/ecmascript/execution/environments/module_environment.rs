// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use super::{
    DeclarativeEnvironmentIndex, ModuleEnvironmentIndex, OuterEnv, new_declarative_environment,
    throw_already_declared,
};
use crate::ecmascript::{
    execution::{Agent, JsResult, agent::ExceptionType},
    scripts_and_modules::Module,
    types::{String, Value},
};

/// An immutable import binding: reads are forwarded to `binding_name` in the
/// environment of `module`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndirectBinding {
    pub(crate) module: Module,
    pub(crate) binding_name: String,
}

/// ### [9.1.1.5 Module Environment Records](https://tc39.es/ecma262/#sec-module-environment-records)
///
/// A Module Environment Record is a Declarative Environment Record that is
/// used to represent the outer scope of an ECMAScript Module. In additional to
/// normal mutable and immutable bindings, Module Environment Records also
/// provide immutable import bindings which are bindings that provide indirect
/// access to a target binding that exists in another Environment Record.
///
/// Module Environment Records support all of the Declarative Environment
/// Record methods and share the same specifications for all of those methods
/// except for GetBindingValue, DeleteBinding, HasThisBinding and
/// GetThisBinding.
#[derive(Debug, Clone)]
pub struct ModuleEnvironmentRecord {
    pub(crate) declarative_environment: DeclarativeEnvironmentIndex,
    pub(crate) indirect_bindings: AHashMap<String, IndirectBinding>,
}

/// ### [9.1.2.6 NewModuleEnvironment ( E )](https://tc39.es/ecma262/#sec-newmoduleenvironment)
///
/// The abstract operation NewModuleEnvironment takes argument E (an
/// Environment Record) and returns a Module Environment Record.
pub fn new_module_environment(agent: &mut Agent, outer_env: OuterEnv) -> ModuleEnvironmentIndex {
    // 1. Let env be a new Module Environment Record containing no bindings.
    // 2. Set env.[[OuterEnv]] to E.
    let declarative_environment = new_declarative_environment(agent, outer_env);
    // 3. Return env.
    agent
        .heap
        .environments
        .push_module_environment(ModuleEnvironmentRecord {
            declarative_environment,
            indirect_bindings: AHashMap::default(),
        })
}

impl ModuleEnvironmentIndex {
    pub(crate) fn get_outer_env(self, agent: &Agent) -> OuterEnv {
        agent[agent[self].declarative_environment].outer_env()
    }

    fn import_binding(self, agent: &Agent, name: String) -> Option<IndirectBinding> {
        agent[self].indirect_bindings.get(&name).copied()
    }

    pub fn has_binding(self, agent: &Agent, name: String) -> bool {
        agent[self].indirect_bindings.contains_key(&name)
            || agent[self].declarative_environment.has_binding(agent, name)
    }

    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        if self.import_binding(agent, name).is_some() {
            return Err(throw_already_declared(agent, name));
        }
        let dcl_env = agent[self].declarative_environment;
        dcl_env.create_mutable_binding(agent, name, is_deletable)
    }

    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        if self.import_binding(agent, name).is_some() {
            return Err(throw_already_declared(agent, name));
        }
        let dcl_env = agent[self].declarative_environment;
        dcl_env.create_immutable_binding(agent, name, is_strict)
    }

    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        // Import bindings are created initialized.
        debug_assert!(self.import_binding(agent, name).is_none());
        let dcl_env = agent[self].declarative_environment;
        dcl_env.initialize_binding(agent, name, value)
    }

    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        is_strict: bool,
    ) -> JsResult<()> {
        if self.import_binding(agent, name).is_some() {
            let message = format!(
                "Assignment to constant variable '{}'",
                name.as_str(agent)
            );
            return Err(agent.throw_exception(ExceptionType::TypeError, message));
        }
        let dcl_env = agent[self].declarative_environment;
        dcl_env.set_mutable_binding(agent, name, value, is_strict)
    }

    /// ### [9.1.1.5.1 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-module-environment-records-getbindingvalue-n-s)
    ///
    /// The GetBindingValue concrete method of a Module Environment Record
    /// envRec takes arguments N (a String) and S (a Boolean) and returns
    /// either a normal completion containing an ECMAScript language value or
    /// a throw completion. It returns the value of its bound identifier whose
    /// name is N. However, if the binding is an indirect binding the value of
    /// the target binding is returned. If the binding exists but is
    /// uninitialized a ReferenceError is thrown.
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Assert: S is true.
        // 2. Assert: envRec has a binding for N.
        // 3. If the binding for N is an indirect binding, then
        if let Some(IndirectBinding {
            module,
            binding_name,
        }) = self.import_binding(agent, name)
        {
            // a. Let M and N2 be the indirection values provided when this
            //    binding for N was created.
            // b. Let targetEnv be M.[[Environment]].
            // c. If targetEnv is EMPTY, throw a ReferenceError exception.
            let Some(target_env) = module.environment(agent) else {
                let message = format!(
                    "Cannot access import '{}' before its module is linked",
                    name.as_str(agent)
                );
                return Err(agent.throw_exception(ExceptionType::ReferenceError, message));
            };
            // d. Return ? targetEnv.GetBindingValue(N2, true).
            return target_env.get_binding_value(agent, binding_name, true);
        }
        // 4. If the binding for N in envRec is an uninitialized binding,
        //    throw a ReferenceError exception.
        // 5. Return the value currently bound to N in envRec.
        let dcl_env = agent[self].declarative_environment;
        dcl_env.get_binding_value(agent, name, is_strict)
    }

    /// ### DeleteBinding ( N )
    ///
    /// Module code is always strict, so this is never reached from script.
    /// Import bindings cannot be deleted.
    pub fn delete_binding(self, agent: &mut Agent, name: String) -> bool {
        if self.import_binding(agent, name).is_some() {
            return false;
        }
        let dcl_env = agent[self].declarative_environment;
        dcl_env.delete_binding(agent, name)
    }

    /// ### [9.1.1.5.4 GetThisBinding ( )](https://tc39.es/ecma262/#sec-module-environment-records-getthisbinding)
    pub fn get_this_binding(self) -> Value {
        // 1. Return undefined.
        Value::Undefined
    }

    /// ### [9.1.1.5.5 CreateImportBinding ( N, M, N2 )](https://tc39.es/ecma262/#sec-createimportbinding)
    ///
    /// The CreateImportBinding concrete method of a Module Environment Record
    /// envRec takes arguments N (a String), M (a Module Record), and N2 (a
    /// String) and returns UNUSED. It creates a new initialized immutable
    /// indirect binding for the name N. A binding must not already exist in
    /// this Environment Record for N. N2 is the name of a binding that exists
    /// in M's Module Environment Record. Accesses to the value of the new
    /// binding will indirectly access the bound value of the target binding.
    pub fn create_import_binding(
        self,
        agent: &mut Agent,
        name: String,
        module: Module,
        binding_name: String,
    ) -> JsResult<()> {
        // 1. Assert: envRec does not already have a binding for N.
        if self.has_binding(agent, name) {
            return Err(throw_already_declared(agent, name));
        }
        // 2. Assert: When M.[[Environment]] is instantiated, it will have a
        //    direct binding for N2.
        // 3. Create an immutable indirect binding in envRec for N that
        //    references M and N2 as its target binding and record that the
        //    binding is initialized.
        agent[self].indirect_bindings.insert(
            name,
            IndirectBinding {
                module,
                binding_name,
            },
        );
        // 4. Return UNUSED.
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        execution::{DefaultHostHooks, EnvironmentIndex, agent::Options, initialize_default_realm},
        scripts_and_modules::create_module_record,
    };

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn import_bindings_read_through_to_the_exporting_module() {
        let mut agent = agent();
        let realm = agent.current_realm();
        let exporter = create_module_record(&mut agent, realm, None);
        let importer_env = new_module_environment(&mut agent, None);
        let local = String::from_str(&mut agent, "local");
        let exported = String::from_str(&mut agent, "exported");

        importer_env
            .create_import_binding(&mut agent, local, exporter, exported)
            .unwrap();
        assert!(importer_env.has_binding(&agent, local));

        // The exporting module has no environment yet.
        let err = importer_env
            .get_binding_value(&mut agent, local, true)
            .unwrap_err();
        assert!(err.to_string(&mut agent).starts_with("ReferenceError"));

        let exporter_env = exporter.initialize_environment(&mut agent, None);
        exporter_env
            .create_mutable_binding(&mut agent, exported, false)
            .unwrap();
        exporter_env.initialize_binding(&mut agent, exported, Value::from(10));
        assert_eq!(
            importer_env.get_binding_value(&mut agent, local, true).unwrap(),
            Value::from(10)
        );

        // Live binding.
        exporter_env
            .set_mutable_binding(&mut agent, exported, Value::from(11), true)
            .unwrap();
        assert_eq!(
            importer_env.get_binding_value(&mut agent, local, true).unwrap(),
            Value::from(11)
        );

        assert!(importer_env
            .set_mutable_binding(&mut agent, local, Value::from(0), true)
            .is_err());
        assert!(!importer_env.delete_binding(&mut agent, local));
    }

    #[test]
    fn this_is_undefined() {
        let mut agent = agent();
        let env = EnvironmentIndex::from(new_module_environment(&mut agent, None));
        assert!(env.has_this_binding(&agent));
        assert_eq!(env.get_this_binding(&mut agent).unwrap(), Value::Undefined);
    }
}
