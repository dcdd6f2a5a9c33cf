// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use super::{DeclarativeEnvironmentIndex, OuterEnv, throw_already_declared, throw_not_defined};
use crate::ecmascript::{
    execution::{Agent, JsError, JsResult, agent::ExceptionType},
    types::{String, Value},
};

/// #### [9.1.1.1 Declarative Environment Records](https://tc39.es/ecma262/#sec-declarative-environment-records)
///
/// A Declarative Environment Record is used to define the effect of ECMAScript
/// language syntactic elements such as FunctionDeclarations,
/// VariableDeclarations, and Catch clauses that directly associate identifier
/// bindings with ECMAScript language values.
#[derive(Debug, Clone)]
pub struct DeclarativeEnvironmentRecord {
    /// ### \[\[OuterEnv\]\]
    ///
    /// See [OuterEnv].
    outer_env: OuterEnv,

    /// The environment's bindings.
    bindings: AHashMap<String, Binding>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Binding {
    /// `None` while the binding is uninitialized.
    pub(crate) value: Option<Value>,
    pub(crate) strict: bool,
    pub(crate) mutable: bool,
    pub(crate) deletable: bool,
}

impl DeclarativeEnvironmentRecord {
    /// #### [9.1.2.2 NewDeclarativeEnvironment ( E )](https://tc39.es/ecma262/#sec-newdeclarativeenvironment)
    pub(crate) fn new(outer_env: OuterEnv) -> DeclarativeEnvironmentRecord {
        // 1. Let env be a new Declarative Environment Record containing no bindings.
        // 2. Set env.[[OuterEnv]] to E.
        // 3. Return env.
        DeclarativeEnvironmentRecord {
            outer_env,
            bindings: AHashMap::default(),
        }
    }

    pub(crate) fn outer_env(&self) -> OuterEnv {
        self.outer_env
    }

    pub(crate) fn has_binding(&self, name: String) -> bool {
        self.bindings.contains_key(&name)
    }

    pub(crate) fn get_binding(&self, name: String) -> Option<&Binding> {
        self.bindings.get(&name)
    }

    /// Names of all bindings, in no particular order.
    pub fn binding_names(&self) -> impl Iterator<Item = String> + '_ {
        self.bindings.keys().copied()
    }

    fn insert_binding(&mut self, name: String, binding: Binding) {
        self.bindings.insert(name, binding);
    }

    /// Sets the value of an uninitialized binding. A missing or already
    /// initialized binding is a bug in the caller.
    fn initialize_binding(&mut self, name: String, value: Value) {
        // 1. Assert: envRec must have an uninitialized binding for N.
        let Some(binding) = self.bindings.get_mut(&name) else {
            unreachable!("InitializeBinding on a missing binding");
        };
        assert!(
            binding.value.is_none(),
            "InitializeBinding on an already initialized binding"
        );

        // 2. Set the bound value for N in envRec to V.
        // 3. Record that the binding for N in envRec has been initialized.
        binding.value = Some(value);

        // 4. Return UNUSED.
    }
}

/// #### [9.1.2.2 NewDeclarativeEnvironment ( E )](https://tc39.es/ecma262/#sec-newdeclarativeenvironment)
///
/// The abstract operation NewDeclarativeEnvironment takes argument E (an
/// Environment Record or null) and returns a Declarative Environment Record.
pub fn new_declarative_environment(
    agent: &mut Agent,
    outer_env: OuterEnv,
) -> DeclarativeEnvironmentIndex {
    agent
        .heap
        .environments
        .push_declarative_environment(DeclarativeEnvironmentRecord::new(outer_env))
}

impl DeclarativeEnvironmentIndex {
    /// ##### [9.1.1.1.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-hasbinding-n)
    ///
    /// The HasBinding concrete method of a Declarative Environment Record
    /// envRec takes argument N (a String) and returns a normal completion
    /// containing a Boolean. It determines if the argument identifier is one
    /// of the identifiers bound by the record.
    pub fn has_binding(self, agent: &Agent, name: String) -> bool {
        // 1. If envRec has a binding for N, return true.
        // 2. Return false.
        agent[self].has_binding(name)
    }

    /// ##### [9.1.1.1.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-declarative-environment-records-createmutablebinding-n-d)
    ///
    /// The CreateMutableBinding concrete method of a Declarative Environment
    /// Record envRec takes arguments N (a String) and D (a Boolean) and
    /// returns a normal completion containing UNUSED. It creates a new mutable
    /// binding for the name N that is uninitialized. If D is true, the new
    /// binding is marked as being subject to deletion.
    ///
    /// Redeclaring an existing name throws a TypeError.
    pub fn create_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_deletable: bool,
    ) -> JsResult<()> {
        // 1. Assert: envRec does not already have a binding for N.
        if self.has_binding(agent, name) {
            return Err(throw_already_declared(agent, name));
        }

        // 2. Create a mutable binding in envRec for N and record that it is
        //    uninitialized. If D is true, record that the newly created
        //    binding may be deleted by a subsequent DeleteBinding call.
        agent[self].insert_binding(
            name,
            Binding {
                value: None,
                strict: false,
                mutable: true,
                deletable: is_deletable,
            },
        );

        // 3. Return UNUSED.
        Ok(())
    }

    /// ##### [9.1.1.1.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-createimmutablebinding-n-s)
    ///
    /// The CreateImmutableBinding concrete method of a Declarative Environment
    /// Record envRec takes arguments N (a String) and S (a Boolean) and
    /// returns a normal completion containing UNUSED. It creates a new
    /// immutable binding for the name N that is uninitialized. If S is true,
    /// the new binding is marked as a strict binding.
    pub fn create_immutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        is_strict: bool,
    ) -> JsResult<()> {
        // 1. Assert: envRec does not already have a binding for N.
        if self.has_binding(agent, name) {
            return Err(throw_already_declared(agent, name));
        }

        // 2. Create an immutable binding in envRec for N and record that it
        //    is uninitialized. If S is true, record that the newly created
        //    binding is a strict binding.
        agent[self].insert_binding(
            name,
            Binding {
                value: None,
                strict: is_strict,
                mutable: false,
                deletable: false,
            },
        );

        // 3. Return UNUSED.
        Ok(())
    }

    /// ##### [9.1.1.1.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-declarative-environment-records-initializebinding-n-v)
    ///
    /// The InitializeBinding concrete method of a Declarative Environment
    /// Record envRec takes arguments N (a String) and V (an ECMAScript
    /// language value) and returns a normal completion containing UNUSED. An
    /// uninitialized binding for N must already exist.
    pub fn initialize_binding(self, agent: &mut Agent, name: String, value: Value) {
        agent[self].initialize_binding(name, value);
    }

    /// ##### [9.1.1.1.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-setmutablebinding-n-v-s)
    ///
    /// The SetMutableBinding concrete method of a Declarative Environment
    /// Record envRec takes arguments N (a String), V (an ECMAScript language
    /// value), and S (a Boolean) and returns either a normal completion
    /// containing UNUSED or a throw completion. A binding for N normally
    /// already exists, but in rare cases it may not. If the binding is an
    /// immutable binding, a TypeError is thrown if S is true.
    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: String,
        value: Value,
        mut is_strict: bool,
    ) -> JsResult<()> {
        // 1. If envRec does not have a binding for N, then
        let Some(binding) = agent[self].bindings.get_mut(&name) else {
            // a. If S is true, throw a ReferenceError exception.
            if is_strict {
                return Err(throw_not_defined(agent, name));
            }

            // b. Perform ! envRec.CreateMutableBinding(N, true).
            // c. Perform ! envRec.InitializeBinding(N, V).
            agent[self].insert_binding(
                name,
                Binding {
                    value: Some(value),
                    strict: false,
                    mutable: true,
                    deletable: true,
                },
            );

            // d. Return UNUSED.
            return Ok(());
        };

        // 2. If the binding for N in envRec is a strict binding, set S to true.
        if binding.strict {
            is_strict = true;
        }

        // 3. If the binding for N in envRec has not yet been initialized, then
        if binding.value.is_none() {
            // a. Throw a ReferenceError exception.
            return Err(throw_uninitialized(agent, name));
        }

        // 4. Else if the binding for N in envRec is a mutable binding, then
        if binding.mutable {
            // a. Change its bound value to V.
            binding.value = Some(value);
        }
        // 5. Else,
        else if is_strict {
            // a. Assert: This is an attempt to change the value of an immutable binding.
            // b. If S is true, throw a TypeError exception.
            let message = format!(
                "Assignment to constant variable '{}'",
                name.as_str(agent)
            );
            return Err(agent.throw_exception(ExceptionType::TypeError, message));
        }

        // 6. Return UNUSED.
        Ok(())
    }

    /// ##### [9.1.1.1.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-getbindingvalue-n-s)
    ///
    /// The GetBindingValue concrete method of a Declarative Environment Record
    /// envRec takes arguments N (a String) and S (a Boolean) and returns
    /// either a normal completion containing an ECMAScript language value or a
    /// throw completion. If the binding exists but is uninitialized a
    /// ReferenceError is thrown, regardless of the value of S.
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: String,
        _is_strict: bool,
    ) -> JsResult<Value> {
        // 1. Assert: envRec has a binding for N.
        let Some(binding) = agent[self].get_binding(name).copied() else {
            return Err(throw_not_defined(agent, name));
        };

        // 2. If the binding for N in envRec is an uninitialized binding, throw
        //    a ReferenceError exception.
        // 3. Return the value currently bound to N in envRec.
        match binding.value {
            Some(value) => Ok(value),
            None => Err(throw_uninitialized(agent, name)),
        }
    }

    /// ##### [9.1.1.1.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-deletebinding-n)
    ///
    /// The DeleteBinding concrete method of a Declarative Environment Record
    /// envRec takes argument N (a String) and returns a normal completion
    /// containing a Boolean. It can only delete bindings that have been
    /// explicitly designated as being subject to deletion.
    pub fn delete_binding(self, agent: &mut Agent, name: String) -> bool {
        let env_rec = &mut agent[self];
        // 1. Assert: envRec has a binding for N.
        let Some(binding) = env_rec.bindings.get(&name) else {
            return true;
        };

        // 2. If the binding for N in envRec cannot be deleted, return false.
        if !binding.deletable {
            return false;
        }

        // 3. Remove the binding for N from envRec.
        env_rec.bindings.remove(&name);

        // 4. Return true.
        true
    }
}

pub(super) fn throw_uninitialized(agent: &mut Agent, name: String) -> JsError {
    let message = format!("Cannot access '{}' before initialization", name.as_str(agent));
    agent.throw_exception(ExceptionType::ReferenceError, message)
}
