// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [16 ECMAScript Language: Scripts and Modules](https://tc39.es/ecma262/#sec-ecmascript-language-scripts-and-modules)
//!
//! Only the record identity the execution core needs: the realm a unit was
//! created in, the environment of a module and the host's payload. Parsing,
//! linking and evaluation belong to the embedder.

use core::ops::{Index, IndexMut};

use crate::{
    ecmascript::execution::{
        Agent, EnvironmentIndex, HostDefined, ModuleEnvironmentIndex, Realm,
        new_module_environment,
    },
    heap::{ModuleIndex, ScriptIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOrModule {
    Script(Script),
    Module(Module),
}

impl ScriptOrModule {
    pub fn realm(self, agent: &Agent) -> Realm {
        match self {
            ScriptOrModule::Script(script) => agent[script].realm,
            ScriptOrModule::Module(module) => agent[module].realm,
        }
    }

    pub fn host_defined(self, agent: &Agent) -> Option<HostDefined> {
        match self {
            ScriptOrModule::Script(script) => agent[script].host_defined.clone(),
            ScriptOrModule::Module(module) => agent[module].host_defined.clone(),
        }
    }
}

/// ### [16.1.4 Script Records](https://tc39.es/ecma262/#sec-script-records)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Script(pub(crate) ScriptIndex);

#[derive(Debug, Clone)]
pub struct ScriptRecord {
    /// ### \[\[Realm]]
    ///
    /// The realm within which this script was created.
    pub(crate) realm: Realm,

    /// ### \[\[HostDefined]]
    ///
    /// Field reserved for use by host environments that need to associate
    /// additional information with a script.
    pub(crate) host_defined: Option<HostDefined>,
}

/// Allocates the record for a script the embedder has parsed.
pub fn create_script_record(
    agent: &mut Agent,
    realm: Realm,
    host_defined: Option<HostDefined>,
) -> Script {
    agent.heap.scripts.push(ScriptRecord {
        realm,
        host_defined,
    });
    Script(ScriptIndex::last(&agent.heap.scripts))
}

impl Script {
    pub fn realm(self, agent: &Agent) -> Realm {
        agent[self].realm
    }
}

impl From<Script> for ScriptOrModule {
    fn from(value: Script) -> Self {
        ScriptOrModule::Script(value)
    }
}

impl Index<Script> for Agent {
    type Output = ScriptRecord;

    fn index(&self, index: Script) -> &Self::Output {
        &self.heap.scripts[index.0.into_index()]
    }
}

/// ### [16.2.1.4 Abstract Module Records](https://tc39.es/ecma262/#sec-abstract-module-records)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Module(pub(crate) ModuleIndex);

#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// ### \[\[Realm]]
    pub(crate) realm: Realm,

    /// ### \[\[Environment]]
    ///
    /// The Environment Record containing the top level bindings for this
    /// module. This field is set when the module is linked.
    pub(crate) environment: Option<ModuleEnvironmentIndex>,

    /// ### \[\[HostDefined]]
    pub(crate) host_defined: Option<HostDefined>,
}

/// Allocates an unlinked module record: its environment stays empty until
/// [`Module::initialize_environment`] runs.
pub fn create_module_record(
    agent: &mut Agent,
    realm: Realm,
    host_defined: Option<HostDefined>,
) -> Module {
    agent.heap.modules.push(ModuleRecord {
        realm,
        environment: None,
        host_defined,
    });
    Module(ModuleIndex::last(&agent.heap.modules))
}

impl Module {
    pub fn realm(self, agent: &Agent) -> Realm {
        agent[self].realm
    }

    pub fn environment(self, agent: &Agent) -> Option<ModuleEnvironmentIndex> {
        agent[self].environment
    }

    /// Creates the module's environment, once, as the linking step of
    /// InitializeEnvironment would. The outer environment is normally the
    /// realm's global environment.
    ///
    /// ## Panics
    /// - If the environment was already created.
    pub fn initialize_environment(
        self,
        agent: &mut Agent,
        outer_env: Option<EnvironmentIndex>,
    ) -> ModuleEnvironmentIndex {
        assert!(
            agent[self].environment.is_none(),
            "module environment initialized twice"
        );
        let env = new_module_environment(agent, outer_env);
        agent[self].environment = Some(env);
        log::debug!("linked module {:?} to environment {:?}", self, env);
        env
    }
}

impl From<Module> for ScriptOrModule {
    fn from(value: Module) -> Self {
        ScriptOrModule::Module(value)
    }
}

impl Index<Module> for Agent {
    type Output = ModuleRecord;

    fn index(&self, index: Module) -> &Self::Output {
        &self.heap.modules[index.0.into_index()]
    }
}

impl IndexMut<Module> for Agent {
    fn index_mut(&mut self, index: Module) -> &mut Self::Output {
        &mut self.heap.modules[index.0.into_index()]
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::ecmascript::execution::{DefaultHostHooks, agent::Options, initialize_default_realm};

    #[test]
    fn records_remember_realm_and_payload() {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        let realm = agent.current_realm();

        let payload: HostDefined = Arc::new("main.js");
        let script = create_script_record(&mut agent, realm, Some(payload));
        let script_or_module = ScriptOrModule::from(script);
        assert_eq!(script_or_module.realm(&agent), realm);
        let payload = script_or_module.host_defined(&agent).unwrap();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"main.js"));

        let module = create_module_record(&mut agent, realm, None);
        assert_ne!(ScriptOrModule::from(module), script_or_module);
        assert!(module.environment(&agent).is_none());
        let global_env = realm.global_env(&agent).map(EnvironmentIndex::from);
        let env = module.initialize_environment(&mut agent, global_env);
        assert_eq!(module.environment(&agent), Some(env));
        assert_eq!(
            EnvironmentIndex::from(env).get_outer_env(&agent),
            global_env
        );
    }
}
