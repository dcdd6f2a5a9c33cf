// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod intrinsics;

use core::ops::{Index, IndexMut};

pub use intrinsics::{Intrinsics, ProtoIntrinsics};

use super::{
    Agent, ExecutionContext, GlobalEnvironmentIndex, JsResult, agent::AgentSignifier,
    jobs::HostDefined, new_global_environment,
};
use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::define_property_or_throw,
        builtins::ordinary::ordinary_object_create,
        types::{Object, PropertyDescriptor, PropertyKey, Value},
    },
    heap::RealmIndex,
};

/// Handle to a [`RealmRecord`] in the agent's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Realm(pub(crate) RealmIndex);

impl Realm {
    /// ### \[\[GlobalObject]]
    pub fn global_object(self, agent: &Agent) -> Option<Object> {
        agent[self].global_object
    }

    /// ### \[\[GlobalEnv]]
    pub fn global_env(self, agent: &Agent) -> Option<GlobalEnvironmentIndex> {
        agent[self].global_env
    }

    /// ### \[\[HostDefined]]
    pub fn host_defined(self, agent: &Agent) -> Option<HostDefined> {
        agent[self].host_defined.clone()
    }

    /// Initialize the \[\[HostDefined]] field to a value.
    ///
    /// ## Panics
    ///
    /// Panics if the \[\[HostDefined]] field is non-empty.
    pub fn initialize_host_defined(self, agent: &mut Agent, host_defined: HostDefined) {
        assert!(
            agent[self].host_defined.is_none(),
            "Attempted to replace Realm's [[HostDefined]] slot data."
        );
        agent[self].host_defined = Some(host_defined);
    }
}

/// ## [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
///
/// Before it is evaluated, all ECMAScript code must be associated with a
/// realm. Conceptually, a realm consists of a set of intrinsic objects, an
/// ECMAScript global environment, all of the ECMAScript code that is loaded
/// within the scope of that global environment, and other associated state and
/// resources.
#[derive(Debug)]
pub struct RealmRecord {
    /// ### \[\[AgentSignifier]]
    ///
    /// The agent that owns this realm
    pub(crate) agent_signifier: AgentSignifier,

    /// ### \[\[Intrinsics]]
    ///
    /// The intrinsic values used by code associated with this realm.
    intrinsics: Intrinsics,

    /// ### \[\[GlobalObject]]
    ///
    /// The global object for this realm.
    pub(crate) global_object: Option<Object>,

    /// ### \[\[GlobalEnv]]
    ///
    /// The global environment for this realm.
    pub(crate) global_env: Option<GlobalEnvironmentIndex>,

    /// ### \[\[HostDefined]]
    ///
    /// Field reserved for use by hosts that need to associate additional
    /// information with a Realm Record.
    pub(crate) host_defined: Option<HostDefined>,
}

impl RealmRecord {
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }
}

impl Index<Realm> for Agent {
    type Output = RealmRecord;

    fn index(&self, index: Realm) -> &Self::Output {
        &self.heap.realms[index.0.into_index()]
    }
}

impl IndexMut<Realm> for Agent {
    fn index_mut(&mut self, index: Realm) -> &mut Self::Output {
        &mut self.heap.realms[index.0.into_index()]
    }
}

/// ### [9.3.1 CreateRealm ( )](https://tc39.es/ecma262/#sec-createrealm)
///
/// The abstract operation CreateRealm takes no arguments and returns a Realm
/// Record.
pub fn create_realm(agent: &mut Agent) -> Realm {
    // The intrinsics need to know their realm before the record exists, so
    // the index is reserved up front.
    let realm = Realm(RealmIndex::from_index(agent.heap.realms.len()));
    // 1. Let realmRec be a new Realm Record.
    let realm_rec = RealmRecord {
        // 2. Perform CreateIntrinsics(realmRec).
        intrinsics: Intrinsics::create(agent, realm),
        // 3. Set realmRec.[[AgentSignifier]] to AgentSignifier().
        agent_signifier: agent.signifier(),
        // 4. Set realmRec.[[GlobalObject]] to undefined.
        global_object: None,
        // 5. Set realmRec.[[GlobalEnv]] to undefined.
        global_env: None,
        host_defined: None,
    };
    agent.heap.realms.push(realm_rec);
    debug_assert_eq!(realm.0, RealmIndex::last(&agent.heap.realms));
    log::debug!("created realm {:?}", realm.0);
    // 7. Return realmRec.
    realm
}

/// ### [9.3.3 SetRealmGlobalObject ( realmRec, globalObj, thisValue )](https://tc39.es/ecma262/#sec-setrealmglobalobject)
///
/// The abstract operation SetRealmGlobalObject takes arguments realmRec (a
/// Realm Record), globalObj (an Object or undefined), and thisValue (an
/// Object or undefined) and returns UNUSED.
pub fn set_realm_global_object(
    agent: &mut Agent,
    realm: Realm,
    global_object: Option<Object>,
    this_value: Option<Object>,
) {
    // 1. If globalObj is undefined, then
    let global_object = global_object.unwrap_or_else(|| {
        // a. Let intrinsics be realmRec.[[Intrinsics]].
        // b. Set globalObj to OrdinaryObjectCreate(intrinsics.[[%Object.prototype%]]).
        let object_prototype = agent[realm].intrinsics().object_prototype();
        ordinary_object_create(agent, Some(object_prototype))
    });
    // 2. Assert: globalObj is an Object.
    // 3. If thisValue is undefined, set thisValue to globalObj.
    let this_value = this_value.unwrap_or(global_object);
    // 4. Set realmRec.[[GlobalObject]] to globalObj.
    agent[realm].global_object = Some(global_object);
    // 5. Let newGlobalEnv be NewGlobalEnvironment(globalObj, thisValue).
    let new_global_env = new_global_environment(agent, global_object, this_value);
    // 6. Set realmRec.[[GlobalEnv]] to newGlobalEnv.
    agent[realm].global_env = Some(new_global_env);
    // 7. Return UNUSED.
}

/// ### [9.3.4 SetDefaultGlobalBindings ( realmRec )](https://tc39.es/ecma262/#sec-setdefaultglobalbindings)
///
/// The abstract operation SetDefaultGlobalBindings takes argument realmRec (a
/// Realm Record) and returns either a normal completion containing an Object
/// or a throw completion.
pub fn set_default_global_bindings(agent: &mut Agent, realm: Realm) -> JsResult<Object> {
    // 1. Let global be realmRec.[[GlobalObject]].
    let Some(global) = agent[realm].global_object else {
        panic!("SetDefaultGlobalBindings on a realm without a global object");
    };

    let define = |agent: &mut Agent,
                      name: &str,
                      value: Value,
                      writable: bool,
                      configurable: bool|
     -> JsResult<()> {
        // a. Let name be the String value of the property name.
        let name = PropertyKey::from_str(agent, name);
        // b. Let desc be the fully populated data Property Descriptor for the
        //    property, containing the specified attributes for the property.
        //    For properties listed in 19.2, 19.3, or 19.4 the value of the
        //    [[Value]] attribute is the corresponding intrinsic object from
        //    realmRec.
        let desc = PropertyDescriptor::new_data_descriptor(value, writable, false, configurable);
        // c. Perform ? DefinePropertyOrThrow(global, name, desc).
        define_property_or_throw(agent, global, name, desc)
    };

    // 2. For each property of the Global Object specified in clause 19, do
    // 19.1 Value Properties of the Global Object
    let global_env = agent[realm].global_env;
    let this_value = global_env.map_or(global, |env| env.get_this_binding(agent));
    define(agent, "globalThis", this_value.into_value(), true, true)?;
    define(agent, "Infinity", Value::pos_inf(), false, false)?;
    define(agent, "NaN", Value::nan(), false, false)?;
    define(agent, "undefined", Value::Undefined, false, false)?;

    // 19.2 Function Properties and 19.3 Constructor Properties
    let intrinsics = agent[realm].intrinsics().clone();
    let bindings = [
        ("isFinite", intrinsics.is_finite()),
        ("isNaN", intrinsics.is_nan()),
        ("Boolean", intrinsics.boolean()),
        ("Error", intrinsics.error()),
        ("EvalError", intrinsics.eval_error()),
        ("Number", intrinsics.number()),
        ("Object", intrinsics.object()),
        ("RangeError", intrinsics.range_error()),
        ("ReferenceError", intrinsics.reference_error()),
        ("String", intrinsics.string()),
        ("Symbol", intrinsics.symbol()),
        ("SyntaxError", intrinsics.syntax_error()),
        ("TypeError", intrinsics.type_error()),
        ("URIError", intrinsics.uri_error()),
    ];
    for (name, value) in bindings {
        define(agent, name, value.into_value(), true, true)?;
    }

    // 3. Return global.
    Ok(global)
}

/// ## [9.6 InitializeHostDefinedRealm ( )](https://tc39.es/ecma262/#sec-initializehostdefinedrealm)
///
/// Creates a realm, pushes its top-level execution context and installs the
/// global object. The context stays on the stack; the job loop removes it
/// before running jobs.
pub fn initialize_host_defined_realm(
    agent: &mut Agent,
    create_global_object: Option<impl FnOnce(&mut Agent) -> Object>,
    create_global_this_value: Option<impl FnOnce(&mut Agent) -> Object>,
    initialize_global_object: Option<impl FnOnce(&mut Agent, Object) -> JsResult<()>>,
) -> JsResult<Realm> {
    // 1. Let realm be CreateRealm().
    let realm = create_realm(agent);
    // 2. Let newContext be a new execution context.
    // 3. Set the Function of newContext to null.
    // 4. Set the Realm of newContext to realm.
    // 5. Set the ScriptOrModule of newContext to null.
    let new_context = ExecutionContext::new(realm);
    // 6. Push newContext onto the execution context stack; newContext is now
    //    the running execution context.
    let depth = agent.execution_context_stack.len();
    agent.push_execution_context(new_context);

    // 7. If the host requires use of an exotic object to serve as realm's
    //    global object, then
    // a. Let global be such an object created in a host-defined manner.
    // 8. Else,
    // a. Let global be undefined, indicating that an ordinary object should
    //    be created as the global object.
    let global = create_global_object.map(|create| create(agent));

    // 9. If the host requires that the this binding in realm's global scope
    //    return an object other than the global object, then
    // a. Let thisValue be such an object created in a host-defined manner.
    // 10. Else,
    // a. Let thisValue be undefined, indicating that realm's global this
    //     binding should be the global object.
    let this_value = create_global_this_value.map(|create| create(agent));

    // 11. Perform SetRealmGlobalObject(realm, global, thisValue).
    set_realm_global_object(agent, realm, global, this_value);

    // 12. Let globalObj be ? SetDefaultGlobalBindings(realm).
    let global_object = match set_default_global_bindings(agent, realm) {
        Ok(global_object) => global_object,
        Err(err) => {
            agent.execution_context_stack.truncate(depth);
            return Err(err);
        }
    };

    // 13. Create any host-defined global object properties on globalObj.
    if let Some(initialize_global_object) = initialize_global_object {
        if let Err(err) = initialize_global_object(agent, global_object) {
            agent.execution_context_stack.truncate(depth);
            return Err(err);
        }
    }

    agent.host_realm = Some(realm);
    // 14. Return UNUSED.
    Ok(realm)
}

/// [`initialize_host_defined_realm`] without any host customisation.
pub fn initialize_default_realm(agent: &mut Agent) -> JsResult<()> {
    let create_global_object: Option<fn(&mut Agent) -> Object> = None;
    let create_global_this_value: Option<fn(&mut Agent) -> Object> = None;
    let initialize_global_object: Option<fn(&mut Agent, Object) -> JsResult<()>> = None;
    initialize_host_defined_realm(
        agent,
        create_global_object,
        create_global_this_value,
        initialize_global_object,
    )?;
    Ok(())
}
