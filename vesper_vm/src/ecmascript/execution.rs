// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod agent;
mod default_host_hooks;
mod environments;
mod execution_context;
mod jobs;
mod realm;

pub use agent::{
    Agent, AgentError, JsError, JsResult, get_active_script_or_module, get_global_object,
    get_new_target, get_this_environment, resolve_binding, resolve_this_binding,
};
pub use default_host_hooks::DefaultHostHooks;
pub use environments::{
    DeclarativeEnvironmentIndex, DeclarativeEnvironmentRecord, EnvironmentIndex, Environments,
    FunctionEnvironmentIndex, FunctionEnvironmentRecord, GlobalEnvironmentIndex,
    GlobalEnvironmentRecord, ModuleEnvironmentIndex, ModuleEnvironmentRecord,
    ObjectEnvironmentIndex, ObjectEnvironmentRecord, ThisBindingStatus, get_identifier_reference,
    new_declarative_environment, new_function_environment, new_global_environment,
    new_module_environment, new_object_environment,
};
pub use execution_context::{
    ECMAScriptCodeEvaluationState, ExecutionContext, ExecutionContextStack,
};
pub use jobs::{HostDefined, JobQueue, PendingJob, QueueKind};
pub use realm::{
    Intrinsics, ProtoIntrinsics, Realm, RealmRecord, create_realm, initialize_default_realm,
    initialize_host_defined_realm, set_default_global_bindings, set_realm_global_object,
};
