// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
//!
//! An agent comprises a set of ECMAScript execution contexts, an execution
//! context stack, a running execution context, an Agent Record, and an
//! executing thread. Except for the executing thread, the constituents of an
//! agent belong exclusively to that agent.

use core::{cell::Cell, fmt};
use std::{rc::Rc, sync::Arc};

use ahash::AHashMap;

use super::{
    EnvironmentIndex, ExecutionContext, ExecutionContextStack, Realm, RealmRecord,
    environments::get_identifier_reference,
    initialize_default_realm,
    jobs::{HostDefined, JobQueue, JobSignal, PendingJob, QueueKind},
};
use crate::{
    ecmascript::{
        builtins::error::{create_error_object, error_to_string},
        scripts_and_modules::ScriptOrModule,
        types::{Object, Reference, String, Value},
    },
    heap::Heap,
};

/// Host configuration of an agent, mirroring the fields of the Agent Record.
#[derive(Debug, Clone)]
pub struct Options {
    /// Capacity of each of the agent's job queues.
    pub job_queue_capacity: usize,
    /// ### \[\[LittleEndian\]\]
    pub little_endian: bool,
    /// ### \[\[CanBlock\]\]
    ///
    /// Determines whether the agent can block or not.
    pub can_block: bool,
    /// ### \[\[IsLockFree1\]\]
    pub is_lock_free1: bool,
    /// ### \[\[IsLockFree2\]\]
    pub is_lock_free2: bool,
    /// ### \[\[IsLockFree8\]\]
    pub is_lock_free8: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            job_queue_capacity: 10,
            little_endian: cfg!(target_endian = "little"),
            can_block: false,
            is_lock_free1: cfg!(target_has_atomic = "8"),
            is_lock_free2: cfg!(target_has_atomic = "16"),
            is_lock_free8: cfg!(target_has_atomic = "64"),
        }
    }
}

pub type JsResult<T> = core::result::Result<T, JsError>;

/// A thrown ECMAScript value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsError(pub(crate) Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }

    /// Renders the error the way `Error.prototype.toString` would, falling
    /// back to the string form of a non-object thrown value.
    pub fn to_string(self, agent: &mut Agent) -> std::string::String {
        let string = match self.0 {
            Value::Object(object) => match error_to_string(agent, object) {
                Ok(string) => string,
                Err(_) => self.0.string_repr(agent),
            },
            value => value.string_repr(agent),
        };
        string.as_str(agent).to_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

impl ExceptionType {
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::EvalError => "EvalError",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::ReferenceError => "ReferenceError",
            ExceptionType::SyntaxError => "SyntaxError",
            ExceptionType::TypeError => "TypeError",
            ExceptionType::UriError => "URIError",
        }
    }
}

/// Failures of the agent itself, as opposed to thrown ECMAScript values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("unknown job queue kind '{0}'")]
    UnknownQueueKind(std::string::String),
    #[error("no handler registered for job '{0}'")]
    UnknownJob(std::string::String),
    #[error("job queue is closed")]
    QueueClosed,
    #[error("job queue is full")]
    QueueFull,
    #[error("agent is not idle")]
    NotIdle,
    #[error("another blocking agent is already running on this thread")]
    BlockingAgentConflict,
    #[error("failed to initialize the host realm: {0}")]
    RealmInitialization(std::string::String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseRejectionOperation {
    Reject,
    Handle,
}

pub trait HostHooks: fmt::Debug {
    /// ### [9.5.4 HostReportErrors ( errorList )](https://html.spec.whatwg.org/multipage/webappapis.html#report-the-exception)
    ///
    /// Called with every error that escapes a job.
    fn report_error(&self, agent: &mut Agent, error: JsError);

    /// ### [19.2.1.2 HostEnsureCanCompileStrings ( calleeRealm )](https://tc39.es/ecma262/#sec-hostensurecancompilestrings)
    fn ensure_can_compile_strings(&self, _callee_realm: Realm) -> JsResult<()> {
        Ok(())
    }

    /// ### [27.2.1.9 HostPromiseRejectionTracker ( promise, operation )](https://tc39.es/ecma262/#sec-host-promise-rejection-tracker)
    ///
    /// The default implementation of HostPromiseRejectionTracker is to return
    /// unused.
    fn promise_rejection_tracker(&self, _promise: Object, _operation: PromiseRejectionOperation) {}
}

/// ### \[\[Signifier\]\]
///
/// A value that admits equality testing and is unique among all agents in
/// the agent cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentSignifier(u128);

/// Named job steps registered by the host or evaluator.
pub type JobHandler = Rc<dyn Fn(&mut Agent, &PendingJob) -> JsResult<()>>;

thread_local! {
    static BLOCKING_AGENT_RUNNING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as servicing a blocking agent.
struct BlockingAgentGuard;

impl BlockingAgentGuard {
    fn acquire() -> Result<Self, AgentError> {
        BLOCKING_AGENT_RUNNING.with(|running| {
            if running.replace(true) {
                Err(AgentError::BlockingAgentConflict)
            } else {
                Ok(BlockingAgentGuard)
            }
        })
    }
}

impl Drop for BlockingAgentGuard {
    fn drop(&mut self) {
        BLOCKING_AGENT_RUNNING.with(|running| running.set(false));
    }
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
pub struct Agent {
    pub(crate) heap: Heap,
    options: Options,
    signifier: AgentSignifier,
    pub(crate) execution_context_stack: ExecutionContextStack,
    pub(crate) host_hooks: &'static dyn HostHooks,
    script_jobs: Arc<JobQueue>,
    promise_jobs: Arc<JobQueue>,
    job_signal: Arc<JobSignal>,
    job_handlers: AHashMap<Box<str>, JobHandler>,
    /// The realm created by InitializeHostDefinedRealm; used whenever the
    /// execution context stack is empty.
    pub(crate) host_realm: Option<Realm>,
    running_job: bool,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("options", &self.options)
            .field("signifier", &self.signifier)
            .field("execution_context_stack", &self.execution_context_stack)
            .field("script_jobs", &self.script_jobs.len())
            .field("promise_jobs", &self.promise_jobs.len())
            .field("host_realm", &self.host_realm)
            .field("running_job", &self.running_job)
            .finish_non_exhaustive()
    }
}

impl Agent {
    pub fn new(options: Options, host_hooks: &'static dyn HostHooks) -> Self {
        let job_signal = Arc::new(JobSignal::default());
        let capacity = options.job_queue_capacity;
        Self {
            heap: Heap::new(),
            signifier: AgentSignifier(rand::random::<u128>()),
            options,
            execution_context_stack: ExecutionContextStack::default(),
            host_hooks,
            script_jobs: Arc::new(JobQueue::new(
                QueueKind::Script,
                capacity,
                job_signal.clone(),
            )),
            promise_jobs: Arc::new(JobQueue::new(
                QueueKind::Promise,
                capacity,
                job_signal.clone(),
            )),
            job_signal,
            job_handlers: AHashMap::default(),
            host_realm: None,
            running_job: false,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn signifier(&self) -> AgentSignifier {
        self.signifier
    }

    pub fn can_block(&self) -> bool {
        self.options.can_block
    }

    /// True when no job is running and the stack holds nothing beyond the
    /// host's top-level context.
    pub fn is_idle(&self) -> bool {
        !self.running_job && self.execution_context_stack.len() <= 1
    }

    pub fn execution_context_stack(&self) -> &ExecutionContextStack {
        &self.execution_context_stack
    }

    pub fn push_execution_context(&mut self, context: ExecutionContext) {
        self.execution_context_stack.push(context);
        log::trace!(
            "pushed execution context, depth {}",
            self.execution_context_stack.len()
        );
    }

    pub fn pop_execution_context(&mut self) -> Option<ExecutionContext> {
        let context = self.execution_context_stack.pop();
        log::trace!(
            "popped execution context, depth {}",
            self.execution_context_stack.len()
        );
        context
    }

    /// ### [running execution context](https://tc39.es/ecma262/#running-execution-context)
    pub fn running_execution_context(&self) -> Option<&ExecutionContext> {
        self.execution_context_stack.peek()
    }

    /// Pushes `context`, runs `f` and restores the stack depth afterwards,
    /// whether `f` returned normally or with an error.
    pub fn run_in_execution_context<R>(
        &mut self,
        context: ExecutionContext,
        f: impl FnOnce(&mut Agent) -> R,
    ) -> R {
        let depth = self.execution_context_stack.len();
        self.push_execution_context(context);
        let result = f(self);
        self.execution_context_stack.truncate(depth);
        log::trace!("restored execution context depth {depth}");
        result
    }

    /// ### [current Realm Record](https://tc39.es/ecma262/#current-realm)
    ///
    /// The value of the Realm component of the running execution context, or
    /// the host realm when no code is running.
    pub fn current_realm(&self) -> Realm {
        if let Some(context) = self.execution_context_stack.peek() {
            return context.realm;
        }
        let Some(realm) = self.host_realm else {
            panic!("no realm: the agent has not been initialized");
        };
        realm
    }

    pub fn current_realm_record(&self) -> &RealmRecord {
        &self[self.current_realm()]
    }

    /// The LexicalEnvironment of the running execution context, or the
    /// current realm's global environment if the running context has no
    /// code evaluation state.
    pub fn current_lexical_environment(&self) -> EnvironmentIndex {
        if let Some(code) = self
            .running_execution_context()
            .and_then(|context| context.ecmascript_code)
        {
            return code.lexical_environment;
        }
        let Some(global_env) = self.current_realm_record().global_env else {
            panic!("the current realm has no global environment");
        };
        global_env.into()
    }

    /// The VariableEnvironment of the running execution context, with the
    /// same fallback as [`Agent::current_lexical_environment`].
    pub fn current_variable_environment(&self) -> EnvironmentIndex {
        if let Some(code) = self
            .running_execution_context()
            .and_then(|context| context.ecmascript_code)
        {
            return code.variable_environment;
        }
        self.current_lexical_environment()
    }

    /// Whether the running context evaluates strict mode code.
    pub fn is_strict_mode(&self) -> bool {
        self.running_execution_context()
            .and_then(|context| context.ecmascript_code)
            .is_some_and(|code| code.is_strict_mode)
    }

    /// ### [5.2.3.2 Throw an Exception](https://tc39.es/ecma262/#sec-throw-an-exception)
    ///
    /// Creates an error object of the given kind in the current realm.
    pub fn throw_exception(
        &mut self,
        kind: ExceptionType,
        message: std::string::String,
    ) -> JsError {
        let message = String::from_string(self, message);
        JsError(create_error_object(self, kind, Some(message)).into_value())
    }

    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        let message = String::from_str(self, message);
        JsError(create_error_object(self, kind, Some(message)).into_value())
    }

    /// ### [9.4.2 ResolveBinding ( name \[ , env \] )](https://tc39.es/ecma262/#sec-resolvebinding)
    pub fn resolve_binding(
        &mut self,
        name: String,
        strict: bool,
        env: Option<EnvironmentIndex>,
    ) -> JsResult<Reference> {
        resolve_binding(self, name, strict, env)
    }

    /// ### [9.4.4 ResolveThisBinding ( )](https://tc39.es/ecma262/#sec-resolvethisbinding)
    pub fn resolve_this_binding(&mut self) -> JsResult<Value> {
        resolve_this_binding(self)
    }

    /// ### [9.4.6 GetGlobalObject ( )](https://tc39.es/ecma262/#sec-getglobalobject)
    pub fn get_global_object(&self) -> Object {
        get_global_object(self)
    }

    pub fn job_queue(&self, kind: QueueKind) -> &Arc<JobQueue> {
        match kind {
            QueueKind::Script => &self.script_jobs,
            QueueKind::Promise => &self.promise_jobs,
        }
    }

    /// Registers the steps run for jobs named `job_name`, replacing any
    /// previous handler.
    pub fn register_job_handler(
        &mut self,
        job_name: &str,
        handler: impl Fn(&mut Agent, &PendingJob) -> JsResult<()> + 'static,
    ) {
        self.job_handlers.insert(job_name.into(), Rc::new(handler));
    }

    /// ### [9.5.5 HostEnqueueGenericJob ( job, realm )](https://tc39.es/ecma262/#sec-hostenqueuegenericjob)
    ///
    /// Snapshots the current realm and active script or module into a
    /// pending job and appends it to the queue of `kind`. Never blocks: a
    /// full queue is reported as [`AgentError::QueueFull`].
    pub fn enqueue_job(
        &mut self,
        kind: QueueKind,
        job_name: &str,
        arguments: Vec<Value>,
    ) -> Result<(), AgentError> {
        self.enqueue_pending_job(kind, PendingJob::new(job_name, arguments))
    }

    pub fn enqueue_job_with_host_defined(
        &mut self,
        kind: QueueKind,
        job_name: &str,
        arguments: Vec<Value>,
        host_defined: HostDefined,
    ) -> Result<(), AgentError> {
        let job = PendingJob::new(job_name, arguments).with_host_defined(Some(host_defined));
        self.enqueue_pending_job(kind, job)
    }

    /// Enqueues into the queue named `queue_name` ("ScriptJobs" or
    /// "PromiseJobs").
    pub fn enqueue_job_by_name(
        &mut self,
        queue_name: &str,
        job_name: &str,
        arguments: Vec<Value>,
    ) -> Result<(), AgentError> {
        let kind = queue_name.parse::<QueueKind>()?;
        self.enqueue_job(kind, job_name, arguments)
    }

    fn enqueue_pending_job(&mut self, kind: QueueKind, job: PendingJob) -> Result<(), AgentError> {
        let realm = self
            .running_execution_context()
            .map(|context| context.realm)
            .or(self.host_realm);
        let job = job
            .with_realm(realm)
            .with_script_or_module(get_active_script_or_module(self));
        log::debug!("enqueue {} job '{}'", kind, job.job_name());
        self.job_queue(kind).try_enqueue(job)
    }

    /// Closes both job queues. [`Agent::run_jobs`] returns once they drain.
    pub fn close_job_queues(&self) {
        self.script_jobs.close();
        self.promise_jobs.close();
    }

    /// Runs jobs until both queues are closed and drained, sleeping while
    /// they are empty. Script jobs always run before promise jobs.
    pub fn run_jobs(&mut self) -> Result<(), AgentError> {
        self.enter_job_loop(|agent| {
            loop {
                let seen = agent.job_signal.generation();
                let closed = agent.script_jobs.is_closed() && agent.promise_jobs.is_closed();
                if let Some(job) = agent.next_job() {
                    agent.run_pending_job(job);
                    continue;
                }
                if closed {
                    return Ok(());
                }
                agent.job_signal.wait_for_change(seen);
            }
        })
    }

    /// Runs jobs until both queues are empty and returns how many ran.
    pub fn run_until_idle(&mut self) -> Result<usize, AgentError> {
        self.enter_job_loop(|agent| {
            let mut count = 0;
            while let Some(job) = agent.next_job() {
                agent.run_pending_job(job);
                count += 1;
            }
            Ok(count)
        })
    }

    fn enter_job_loop<R>(
        &mut self,
        f: impl FnOnce(&mut Agent) -> Result<R, AgentError>,
    ) -> Result<R, AgentError> {
        if self.running_job {
            return Err(AgentError::NotIdle);
        }
        let _guard = if self.options.can_block {
            Some(BlockingAgentGuard::acquire()?)
        } else {
            None
        };
        if self.host_realm.is_none() {
            if let Err(err) = initialize_default_realm(self) {
                let message = err.to_string(self);
                return Err(AgentError::RealmInitialization(message));
            }
        }
        // The host's top-level context is removed before jobs run.
        match self.execution_context_stack.len() {
            0 => {}
            1 => {
                self.pop_execution_context();
            }
            _ => return Err(AgentError::NotIdle),
        }
        self.running_job = true;
        let result = f(self);
        self.running_job = false;
        result
    }

    fn next_job(&self) -> Option<PendingJob> {
        let job = self
            .script_jobs
            .try_dequeue()
            .or_else(|| self.promise_jobs.try_dequeue());
        if let Some(job) = &job {
            log::trace!("dequeued job '{}'", job.job_name());
        }
        job
    }

    /// Runs one job to completion in its own execution context. Errors are
    /// reported to the host and do not stop the scheduler.
    fn run_pending_job(&mut self, job: PendingJob) {
        let Some(handler) = self.job_handlers.get(job.job_name()).cloned() else {
            let error = AgentError::UnknownJob(job.job_name().to_owned());
            log::warn!("dropping job: {error}");
            return;
        };
        let realm = job.realm().unwrap_or_else(|| self.current_realm());
        let context = ExecutionContext {
            script_or_module: job.script_or_module(),
            ..ExecutionContext::new(realm)
        };
        let result = self.run_in_execution_context(context, |agent| handler(agent, &job));
        if let Err(error) = result {
            let host_hooks = self.host_hooks;
            host_hooks.report_error(self, error);
        }
    }
}

/// ### [9.4.1 GetActiveScriptOrModule ( )](https://tc39.es/ecma262/#sec-getactivescriptormodule)
///
/// The abstract operation GetActiveScriptOrModule takes no arguments and
/// returns a Script Record, a Module Record, or null. It is used to determine
/// the running script or module, based on the running execution context.
pub fn get_active_script_or_module(agent: &Agent) -> Option<ScriptOrModule> {
    // 1. If the execution context stack is empty, return null.
    // 2. Let ec be the topmost execution context on the execution context
    //    stack whose ScriptOrModule component is not null.
    // 3. If no such execution context exists, return null. Otherwise, return
    //    ec's ScriptOrModule.
    agent
        .execution_context_stack
        .iter()
        .find_map(|context| context.script_or_module)
}

/// ### [9.4.2 ResolveBinding ( name \[ , env \] )](https://tc39.es/ecma262/#sec-resolvebinding)
///
/// The abstract operation ResolveBinding takes argument name (a String) and
/// optional argument env (an Environment Record or undefined) and returns
/// either a normal completion containing a Reference Record or a throw
/// completion. It is used to determine the binding of name. env can be used to
/// explicitly provide the Environment Record that is to be searched for the
/// binding.
pub fn resolve_binding(
    agent: &mut Agent,
    name: String,
    strict: bool,
    env: Option<EnvironmentIndex>,
) -> JsResult<Reference> {
    // 1. If env is not present or env is undefined, then
    //    a. Set env to the running execution context's LexicalEnvironment.
    let env = env.unwrap_or_else(|| agent.current_lexical_environment());

    // 2. Assert: env is an Environment Record.
    // 3. Let strict be IsStrict(the syntactic production that is being
    //    evaluated).
    // 4. Return ? GetIdentifierReference(env, name, strict).
    get_identifier_reference(agent, Some(env), name, strict)
}

/// ### [9.4.3 GetThisEnvironment ( )](https://tc39.es/ecma262/#sec-getthisenvironment)
///
/// The abstract operation GetThisEnvironment takes no arguments and returns
/// an Environment Record. It finds the Environment Record that currently
/// supplies the binding of the keyword this.
pub fn get_this_environment(agent: &Agent) -> EnvironmentIndex {
    // 1. Let env be the running execution context's LexicalEnvironment.
    let mut env = agent.current_lexical_environment();
    // 2. Repeat,
    loop {
        // a. Let exists be env.HasThisBinding().
        // b. If exists is true, return env.
        if env.has_this_binding(agent) {
            return env;
        }
        // c. Let outer be env.[[OuterEnv]].
        // d. Assert: outer is not null.
        let Some(outer) = env.get_outer_env(agent) else {
            panic!("malformed environment graph: no environment has a this binding");
        };
        // e. Set env to outer.
        env = outer;
    }
}

/// ### [9.4.4 ResolveThisBinding ( )](https://tc39.es/ecma262/#sec-resolvethisbinding)
///
/// The abstract operation ResolveThisBinding takes no arguments and returns
/// either a normal completion containing an ECMAScript language value or a
/// throw completion. It determines the binding of the keyword this using the
/// LexicalEnvironment of the running execution context.
pub fn resolve_this_binding(agent: &mut Agent) -> JsResult<Value> {
    // 1. Let envRec be GetThisEnvironment().
    let env_rec = get_this_environment(agent);
    // 2. Return ? envRec.GetThisBinding().
    env_rec.get_this_binding(agent)
}

/// ### [9.4.5 GetNewTarget ( )](https://tc39.es/ecma262/#sec-getnewtarget)
///
/// The abstract operation GetNewTarget takes no arguments and returns an
/// Object or undefined. It determines the NewTarget value using the
/// LexicalEnvironment of the running execution context.
pub fn get_new_target(agent: &Agent) -> Option<Object> {
    // 1. Let envRec be GetThisEnvironment().
    // 2. Assert: envRec has a [[NewTarget]] field.
    // 3. Return envRec.[[NewTarget]].
    match get_this_environment(agent) {
        EnvironmentIndex::Function(env_rec) => env_rec.new_target(agent),
        _ => None,
    }
}

/// ### [9.4.6 GetGlobalObject ( )](https://tc39.es/ecma262/#sec-getglobalobject)
///
/// The abstract operation GetGlobalObject takes no arguments and returns an
/// Object. It returns the global object used by the currently running
/// execution context.
pub fn get_global_object(agent: &Agent) -> Object {
    // 1. Let currentRealm be the current Realm Record.
    // 2. Return currentRealm.[[GlobalObject]].
    let Some(global_object) = agent.current_realm_record().global_object else {
        panic!("the current realm has no global object");
    };
    global_object
}

#[cfg(test)]
mod test {
    use core::cell::RefCell;

    use super::*;
    use crate::ecmascript::execution::{DefaultHostHooks, new_declarative_environment};

    fn agent() -> Agent {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        initialize_default_realm(&mut agent).unwrap();
        agent
    }

    #[test]
    fn default_options() {
        let options = Options::default();
        assert_eq!(options.job_queue_capacity, 10);
        assert!(!options.can_block);
        assert_eq!(options.little_endian, cfg!(target_endian = "little"));
    }

    #[test]
    fn signifiers_are_unique() {
        let a = Agent::new(Options::default(), &DefaultHostHooks);
        let b = Agent::new(Options::default(), &DefaultHostHooks);
        assert_ne!(a.signifier(), b.signifier());
    }

    #[test]
    fn error_rendering() {
        let mut agent = agent();
        let error = agent.throw_exception_with_static_message(ExceptionType::TypeError, "bad");
        assert_eq!(error.to_string(&mut agent), "TypeError: bad");
        let error = agent.throw_exception(ExceptionType::UriError, format!("code {}", 7));
        assert_eq!(error.to_string(&mut agent), "URIError: code 7");
        let thrown = JsError::new(Value::from(42));
        assert_eq!(thrown.to_string(&mut agent), "42");
    }

    #[test]
    fn this_environment_defaults_to_global() {
        let mut agent = agent();
        let global = agent.get_global_object();
        assert_eq!(agent.resolve_this_binding().unwrap(), global.into_value());
        assert_eq!(get_new_target(&agent), None);
        assert_eq!(get_active_script_or_module(&agent), None);
    }

    #[test]
    fn resolve_binding_walks_outer_environments() {
        let mut agent = agent();
        let realm = agent.current_realm();
        let global_env: EnvironmentIndex = agent[realm].global_env.unwrap().into();
        let outer = new_declarative_environment(&mut agent, Some(global_env));
        let inner = new_declarative_environment(&mut agent, Some(outer.into()));
        let x = String::from_str(&mut agent, "x");
        outer.create_mutable_binding(&mut agent, x, false).unwrap();
        outer.initialize_binding(&mut agent, x, Value::from(1));

        let reference = agent.resolve_binding(x, true, Some(inner.into())).unwrap();
        assert_eq!(reference.base(), crate::ecmascript::types::Base::Environment(outer.into()));

        let missing = String::from_str(&mut agent, "missing");
        let reference = agent.resolve_binding(missing, true, Some(inner.into())).unwrap();
        assert!(reference.is_unresolvable_reference());
    }

    #[test]
    fn run_in_execution_context_restores_depth() {
        let mut agent = agent();
        let depth = agent.execution_context_stack().len();
        let realm = agent.current_realm();
        let context = ExecutionContext::new(realm);
        let result: JsResult<()> = agent.run_in_execution_context(context, |agent| {
            agent.push_execution_context(ExecutionContext::new(realm));
            Err(agent.throw_exception_with_static_message(ExceptionType::Error, "unwind"))
        });
        assert!(result.is_err());
        assert_eq!(agent.execution_context_stack().len(), depth);
    }

    #[test]
    fn jobs_run_script_queue_first() {
        let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
        let order = Rc::new(RefCell::new(Vec::new()));
        {
            let order = order.clone();
            agent.register_job_handler("record", move |agent, job| {
                let name = job.arguments()[0].to_string(agent)?;
                order.borrow_mut().push(name.as_str(agent).to_owned());
                Ok(())
            });
        }
        initialize_default_realm(&mut agent).unwrap();
        for (kind, name) in [
            (QueueKind::Script, "J1"),
            (QueueKind::Promise, "J2"),
            (QueueKind::Script, "J3"),
        ] {
            let arg = Value::from_str(&mut agent, name);
            agent.enqueue_job(kind, "record", vec![arg]).unwrap();
        }
        assert_eq!(agent.run_until_idle().unwrap(), 3);
        assert_eq!(*order.borrow(), ["J1", "J3", "J2"]);
        assert!(agent.execution_context_stack().is_empty());
    }

    #[test]
    fn unknown_jobs_and_queues() {
        let mut agent = agent();
        assert_eq!(
            agent.enqueue_job_by_name("TimerJobs", "x", vec![]),
            Err(AgentError::UnknownQueueKind("TimerJobs".into()))
        );
        agent
            .enqueue_job_by_name("PromiseJobs", "nobody-handles-this", vec![])
            .unwrap();
        // The job is dropped, not retried.
        assert_eq!(agent.run_until_idle().unwrap(), 1);
        assert!(agent.job_queue(QueueKind::Promise).is_empty());
    }

    #[test]
    fn full_queue_is_reported() {
        let mut agent = Agent::new(
            Options {
                job_queue_capacity: 1,
                ..Options::default()
            },
            &DefaultHostHooks,
        );
        initialize_default_realm(&mut agent).unwrap();
        agent.enqueue_job(QueueKind::Script, "a", vec![]).unwrap();
        assert_eq!(
            agent.enqueue_job(QueueKind::Script, "b", vec![]),
            Err(AgentError::QueueFull)
        );
    }

    #[test]
    fn run_jobs_returns_after_close() {
        let mut agent = agent();
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            agent.register_job_handler("count", move |agent, _| {
                count.set(count.get() + 1);
                if count.get() == 2 {
                    agent.close_job_queues();
                }
                Ok(())
            });
        }
        agent.enqueue_job(QueueKind::Script, "count", vec![]).unwrap();
        agent.enqueue_job(QueueKind::Promise, "count", vec![]).unwrap();
        agent.run_jobs().unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn reentrant_job_loop_is_rejected() {
        let mut agent = agent();
        let nested = Rc::new(RefCell::new(None));
        {
            let nested = nested.clone();
            agent.register_job_handler("nested", move |agent, _| {
                *nested.borrow_mut() = Some(agent.run_until_idle());
                Ok(())
            });
        }
        agent.enqueue_job(QueueKind::Script, "nested", vec![]).unwrap();
        agent.run_until_idle().unwrap();
        assert_eq!(*nested.borrow(), Some(Err(AgentError::NotIdle)));
    }

    #[test]
    fn two_blocking_agents_cannot_share_a_thread() {
        let options = Options {
            can_block: true,
            ..Options::default()
        };
        let mut outer = Agent::new(options.clone(), &DefaultHostHooks);
        let inner = Rc::new(RefCell::new(Agent::new(options, &DefaultHostHooks)));
        let conflict = Rc::new(RefCell::new(None));
        {
            let inner = inner.clone();
            let conflict = conflict.clone();
            outer.register_job_handler("spawn", move |_, _| {
                *conflict.borrow_mut() = Some(inner.borrow_mut().run_until_idle());
                Ok(())
            });
        }
        outer.enqueue_job(QueueKind::Script, "spawn", vec![]).unwrap();
        outer.run_until_idle().unwrap();
        assert_eq!(
            *conflict.borrow(),
            Some(Err(AgentError::BlockingAgentConflict))
        );
        // The guard is released afterwards.
        assert_eq!(inner.borrow_mut().run_until_idle(), Ok(0));
    }
}
