// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{cell::RefCell, rc::Rc, sync::Arc, thread};

use parking_lot::Mutex;
use vesper_vm::ecmascript::{
    execution::{
        Agent, AgentError, DefaultHostHooks, JsError, PendingJob, QueueKind,
        agent::{ExceptionType, HostHooks, Options},
        initialize_default_realm,
    },
    scripts_and_modules::{ScriptOrModule, create_script_record},
    types::Value,
};

#[derive(Debug, Default)]
struct RecordingHostHooks {
    reports: Mutex<Vec<String>>,
}

impl HostHooks for RecordingHostHooks {
    fn report_error(&self, agent: &mut Agent, error: JsError) {
        let message = error.to_string(agent);
        self.reports.lock().push(message);
    }
}

fn recording_hooks() -> &'static RecordingHostHooks {
    Box::leak(Box::default())
}

type Log = Rc<RefCell<Vec<String>>>;

fn log_job(agent: &mut Agent, log: &Log, name: &'static str) {
    let log = log.clone();
    agent.register_job_handler(name, move |_, job| {
        let suffix = job
            .arguments()
            .first()
            .map(|value| format!("({value:?})"))
            .unwrap_or_default();
        log.borrow_mut().push(format!("{}{suffix}", job.job_name()));
        Ok(())
    });
}

#[test]
fn script_jobs_drain_before_promise_jobs() {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    let log: Log = Rc::default();
    log_job(&mut agent, &log, "reaction");
    log_job(&mut agent, &log, "script");

    // A script job that schedules more work while it runs.
    let inner_log = log.clone();
    agent.register_job_handler("evaluate", move |agent, _| {
        inner_log.borrow_mut().push("evaluate".into());
        agent.enqueue_job(QueueKind::Promise, "reaction", vec![Value::from(3)]).unwrap();
        agent.enqueue_job(QueueKind::Script, "script", vec![]).unwrap();
        Ok(())
    });

    agent.enqueue_job(QueueKind::Promise, "reaction", vec![Value::from(1)]).unwrap();
    agent.enqueue_job(QueueKind::Script, "evaluate", vec![]).unwrap();
    agent.enqueue_job(QueueKind::Promise, "reaction", vec![Value::from(2)]).unwrap();

    assert_eq!(agent.run_until_idle().unwrap(), 5);
    assert_eq!(
        *log.borrow(),
        [
            "evaluate",
            "script",
            "reaction(Number(1.0))",
            "reaction(Number(2.0))",
            "reaction(Number(3.0))",
        ]
    );
    assert!(agent.is_idle());
    assert_eq!(agent.execution_context_stack().len(), 0);
}

#[test]
fn failing_jobs_are_reported_and_skipped() {
    let hooks = recording_hooks();
    let mut agent = Agent::new(Options::default(), hooks);
    initialize_default_realm(&mut agent).unwrap();
    let log: Log = Rc::default();
    log_job(&mut agent, &log, "after");
    agent.register_job_handler("throws", |agent, _| {
        Err(agent.throw_exception_with_static_message(ExceptionType::RangeError, "bad length"))
    });

    agent.enqueue_job(QueueKind::Script, "throws", vec![]).unwrap();
    agent.enqueue_job(QueueKind::Script, "unregistered", vec![]).unwrap();
    agent.enqueue_job(QueueKind::Script, "after", vec![]).unwrap();
    assert_eq!(agent.run_until_idle().unwrap(), 3);

    assert_eq!(*hooks.reports.lock(), ["RangeError: bad length"]);
    assert_eq!(*log.borrow(), ["after"]);
}

#[test]
fn jobs_run_in_the_realm_and_script_they_were_queued_from() {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    let realm = agent.current_realm();
    let script = create_script_record(&mut agent, realm, None);

    let seen: Rc<RefCell<Option<Option<ScriptOrModule>>>> = Rc::default();
    let inner_seen = seen.clone();
    agent.register_job_handler("check", move |agent, job| {
        assert_eq!(agent.current_realm(), realm);
        assert_eq!(job.realm(), Some(realm));
        *inner_seen.borrow_mut() = Some(job.script_or_module());
        Ok(())
    });

    // Enqueue from inside the script's top-level context.
    let mut context = agent.pop_execution_context().unwrap();
    context.script_or_module = Some(script.into());
    agent.run_in_execution_context(context, |agent| {
        agent.enqueue_job(QueueKind::Promise, "check", vec![]).unwrap();
    });
    assert_eq!(agent.run_until_idle().unwrap(), 1);
    assert_eq!(*seen.borrow(), Some(Some(ScriptOrModule::Script(script))));
}

#[test]
fn full_queues_and_bad_queue_names() {
    let options = Options {
        job_queue_capacity: 2,
        ..Options::default()
    };
    let mut agent = Agent::new(options, &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    agent.enqueue_job_by_name("ScriptJobs", "a", vec![]).unwrap();
    agent.enqueue_job_by_name("ScriptJobs", "b", vec![]).unwrap();
    assert!(matches!(
        agent.enqueue_job_by_name("ScriptJobs", "c", vec![]),
        Err(AgentError::QueueFull)
    ));
    // The other queue has its own capacity.
    agent.enqueue_job_by_name("PromiseJobs", "c", vec![]).unwrap();
    assert!(matches!(
        agent.enqueue_job_by_name("TimerJobs", "d", vec![]),
        Err(AgentError::UnknownQueueKind(name)) if name == "TimerJobs"
    ));
}

#[test]
fn run_jobs_waits_for_a_host_thread() {
    let mut agent = Agent::new(Options::default(), &DefaultHostHooks);
    initialize_default_realm(&mut agent).unwrap();
    let total = Rc::new(RefCell::new(0.0));
    let inner_total = total.clone();
    agent.register_job_handler("add", move |_, job| {
        let Some(Value::Number(amount)) = job.arguments().first().copied() else {
            panic!("add expects a number");
        };
        *inner_total.borrow_mut() += amount;
        Ok(())
    });

    let script_jobs = Arc::clone(agent.job_queue(QueueKind::Script));
    let promise_jobs = Arc::clone(agent.job_queue(QueueKind::Promise));
    let producer = thread::spawn(move || {
        for amount in 1..=20 {
            // Blocks whenever the agent falls behind.
            script_jobs
                .enqueue(PendingJob::new("add", vec![Value::from(amount)]))
                .unwrap();
        }
        script_jobs.close();
        promise_jobs.close();
    });

    agent.run_jobs().unwrap();
    producer.join().unwrap();
    assert_eq!(*total.borrow(), 210.0);
    assert!(matches!(
        agent.enqueue_job(QueueKind::Script, "add", vec![Value::from(1)]),
        Err(AgentError::QueueClosed)
    ));
}
