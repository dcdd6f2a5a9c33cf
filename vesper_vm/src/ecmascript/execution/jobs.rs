// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.5 Jobs and Host Operations to Enqueue Jobs](https://tc39.es/ecma262/#sec-jobs)
//!
//! A Job is an Abstract Closure with no parameters that initiates an
//! ECMAScript computation when no other ECMAScript computation is currently
//! in progress. Jobs are named and dispatched to handlers registered on the
//! [`Agent`](super::Agent); the queues here only store them.
//!
//! Queues are bounded and may be filled from other threads, so they are
//! shared behind an [`Arc`] and synchronised with `parking_lot` primitives.

use core::{any::Any, fmt, str::FromStr};
use std::{collections::VecDeque, sync::Arc};

use parking_lot::{Condvar, Mutex};

use super::{Realm, agent::AgentError};
use crate::ecmascript::{scripts_and_modules::ScriptOrModule, types::Value};

/// Opaque host data carried along with a job.
pub type HostDefined = Arc<dyn Any + Send + Sync>;

/// The queue a job is placed in. Script jobs are drained before promise jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    Script,
    Promise,
}

impl QueueKind {
    pub const fn name(self) -> &'static str {
        match self {
            QueueKind::Script => "ScriptJobs",
            QueueKind::Promise => "PromiseJobs",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueueKind {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ScriptJobs" => Ok(QueueKind::Script),
            "PromiseJobs" => Ok(QueueKind::Promise),
            _ => Err(AgentError::UnknownQueueKind(s.to_owned())),
        }
    }
}

/// ### [PendingJob Records](https://tc39.es/ecma262/#sec-jobs)
///
/// Immutable once enqueued.
#[derive(Clone)]
pub struct PendingJob {
    pub(crate) job_name: Box<str>,
    pub(crate) arguments: Box<[Value]>,
    pub(crate) realm: Option<Realm>,
    pub(crate) script_or_module: Option<ScriptOrModule>,
    pub(crate) host_defined: Option<HostDefined>,
}

impl fmt::Debug for PendingJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingJob")
            .field("job_name", &self.job_name)
            .field("arguments", &self.arguments)
            .field("realm", &self.realm)
            .field("script_or_module", &self.script_or_module)
            .field("host_defined", &self.host_defined.is_some())
            .finish()
    }
}

impl PendingJob {
    /// A job that runs in whatever realm is current when it is dequeued.
    pub fn new(job_name: &str, arguments: Vec<Value>) -> Self {
        Self {
            job_name: job_name.into(),
            arguments: arguments.into_boxed_slice(),
            realm: None,
            script_or_module: None,
            host_defined: None,
        }
    }

    pub fn with_realm(mut self, realm: Option<Realm>) -> Self {
        self.realm = realm;
        self
    }

    pub fn with_script_or_module(mut self, script_or_module: Option<ScriptOrModule>) -> Self {
        self.script_or_module = script_or_module;
        self
    }

    pub fn with_host_defined(mut self, host_defined: Option<HostDefined>) -> Self {
        self.host_defined = host_defined;
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn realm(&self) -> Option<Realm> {
        self.realm
    }

    pub fn script_or_module(&self) -> Option<ScriptOrModule> {
        self.script_or_module
    }

    pub fn host_defined(&self) -> Option<&HostDefined> {
        self.host_defined.as_ref()
    }
}

/// Wake-up signal shared by all queues of one agent. Every state change
/// bumps the generation so a scheduler can sleep until either queue moves.
#[derive(Debug, Default)]
pub(crate) struct JobSignal {
    generation: Mutex<u64>,
    condvar: Condvar,
}

impl JobSignal {
    pub(crate) fn notify(&self) {
        let mut generation = self.generation.lock();
        *generation = generation.wrapping_add(1);
        self.condvar.notify_all();
    }

    pub(crate) fn generation(&self) -> u64 {
        *self.generation.lock()
    }

    /// Blocks until the generation differs from `seen`.
    pub(crate) fn wait_for_change(&self, seen: u64) {
        let mut generation = self.generation.lock();
        while *generation == seen {
            self.condvar.wait(&mut generation);
        }
    }
}

#[derive(Debug, Default)]
struct QueueState {
    jobs: VecDeque<PendingJob>,
    closed: bool,
}

/// Bounded FIFO of pending jobs.
#[derive(Debug)]
pub struct JobQueue {
    kind: QueueKind,
    capacity: usize,
    state: Mutex<QueueState>,
    not_full: Condvar,
    not_empty: Condvar,
    signal: Arc<JobSignal>,
}

impl JobQueue {
    /// A capacity of zero is treated as one.
    pub(crate) fn new(kind: QueueKind, capacity: usize, signal: Arc<JobSignal>) -> Self {
        let capacity = capacity.max(1);
        Self {
            kind,
            capacity,
            state: Mutex::new(QueueState {
                jobs: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            signal,
        }
    }

    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().jobs.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Appends a job, blocking while the queue is full.
    pub fn enqueue(&self, job: PendingJob) -> Result<(), AgentError> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(AgentError::QueueClosed);
            }
            if state.jobs.len() < self.capacity {
                break;
            }
            self.not_full.wait(&mut state);
        }
        state.jobs.push_back(job);
        drop(state);
        self.not_empty.notify_one();
        self.signal.notify();
        Ok(())
    }

    /// Appends a job without blocking.
    pub fn try_enqueue(&self, job: PendingJob) -> Result<(), AgentError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(AgentError::QueueClosed);
        }
        if state.jobs.len() >= self.capacity {
            return Err(AgentError::QueueFull);
        }
        state.jobs.push_back(job);
        drop(state);
        self.not_empty.notify_one();
        self.signal.notify();
        Ok(())
    }

    /// Removes the oldest job, blocking while the queue is empty. Returns
    /// `None` once the queue is closed and drained.
    pub fn dequeue(&self) -> Option<PendingJob> {
        let mut state = self.state.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(job);
            }
            if state.closed {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Removes the oldest job if there is one.
    pub fn try_dequeue(&self) -> Option<PendingJob> {
        let job = self.state.lock().jobs.pop_front();
        if job.is_some() {
            self.not_full.notify_one();
        }
        job
    }

    /// No further jobs are accepted. Jobs already queued can still be
    /// dequeued; blocked callers wake up.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.not_full.notify_all();
        self.not_empty.notify_all();
        self.signal.notify();
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::*;

    fn queue(capacity: usize) -> JobQueue {
        JobQueue::new(QueueKind::Script, capacity, Arc::default())
    }

    #[test]
    fn queue_kind_parsing() {
        assert_eq!("ScriptJobs".parse::<QueueKind>().unwrap(), QueueKind::Script);
        assert_eq!("PromiseJobs".parse::<QueueKind>().unwrap(), QueueKind::Promise);
        assert!(matches!(
            "TimerJobs".parse::<QueueKind>(),
            Err(AgentError::UnknownQueueKind(name)) if name == "TimerJobs"
        ));
        assert_eq!(QueueKind::Promise.to_string(), "PromiseJobs");
    }

    #[test]
    fn fifo_order() {
        let queue = queue(4);
        for name in ["a", "b", "c"] {
            queue.enqueue(PendingJob::new(name, vec![])).unwrap();
        }
        assert_eq!(queue.len(), 3);
        let names: Vec<_> = std::iter::from_fn(|| queue.try_dequeue())
            .map(|job| job.job_name().to_owned())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn bounded_capacity() {
        let queue = queue(1);
        queue.try_enqueue(PendingJob::new("a", vec![])).unwrap();
        assert!(matches!(
            queue.try_enqueue(PendingJob::new("b", vec![])),
            Err(AgentError::QueueFull)
        ));
        assert_eq!(queue.capacity(), 1);
        assert_eq!(self::queue(0).capacity(), 1);
    }

    #[test]
    fn closed_queue_drains_then_signals_end() {
        let queue = queue(2);
        queue.enqueue(PendingJob::new("last", vec![])).unwrap();
        queue.close();
        assert!(queue.is_closed());
        assert!(matches!(
            queue.enqueue(PendingJob::new("late", vec![])),
            Err(AgentError::QueueClosed)
        ));
        assert_eq!(queue.dequeue().unwrap().job_name(), "last");
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn blocking_enqueue_waits_for_room() {
        let queue = Arc::new(queue(1));
        queue.enqueue(PendingJob::new("first", vec![])).unwrap();
        let producer = {
            let queue = queue.clone();
            thread::spawn(move || queue.enqueue(PendingJob::new("second", vec![])))
        };
        assert_eq!(queue.dequeue().unwrap().job_name(), "first");
        assert_eq!(queue.dequeue().unwrap().job_name(), "second");
        producer.join().unwrap().unwrap();
    }

    #[test]
    fn blocking_dequeue_wakes_on_close() {
        let queue = Arc::new(queue(1));
        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.dequeue())
        };
        queue.close();
        assert!(consumer.join().unwrap().is_none());
    }

    #[test]
    fn signal_generation_advances() {
        let signal = Arc::new(JobSignal::default());
        let queue = JobQueue::new(QueueKind::Promise, 2, signal.clone());
        let before = signal.generation();
        queue.enqueue(PendingJob::new("a", vec![])).unwrap();
        assert_ne!(signal.generation(), before);
        // Returns immediately since the generation already moved.
        signal.wait_for_change(before);
    }
}
