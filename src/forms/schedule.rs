//! Delayed UI work (message reveal/hide, redirects) as tokio tasks the owner can
//! list and cancel. Dropping the scheduler aborts everything still pending.

use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    RevealMessage,
    HideMessage,
    Navigate,
}

#[derive(Debug)]
pub struct TaskHandle {
    kind: TaskKind,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl TaskHandle {
    #[must_use]
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<TaskHandle>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` after `delay`. Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, kind: TaskKind, delay: Duration, action: F) -> AbortHandle
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        let abort = handle.abort_handle();

        debug!("scheduled {kind:?} in {}ms", delay.as_millis());

        self.tasks.push(TaskHandle {
            kind,
            delay,
            handle,
        });

        abort
    }

    /// Cancels every pending task of `kind`, returning how many were cancelled.
    pub fn cancel(&mut self, kind: TaskKind) -> usize {
        let mut cancelled = 0;
        self.tasks.retain(|task| {
            if task.kind == kind {
                if !task.is_finished() {
                    cancelled += 1;
                }
                task.cancel();
                false
            } else {
                true
            }
        });

        if cancelled > 0 {
            debug!("cancelled {cancelled} {kind:?} task(s)");
        }

        cancelled
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.cancel();
        }
    }

    /// Kind and delay of every task that has not run yet.
    #[must_use]
    pub fn pending(&self) -> Vec<(TaskKind, Duration)> {
        self.tasks
            .iter()
            .filter(|task| !task.is_finished())
            .map(|task| (task.kind, task.delay))
            .collect()
    }

    #[must_use]
    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.tasks
            .iter()
            .any(|task| task.kind == kind && !task.is_finished())
    }

    /// Waits until every task of `kind` has run or been cancelled.
    pub async fn wait_for(&mut self, kind: TaskKind) {
        let (waiting, rest): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.kind == kind);
        self.tasks = rest;

        for task in waiting {
            // a cancelled task ends with a JoinError, nothing to report
            let _ = task.handle.await;
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
