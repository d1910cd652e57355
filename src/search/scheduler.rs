//! Cancellable timers.
//!
//! `schedule` returns a handle; cancelling the handle before the delay
//! elapses guarantees the task never runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Wall-clock scheduler: one sleeping thread per timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if !guard.is_cancelled() {
                task();
            }
        });
        handle
    }
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    pending: Vec<PendingTimer>,
}

/// Virtual-clock scheduler. Nothing runs until [`advance`](Self::advance).
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Timers that are scheduled and not cancelled.
    pub fn pending_count(&self) -> usize {
        self.state
            .lock()
            .pending
            .iter()
            .filter(|t| !t.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward and run every timer that came due, in
    /// deadline order. Tasks run without the scheduler lock held, so they may
    /// schedule further timers.
    pub fn advance(&self, by: Duration) -> usize {
        let target = {
            let mut state = self.state.lock();
            state.now += by;
            state.now
        };

        let mut ran = 0;
        loop {
            let next = {
                let mut state = self.state.lock();
                state.pending.retain(|t| !t.handle.is_cancelled());
                let idx = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                idx.map(|i| state.pending.remove(i))
            };

            match next {
                Some(timer) => {
                    (timer.task)();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.state.lock();
        state.seq += 1;
        let timer = PendingTimer {
            due: state.now + delay,
            seq: state.seq,
            handle: handle.clone(),
            task,
        };
        state.pending.push(timer);
        handle
    }
}
