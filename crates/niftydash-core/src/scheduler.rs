//! Cancellable delayed tasks.
//!
//! Timers (debounce, simulated latency) are modelled as explicit tasks:
//! `schedule(delay, task) -> TaskHandle`, `cancel(handle)`.
//!
//! | Implementation | Clock | Use |
//! |----------------|-------|-----|
//! | [`TokioScheduler`] | tokio runtime timers | CLI and async front ends |
//! | [`ManualScheduler`] | virtual, advanced by the caller | deterministic tests |

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Work executed once a scheduled delay elapses.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Schedules delayed, cancellable work.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Returns `true` when the task was still pending and will not run.
    fn cancel(&self, handle: TaskHandle) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        (**self).schedule(delay, task)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        (**self).cancel(handle)
    }
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
    next_id: Arc<AtomicU64>,
    tasks: Arc<Mutex<HashMap<u64, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: Arc::new(AtomicU64::new(1)),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Uses the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    pub fn pending_len(&self) -> usize {
        self.tasks
            .lock()
            .expect("scheduler task map should not be poisoned")
            .len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = Arc::clone(&self.tasks);

        // Hold the map lock across spawn so a zero-delay task cannot remove
        // its entry before it is inserted.
        let mut map = self
            .tasks
            .lock()
            .expect("scheduler task map should not be poisoned");
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let still_pending = tasks
                .lock()
                .expect("scheduler task map should not be poisoned")
                .remove(&id)
                .is_some();
            if still_pending {
                task();
            }
        });
        map.insert(id, join);

        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        let removed = self
            .tasks
            .lock()
            .expect("scheduler task map should not be poisoned")
            .remove(&handle.0);
        match removed {
            Some(join) => {
                join.abort();
                true
            }
            None => false,
        }
    }
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), Task>,
}

/// Virtual-clock scheduler; nothing runs until the clock is advanced.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Runs every task due at or before `target`, in deadline order, and
    /// returns how many ran. Tasks scheduled by running tasks are honoured
    /// if they fall inside the window.
    pub fn advance_to(&self, target: Duration) -> usize {
        self.run_due(target, true)
    }

    /// Like [`advance_to`](Self::advance_to) but leaves tasks due exactly at
    /// `target` pending, so input delivered "at" `target` is seen before
    /// timers expiring at the same instant.
    pub fn advance_until(&self, target: Duration) -> usize {
        self.run_due(target, false)
    }

    fn run_due(&self, target: Duration, inclusive: bool) -> usize {
        let mut ran = 0;
        loop {
            let next = {
                let mut inner = self.lock();
                let due = inner.pending.keys().next().copied().filter(|(deadline, _)| {
                    if inclusive {
                        *deadline <= target
                    } else {
                        *deadline < target
                    }
                });
                match due {
                    Some(key) => {
                        inner.now = inner.now.max(key.0);
                        inner.pending.remove(&key)
                    }
                    None => {
                        inner.now = inner.now.max(target);
                        None
                    }
                }
            };

            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner
            .lock()
            .expect("manual scheduler lock should not be poisoned")
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        let deadline = inner.now + delay;
        inner.pending.insert((deadline, id), task);
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        let mut inner = self.lock();
        let key = inner
            .pending
            .keys()
            .find(|(_, id)| *id == handle.0)
            .copied();
        key.and_then(|key| inner.pending.remove(&key)).is_some()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.pending.len())
            .finish()
    }
}
