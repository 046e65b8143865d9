//! Cooperative interval scheduler for view-owned timers.
//!
//! # Responsibility
//! - Run repeating callbacks on one logical thread, driven by `advance_to`.
//! - Tie every scheduled task to a `TaskHandle` owned by the view that started it.
//!
//! # Invariants
//! - Dropping or cancelling a handle removes its task; no callback runs afterwards.
//! - Due ticks fire in `(due time, task id)` order, including catch-up ticks.
//! - A callback returning `TaskControl::Stop` is removed and never fires again.

use crate::model::note::EpochMillis;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

pub type TaskId = u64;

/// Returned by a task callback to keep or end its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    Continue,
    Stop,
}

type TaskCallback = Box<dyn FnMut(EpochMillis) -> TaskControl>;

struct TaskSlot {
    interval_ms: i64,
    next_due_ms: EpochMillis,
    // `None` while the callback is executing.
    callback: Option<TaskCallback>,
}

struct SchedulerInner {
    now_ms: EpochMillis,
    next_id: TaskId,
    tasks: BTreeMap<TaskId, TaskSlot>,
}

/// Single-threaded timer wheel. Clones share the same task set.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new(now_ms: EpochMillis) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now_ms,
                next_id: 1,
                tasks: BTreeMap::new(),
            })),
        }
    }

    pub fn now_ms(&self) -> EpochMillis {
        self.inner.borrow().now_ms
    }

    /// Number of tasks still scheduled.
    pub fn active_tasks(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Schedules `callback` every `interval_ms`, first firing one interval from now.
    ///
    /// Intervals below one millisecond are raised to one.
    pub fn every<F>(&self, interval_ms: i64, callback: F) -> TaskHandle
    where
        F: FnMut(EpochMillis) -> TaskControl + 'static,
    {
        let interval_ms = interval_ms.max(1);
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let next_due_ms = inner.now_ms + interval_ms;
        inner.tasks.insert(
            id,
            TaskSlot {
                interval_ms,
                next_due_ms,
                callback: Some(Box::new(callback)),
            },
        );
        debug!("event=task_schedule module=scheduler status=ok task_id={id} interval_ms={interval_ms}");

        TaskHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Moves time forward to `now_ms`, firing every tick that became due.
    ///
    /// Returns the number of callback invocations.
    pub fn advance_to(&self, now_ms: EpochMillis) -> usize {
        let mut fired = 0;
        loop {
            let next = {
                let inner = self.inner.borrow();
                inner
                    .tasks
                    .iter()
                    .filter(|(_, slot)| slot.callback.is_some() && slot.next_due_ms <= now_ms)
                    .min_by_key(|(id, slot)| (slot.next_due_ms, **id))
                    .map(|(id, slot)| (*id, slot.next_due_ms))
            };
            let Some((id, due_ms)) = next else {
                break;
            };

            let callback = {
                let mut inner = self.inner.borrow_mut();
                inner.now_ms = inner.now_ms.max(due_ms);
                inner
                    .tasks
                    .get_mut(&id)
                    .and_then(|slot| slot.callback.take())
            };
            let Some(mut callback) = callback else {
                continue;
            };

            let control = callback(due_ms);
            fired += 1;

            let removed = {
                let mut inner = self.inner.borrow_mut();
                match control {
                    TaskControl::Continue => match inner.tasks.get_mut(&id) {
                        Some(slot) => {
                            slot.next_due_ms = due_ms + slot.interval_ms;
                            slot.callback = Some(callback);
                            None
                        }
                        // Cancelled from inside its own callback.
                        None => Some(callback),
                    },
                    TaskControl::Stop => {
                        inner.tasks.remove(&id);
                        debug!("event=task_stop module=scheduler status=ok task_id={id}");
                        Some(callback)
                    }
                }
            };
            drop(removed);
        }

        let mut inner = self.inner.borrow_mut();
        inner.now_ms = inner.now_ms.max(now_ms);
        fired
    }
}

/// Scoped ownership of one scheduled task; cancels it on drop.
#[must_use = "dropping the handle cancels the task immediately"]
pub struct TaskHandle {
    id: TaskId,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Whether the task is still scheduled.
    pub fn is_active(&self) -> bool {
        let Some(inner) = self.scheduler.upgrade() else {
            return false;
        };
        let active = match inner.try_borrow() {
            Ok(inner) => inner.tasks.contains_key(&self.id),
            Err(_) => true,
        };
        active
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        let Some(inner) = self.scheduler.upgrade() else {
            return;
        };
        let removed = match inner.try_borrow_mut() {
            Ok(mut inner) => inner.tasks.remove(&self.id),
            Err(_) => {
                warn!(
                    "event=task_cancel module=scheduler status=error task_id={} error_code=scheduler_busy",
                    self.id
                );
                None
            }
        };
        if removed.is_some() {
            debug!("event=task_cancel module=scheduler status=ok task_id={}", self.id);
        }
        // The callback may own other handles; release it after the borrow ends.
        drop(removed);
    }
}
