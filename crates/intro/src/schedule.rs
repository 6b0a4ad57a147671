//! Virtual-clock task queue.
//!
//! Stands in for the browser's `setTimeout`/`setInterval`/`requestAnimationFrame`
//! so the whole sequence can be driven by a host clock or by a test.
//! Tasks falling due at the same instant run in registration order.
//! A periodic task keeps its handle across repeats until cancelled.

/// Handle returned for every registered task.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TaskId(u64);

/// What a task does when it falls due. Interpreted by the sequencer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Job {
    /// Leave the current phase.
    Advance,
    /// Apply the current phase's intensity law.
    Heat,
    /// Spawn, move and cull bubbles.
    Bubbles,
    /// Advance the explosion by one animation frame.
    Frame,
}

#[derive(Clone, Copy, Debug)]
struct Task {
    id: TaskId,
    due: u64,
    period: Option<u64>,
    job: Job,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Run `job` once, `delay_ms` from now.
    pub fn once(&mut self, delay_ms: u64, job: Job) -> TaskId {
        self.push(delay_ms, None, job)
    }

    /// Run `job` every `period_ms`, first at now + `period_ms`. A zero
    /// period is treated as 1ms so virtual time always moves forward.
    pub fn every(&mut self, period_ms: u64, job: Job) -> TaskId {
        let period = period_ms.max(1);
        self.push(period, Some(period), job)
    }

    fn push(&mut self, delay_ms: u64, period: Option<u64>, job: Job) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            due: self.now.saturating_add(delay_ms),
            period,
            job,
        });
        id
    }

    /// Returns whether the task was still registered.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Periodic tasks are re-armed one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskId, Job)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;

        let task = self.tasks[index];
        self.now = self.now.max(task.due);
        match task.period {
            Some(period) => self.tasks[index].due = task.due.saturating_add(period),
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some((task.id, task.job))
    }

    /// Move the clock forward to `until` once nothing else is due.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
