//! Fixed-period recurring tasks driven by the host frame clock
//!
//! A [`RecurringTask`] is the handle for one periodic job. The owner holds
//! it in an `Option` and cancels by taking it out; nothing runs on its own.
//! The host feeds elapsed time in and asks which task is due next.

/// Maximum task runs executed by one clock advance (prevents spiral of death)
pub const MAX_TASK_RUNS_PER_ADVANCE: u32 = 64;

/// A task that fires every `period` milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringTask {
    period: f64,
    next_due: f64,
}

impl RecurringTask {
    /// Schedule a task started at `now`; first run is one period later
    pub fn start(now: f64, period: f64) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn next_due(&self) -> f64 {
        self.next_due
    }

    /// Whether a run is due at or before `now`
    #[inline]
    pub fn is_due(&self, now: f64) -> bool {
        self.next_due <= now
    }

    /// Mark one run done; returns the time it was due at
    pub fn complete_run(&mut self) -> f64 {
        let due = self.next_due;
        self.next_due += self.period;
        due
    }

    /// Drop missed runs so the next one lands after `now`, on the period grid
    pub fn skip_missed(&mut self, now: f64) {
        if self.next_due <= now {
            let missed = ((now - self.next_due) / self.period).floor() + 1.0;
            self.next_due += missed * self.period;
        }
    }
}
