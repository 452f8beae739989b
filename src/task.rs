/*! Job sets generated from periodic tasks

A periodic task releases one job every `period` time units, each
subject to release jitter. [unroll] turns a task set into the concrete
job set that a schedule-abstraction graph is built from.
*/

use crate::interval::Interval;
use crate::job::{Job, JobSetError, Priority};
use crate::time::{Duration, Instant};

/// A periodic task with release jitter and an execution-cost range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicTask {
    pub name: String,
    pub period: Duration,
    pub jitter: Duration,
    pub cost: Interval,
}

impl PeriodicTask {
    pub fn new(
        name: impl Into<String>,
        period: Duration,
        jitter: Duration,
        cost: Interval,
    ) -> Self {
        PeriodicTask {
            name: name.into(),
            period,
            jitter,
            cost,
        }
    }

    /// Earliest release of the `k`-th job (counting from one).
    fn nominal_release(&self, k: i64, release_at_zero: bool) -> Instant {
        self.period * (k - release_at_zero as i64)
    }
}

/// Generate all jobs released no later than `horizon`.
///
/// The `k`-th job of task `T` is named `J<T>_<k>` and released
/// somewhere in `[T·k', T·k' + jitter]`, where `k' = k - 1` if
/// `release_at_zero` holds and `k' = k` otherwise. Priorities are
/// assigned in task order, and within a task in release order,
/// starting at 1, so earlier tasks dominate.
pub fn unroll(
    tasks: &[PeriodicTask],
    horizon: Instant,
    release_at_zero: bool,
) -> Result<Vec<Job>, JobSetError> {
    let mut jobs = Vec::new();
    let mut priority: Priority = 1;
    for task in tasks {
        if task.period <= 0 {
            return Err(JobSetError::NonPositivePeriod {
                task: task.name.clone(),
            });
        }
        let mut k = 1;
        let mut release = task.nominal_release(k, release_at_zero);
        while release <= horizon {
            jobs.push(Job::new(
                format!("J{}_{}", task.name, k),
                Interval::new(release, release + task.jitter),
                task.cost,
                priority,
            ));
            priority += 1;
            k += 1;
            release = task.nominal_release(k, release_at_zero);
        }
    }
    Ok(jobs)
}
