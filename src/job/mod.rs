/*! The job set under analysis

This module provides [Job], the timing tuple of a single job, and
[JobTable], the immutable, validated collection of all jobs of one
analysis run together with their (optional) precedence constraints.

All validation happens when a [JobTable] is constructed, so the
exploration engine never encounters malformed input.
*/

use std::collections::BTreeSet;

use derive_more::{Display, From, Into};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::interval::{max_over, Interval};
use crate::time::{Duration, INFINITY};

/// Job-level fixed priority.
///
/// Numerically smaller value == higher priority. Priorities are
/// unique within a job set.
pub type Priority = i64;

/// The priority order among jobs.
///
/// A numerically smaller value corresponds to higher priority.
pub fn is_higher_priority_than(a: Priority, b: Priority) -> bool {
    a < b
}

/// Dense index of a job within its [JobTable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "#{}", _0)]
pub struct JobId(usize);

impl JobId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One job: an uncertain release window, an uncertain execution
/// cost, and a fixed priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    name: String,
    release: Interval,
    cost: Interval,
    priority: Priority,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        release: Interval,
        cost: Interval,
        priority: Priority,
    ) -> Self {
        Job {
            name: name.into(),
            release,
            cost,
            priority,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The release window `[r_min, r_max]`.
    pub fn release(&self) -> Interval {
        self.release
    }

    /// The execution-cost range `[C_min, C_max]`.
    pub fn cost(&self) -> Interval {
        self.cost
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    fn validate(&self) -> Result<(), JobSetError> {
        if self.release.min < 0 || self.cost.min < 0 {
            return Err(JobSetError::NegativeTime {
                job: self.name.clone(),
            });
        }
        if self.release.is_empty() {
            return Err(JobSetError::InvertedRelease {
                job: self.name.clone(),
                release: self.release,
            });
        }
        if self.cost.is_empty() {
            return Err(JobSetError::InvertedCost {
                job: self.name.clone(),
                cost: self.cost,
            });
        }
        Ok(())
    }
}

/// Error type returned when a job set is rejected before analysis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobSetError {
    #[error("job {job} has a negative release time or execution cost")]
    NegativeTime { job: String },
    #[error("job {job} has an inverted release window {release}")]
    InvertedRelease { job: String, release: Interval },
    #[error("job {job} has an inverted execution-cost range {cost}")]
    InvertedCost { job: String, cost: Interval },
    #[error("job name {job} is used more than once")]
    DuplicateName { job: String },
    #[error("jobs {first} and {second} share priority {priority}")]
    DuplicatePriority {
        first: String,
        second: String,
        priority: Priority,
    },
    #[error("precedence constraint refers to unknown job {job}")]
    UnknownJob { job: String },
    #[error("task {task} has a non-positive period")]
    NonPositivePeriod { task: String },
    /// Some schedule of the job set may extend to the "+∞" sentinel,
    /// so time bounds could no longer be told apart from it.
    #[error("job set may be busy until {horizon}, which reaches the time limit {limit}")]
    HorizonTooLong { horizon: Duration, limit: Duration },
}

/// Immutable mapping from [JobId] to the job's timing tuple and
/// predecessor set.
#[derive(Debug, Clone)]
pub struct JobTable {
    jobs: Vec<Job>,
    predecessors: Vec<BTreeSet<JobId>>,
    by_name: FxHashMap<String, JobId>,
}

impl JobTable {
    /// Validate the given jobs and build a table without any
    /// precedence constraints.
    ///
    /// Rejects negative or inverted intervals, duplicate names,
    /// duplicate priorities, and job sets whose latest release plus total
    /// worst-case cost reaches [INFINITY].
    pub fn new(jobs: Vec<Job>) -> Result<Self, JobSetError> {
        let mut by_name = FxHashMap::default();
        let mut by_priority: FxHashMap<Priority, usize> = FxHashMap::default();
        for (idx, job) in jobs.iter().enumerate() {
            job.validate()?;
            if by_name.insert(job.name.clone(), JobId(idx)).is_some() {
                return Err(JobSetError::DuplicateName {
                    job: job.name.clone(),
                });
            }
            if let Some(first) = by_priority.insert(job.priority, idx) {
                return Err(JobSetError::DuplicatePriority {
                    first: jobs[first].name.clone(),
                    second: job.name.clone(),
                    priority: job.priority,
                });
            }
        }
        let horizon = max_over(jobs.iter().map(|j| j.release.max), 0).saturating_add(
            jobs.iter()
                .fold(0, |total: Duration, j| total.saturating_add(j.cost.max)),
        );
        if horizon >= INFINITY {
            return Err(JobSetError::HorizonTooLong {
                horizon,
                limit: INFINITY,
            });
        }
        let predecessors = vec![BTreeSet::new(); jobs.len()];
        Ok(JobTable {
            jobs,
            predecessors,
            by_name,
        })
    }

    /// Declare that the job named `job` may start only after all jobs
    /// named in `predecessors` have finished.
    ///
    /// The precedence relation must be acyclic; this is not checked.
    pub fn with_predecessors<'a, I>(
        mut self,
        job: &str,
        predecessors: I,
    ) -> Result<Self, JobSetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let id = self.resolve(job)?;
        for pred in predecessors {
            let pred = self.resolve(pred)?;
            self.predecessors[id.0].insert(pred);
        }
        Ok(self)
    }

    fn resolve(&self, name: &str) -> Result<JobId, JobSetError> {
        self.lookup(name).ok_or_else(|| JobSetError::UnknownJob {
            job: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// All job identifiers in table order.
    pub fn ids(&self) -> impl Iterator<Item = JobId> + Clone {
        (0..self.jobs.len()).map(JobId)
    }

    pub fn lookup(&self, name: &str) -> Option<JobId> {
        self.by_name.get(name).copied()
    }

    pub fn job(&self, id: JobId) -> &Job {
        &self.jobs[id.0]
    }

    pub fn name(&self, id: JobId) -> &str {
        &self.jobs[id.0].name
    }

    pub fn release(&self, id: JobId) -> Interval {
        self.jobs[id.0].release
    }

    pub fn cost(&self, id: JobId) -> Interval {
        self.jobs[id.0].cost
    }

    pub fn priority(&self, id: JobId) -> Priority {
        self.jobs[id.0].priority
    }

    pub fn predecessors(&self, id: JobId) -> &BTreeSet<JobId> {
        &self.predecessors[id.0]
    }

    /// Does `a` have higher priority than `b`?
    pub fn has_higher_priority(&self, a: JobId, b: JobId) -> bool {
        is_higher_priority_than(self.priority(a), self.priority(b))
    }

    /// Is `job` a candidate once exactly the jobs in `dispatched` have
    /// been dispatched, i.e., not itself dispatched yet and all its
    /// predecessors dispatched?
    pub fn is_ready(&self, job: JobId, dispatched: &BTreeSet<JobId>) -> bool {
        !dispatched.contains(&job) && self.predecessors(job).is_subset(dispatched)
    }
}

#[cfg(test)]
mod tests;
