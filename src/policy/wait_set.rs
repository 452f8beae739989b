use tracing::trace;

use crate::interval::{min_over, Interval};
use crate::job::{JobId, JobTable};
use crate::state::{State, SystemState};
use crate::time::INFINITY;

use super::{Dispatch, DispatchPolicy, Frontier};

/// A polling-point scheduler that tracks the wait set.
///
/// Among the candidates with lower priority than the last dispatched
/// job, those possibly released by the end of the current polling point
/// form the maximal wait set, and those certainly released by its
/// beginning form the minimal wait set. A candidate competes only with
/// the members of the wait set it can belong to, trying the smallest
/// applicable set first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosWaitSet;

struct WaitSets {
    minimal: Vec<JobId>,
    maximal: Vec<JobId>,
}

impl WaitSets {
    fn new(frontier: &Frontier<'_>, pp: Interval) -> Self {
        let jobs = frontier.jobs();
        let lower: Vec<JobId> = match frontier.last_dispatched() {
            Some(last) => frontier
                .candidates()
                .iter()
                .copied()
                .filter(|j| jobs.has_higher_priority(last, *j))
                .collect(),
            None => Vec::new(),
        };
        WaitSets {
            minimal: lower
                .iter()
                .copied()
                .filter(|j| frontier.latest_release(*j) <= pp.min)
                .collect(),
            maximal: lower
                .iter()
                .copied()
                .filter(|j| frontier.earliest_release(*j) <= pp.max)
                .collect(),
        }
    }

    /// The sets of competitors to try for `job`, in order of preference.
    fn contexts(&self, frontier: &Frontier<'_>, job: JobId) -> Vec<Vec<JobId>> {
        if self.minimal.contains(&job) {
            vec![self.minimal.clone()]
        } else if self.maximal.contains(&job) {
            let mut with_job = self.minimal.clone();
            with_job.push(job);
            vec![self.maximal.clone(), with_job]
        } else if self.minimal.is_empty() {
            vec![frontier.candidates().to_vec()]
        } else {
            Vec::new()
        }
    }
}

impl DispatchPolicy for RosWaitSet {
    fn name(&self) -> &'static str {
        "ros-wait-set"
    }

    /// The first polling point spans the earliest possible and the
    /// earliest certain release of any job.
    fn initial_state(&self, jobs: &JobTable, idle: SystemState) -> State {
        // nothing has finished yet, so jobs with predecessors are never
        // released before +inf
        let earliest = min_over(
            jobs.ids().map(|j| {
                if jobs.predecessors(j).is_empty() {
                    jobs.release(j).min
                } else {
                    INFINITY
                }
            }),
            0,
        );
        let latest = min_over(jobs.ids().map(|j| jobs.release(j).max), 0);
        State::Ros {
            system: idle,
            polling_point: Interval::new(earliest, latest),
        }
    }

    fn propose(&self, frontier: &Frontier<'_>) -> Vec<Dispatch> {
        let jobs = frontier.jobs();
        let pp = frontier
            .state()
            .polling_point()
            .unwrap_or_else(|| Interval::point(0));
        let wait_sets = WaitSets::new(frontier, pp);

        let mut dispatches = Vec::new();
        for &job in frontier.candidates() {
            let start = wait_sets
                .contexts(frontier, job)
                .iter()
                .map(|ws| frontier.start_window(job, ws))
                .find(|window| !window.is_empty());
            let start = match start {
                Some(start) => start,
                None => {
                    trace!(job = jobs.name(job), "not eligible in any wait set");
                    continue;
                }
            };
            let (system, finish) = frontier.successor(job, start);

            let polling_points = match frontier.last_dispatched() {
                None => vec![pp],
                Some(last) if jobs.has_higher_priority(job, last) => vec![start],
                Some(_) if wait_sets.minimal.contains(&job) => vec![pp],
                Some(_) if wait_sets.maximal.contains(&job) => {
                    // with an empty minimal wait set, the lowest-priority job
                    // outside the rest of the maximal wait set may have been
                    // polled either at the current polling point or at its own start
                    let lowest = frontier
                        .candidates()
                        .iter()
                        .filter(|j| **j != job && !wait_sets.maximal.contains(*j))
                        .all(|j| jobs.has_higher_priority(*j, job));
                    if wait_sets.minimal.is_empty() && lowest {
                        vec![pp, start]
                    } else {
                        vec![pp]
                    }
                }
                Some(_) => vec![start],
            };

            for polling_point in polling_points {
                dispatches.push(Dispatch {
                    job,
                    state: State::Ros {
                        system: system.clone(),
                        polling_point,
                    },
                    finish,
                });
            }
        }
        dispatches
    }
}
