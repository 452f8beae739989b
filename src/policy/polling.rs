use itertools::Itertools;

use crate::interval::{min_over, Interval};
use crate::job::{JobId, JobTable};
use crate::state::{State, SystemState};

use super::{Dispatch, DispatchPolicy, Frontier};

/// A polling-point scheduler in the style of the ROS 2 executor.
///
/// New work is sampled only at polling points. Only jobs that are
/// (possibly or certainly) released by the current polling point compete
/// with each other; if no job is certainly released by then, the polling
/// point first moves forward to the next release.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosPolling;

impl RosPolling {
    /// Jobs certainly released by the end of `pp`.
    fn certainly_released(frontier: &Frontier<'_>, pp: Interval) -> Vec<JobId> {
        frontier
            .candidates()
            .iter()
            .copied()
            .filter(|j| frontier.latest_release(*j) <= pp.max)
            .collect()
    }

    /// Jobs possibly released by the end of `pp`.
    fn possibly_released(frontier: &Frontier<'_>, pp: Interval) -> Vec<JobId> {
        frontier
            .candidates()
            .iter()
            .copied()
            .filter(|j| frontier.earliest_release(*j) <= pp.max)
            .collect()
    }

    /// The earliest polling point no sooner than `core` at which one of
    /// `jobs` may be waiting.
    fn next_polling_point(frontier: &Frontier<'_>, jobs: &[JobId], core: Interval) -> Interval {
        let earliest = min_over(jobs.iter().map(|j| frontier.earliest_release(*j)), core.min);
        let latest = min_over(jobs.iter().map(|j| frontier.latest_release(*j)), core.max);
        Interval::new(earliest.max(core.min), latest.max(core.max))
    }

    /// Was `pp` caused by the last core becoming idle in the parent state?
    fn core_triggered(frontier: &Frontier<'_>, pp: Interval) -> bool {
        frontier
            .parent()
            .map_or(false, |parent| parent.system().latest_core() == pp)
    }
}

impl DispatchPolicy for RosPolling {
    fn name(&self) -> &'static str {
        "ros-polling"
    }

    fn initial_state(&self, _jobs: &JobTable, idle: SystemState) -> State {
        State::Ros {
            system: idle,
            polling_point: Interval::point(0),
        }
    }

    fn propose(&self, frontier: &Frontier<'_>) -> Vec<Dispatch> {
        let system = frontier.system();
        let mut pp = frontier
            .state()
            .polling_point()
            .unwrap_or_else(|| Interval::point(0));
        if Self::certainly_released(frontier, pp).is_empty() {
            pp = Self::next_polling_point(frontier, frontier.candidates(), system.earliest_core());
        }

        let eligible = if pp.is_point() && !Self::core_triggered(frontier, pp) {
            Self::certainly_released(frontier, pp)
        } else {
            Self::possibly_released(frontier, pp)
        };

        eligible
            .iter()
            .filter_map(|&job| {
                let start = frontier.feasible_window(job, &eligible)?;
                let (system, finish) = frontier.successor(job, start);
                let polling_point = if eligible.len() > 1 {
                    if pp.is_point() {
                        pp
                    } else {
                        start
                    }
                } else {
                    let remaining = frontier
                        .candidates()
                        .iter()
                        .copied()
                        .filter(|j| *j != job)
                        .collect_vec();
                    Self::next_polling_point(frontier, &remaining, system.earliest_core())
                };
                Some(Dispatch {
                    job,
                    state: State::Ros {
                        system,
                        polling_point,
                    },
                    finish,
                })
            })
            .collect()
    }
}
