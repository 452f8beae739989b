use tracing::trace;

use crate::interval::{Interval, Position};
use crate::job::{JobId, JobTable};
use crate::state::{State, SystemState};
use crate::time::{Instant, INFINITY};

use super::{Dispatch, DispatchPolicy, Frontier};

/// A polling-point scheduler with an explicit acceptance test.
///
/// The polling point of every successor is the availability of its last
/// core. A job passing the usual start-window test is dispatched only if
/// it may enter the wait set strictly before every higher-priority
/// candidate is certainly in it, judged against the polling point of the
/// parent state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosAcceptance;

/// `EWS`: the earliest time a job released no sooner than `release` can
/// be in the wait set of polling point `pp`.
pub(crate) fn earliest_in_wait_set(release: Instant, pp: Interval) -> Instant {
    match pp.position_of(release) {
        Position::Before => pp.min,
        Position::Within => release,
        Position::After => INFINITY,
    }
}

/// `LWS`: the latest time a job released no later than `release` is
/// certainly in the wait set of polling point `pp`.
pub(crate) fn latest_in_wait_set(release: Instant, pp: Interval) -> Instant {
    match pp.position_of(release) {
        Position::After => INFINITY,
        Position::Before | Position::Within => pp.max,
    }
}

impl RosAcceptance {
    fn accepts(frontier: &Frontier<'_>, job: JobId, reference: Interval, pp: Interval) -> bool {
        let jobs = frontier.jobs();
        let mut ews = earliest_in_wait_set(frontier.earliest_release(job), reference);
        if let Some(last) = frontier.last_dispatched() {
            if jobs.has_higher_priority(job, last) {
                ews += pp.max;
            }
        }
        frontier
            .candidates()
            .iter()
            .filter(|h| **h != job && jobs.has_higher_priority(**h, job))
            .all(|h| ews < latest_in_wait_set(frontier.latest_release(*h), reference))
    }
}

impl DispatchPolicy for RosAcceptance {
    fn name(&self) -> &'static str {
        "ros-acceptance"
    }

    fn initial_state(&self, _jobs: &JobTable, idle: SystemState) -> State {
        State::Ros {
            system: idle,
            polling_point: Interval::point(0),
        }
    }

    fn propose(&self, frontier: &Frontier<'_>) -> Vec<Dispatch> {
        let pp = frontier
            .state()
            .polling_point()
            .unwrap_or_else(|| Interval::point(0));
        let reference = frontier
            .parent()
            .and_then(State::polling_point)
            .unwrap_or(pp);
        let candidates = frontier.candidates();

        candidates
            .iter()
            .filter_map(|&job| {
                let start = frontier.feasible_window(job, candidates)?;
                if !Self::accepts(frontier, job, reference, pp) {
                    trace!(job = frontier.jobs().name(job), "rejected at polling point");
                    return None;
                }
                let (system, finish) = frontier.successor(job, start);
                let polling_point = system.latest_core();
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
