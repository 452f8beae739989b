use crate::job::JobTable;
use crate::state::{State, SystemState};

use super::{Dispatch, DispatchPolicy, Frontier};

/// A work-conserving job-level fixed-priority scheduler.
///
/// Every candidate competes with every other candidate: a job can be
/// dispatched next only if it can start before some other candidate is
/// certainly released (or the first core certainly becomes free) and
/// before any higher-priority candidate is certainly ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jlfp;

impl DispatchPolicy for Jlfp {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn initial_state(&self, _jobs: &JobTable, idle: SystemState) -> State {
        State::Jlfp(idle)
    }

    fn propose(&self, frontier: &Frontier<'_>) -> Vec<Dispatch> {
        let candidates = frontier.candidates();
        candidates
            .iter()
            .filter_map(|&job| {
                let start = frontier.feasible_window(job, candidates)?;
                let (system, finish) = frontier.successor(job, start);
                Some(Dispatch {
                    job,
                    state: State::Jlfp(system),
                    finish,
                })
            })
            .collect()
    }
}
