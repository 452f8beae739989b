/*! Dispatch policies

A [DispatchPolicy] decides, for one leaf of the graph, which of the
candidate jobs may be dispatched next and what the resulting successor
states look like. All policies share the start-window and
successor-state rules implemented by [Frontier]; they differ in which
jobs compete with each other and in how polling points evolve.
*/

use std::str::FromStr;

use auto_impl::auto_impl;
use derive_more::Display;
use thiserror::Error;

use crate::interval::Interval;
use crate::job::{JobId, JobTable};
use crate::state::{State, SystemState};

mod acceptance;
mod frontier;
mod jlfp;
mod polling;
mod wait_set;

pub use acceptance::RosAcceptance;
pub use frontier::Frontier;
pub use jlfp::Jlfp;
pub use polling::RosPolling;
pub use wait_set::RosWaitSet;

/// One outcome of dispatching a job in a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub job: JobId,
    pub state: State,
    /// The finish-time interval `[EFT, LFT]` of `job`.
    pub finish: Interval,
}

#[auto_impl(&, Box, Rc)]
pub trait DispatchPolicy {
    fn name(&self) -> &'static str;

    /// The root state of the graph, given the idle platform.
    fn initial_state(&self, jobs: &JobTable, idle: SystemState) -> State;

    /// All ways in which one of the frontier's candidates can be
    /// dispatched next. An empty result marks a dead end.
    fn propose(&self, frontier: &Frontier<'_>) -> Vec<Dispatch>;
}

/// Identifies one of the provided dispatch policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum PolicyKind {
    #[default]
    #[display(fmt = "standard")]
    Jlfp,
    #[display(fmt = "ros-polling")]
    RosPolling,
    #[display(fmt = "ros-wait-set")]
    RosWaitSet,
    #[display(fmt = "ros-acceptance")]
    RosAcceptance,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Jlfp,
        PolicyKind::RosPolling,
        PolicyKind::RosWaitSet,
        PolicyKind::RosAcceptance,
    ];

    pub fn instantiate(self) -> Box<dyn DispatchPolicy> {
        match self {
            PolicyKind::Jlfp => Box::new(Jlfp),
            PolicyKind::RosPolling => Box::new(RosPolling),
            PolicyKind::RosWaitSet => Box::new(RosWaitSet),
            PolicyKind::RosAcceptance => Box::new(RosAcceptance),
        }
    }
}

/// Error type returned when a policy identifier is not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown dispatch policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
