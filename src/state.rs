/*! Abstract scheduler states, i.e., the nodes of a schedule-abstraction graph

Every state shares the platform view of [SystemState]: the
availability interval of each core and the finish-time intervals of
jobs that might still be executing. Polling-based policies extend this
with the interval in which the next polling point may occur; [State]
distinguishes the two shapes.
*/

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use crate::interval::Interval;
use crate::job::JobId;

/// The platform view shared by all policies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SystemState {
    /// One availability interval per core, sorted by `(min, max)`.
    availability: Vec<Interval>,
    /// Jobs that might still be executing, with their finish-time
    /// intervals `[EFT, LFT]`.
    running: BTreeMap<JobId, Interval>,
}

impl SystemState {
    /// The state of `cores` idle cores at time zero.
    pub fn idle(cores: usize) -> Self {
        SystemState {
            availability: vec![Interval::point(0); cores],
            running: BTreeMap::new(),
        }
    }

    /// Assemble a state; `availability` must be sorted by `(min, max)`
    /// and must not be empty.
    pub fn new(availability: Vec<Interval>, running: BTreeMap<JobId, Interval>) -> Self {
        debug_assert!(!availability.is_empty());
        debug_assert!(availability
            .iter()
            .tuple_windows()
            .all(|(a, b)| (a.min, a.max) <= (b.min, b.max)));
        SystemState {
            availability,
            running,
        }
    }

    pub fn cores(&self) -> usize {
        self.availability.len()
    }

    pub fn availability(&self) -> &[Interval] {
        &self.availability
    }

    /// Availability of the core that may become free soonest (`A[0]`).
    pub fn earliest_core(&self) -> Interval {
        self.availability[0]
    }

    /// Availability of the core that may become free last (`A[m-1]`).
    pub fn latest_core(&self) -> Interval {
        self.availability[self.availability.len() - 1]
    }

    pub fn running(&self) -> &BTreeMap<JobId, Interval> {
        &self.running
    }

    /// The finish-time interval of `job`, if it might still be executing.
    pub fn finish_interval(&self, job: JobId) -> Option<Interval> {
        self.running.get(&job).copied()
    }

    /// Is the availability vector sorted by `(min, max)`?
    pub fn is_sorted(&self) -> bool {
        self.availability
            .iter()
            .tuple_windows()
            .all(|(a, b)| (a.min, a.max) <= (b.min, b.max))
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.availability.iter().join(", "))
    }
}

/// A node of the schedule-abstraction graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// A state of a continuously scheduling (work-conserving JLFP) policy.
    Jlfp(SystemState),
    /// A state of a polling-based (ROS 2 executor) policy.
    Ros {
        system: SystemState,
        polling_point: Interval,
    },
}

impl State {
    pub fn system(&self) -> &SystemState {
        match self {
            State::Jlfp(system) => system,
            State::Ros { system, .. } => system,
        }
    }

    /// The interval of the next polling point, if the policy polls.
    pub fn polling_point(&self) -> Option<Interval> {
        match self {
            State::Jlfp(_) => None,
            State::Ros { polling_point, .. } => Some(*polling_point),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Jlfp(system) => write!(f, "{}", system),
            State::Ros {
                system,
                polling_point,
            } => write!(f, "{} pp={}", system, polling_point),
        }
    }
}
