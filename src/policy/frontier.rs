use std::collections::BTreeSet;
use std::iter;

use itertools::Itertools;
use tracing::trace;

use crate::interval::{max_over, min_over, Interval};
use crate::job::{JobId, JobTable};
use crate::response_time::ResponseTimes;
use crate::state::{State, SystemState};
use crate::time::{Instant, INFINITY};

/// Everything a policy may inspect when expanding one leaf of the graph.
///
/// Release and finish bounds are precedence-aware: a job that is still
/// possibly running in the current state contributes its finish-time
/// interval, a job that has certainly finished contributes its
/// response-time bounds as accumulated so far.
pub struct Frontier<'a> {
    jobs: &'a JobTable,
    response_times: &'a ResponseTimes,
    state: &'a State,
    parent: Option<&'a State>,
    last_dispatched: Option<JobId>,
    candidates: Vec<JobId>,
}

impl<'a> Frontier<'a> {
    /// Describe the leaf holding `state`, reached from `parent` by
    /// dispatching `last_dispatched`, after the jobs in `dispatched`
    /// have been dispatched along its root path.
    pub fn new(
        jobs: &'a JobTable,
        response_times: &'a ResponseTimes,
        state: &'a State,
        parent: Option<&'a State>,
        last_dispatched: Option<JobId>,
        dispatched: &BTreeSet<JobId>,
    ) -> Self {
        let candidates = jobs.ids().filter(|j| jobs.is_ready(*j, dispatched)).collect();
        Frontier {
            jobs,
            response_times,
            state,
            parent,
            last_dispatched,
            candidates,
        }
    }

    pub fn jobs(&self) -> &'a JobTable {
        self.jobs
    }

    pub fn state(&self) -> &'a State {
        self.state
    }

    pub fn system(&self) -> &'a SystemState {
        self.state.system()
    }

    pub fn parent(&self) -> Option<&'a State> {
        self.parent
    }

    pub fn last_dispatched(&self) -> Option<JobId> {
        self.last_dispatched
    }

    /// Jobs not yet dispatched whose predecessors all have been, in
    /// job-table order.
    pub fn candidates(&self) -> &[JobId] {
        &self.candidates
    }

    /// `EFT*`: the earliest finish time of an already dispatched job.
    pub fn earliest_finish(&self, job: JobId) -> Instant {
        match self.system().finish_interval(job) {
            Some(fti) => fti.min,
            None => self.response_times.best_case(job),
        }
    }

    /// `LFT*`: the latest finish time of an already dispatched job.
    pub fn latest_finish(&self, job: JobId) -> Instant {
        match self.system().finish_interval(job) {
            Some(fti) => fti.max,
            None => self.response_times.worst_case(job),
        }
    }

    /// `R_min`: the earliest time `job` can be released and have all its
    /// predecessors completed.
    pub fn earliest_release(&self, job: JobId) -> Instant {
        let preds = self.jobs.predecessors(job);
        let bound = max_over(preds.iter().map(|p| self.earliest_finish(*p)), 0);
        self.jobs.release(job).min.max(bound)
    }

    /// `R_max`: the latest time `job` can be released and have all its
    /// predecessors completed.
    pub fn latest_release(&self, job: JobId) -> Instant {
        let preds = self.jobs.predecessors(job);
        let bound = max_over(preds.iter().map(|p| self.latest_finish(*p)), 0);
        self.jobs.release(job).max.max(bound)
    }

    /// `th(other)`, seen from `job`: the time by which `other` certainly
    /// becomes ready, ignoring predecessors the two jobs share.
    pub fn preemption_threshold(&self, other: JobId, job: JobId) -> Instant {
        let own = self.jobs.predecessors(job);
        let bound = max_over(
            self.jobs
                .predecessors(other)
                .difference(own)
                .map(|p| self.latest_finish(*p)),
            0,
        );
        self.jobs.release(other).max.max(bound)
    }

    /// The start window `[EST, LST]` of `job` when competing with the
    /// jobs in `competitors`.
    ///
    /// The window is empty if `job` cannot be the next job to start.
    pub fn start_window(&self, job: JobId, competitors: &[JobId]) -> Interval {
        let a0 = self.system().earliest_core();
        let earliest = self.earliest_release(job).max(a0.min);
        let t_wc = a0.max.max(min_over(
            competitors.iter().map(|c| self.latest_release(*c)),
            INFINITY,
        ));
        let t_high = min_over(
            competitors
                .iter()
                .filter(|c| self.jobs.has_higher_priority(**c, job))
                .map(|c| self.preemption_threshold(*c, job)),
            INFINITY,
        );
        Interval::new(earliest, t_wc.min(t_high - 1))
    }

    /// Like [start_window][Frontier::start_window], but `None` if the
    /// window is empty.
    pub fn feasible_window(&self, job: JobId, competitors: &[JobId]) -> Option<Interval> {
        let window = self.start_window(job, competitors);
        if window.is_empty() {
            trace!(
                job = self.jobs.name(job),
                est = window.min,
                lst = window.max,
                "not eligible"
            );
            None
        } else {
            Some(window)
        }
    }

    /// The platform state after dispatching `job` somewhere in `start`,
    /// together with the job's finish-time interval.
    pub fn successor(&self, job: JobId, start: Interval) -> (SystemState, Interval) {
        let system = self.system();
        let cost = self.jobs.cost(job);
        let finish = Interval::new(start.min + cost.min, start.max + cost.max);

        // the job takes the first core; all others are busy until at least EST
        let others = &system.availability()[1..];
        let mins = others
            .iter()
            .map(|a| a.min.max(start.min))
            .chain(iter::once(finish.min));
        let mut maxs: Vec<Instant> = others
            .iter()
            .map(|a| a.max.max(start.min))
            .chain(iter::once(finish.max))
            .collect();

        // running predecessors must have finished by LST
        for pred in self.jobs.predecessors(job) {
            if let Some(fti) = system.finish_interval(*pred) {
                if fti.max > start.max {
                    if let Some(slot) = maxs.iter_mut().find(|t| **t == fti.max) {
                        *slot = start.max;
                    }
                }
            }
        }

        let availability = mins
            .sorted()
            .zip_eq(maxs.into_iter().sorted())
            .map(Interval::from)
            .collect();
        let running = system
            .running()
            .iter()
            .filter(|(_, fti)| start.max <= fti.min)
            .map(|(j, fti)| (*j, *fti))
            .chain(iter::once((job, finish)))
            .collect();
        (SystemState::new(availability, running), finish)
    }
}
