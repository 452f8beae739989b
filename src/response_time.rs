/*! Running best- and worst-case response-time bounds

Each time a job is dispatched somewhere in the graph, its finish-time
interval yields one best-case and one worst-case response time. The
accumulator keeps the minimum of the former and the maximum of the
latter over all dispatches, so its bounds only ever move in the safe
direction.
*/

use crate::job::{JobId, JobTable};
use crate::time::{Duration, INFINITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTimes {
    best: Vec<Duration>,
    worst: Vec<Duration>,
}

impl ResponseTimes {
    /// Fresh accumulators for `num_jobs` jobs: best case `+∞`, worst case zero.
    pub fn new(num_jobs: usize) -> Self {
        ResponseTimes {
            best: vec![INFINITY; num_jobs],
            worst: vec![0; num_jobs],
        }
    }

    /// Tighten the bounds of `job` with one more observed dispatch.
    pub fn record(&mut self, job: JobId, best: Duration, worst: Duration) {
        let idx = job.index();
        self.best[idx] = self.best[idx].min(best);
        self.worst[idx] = self.worst[idx].max(worst);
    }

    /// The best-case response-time bound (BR) of `job`.
    pub fn best_case(&self, job: JobId) -> Duration {
        self.best[job.index()]
    }

    /// The worst-case response-time bound (WR) of `job`.
    pub fn worst_case(&self, job: JobId) -> Duration {
        self.worst[job.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (JobId, Duration, Duration)> + '_ {
        self.best
            .iter()
            .zip(self.worst.iter())
            .enumerate()
            .map(|(idx, (b, w))| (JobId::from(idx), *b, *w))
    }

    /// Rows `(job name, BR, WR)` in job-table order.
    pub fn table<'a>(
        &'a self,
        jobs: &'a JobTable,
    ) -> impl Iterator<Item = (&'a str, Duration, Duration)> + 'a {
        self.iter().map(move |(id, b, w)| (jobs.name(id), b, w))
    }
}
