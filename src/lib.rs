/*! Exact response-time analysis of job sets via schedule-abstraction graphs

Given a set of jobs with uncertain release times, uncertain execution
costs, unique job-level fixed priorities and (optionally) precedence
constraints, this crate builds a *schedule-abstraction graph*: a tree
whose nodes are abstract scheduler states and whose edges are dispatch
decisions. Every root-to-leaf path dispatches every job exactly once,
and the finish-time intervals observed along the way yield sound
best- and worst-case response-time bounds for every job.

The construction is parameterized by a [DispatchPolicy]. Four policies
are provided:

- [policy::Jlfp] models a work-conserving job-level fixed-priority
  scheduler, with precedence constraints.
- [policy::RosPolling] models a scheduler that samples for new work
  only at polling points.
- [policy::RosWaitSet] refines the polling model by tracking which
  lower-priority jobs are certainly or possibly in the wait set.
- [policy::RosAcceptance] admits a job only if no higher-priority job
  is certainly waiting at the reference polling point.

```
use schedule_abstraction::{analysis, AnalysisConfig, Interval, Job, JobTable};

let jobs = JobTable::new(vec![
    Job::new("J1", Interval::new(0, 0), Interval::new(1, 1), 1),
    Job::new("J2", Interval::new(0, 0), Interval::new(2, 2), 2),
])
.unwrap();
let result = analysis::build(&jobs, &AnalysisConfig::default()).unwrap();
let j2 = jobs.lookup("J2").unwrap();
assert_eq!(result.response_times.worst_case(j2), 2);
```
*/

pub mod analysis;
pub mod config;
pub mod graph;
pub mod interval;
pub mod job;
pub mod policy;
pub mod response_time;
pub mod state;
pub mod task;
pub mod time;

pub use analysis::{Analysis, AnalysisError};
pub use config::AnalysisConfig;
pub use interval::Interval;
pub use job::{Job, JobId, JobSetError, JobTable};
pub use policy::{DispatchPolicy, PolicyKind};
pub use response_time::ResponseTimes;
