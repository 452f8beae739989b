/*! Construction of the schedule-abstraction graph

The engine repeatedly expands the leaf with the shortest root path
(ties go to the leaf created first) by asking the [DispatchPolicy] for
all possible next dispatches, until every leaf has dispatched every
job. Since every child is exactly one edge deeper than its parent, a
FIFO queue of unexpanded leaves yields exactly this order.

Best- and worst-case response-time bounds are accumulated over all
dispatches. They are sound only if the graph is complete; a run that
gets stuck at a dead end or exhausts its node budget reports an error
instead of partial bounds.
*/

use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::graph::Graph;
use crate::job::{JobId, JobTable};
use crate::policy::{DispatchPolicy, Frontier};
use crate::response_time::ResponseTimes;
use crate::state::SystemState;

/// Error type returned when exploration does not yield sound bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The platform has no cores.
    #[error("the platform must have at least one core")]
    NoCores,
    /// No job can be dispatched after the given sequence of dispatches.
    #[error(
        "no job can be dispatched after [{}] (pending: [{}])",
        .dispatched.join(", "),
        .pending.join(", ")
    )]
    Unschedulable {
        dispatched: Vec<String>,
        pending: Vec<String>,
    },
    /// The node budget was exhausted before the graph was complete.
    #[error("exploration stopped at {nodes} nodes (limit: {limit})")]
    Inconclusive { nodes: usize, limit: usize },
}

/// A complete schedule-abstraction graph and the bounds derived from it.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: Graph,
    pub response_times: ResponseTimes,
}

/// Build the graph for `jobs` under the policy named in `config`.
pub fn build(jobs: &JobTable, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    let policy = config.policy.instantiate();
    explore_with(jobs, config, &*policy)
}

/// Build the graph for `jobs` under an arbitrary `policy`; the policy
/// named in `config` is ignored.
pub fn explore_with<P>(
    jobs: &JobTable,
    config: &AnalysisConfig,
    policy: &P,
) -> Result<Analysis, AnalysisError>
where
    P: DispatchPolicy + ?Sized,
{
    config.validate()?;
    let root = policy.initial_state(jobs, SystemState::idle(config.cores));
    let mut graph = Graph::new(root);
    let mut response_times = ResponseTimes::new(jobs.len());
    let mut leaves = VecDeque::from([graph.root()]);

    while let Some(&node) = leaves.front() {
        if graph.depth(node) == jobs.len() {
            break;
        }
        leaves.pop_front();

        let path = graph.path(node);
        let dispatched: BTreeSet<JobId> = path.iter().copied().collect();
        let (candidates, dispatches) = {
            let parent = graph.parent(node).map(|p| graph.state(p));
            let frontier = Frontier::new(
                jobs,
                &response_times,
                graph.state(node),
                parent,
                graph.incoming_job(node),
                &dispatched,
            );
            (frontier.candidates().len(), policy.propose(&frontier))
        };
        debug!(
            node = %node,
            depth = path.len(),
            state = %graph.state(node),
            candidates,
            successors = dispatches.len(),
            "expanded"
        );

        if dispatches.is_empty() {
            warn!(node = %node, depth = path.len(), "dead end");
            return Err(AnalysisError::Unschedulable {
                dispatched: path.iter().map(|j| jobs.name(*j).to_string()).collect(),
                pending: jobs
                    .ids()
                    .filter(|j| !dispatched.contains(j))
                    .map(|j| jobs.name(j).to_string())
                    .collect(),
            });
        }

        for dispatch in dispatches {
            let release = jobs.release(dispatch.job);
            response_times.record(
                dispatch.job,
                dispatch.finish.min - release.min,
                dispatch.finish.max - release.max,
            );
            leaves.push_back(graph.add_child(node, dispatch.job, dispatch.state));
        }

        if let Some(limit) = config.node_limit {
            if graph.node_count() > limit {
                warn!(nodes = graph.node_count(), limit, "node limit exceeded");
                return Err(AnalysisError::Inconclusive {
                    nodes: graph.node_count(),
                    limit,
                });
            }
        }
    }

    info!(
        policy = policy.name(),
        jobs = jobs.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "exploration complete"
    );
    debug!(
        "bounds: {}",
        response_times
            .table(jobs)
            .map(|(name, best, worst)| format!("{}=[{}, {}]", name, best, worst))
            .join(" ")
    );
    Ok(Analysis {
        graph,
        response_times,
    })
}
