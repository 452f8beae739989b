//! Configuration of one analysis run.

use crate::analysis::AnalysisError;
use crate::policy::PolicyKind;

/// Platform and exploration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of identical cores.
    pub cores: usize,
    /// The dispatch policy to analyze.
    pub policy: PolicyKind,
    /// Maximum number of graph nodes; unbounded if `None`.
    pub node_limit: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cores: 2,
            policy: PolicyKind::Jlfp,
            node_limit: None,
        }
    }
}

impl AnalysisConfig {
    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Reject configurations that cannot describe a platform.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.cores == 0 {
            Err(AnalysisError::NoCores)
        } else {
            Ok(())
        }
    }
}
