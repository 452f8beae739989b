/*! The schedule-abstraction graph

Nodes are stored in an insertion-ordered arena and addressed by
[NodeIndex]. Every node other than the root has exactly one parent, so
the graph is a tree and the length of the root path of a node is simply
its depth.
*/

use derive_more::Display;

use crate::job::JobId;
use crate::state::State;

/// Arena index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "v{}", _0)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A dispatch decision: `job` was dispatched in `source`, leading to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub job: JobId,
}

#[derive(Debug, Clone)]
struct Node {
    state: State,
    incoming: Option<usize>,
    outgoing: Vec<usize>,
    depth: usize,
}

#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// A graph consisting of only the given root state.
    pub fn new(root: State) -> Self {
        Graph {
            nodes: vec![Node {
                state: root,
                incoming: None,
                outgoing: Vec::new(),
                depth: 0,
            }],
            edges: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Add `state` as a new child of `parent`, reached by dispatching `job`.
    pub fn add_child(&mut self, parent: NodeIndex, job: JobId, state: State) -> NodeIndex {
        let target = NodeIndex(self.nodes.len());
        let edge = self.edges.len();
        self.edges.push(Edge {
            source: parent,
            target,
            job,
        });
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes[parent.0].outgoing.push(edge);
        self.nodes.push(Node {
            state,
            incoming: Some(edge),
            outgoing: Vec::new(),
            depth,
        });
        target
    }

    pub fn state(&self, node: NodeIndex) -> &State {
        &self.nodes[node.0].state
    }

    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.0].incoming.map(|e| self.edges[e].source)
    }

    /// The job dispatched on the edge leading into `node`.
    pub fn incoming_job(&self, node: NodeIndex) -> Option<JobId> {
        self.nodes[node.0].incoming.map(|e| self.edges[e].job)
    }

    pub fn children(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes[node.0]
            .outgoing
            .iter()
            .map(move |e| self.edges[*e].target)
    }

    /// Number of edges on the path from the root to `node`.
    pub fn depth(&self, node: NodeIndex) -> usize {
        self.nodes[node.0].depth
    }

    pub fn is_leaf(&self, node: NodeIndex) -> bool {
        self.nodes[node.0].outgoing.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes().filter(move |n| self.is_leaf(*n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The jobs dispatched along the path from the root to `node`, in
    /// dispatch order.
    pub fn path(&self, node: NodeIndex) -> Vec<JobId> {
        let mut jobs = Vec::with_capacity(self.depth(node));
        let mut cursor = node;
        while let Some(e) = self.nodes[cursor.0].incoming {
            jobs.push(self.edges[e].job);
            cursor = self.edges[e].source;
        }
        jobs.reverse();
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SystemState;

    fn idle() -> State {
        State::Jlfp(SystemState::idle(1))
    }

    #[test]
    fn single_root() {
        let g = Graph::new(idle());
        let root = g.root();
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.depth(root), 0);
        assert!(g.is_leaf(root));
        assert_eq!(g.parent(root), None);
        assert_eq!(g.incoming_job(root), None);
        assert!(g.path(root).is_empty());
        assert_eq!(root.to_string(), "v0");
    }

    #[test]
    fn tree_structure() {
        let (a, b, c) = (JobId::from(0), JobId::from(1), JobId::from(2));
        let mut g = Graph::new(idle());
        let root = g.root();
        let n1 = g.add_child(root, a, idle());
        let n2 = g.add_child(root, b, idle());
        let n3 = g.add_child(n1, c, idle());

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.children(root).collect::<Vec<_>>(), vec![n1, n2]);
        assert_eq!(g.parent(n3), Some(n1));
        assert_eq!(g.incoming_job(n3), Some(c));
        assert_eq!(g.depth(n3), 2);
        assert_eq!(g.path(n3), vec![a, c]);
        assert_eq!(g.path(n2), vec![b]);
        assert_eq!(g.leaves().collect::<Vec<_>>(), vec![n2, n3]);
        assert_eq!(
            g.edges()[2],
            Edge {
                source: n1,
                target: n3,
                job: c
            }
        );
    }
}
