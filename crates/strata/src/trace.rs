//! Data-flow traversal over connector back-references.
//!
//! A trace collects every edge reachable from one node, either downstream
//! through `edges_out` or upstream through `edges_in`. Renderers use it to
//! highlight how a single unit feeds, or is fed by, the rest of the network.

use std::collections::BTreeSet;

use log::trace;
use serde::Serialize;

use crate::diagram::{Diagram, Edge, EdgeId, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Nodes and edges reached by a traversal.
///
/// Both lists are ordered layer by layer, moving away from the start node,
/// and by index within a layer. Edges of one layer pair keep the row-major
/// generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl Trace {
    /// Reached nodes, starting with the origin.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Everything downstream of `start`. Empty when `start` is not a visible
/// node of `diagram`.
pub fn trace_forward(diagram: &Diagram, start: NodeId) -> Trace {
    walk(diagram, start, Direction::Forward)
}

/// Everything upstream of `start`. Empty when `start` is not a visible node
/// of `diagram`.
pub fn trace_backward(diagram: &Diagram, start: NodeId) -> Trace {
    walk(diagram, start, Direction::Backward)
}

fn walk(diagram: &Diagram, start: NodeId, direction: Direction) -> Trace {
    if diagram.node(start).is_none() {
        return Trace::default();
    }

    let mut result = Trace::default();
    let mut frontier = BTreeSet::from([start]);

    while !frontier.is_empty() {
        let mut next = BTreeSet::new();
        for id in &frontier {
            result.nodes.push(*id);
            let Some(node) = diagram.node(*id) else {
                continue;
            };
            let far_end: fn(&Edge) -> NodeId = match direction {
                Direction::Forward => Edge::target,
                Direction::Backward => Edge::source,
            };
            for edge_id in node_edges(node, direction) {
                if let Some(edge) = diagram.edge(*edge_id) {
                    result.edges.push(*edge_id);
                    next.insert(far_end(edge));
                }
            }
        }
        frontier = next;
    }

    trace!(
        start:?, direction:?, nodes = result.nodes.len(), edges = result.edges.len();
        "Traced data flow"
    );
    result
}

fn node_edges(node: &Node, direction: Direction) -> &[EdgeId] {
    match direction {
        Direction::Forward => node.edges_out(),
        Direction::Backward => node.edges_in(),
    }
}
