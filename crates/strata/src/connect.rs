//! Connector generation between adjacent layers.
//!
//! Every visible node of layer *i* is linked to every visible node of layer
//! *i + 1*. The linkage is schematic: it depicts that the stages are fully
//! connected, not how parameters are actually wired. Overflow placeholders
//! are never connected.

use log::{debug, info};

use crate::diagram::{Diagram, Edge, EdgeGroup, EdgeId, NodeId};

/// Generates the connectors of `diagram`, one [`EdgeGroup`] per adjacent
/// layer pair.
///
/// Within a group, edges are produced in row-major order: all edges of the
/// first source node, top to bottom, then those of the second, and so on.
/// Each edge is also recorded in its source node's outgoing list and its
/// target node's incoming list.
///
/// Layers and node positions are left untouched. Any previously generated
/// connectors are replaced, so running the pass twice gives the same result
/// as running it once.
pub fn connect(diagram: &mut Diagram) {
    for layer in diagram.layers_mut() {
        for node in layer.nodes_mut() {
            node.clear_edges();
        }
    }

    let mut groups = Vec::with_capacity(diagram.layers().len().saturating_sub(1));
    let mut back_refs = Vec::new();

    for (group, pair) in diagram.layers().windows(2).enumerate() {
        let (source_layer, target_layer) = (&pair[0], &pair[1]);
        let sources = source_layer.nodes();
        let targets = target_layer.nodes();

        let mut edges = Vec::with_capacity(sources.len() * targets.len());
        for source in sources {
            for target in targets {
                let id = EdgeId::new(group, edges.len());
                let start = source
                    .center()
                    .step_toward(target.center(), source.radius());
                let end = target
                    .center()
                    .step_toward(source.center(), target.radius());
                edges.push(Edge::new(id, source.id(), target.id(), start, end));
                back_refs.push((id, source.id(), target.id()));
            }
        }

        debug!(group, edges = edges.len(); "Connected layer pair");
        groups.push(EdgeGroup::new(group, edges));
    }

    for (edge, source, target) in back_refs {
        record(diagram, edge, source, target);
    }

    diagram.set_edge_groups(groups);
    info!(
        groups = diagram.edge_groups().len(),
        edges = diagram.edge_count();
        "Connectors generated"
    );
}

fn record(diagram: &mut Diagram, edge: EdgeId, source: NodeId, target: NodeId) {
    if let Some(node) = diagram.node_mut(source) {
        node.push_edge_out(edge);
    }
    if let Some(node) = diagram.node_mut(target) {
        node.push_edge_in(edge);
    }
}
