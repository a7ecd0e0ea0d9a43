//! Property tests for the layout pipeline.

use proptest::prelude::*;

use strata::{
    DiagramBuilder,
    config::{AppConfig, LayoutConfig},
    diagram::Diagram,
    network::{LayerKind, LayerSpec},
};

fn kind_strategy() -> impl Strategy<Value = LayerKind> {
    prop_oneof![
        Just(LayerKind::Input),
        Just(LayerKind::Conv),
        Just(LayerKind::Depthwise),
        Just(LayerKind::Pointwise),
        Just(LayerKind::FullyConnected),
        Just(LayerKind::Hidden),
        "[a-z]{3,8}".prop_map(LayerKind::from),
    ]
}

fn spec_strategy() -> impl Strategy<Value = LayerSpec> {
    (1usize..200, kind_strategy(), 1u32..3)
        .prop_map(|(size, kind, stride)| LayerSpec::new(size, kind).with_stride(stride))
}

fn network_strategy() -> impl Strategy<Value = (Vec<LayerSpec>, usize)> {
    (prop::collection::vec(spec_strategy(), 1..6), 2usize..20)
}

fn build(specs: &[LayerSpec], cap: usize) -> Diagram {
    let layout = LayoutConfig::default().with_max_shown_nodes(cap);
    DiagramBuilder::new(AppConfig::default().with_layout(layout))
        .build(specs)
        .expect("Generated networks are valid")
}

proptest! {
    #[test]
    fn displayed_count_respects_cap((specs, cap) in network_strategy()) {
        let diagram = build(&specs, cap);
        for (layer, spec) in diagram.layers().iter().zip(&specs) {
            prop_assert_eq!(layer.displayed_count(), spec.size().min(cap));
            prop_assert_eq!(layer.is_truncated(), spec.size() > cap);
            if let Some(overflow) = layer.overflow() {
                prop_assert_eq!(overflow.head() + overflow.tail(), layer.displayed_count());
                prop_assert_eq!(overflow.head(), layer.displayed_count() / 2);
                prop_assert_eq!(overflow.label(), spec.size().to_string());
            }
        }
    }

    #[test]
    fn edge_groups_are_dense((specs, cap) in network_strategy()) {
        let diagram = build(&specs, cap);
        prop_assert_eq!(diagram.edge_groups().len(), specs.len() - 1);
        for (group, pair) in diagram.edge_groups().iter().zip(diagram.layers().windows(2)) {
            prop_assert_eq!(group.len(), pair[0].displayed_count() * pair[1].displayed_count());
        }
    }

    #[test]
    fn placeholders_are_never_connected((specs, cap) in network_strategy()) {
        let diagram = build(&specs, cap);
        for group in diagram.edge_groups() {
            for edge in group.edges() {
                let source = diagram.node(edge.source()).expect("Source is visible");
                let target = diagram.node(edge.target()).expect("Target is visible");
                prop_assert!(!source.is_overflow_placeholder());
                prop_assert!(!target.is_overflow_placeholder());
                prop_assert!(source.edges_out().contains(&edge.id()));
                prop_assert!(target.edges_in().contains(&edge.id()));
            }
        }
        for layer in diagram.layers() {
            if let Some(overflow) = layer.overflow() {
                prop_assert!(overflow.placeholder().edges_in().is_empty());
                prop_assert!(overflow.placeholder().edges_out().is_empty());
            }
        }
    }

    #[test]
    fn nodes_stack_in_a_column((specs, cap) in network_strategy()) {
        let diagram = build(&specs, cap);
        let pitch = diagram.layout().node_pitch();
        for layer in diagram.layers() {
            let nodes = layer.nodes();
            prop_assert!(nodes.iter().all(|n| n.center().x() == layer.center_x()));
            for pair in nodes.windows(2) {
                let step = pair[1].center().y() - pair[0].center().y();
                prop_assert!(step >= pitch - 1e-3, "step {} below pitch {}", step, pitch);
            }
        }
        for pair in diagram.layers().windows(2) {
            prop_assert!(pair[1].center_x() > pair[0].center_x());
        }
    }

    #[test]
    fn every_layer_is_styled((specs, cap) in network_strategy()) {
        let diagram = build(&specs, cap);
        prop_assert!(diagram.layers().iter().all(|layer| layer.style().is_some()));
        prop_assert!(diagram.markers_for(0).next().is_none());
    }

    #[test]
    fn layout_is_deterministic((specs, cap) in network_strategy()) {
        prop_assert_eq!(build(&specs, cap), build(&specs, cap));
    }
}
