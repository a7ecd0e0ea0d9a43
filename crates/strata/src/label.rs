//! Per-node labels.
//!
//! Labels are sized relative to the node they sit on. Symbols are drawn
//! inside the node; output texts start just right of it.

use log::debug;

use strata_core::geometry::Point;

use crate::{
    config::LabelConfig,
    diagram::{Diagram, LabelAlign, Layer, NodeLabel},
};

// Label heights as a fraction of the node diameter.
const INPUT_SCALE: f32 = 0.3;
const HIDDEN_SCALE: f32 = 0.4;
const OUTPUT_SCALE: f32 = 0.4;
const OUTPUT_TEXT_SCALE: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Input,
    Hidden,
    Output,
}

impl Role {
    fn of(index: usize, count: usize) -> Self {
        if index == 0 {
            Self::Input
        } else if index + 1 == count {
            Self::Output
        } else {
            Self::Hidden
        }
    }
}

/// Attaches node labels to `diagram` as described by `config`.
///
/// The first layer takes the input symbol, the last layer the output symbol
/// or texts, and every layer in between the hidden symbol. Overflow
/// placeholders are never labelled. Replaces labels from a previous run.
pub fn label(diagram: &mut Diagram, config: &LabelConfig) {
    let count = diagram.layers().len();
    let labels: Vec<NodeLabel> = diagram
        .layers()
        .iter()
        .flat_map(|layer| layer_labels(layer, Role::of(layer.index(), count), config))
        .collect();

    debug!(labels = labels.len(); "Node labels attached");
    diagram.set_labels(labels);
}

fn layer_labels(layer: &Layer, role: Role, config: &LabelConfig) -> Vec<NodeLabel> {
    let texts = config.output_texts();
    if role == Role::Output && !texts.is_empty() {
        return layer
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(position, node)| {
                let text = texts.get(unit_number(layer, position) - 1)?;
                let diameter = 2.0 * node.radius();
                Some(NodeLabel::new(
                    node.id(),
                    text.clone(),
                    node.center().add_point(Point::new(diameter, 0.0)),
                    OUTPUT_TEXT_SCALE * diameter,
                    LabelAlign::Start,
                ))
            })
            .collect();
    }

    let (symbol, scale) = match role {
        Role::Input => (config.inputs(), INPUT_SCALE),
        Role::Hidden => (config.hidden(), HIDDEN_SCALE),
        Role::Output => (config.outputs(), OUTPUT_SCALE),
    };
    let Some(symbol) = symbol else {
        return Vec::new();
    };

    layer
        .nodes()
        .iter()
        .enumerate()
        .map(|(position, node)| {
            let unit = unit_number(layer, position);
            NodeLabel::new(
                node.id(),
                format!("{symbol}_{{{unit}}}"),
                node.center(),
                scale * 2.0 * node.radius(),
                LabelAlign::Center,
            )
        })
        .collect()
}

/// 1-based unit number of the visible node at `position`.
///
/// Tail nodes of a truncated layer stand for the last units of the layer.
fn unit_number(layer: &Layer, position: usize) -> usize {
    match layer.overflow() {
        Some(overflow) if position >= overflow.head() => {
            layer.total_count() - (layer.displayed_count() - position) + 1
        }
        _ => position + 1,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};

    use strata_core::network::{LayerKind, LayerSpec};

    use super::*;
    use crate::{config::LayoutConfig, diagram::NodeId, layout::layout};

    fn network() -> Diagram {
        layout(
            &[
                LayerSpec::new(3, LayerKind::Input),
                LayerSpec::new(4, LayerKind::Hidden),
                LayerSpec::new(4, LayerKind::Hidden),
                LayerSpec::new(2, LayerKind::Output),
            ],
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    fn texts(diagram: &Diagram) -> Vec<&str> {
        diagram.labels().iter().map(NodeLabel::text).collect()
    }

    #[test]
    fn test_nothing_is_labelled_by_default() {
        let mut diagram = network();
        label(&mut diagram, &LabelConfig::default());
        assert!(diagram.labels().is_empty());
    }

    #[test]
    fn test_input_labels_sit_inside_nodes() {
        let mut diagram = network();
        label(&mut diagram, &LabelConfig::default().with_inputs("x"));

        assert_eq!(texts(&diagram), ["x_{1}", "x_{2}", "x_{3}"]);
        let first = &diagram.labels()[0];
        let node = diagram.node(first.node()).unwrap();
        assert_eq!(first.node(), NodeId::new(0, 0));
        assert_eq!(first.anchor(), node.center());
        assert_eq!(first.align(), LabelAlign::Center);
        assert_approx_eq!(f32, first.height(), 9.0);
    }

    #[test]
    fn test_hidden_labels_skip_first_and_last_layer() {
        let mut diagram = network();
        label(&mut diagram, &LabelConfig::default().with_hidden("h"));

        let layers: Vec<usize> = diagram.labels().iter().map(|l| l.node().layer()).collect();
        assert_eq!(layers, [1, 1, 1, 1, 2, 2, 2, 2]);
        assert!(
            diagram
                .labels()
                .iter()
                .all(|l| approx_eq!(f32, l.height(), 12.0, epsilon = 1e-4))
        );
    }

    #[test]
    fn test_output_symbols() {
        let mut diagram = network();
        label(&mut diagram, &LabelConfig::default().with_outputs("y"));
        assert_eq!(texts(&diagram), ["y_{1}", "y_{2}"]);
        assert!(diagram.labels().iter().all(|l| l.node().layer() == 3));
    }

    #[test]
    fn test_output_texts_sit_right_of_nodes() {
        let mut diagram = network();
        let config = LabelConfig::default()
            .with_outputs("y")
            .with_output_texts(["cat", "dog", "bird"]);
        label(&mut diagram, &config);

        assert_eq!(texts(&diagram), ["cat", "dog"]);
        let cat = &diagram.labels()[0];
        let node = diagram.node(cat.node()).unwrap();
        assert_eq!(cat.align(), LabelAlign::Start);
        assert_approx_eq!(f32, cat.anchor().x(), node.center().x() + 30.0);
        assert_approx_eq!(f32, cat.anchor().y(), node.center().y());
        assert_approx_eq!(f32, cat.height(), 22.5);
    }

    #[test]
    fn test_truncated_tail_carries_last_unit_numbers() {
        let mut diagram = layout(
            &[
                LayerSpec::new(10, LayerKind::Input),
                LayerSpec::new(2, LayerKind::Output),
            ],
            &LayoutConfig::default().with_max_shown_nodes(4),
        )
        .unwrap();
        label(&mut diagram, &LabelConfig::default().with_inputs("x"));

        assert_eq!(texts(&diagram), ["x_{1}", "x_{2}", "x_{9}", "x_{10}"]);
    }

    #[test]
    fn test_single_layer_is_an_input() {
        let mut diagram = layout(
            &[LayerSpec::new(2, LayerKind::Input)],
            &LayoutConfig::default(),
        )
        .unwrap();
        let config = LabelConfig::default().with_inputs("x").with_outputs("y");
        label(&mut diagram, &config);
        assert_eq!(texts(&diagram), ["x_{1}", "x_{2}"]);
    }

    #[test]
    fn test_labelling_twice_replaces_labels() {
        let mut diagram = network();
        let config = LabelConfig::default().with_inputs("x");
        label(&mut diagram, &config);
        label(&mut diagram, &config);
        assert_eq!(diagram.labels().len(), 3);
    }
}
