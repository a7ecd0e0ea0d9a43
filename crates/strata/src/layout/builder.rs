//! Node placement for a single layer.

use log::{debug, trace};

use strata_core::{geometry::Point, network::LayerSpec};

use crate::{
    StrataError,
    config::LayoutConfig,
    diagram::{Layer, Node, NodeId, Overflow},
};

/// Smallest display cap that still leaves one node on each side of the
/// overflow placeholder.
const MIN_SHOWN_NODES: usize = 2;

/// Builds the layer at `position` from its description.
///
/// The layer is centered horizontally on `position × layer_pitch` and
/// vertically on `y = 0`. When `spec.size()` exceeds the display cap, only
/// `max_shown_nodes` nodes are placed: `displayed / 2` above an overflow
/// placeholder sitting at `y = 0`, the rest below it.
///
/// A display cap below 2 is clamped to 2 here; [`layout`](super::layout)
/// rejects such configurations outright.
///
/// # Errors
///
/// Returns [`StrataError::InvalidSpec`] when the layer size is zero.
pub fn build_layer(
    spec: &LayerSpec,
    position: usize,
    config: &LayoutConfig,
) -> Result<Layer, StrataError> {
    let size = spec.size();
    if size == 0 {
        return Err(StrataError::InvalidSpec {
            index: position,
            size: 0,
        });
    }

    let cap = config.max_shown_nodes().max(MIN_SHOWN_NODES);
    let displayed = size.min(cap);
    let center_x = position as f32 * config.layer_pitch();
    let radius = config.node_radius();
    let pitch = config.node_pitch();

    let (nodes, overflow) = if size > displayed {
        let head = displayed / 2;
        let tail = displayed - head;

        let head_nodes = (0..head).map(|k| {
            let y = -((head - k) as f32) * pitch;
            Node::new(NodeId::new(position, k), Point::new(center_x, y), radius)
        });
        let tail_nodes = (0..tail).map(|k| {
            let y = (k + 1) as f32 * pitch;
            Node::new(
                NodeId::new(position, head + k),
                Point::new(center_x, y),
                radius,
            )
        });
        let nodes: Vec<Node> = head_nodes.chain(tail_nodes).collect();

        let placeholder = Node::placeholder(
            NodeId::new(position, displayed),
            Point::new(center_x, 0.0),
            radius,
        );
        let label_anchor = Point::new(center_x - radius - config.node_gap(), 0.0);
        let overflow = Overflow::new(placeholder, size.to_string(), label_anchor, head, tail);

        debug!(
            layer = position, size, displayed, head, tail;
            "Truncated layer",
        );
        (nodes, Some(overflow))
    } else {
        let offset = (displayed - 1) as f32 / 2.0;
        let nodes = (0..displayed)
            .map(|j| {
                let y = (j as f32 - offset) * pitch;
                Node::new(NodeId::new(position, j), Point::new(center_x, y), radius)
            })
            .collect();
        (nodes, None)
    };

    let layer = Layer::new(position, spec.clone(), center_x, nodes, overflow);
    trace!(layer:?; "Built layer");

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use strata_core::network::LayerKind;

    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_small_layer_is_not_truncated() {
        let spec = LayerSpec::new(4, LayerKind::Depthwise);
        let layer = build_layer(&spec, 1, &config()).unwrap();

        assert_eq!(layer.displayed_count(), 4);
        assert_eq!(layer.total_count(), 4);
        assert!(!layer.is_truncated());
        assert!(layer.overflow().is_none());
        assert_eq!(layer.head_nodes().len(), 4);
        assert!(layer.tail_nodes().is_empty());
    }

    #[test]
    fn test_nodes_are_centered_on_axis() {
        let spec = LayerSpec::new(3, LayerKind::Hidden);
        let layer = build_layer(&spec, 0, &config()).unwrap();

        let ys: Vec<f32> = layer.nodes().iter().map(|n| n.center().y()).collect();
        assert_eq!(ys, [-50.0, 0.0, 50.0]);

        let even = build_layer(&LayerSpec::new(2, LayerKind::Hidden), 0, &config()).unwrap();
        let ys: Vec<f32> = even.nodes().iter().map(|n| n.center().y()).collect();
        assert_eq!(ys, [-25.0, 25.0]);
    }

    #[test]
    fn test_layer_x_follows_position() {
        let spec = LayerSpec::new(1, LayerKind::Conv);
        let layer = build_layer(&spec, 3, &config()).unwrap();
        assert_approx_eq!(f32, layer.center_x(), 480.0);
        assert!(layer.nodes().iter().all(|n| n.center().x() == 480.0));
    }

    #[test]
    fn test_large_layer_is_truncated() {
        let spec = LayerSpec::new(1000, LayerKind::FullyConnected);
        let layer = build_layer(&spec, 0, &config()).unwrap();

        assert_eq!(layer.displayed_count(), 16);
        assert!(layer.is_truncated());

        let overflow = layer.overflow().unwrap();
        assert_eq!(overflow.head(), 8);
        assert_eq!(overflow.tail(), 8);
        assert_eq!(overflow.label(), "1000");
        assert!(overflow.placeholder().is_overflow_placeholder());
        assert_eq!(overflow.placeholder().center().y(), 0.0);
        assert!(layer.nodes().iter().all(|n| !n.is_overflow_placeholder()));
    }

    #[test]
    fn test_head_above_and_tail_below_placeholder() {
        let config = config().with_max_shown_nodes(5);
        let spec = LayerSpec::new(9, LayerKind::Pointwise);
        let layer = build_layer(&spec, 0, &config).unwrap();

        assert_eq!(layer.head_nodes().len(), 2);
        assert_eq!(layer.tail_nodes().len(), 3);
        assert!(layer.head_nodes().iter().all(|n| n.center().y() < 0.0));
        assert!(layer.tail_nodes().iter().all(|n| n.center().y() > 0.0));

        let ys: Vec<f32> = layer.nodes().iter().map(|n| n.center().y()).collect();
        assert_eq!(ys, [-100.0, -50.0, 50.0, 100.0, 150.0]);
    }

    #[test]
    fn test_node_ids_are_sequential() {
        let spec = LayerSpec::new(40, LayerKind::Conv);
        let layer = build_layer(&spec, 2, &config()).unwrap();
        for (index, node) in layer.nodes().iter().enumerate() {
            assert_eq!(node.id(), NodeId::new(2, index));
        }
    }

    #[test]
    fn test_placeholder_id_is_distinct_from_visible_nodes() {
        let config = config().with_max_shown_nodes(5);
        let spec = LayerSpec::new(9, LayerKind::Pointwise);
        let layer = build_layer(&spec, 3, &config).unwrap();

        let placeholder = layer.overflow().unwrap().placeholder().id();
        assert_eq!(placeholder, NodeId::new(3, 5));
        assert!(layer.nodes().iter().all(|n| n.id() != placeholder));
    }

    #[test]
    fn test_size_equal_to_cap_is_not_truncated() {
        let spec = LayerSpec::new(16, LayerKind::Conv);
        let layer = build_layer(&spec, 0, &config()).unwrap();
        assert!(!layer.is_truncated());
        assert_eq!(layer.displayed_count(), 16);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let spec = LayerSpec::new(0, LayerKind::Conv);
        let err = build_layer(&spec, 4, &config()).unwrap_err();
        assert!(matches!(err, StrataError::InvalidSpec { index: 4, size: 0 }));
    }

    #[test]
    fn test_display_cap_is_clamped() {
        let config = config().with_max_shown_nodes(1);
        let spec = LayerSpec::new(10, LayerKind::Hidden);
        let layer = build_layer(&spec, 0, &config).unwrap();

        let overflow = layer.overflow().unwrap();
        assert_eq!(layer.displayed_count(), 2);
        assert_eq!(overflow.head(), 1);
        assert_eq!(overflow.tail(), 1);
    }

    #[test]
    fn test_overflow_label_left_of_layer() {
        let spec = LayerSpec::new(100, LayerKind::Hidden);
        let layer = build_layer(&spec, 1, &config()).unwrap();
        let anchor = layer.overflow().unwrap().label_anchor();
        assert!(anchor.x() < layer.bounds().min_x());
        assert_eq!(anchor.y(), 0.0);
    }
}
