//! Style and annotation resolution.
//!
//! The annotation pass maps every layer to its visual style, places marker
//! glyphs above layers matched by a [`MarkerRule`], and derives the diagram
//! legend. It only attaches data: layer geometry and connectors are left as
//! they are.

mod legend;
mod marker;
mod resolver;

use log::{debug, info};

use strata_core::geometry::Point;

use crate::diagram::{Diagram, Marker};

pub use marker::{CompiledRule, MarkerRule, MarkerRules};
pub use resolver::StyleResolver;

/// Styles, marks and builds the legend of `diagram`.
///
/// Markers for a layer are stacked upward from the top of the layer's
/// bounds, `marker_gap` apart, in rule order. Running the pass again replaces
/// everything it produced before.
pub fn annotate(diagram: &mut Diagram, styles: &StyleResolver, markers: &MarkerRules) {
    for layer in diagram.layers_mut() {
        let style = styles.resolve(layer.kind());
        layer.set_style(style);
    }
    diagram.set_connector_style(styles.connector_style().clone());

    let gap = diagram.layout().marker_gap();
    let layer_count = diagram.layers().len();
    let mut placed = Vec::new();

    for layer in diagram.layers() {
        let mut cursor = layer.bounds().min_y() - gap;
        for rule in markers.matching(layer, layer_count) {
            let center = Point::new(layer.center_x(), cursor - rule.height() / 2.0);
            placed.push(Marker::new(
                rule.kind(),
                layer.index(),
                center,
                rule.height(),
                rule.color(),
            ));
            cursor -= rule.height() + gap;
        }
    }
    debug!(markers = placed.len(); "Markers placed");

    let legend = legend::build(diagram, styles, markers);
    diagram.set_markers(placed);
    diagram.set_legend(legend);

    info!(
        markers = diagram.markers().len(),
        legend = diagram.legend().len();
        "Diagram annotated"
    );
}
