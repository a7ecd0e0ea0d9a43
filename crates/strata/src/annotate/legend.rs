use indexmap::IndexSet;

use strata_core::network::LayerKind;

use crate::{
    annotate::{MarkerRules, StyleResolver},
    diagram::{Diagram, LegendEntry},
};

/// Legend rows: every mapped kind in color-map order, then kinds present in
/// `diagram` that fall back to the default color, then one row per labelled
/// marker rule. Marker rows sharing a label are listed once.
pub(super) fn build(
    diagram: &Diagram,
    styles: &StyleResolver,
    markers: &MarkerRules,
) -> Vec<LegendEntry> {
    let mapped = styles
        .mapped_kinds()
        .map(|(kind, color)| LegendEntry::new(color, kind.description()));

    let unmapped: IndexSet<&LayerKind> = diagram
        .layers()
        .iter()
        .map(|layer| layer.kind())
        .filter(|kind| !styles.is_mapped(kind))
        .collect();
    let unmapped = unmapped
        .into_iter()
        .map(|kind| LegendEntry::new(styles.default_color(), kind.description()));

    let mut labels = IndexSet::new();
    let rules = markers
        .iter()
        .filter_map(|rule| rule.label().map(|label| (rule.color(), label)))
        .filter(|(_, label)| labels.insert(*label))
        .map(|(color, label)| LegendEntry::new(color, label))
        .collect::<Vec<_>>();

    mapped.chain(unmapped).chain(rules).collect()
}
