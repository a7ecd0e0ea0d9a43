//! Layer kind to style resolution.

use indexmap::IndexMap;

use strata_core::{
    color::Color,
    network::LayerKind,
    stroke::{StrokeDefinition, StrokeStyle},
};

use crate::{
    StrataError,
    config::StyleConfig,
    diagram::{ConnectorStyle, LayerStyle},
};

/// Maps layer kinds to their visual style.
///
/// Built once from a [`StyleConfig`], which is where every color string is
/// parsed and checked. Resolution itself never fails: kinds without an entry
/// get the default color.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    colors: IndexMap<LayerKind, Color>,
    default_color: Color,
    node_stroke_width: f32,
    node_fill: Color,
    connector: ConnectorStyle,
}

impl StyleResolver {
    /// Parses and validates a style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::InvalidConfig`] for an unparsable color or
    /// stroke style, a non-positive stroke width or arrow tip, or a fill
    /// opacity outside `0.0..=1.0`.
    pub fn from_config(config: &StyleConfig) -> Result<Self, StrataError> {
        let colors = config
            .layer_colors()
            .iter()
            .map(|(kind, color)| {
                let color = parse_color(&format!("layer_colors.{kind}"), color)?;
                Ok((LayerKind::from(kind.clone()), color))
            })
            .collect::<Result<IndexMap<_, _>, StrataError>>()?;

        let default_color = parse_color("default_color", config.default_color())?;
        let node_stroke_width = positive("node_stroke_width", config.node_stroke_width())?;

        let opacity = config.node_fill_opacity();
        if !(0.0..=1.0).contains(&opacity) {
            return Err(StrataError::invalid_config(format!(
                "node_fill_opacity must be between 0 and 1, got {opacity}"
            )));
        }
        let node_fill = parse_color("node_fill", config.node_fill())?.with_alpha(opacity);

        let edge_style: StrokeStyle = config
            .edge_style()
            .parse()
            .map_err(|err| StrataError::invalid_config(format!("edge_style: {err}")))?;
        let edge_stroke = StrokeDefinition::new(
            parse_color("edge_color", config.edge_color())?,
            positive("edge_width", config.edge_width())?,
        )
        .with_style(edge_style);
        let highlight = parse_color("highlight_color", config.highlight_color())?;

        let mut connector = ConnectorStyle::new(edge_stroke, highlight);
        if config.edge_arrow() {
            let tip = positive("arrow_tip_size", config.arrow_tip_size())?;
            connector = connector.with_arrow_tip(tip);
        }

        Ok(Self {
            colors,
            default_color,
            node_stroke_width,
            node_fill,
            connector,
        })
    }

    /// Outline color for a layer kind, or the default color when unmapped.
    pub fn color_for(&self, kind: &LayerKind) -> Color {
        self.colors
            .get(kind)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Returns true when `kind` has its own entry in the color map.
    pub fn is_mapped(&self, kind: &LayerKind) -> bool {
        self.colors.contains_key(kind)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Full style for a layer of the given kind.
    pub fn resolve(&self, kind: &LayerKind) -> LayerStyle {
        let stroke = StrokeDefinition::solid(self.color_for(kind), self.node_stroke_width);
        LayerStyle::new(stroke, self.node_fill)
    }

    pub fn connector_style(&self) -> &ConnectorStyle {
        &self.connector
    }

    /// Mapped kinds and their colors, in configuration order.
    pub fn mapped_kinds(&self) -> impl Iterator<Item = (&LayerKind, Color)> {
        self.colors.iter().map(|(kind, color)| (kind, *color))
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default()).expect("default style configuration is valid")
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, StrataError> {
    Color::new(value).map_err(|err| StrataError::invalid_config(format!("{field}: {err}")))
}

fn positive(field: &str, value: f32) -> Result<f32, StrataError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StrataError::invalid_config(format!(
            "{field} must be strictly positive, got {value}"
        )))
    }
}
