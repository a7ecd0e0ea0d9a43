//! Stroke definitions for node outlines and connectors.
//!
//! A [`StrokeDefinition`] bundles the color, width and dash pattern that a
//! renderer needs to draw a line. Node outlines take their color from the
//! owning layer's resolved style; connectors share a single edge stroke.
//!
//! ```
//! use strata_core::{color::Color, stroke::{StrokeDefinition, StrokeStyle}};
//!
//! let edge = StrokeDefinition::solid(Color::new("#BBBBBB").unwrap(), 1.5);
//! assert_eq!(edge.style(), &StrokeStyle::Solid);
//!
//! let guide = StrokeDefinition::dashed(Color::new("grey").unwrap(), 1.0);
//! assert_eq!(guide.style().to_dasharray().as_deref(), Some("5,5"));
//! ```

use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Custom dasharray pattern, e.g. `"10,5,2,5"`
    Custom(String),
}

impl StrokeStyle {
    /// Returns the dasharray value for this style, or None for solid lines
    pub fn to_dasharray(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern if is_dasharray(pattern) => Ok(Self::Custom(pattern.to_string())),
            _ => Err(format!(
                "invalid stroke style `{s}`, expected solid, dashed, dotted or a dasharray"
            )),
        }
    }
}

/// One or more finite, non-negative lengths separated by commas or spaces.
fn is_dasharray(pattern: &str) -> bool {
    let mut parts = pattern
        .split([',', ' '])
        .filter(|part| !part.is_empty())
        .peekable();
    parts.peek().is_some()
        && parts.all(|part| {
            part.parse::<f32>()
                .is_ok_and(|length| length.is_finite() && length >= 0.0)
        })
}

impl Serialize for StrokeStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_dasharray() {
            Some(pattern) => serializer.serialize_str(&pattern),
            None => serializer.serialize_str("solid"),
        }
    }
}

/// A stroke definition for rendering outlines and connectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::Solid,
        }
    }
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Alias of [`StrokeDefinition::new`] that reads better at call sites.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns a copy of this stroke drawn in a different color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }
}
