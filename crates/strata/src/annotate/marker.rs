//! Marker rules.
//!
//! A marker is a small glyph drawn above a layer to call out its role. Two
//! rules exist: a downsampling rule for stages that reduce resolution, and a
//! terminal rule for the final classification stage. Rules are evaluated in
//! configuration order, and a layer may collect markers from several rules.
//! The first layer of a network is never marked.

use serde::{Deserialize, Serialize};

use strata_core::{color::Color, network::LayerKind};

use crate::{
    StrataError,
    diagram::{Layer, MarkerKind},
};

const DOWNSAMPLE_COLOR: &str = "#FC6255";
const DOWNSAMPLE_HEIGHT: f32 = 20.0;
const DOWNSAMPLE_LABEL: &str = "Strided Convolution (s=2)";
const TERMINAL_COLOR: &str = "#F0AC5F";
const TERMINAL_HEIGHT: f32 = 25.0;

fn downsample_kinds() -> Vec<LayerKind> {
    vec![LayerKind::Conv, LayerKind::Depthwise]
}

fn terminal_kinds() -> Vec<LayerKind> {
    vec![LayerKind::FullyConnected]
}

fn one() -> u32 {
    1
}

/// A configured marker rule.
///
/// In TOML:
///
/// ```toml
/// [[markers]]
/// rule = "downsample"
/// kinds = ["conv", "dw"]
/// min_stride = 2
///
/// [[markers]]
/// rule = "terminal"
/// kinds = ["fc"]
/// color = "gold"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MarkerRule {
    /// Marks non-final layers of the given kinds whose stride is at least
    /// `min_stride`.
    Downsample {
        #[serde(default = "downsample_kinds")]
        kinds: Vec<LayerKind>,
        #[serde(default = "one")]
        min_stride: u32,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        height: Option<f32>,
        /// Legend text; the legend omits the rule when this is empty.
        #[serde(default)]
        label: Option<String>,
    },
    /// Marks layers of the given kinds wherever they appear.
    Terminal {
        #[serde(default = "terminal_kinds")]
        kinds: Vec<LayerKind>,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        height: Option<f32>,
        #[serde(default)]
        label: Option<String>,
    },
}

impl MarkerRule {
    /// The rules of the canonical skin: a downsampling marker on every
    /// convolution and depthwise stage, and a terminal marker on fully
    /// connected stages.
    pub fn canonical() -> Vec<Self> {
        vec![
            Self::downsample(downsample_kinds(), 1),
            Self::terminal(terminal_kinds()),
        ]
    }

    pub fn downsample(kinds: Vec<LayerKind>, min_stride: u32) -> Self {
        Self::Downsample {
            kinds,
            min_stride,
            color: None,
            height: None,
            label: None,
        }
    }

    pub fn terminal(kinds: Vec<LayerKind>) -> Self {
        Self::Terminal {
            kinds,
            color: None,
            height: None,
            label: None,
        }
    }
}

/// A marker rule with its color parsed and defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    kind: MarkerKind,
    kinds: Vec<LayerKind>,
    min_stride: u32,
    color: Color,
    height: f32,
    label: Option<String>,
}

impl CompiledRule {
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether this rule marks `layer` in a network of `layer_count` layers.
    pub fn matches(&self, layer: &Layer, layer_count: usize) -> bool {
        if layer.index() == 0 || !self.kinds.contains(layer.kind()) {
            return false;
        }
        match self.kind {
            MarkerKind::Downsample => {
                layer.index() + 1 < layer_count && layer.spec().stride() >= self.min_stride
            }
            MarkerKind::Terminal => true,
        }
    }
}

/// An ordered, validated set of marker rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerRules {
    rules: Vec<CompiledRule>,
}

impl MarkerRules {
    /// Validates `rules` and resolves their appearance.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::InvalidConfig`] for an unparsable color or a
    /// non-positive marker height.
    pub fn compile(rules: &[MarkerRule]) -> Result<Self, StrataError> {
        let rules = rules
            .iter()
            .map(|rule| match rule {
                MarkerRule::Downsample {
                    kinds,
                    min_stride,
                    color,
                    height,
                    label,
                } => compile_one(
                    MarkerKind::Downsample,
                    kinds,
                    *min_stride,
                    (color.as_deref(), DOWNSAMPLE_COLOR),
                    height.unwrap_or(DOWNSAMPLE_HEIGHT),
                    label.clone().or_else(|| Some(DOWNSAMPLE_LABEL.to_string())),
                ),
                MarkerRule::Terminal {
                    kinds,
                    color,
                    height,
                    label,
                } => compile_one(
                    MarkerKind::Terminal,
                    kinds,
                    1,
                    (color.as_deref(), TERMINAL_COLOR),
                    height.unwrap_or(TERMINAL_HEIGHT),
                    label.clone(),
                ),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Rules that mark `layer`, in evaluation order.
    pub fn matching<'a>(
        &'a self,
        layer: &'a Layer,
        layer_count: usize,
    ) -> impl Iterator<Item = &'a CompiledRule> {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(layer, layer_count))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

fn compile_one(
    kind: MarkerKind,
    kinds: &[LayerKind],
    min_stride: u32,
    (color, fallback): (Option<&str>, &str),
    height: f32,
    label: Option<String>,
) -> Result<CompiledRule, StrataError> {
    let color = Color::new(color.unwrap_or(fallback))
        .map_err(|err| StrataError::invalid_config(format!("marker color: {err}")))?;
    if !(height.is_finite() && height > 0.0) {
        return Err(StrataError::invalid_config(format!(
            "marker height must be strictly positive, got {height}"
        )));
    }

    Ok(CompiledRule {
        kind,
        kinds: kinds.to_vec(),
        min_stride,
        color,
        height,
        label: label.filter(|label| !label.is_empty()),
    })
}
