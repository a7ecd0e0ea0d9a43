//! Layer descriptions for sequential networks.
//!
//! A network is described as an ordered list of [`LayerSpec`] values. The
//! order is significant: the first spec becomes the leftmost layer of the
//! diagram. Each spec carries a size (how many units the stage has) and a
//! semantic [`LayerKind`] that drives styling and markers.
//!
//! ```
//! use strata_core::network::{LayerKind, LayerSpec};
//!
//! let specs = vec![
//!     LayerSpec::new(6, LayerKind::Input),
//!     LayerSpec::new(4, "dw".parse().unwrap()).with_stride(2),
//!     LayerSpec::new(5, LayerKind::Pointwise),
//! ];
//! assert_eq!(specs[1].kind(), &LayerKind::Depthwise);
//! assert_eq!(specs[1].stride(), 2);
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Semantic role of a layer.
///
/// Parsing never fails: names that are not recognized are kept verbatim in
/// [`LayerKind::Other`] so they can still be styled with a fallback color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerKind {
    Input,
    /// Standard convolution
    Conv,
    /// Depthwise convolution (`dw`)
    Depthwise,
    /// Pointwise 1×1 convolution (`pw`)
    Pointwise,
    /// Fully connected / classification stage (`fc`)
    FullyConnected,
    Hidden,
    Output,
    Other(String),
}

impl LayerKind {
    /// The short name used in configuration files and serialized output.
    pub fn name(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Conv => "conv",
            Self::Depthwise => "dw",
            Self::Pointwise => "pw",
            Self::FullyConnected => "fc",
            Self::Hidden => "hidden",
            Self::Output => "output",
            Self::Other(name) => name,
        }
    }

    /// A human readable description, used for legends.
    pub fn description(&self) -> String {
        match self {
            Self::Input => "Input Layer".to_string(),
            Self::Conv => "Standard Convolution".to_string(),
            Self::Depthwise => "Depthwise Convolution".to_string(),
            Self::Pointwise => "Pointwise (1×1) Convolution".to_string(),
            Self::FullyConnected => "Fully Connected Layer".to_string(),
            Self::Hidden => "Hidden Layer".to_string(),
            Self::Output => "Output Layer".to_string(),
            Self::Other(name) => name.clone(),
        }
    }
}

impl FromStr for LayerKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "input" => Self::Input,
            "conv" => Self::Conv,
            "dw" => Self::Depthwise,
            "pw" => Self::Pointwise,
            "fc" => Self::FullyConnected,
            "hidden" => Self::Hidden,
            "output" => Self::Output,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for LayerKind {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<LayerKind> for String {
    fn from(kind: LayerKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn default_stride() -> u32 {
    1
}

/// Description of one layer of a sequential network.
///
/// `size` is the number of units in the stage. A size of zero is accepted
/// here and rejected by the layout engine, which reports the offending
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    size: usize,
    kind: LayerKind,
    /// Spatial stride of the stage; anything above 1 reduces resolution.
    #[serde(default = "default_stride")]
    stride: u32,
    /// True channel count when `size` is a scaled-down display size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channels: Option<u32>,
}

impl LayerSpec {
    pub fn new(size: usize, kind: LayerKind) -> Self {
        Self {
            size,
            kind,
            stride: 1,
            channels: None,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns the true channel count, falling back to the layer size.
    pub fn channels(&self) -> u32 {
        self.channels
            .unwrap_or_else(|| u32::try_from(self.size).unwrap_or(u32::MAX))
    }

    /// Returns true when the stage reduces spatial resolution.
    pub fn is_strided(&self) -> bool {
        self.stride > 1
    }
}
