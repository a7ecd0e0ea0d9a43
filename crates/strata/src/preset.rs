//! Built-in network descriptions.
//!
//! True channel counts run into the thousands, far too many nodes to draw.
//! Presets therefore scale each stage down to a drawable display size and
//! keep the true count in [`LayerSpec::channels`] for captions.

use std::{fmt, str::FromStr};

use strata_core::network::{LayerKind, LayerSpec};

use crate::StrataError;

/// Display size of the input layer.
const INPUT_DISPLAY_SIZE: usize = 6;
const INPUT_CHANNELS: u32 = 3;

/// MobileNet V1 with the depthwise and pointwise halves of each separable
/// block shown as separate stages: `(channels, stride, kind)`.
///
/// The repeated 512-channel blocks of the full model are collapsed into one.
const MOBILENET_V1: [(u32, u32, LayerKind); 20] = [
    (32, 2, LayerKind::Conv),
    (32, 1, LayerKind::Depthwise),
    (64, 1, LayerKind::Pointwise),
    (64, 2, LayerKind::Depthwise),
    (128, 1, LayerKind::Pointwise),
    (128, 1, LayerKind::Depthwise),
    (128, 1, LayerKind::Pointwise),
    (128, 2, LayerKind::Depthwise),
    (256, 1, LayerKind::Pointwise),
    (256, 1, LayerKind::Depthwise),
    (256, 1, LayerKind::Pointwise),
    (256, 2, LayerKind::Depthwise),
    (512, 1, LayerKind::Pointwise),
    (512, 1, LayerKind::Depthwise),
    (512, 1, LayerKind::Pointwise),
    (512, 2, LayerKind::Depthwise),
    (1024, 1, LayerKind::Pointwise),
    (1024, 1, LayerKind::Depthwise),
    (1024, 1, LayerKind::Pointwise),
    (1000, 1, LayerKind::FullyConnected),
];

/// Scales a true channel count down to the number of nodes drawn.
pub fn display_size(kind: &LayerKind, channels: u32) -> usize {
    let (divisor, min, max) = match kind {
        LayerKind::Input => return INPUT_DISPLAY_SIZE,
        LayerKind::Depthwise => (32, 4, 12),
        LayerKind::Pointwise => (32, 5, 14),
        LayerKind::Conv => (4, 4, 10),
        _ => (100, 4, 10),
    };
    (channels / divisor).clamp(min, max) as usize
}

/// The MobileNet V1 architecture, input layer first.
pub fn mobilenet_v1() -> Vec<LayerSpec> {
    let input = LayerSpec::new(INPUT_DISPLAY_SIZE, LayerKind::Input).with_channels(INPUT_CHANNELS);
    let stages = MOBILENET_V1.iter().map(|(channels, stride, kind)| {
        LayerSpec::new(display_size(kind, *channels), kind.clone())
            .with_stride(*stride)
            .with_channels(*channels)
    });

    std::iter::once(input).chain(stages).collect()
}

/// A named built-in network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    MobileNetV1,
}

impl Preset {
    pub const ALL: [Preset; 1] = [Preset::MobileNetV1];

    pub fn name(self) -> &'static str {
        match self {
            Self::MobileNetV1 => "mobilenet-v1",
        }
    }

    pub fn layers(self) -> Vec<LayerSpec> {
        match self {
            Self::MobileNetV1 => mobilenet_v1(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                StrataError::invalid_config(format!(
                    "unknown preset `{s}`, expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobilenet_shape() {
        let layers = mobilenet_v1();
        assert_eq!(layers.len(), 21);
        assert_eq!(layers[0].kind(), &LayerKind::Input);
        assert_eq!(layers[0].size(), 6);
        assert_eq!(layers[0].channels(), 3);
        assert_eq!(layers[20].kind(), &LayerKind::FullyConnected);
        assert_eq!(layers[20].channels(), 1000);
    }

    #[test]
    fn test_mobilenet_display_sizes() {
        let sizes: Vec<_> = mobilenet_v1().iter().map(LayerSpec::size).collect();
        assert_eq!(
            sizes,
            [6, 8, 4, 5, 4, 5, 4, 5, 4, 8, 8, 8, 8, 14, 12, 14, 12, 14, 12, 14, 10]
        );
    }

    #[test]
    fn test_mobilenet_strided_stages() {
        let strided: Vec<_> = mobilenet_v1()
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.is_strided())
            .map(|(index, _)| index)
            .collect();
        assert_eq!(strided, [1, 4, 8, 12, 16]);
    }

    #[test]
    fn test_display_size_clamps() {
        assert_eq!(display_size(&LayerKind::Depthwise, 32), 4);
        assert_eq!(display_size(&LayerKind::Depthwise, 4096), 12);
        assert_eq!(display_size(&LayerKind::Pointwise, 64), 5);
        assert_eq!(display_size(&LayerKind::Conv, 32), 8);
        assert_eq!(display_size(&LayerKind::FullyConnected, 1000), 10);
        assert_eq!(display_size(&LayerKind::Input, 3), 6);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("mobilenet-v1".parse::<Preset>().unwrap(), Preset::MobileNetV1);
        assert_eq!("MobileNet-V1".parse::<Preset>().unwrap(), Preset::MobileNetV1);
        let err = "resnet".parse::<Preset>().unwrap_err();
        assert!(err.to_string().contains("mobilenet-v1"), "{err}");
    }
}
