//! Per-layer captions.
//!
//! Captions describe what each stage computes and the shape of the tensor it
//! produces, tracking spatial resolution from the input image through every
//! strided stage.

use log::debug;

use strata_core::{
    geometry::Point,
    network::{LayerKind, LayerSpec},
};

use crate::{
    config::CaptionConfig,
    diagram::{Caption, Diagram},
};

/// Attaches a caption below every layer of `diagram`.
///
/// Replaces any captions from a previous run.
pub fn caption(diagram: &mut Diagram, config: &CaptionConfig) {
    let gap = diagram.layout().caption_gap();
    let mut shape = Shape {
        resolution: config.input_resolution(),
        channels: config.input_channels(),
    };

    let captions: Vec<Caption> = diagram
        .layers()
        .iter()
        .map(|layer| {
            let lines = shape.advance(layer.spec(), config);
            let anchor = layer.bounds().bottom_center().add_point(Point::new(0.0, gap));
            Caption::new(layer.index(), lines, anchor)
        })
        .collect();

    debug!(captions = captions.len(); "Captions attached");
    diagram.set_captions(captions);
}

/// Running tensor shape while walking the network.
struct Shape {
    resolution: u32,
    channels: u32,
}

impl Shape {
    /// Updates the shape for `spec` and returns the caption lines describing it.
    fn advance(&mut self, spec: &LayerSpec, config: &CaptionConfig) -> Vec<String> {
        if spec.is_strided() {
            self.resolution = (self.resolution / spec.stride()).max(1);
        }

        let mut lines = Vec::with_capacity(4);
        if spec.is_strided() {
            lines.push(format!("Stride {}", spec.stride()));
            lines.push("Down-sampling".to_string());
        }

        match spec.kind() {
            LayerKind::Input => {
                self.channels = config.input_channels();
                lines.push("Input".to_string());
                lines.push(self.dims());
            }
            LayerKind::Conv => {
                self.channels = spec.channels();
                lines.push("Standard Conv".to_string());
                lines.push(self.dims());
            }
            LayerKind::Depthwise => {
                lines.push("Depthwise Conv".to_string());
                lines.push(self.dims());
            }
            LayerKind::Pointwise => {
                self.channels = spec.channels();
                lines.push("Pointwise Conv".to_string());
                lines.push(self.dims());
            }
            LayerKind::FullyConnected => {
                self.channels = spec.channels();
                lines.push("FC Layer".to_string());
                lines.push(format!("{} classes", spec.channels()));
            }
            other => {
                self.channels = spec.channels();
                lines.push(other.description());
                lines.push(format!("{} units", spec.channels()));
            }
        }

        lines
    }

    fn dims(&self) -> String {
        format!(
            "{res}×{res}×{channels}",
            res = self.resolution,
            channels = self.channels
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{config::LayoutConfig, layout::layout};

    fn captioned(specs: &[LayerSpec]) -> Diagram {
        let mut diagram = layout(specs, &LayoutConfig::default()).unwrap();
        caption(&mut diagram, &CaptionConfig::default());
        diagram
    }

    fn lines(diagram: &Diagram, layer: usize) -> Vec<&str> {
        diagram.captions()[layer]
            .lines()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_input_caption() {
        let diagram = captioned(&[LayerSpec::new(6, LayerKind::Input).with_channels(3)]);
        assert_eq!(lines(&diagram, 0), ["Input", "224×224×3"]);
    }

    #[test]
    fn test_strided_conv_halves_resolution() {
        let diagram = captioned(&[
            LayerSpec::new(6, LayerKind::Input),
            LayerSpec::new(8, LayerKind::Conv).with_stride(2).with_channels(32),
        ]);
        assert_eq!(
            lines(&diagram, 1),
            ["Stride 2", "Down-sampling", "Standard Conv", "112×112×32"]
        );
    }

    #[test]
    fn test_depthwise_keeps_channel_count() {
        let diagram = captioned(&[
            LayerSpec::new(6, LayerKind::Input),
            LayerSpec::new(8, LayerKind::Conv).with_stride(2).with_channels(32),
            LayerSpec::new(4, LayerKind::Depthwise).with_channels(32),
            LayerSpec::new(5, LayerKind::Pointwise).with_channels(64),
            LayerSpec::new(4, LayerKind::Depthwise).with_stride(2).with_channels(64),
        ]);
        assert_eq!(lines(&diagram, 2), ["Depthwise Conv", "112×112×32"]);
        assert_eq!(lines(&diagram, 3), ["Pointwise Conv", "112×112×64"]);
        assert_eq!(
            lines(&diagram, 4),
            ["Stride 2", "Down-sampling", "Depthwise Conv", "56×56×64"]
        );
    }

    #[test]
    fn test_fully_connected_and_other_kinds() {
        let diagram = captioned(&[
            LayerSpec::new(4, LayerKind::Hidden),
            LayerSpec::new(10, LayerKind::FullyConnected).with_channels(1000),
        ]);
        assert_eq!(lines(&diagram, 0), ["Hidden Layer", "4 units"]);
        assert_eq!(lines(&diagram, 1), ["FC Layer", "1000 classes"]);
    }

    #[test]
    fn test_caption_sits_below_layer() {
        let diagram = captioned(&[LayerSpec::new(3, LayerKind::Input)]);
        let layer = &diagram.layers()[0];
        let anchor = diagram.captions()[0].anchor();

        assert_approx_eq!(f32, anchor.x(), layer.center_x());
        assert_approx_eq!(f32, anchor.y(), layer.bounds().max_y() + 20.0);
    }

    #[test]
    fn test_resolution_never_reaches_zero() {
        let config = CaptionConfig::new(true, 2, 3);
        let mut diagram = layout(
            &[
                LayerSpec::new(1, LayerKind::Input),
                LayerSpec::new(1, LayerKind::Conv).with_stride(4).with_channels(8),
            ],
            &LayoutConfig::default(),
        )
        .unwrap();
        caption(&mut diagram, &config);
        assert_eq!(lines(&diagram, 1)[3], "1×1×8");
    }
}
