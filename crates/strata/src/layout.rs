//! Layer placement.
//!
//! The layout pass turns an ordered list of layer descriptions into a
//! [`Diagram`](crate::diagram::Diagram) whose layers and nodes have fixed
//! coordinates. It is split in two:
//!
//! - [`build_layer`] places the nodes of one layer, truncating it when its
//!   size exceeds the display cap.
//! - [`layout`] validates the whole input, then builds every layer in order.

mod builder;
mod engine;

pub use builder::build_layer;
pub use engine::layout;
