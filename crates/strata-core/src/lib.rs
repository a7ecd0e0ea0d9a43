//! Strata Core Types and Definitions
//!
//! This crate provides the foundational value types shared by the Strata
//! layout engine and its command-line front end. It includes:
//!
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Strokes**: Outline and connector stroke definitions ([`stroke`] module)
//! - **Network**: The layer description consumed by the layout engine ([`network`] module)

pub mod color;
pub mod geometry;
pub mod network;
pub mod stroke;
