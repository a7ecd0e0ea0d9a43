//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`]. Every variant
//! that the layout pipeline can produce is raised during validation, before
//! any part of a [`Diagram`](crate::diagram::Diagram) is built.

use std::io;

use thiserror::Error;

/// The main error type for Strata operations.
#[derive(Debug, Error)]
pub enum StrataError {
    /// A layer description with a non-positive size.
    ///
    /// `size` is signed so that negative sizes read from a network file can
    /// be reported as written.
    #[error("Invalid layer at position {index}: size must be at least 1, got {size}")]
    InvalidSpec { index: usize, size: i64 },

    /// The network contains no layers at all.
    #[error("Network has no layers")]
    EmptyNetwork,

    /// A spacing, radius, display cap, color or marker rule is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(String),
}

impl StrataError {
    /// Create a new `InvalidConfig` error from anything displayable.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
