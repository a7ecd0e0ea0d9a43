//! Error adapter for converting StrataError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Every variant gets
//! a stable diagnostic code, and a hint where the fix is usually obvious.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use strata::StrataError;

/// Adapter rendering a [`StrataError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a StrataError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StrataError::InvalidSpec { .. } => "strata::invalid_spec",
            StrataError::EmptyNetwork => "strata::empty_network",
            StrataError::InvalidConfig(_) => "strata::invalid_config",
            StrataError::Io(_) => "strata::io",
            StrataError::Export(_) => "strata::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StrataError::InvalidSpec { index, .. } => format!(
                "every layer needs at least one unit; check the `size` of layer {index}"
            ),
            StrataError::EmptyNetwork => {
                "add at least one [[layers]] entry, or pick a built-in network with --preset"
                    .to_string()
            }
            StrataError::InvalidConfig(_) => {
                "check the file passed with --config, or strata/config.toml".to_string()
            }
            StrataError::Io(_) | StrataError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`StrataError`] so it can be rendered by miette.
pub fn to_reportable(err: &StrataError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
