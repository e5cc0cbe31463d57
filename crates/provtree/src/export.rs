//! Export of laid-out tree views.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! pipeline:
//!
//! ```text
//! Tree document
//!     ↓ parse
//! HistoryTree
//!     ↓ group + layout
//! TreeView
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`ProvtreeError::Export`] at the crate
//! boundary.
//!
//! [`ProvtreeError::Export`]: crate::ProvtreeError::Export

/// SVG export backend.
pub mod svg;

use std::fmt::Display;

use crate::view::TreeView;

/// Abstraction for view export backends.
pub trait Exporter {
    /// Exports a laid-out view to the backend's output format.
    ///
    /// Record payloads are rendered as node labels through [`Display`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the view cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_view<P: Display>(&mut self, view: &TreeView<'_, P>) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`ProvtreeError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`ProvtreeError::Export`]: crate::ProvtreeError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
