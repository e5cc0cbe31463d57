//! Configuration types for provenance tree views.
//!
//! This module provides configuration structures that control how history
//! trees are grouped, laid out and styled. All types implement
//! [`serde::Deserialize`] so front ends can load them from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Layout extents and the [`GroupMode`] used before layout.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use provtree::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     lateral_extent = 80.0
//!     group_mode = "none"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().size().width(), 80.0);
//! assert_eq!(config.layout().size().height(), 100.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use provtree_core::{color::Color, geometry::Size};

use crate::group::GroupMode;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_lateral_extent() -> f32 {
    50.0
}

fn default_depth_extent() -> f32 {
    100.0
}

/// Layout extents and grouping.
///
/// By default the lateral extent is half the depth extent.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Extent of the lateral axis; column 0 is drawn at this coordinate.
    #[serde(default = "default_lateral_extent")]
    lateral_extent: f32,

    /// Extent of the depth axis; the deepest leaf is drawn at this coordinate.
    #[serde(default = "default_depth_extent")]
    depth_extent: f32,

    /// How chains are grouped before layout.
    #[serde(default)]
    group_mode: GroupMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            lateral_extent: default_lateral_extent(),
            depth_extent: default_depth_extent(),
            group_mode: GroupMode::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `size` - Lateral extent as `width`, depth extent as `height`.
    /// * `group_mode` - Grouping applied before layout.
    pub fn new(size: Size, group_mode: GroupMode) -> Self {
        Self {
            lateral_extent: size.width(),
            depth_extent: size.height(),
            group_mode,
        }
    }

    /// Returns the layout extents: lateral as `width`, depth as `height`.
    pub fn size(&self) -> Size {
        Size::new(self.lateral_extent, self.depth_extent)
    }

    pub fn group_mode(&self) -> GroupMode {
        self.group_mode
    }
}

/// Visual styling configuration for rendered trees.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Background [`Color`] of the rendered view, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given background color string.
    pub fn with_background_color(color: impl Into<String>) -> Self {
        Self {
            background_color: Some(color.into()),
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
