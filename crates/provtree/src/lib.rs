//! Provtree - Layout and grouping for provenance history trees.
//!
//! A provenance history is a rooted tree of states, each reached by applying
//! an action to its parent. This crate makes such trees legible: chains of
//! related states are collapsed into groups, and the groups are laid out so
//! the path to the current state is always one straight line with every other
//! branch packed beside it.
//!
//! The pieces can be used on their own ([`group`], [`hierarchy`], [`layout`],
//! [`classify`]) or through [`ViewBuilder`], which runs the whole pipeline
//! from a tree document to SVG.

pub mod classify;
pub mod config;
pub mod document;
pub mod export;
pub mod group;
pub mod hierarchy;
pub mod layout;
pub mod view;

mod error;

pub use provtree_core::{color, geometry, identifier, tree};

pub use error::ProvtreeError;

use std::{fmt::Display, path::Path};

use log::{debug, info, trace};

use provtree_core::tree::{HistoryTree, NodeIndex};

use config::AppConfig;
use document::TreeDocument;
use export::Exporter;
use group::GroupingEngine;
use layout::GratzlLayout;
use view::TreeView;

/// Builder for reading, laying out and rendering history trees.
///
/// # Examples
///
/// ```rust
/// use provtree::{ViewBuilder, config::AppConfig};
///
/// let source = r#"
/// [[node]]
/// id = "root"
///
/// [[node]]
/// id = "s1"
/// parent = "root"
/// label = "add 5"
/// intent = "edit"
/// "#;
///
/// let builder = ViewBuilder::new(AppConfig::default());
/// let document = builder.parse(source).expect("Failed to parse");
///
/// let view = builder
///     .build_view(document.tree(), document.current())
///     .expect("Failed to lay out");
/// assert_eq!(view.layout().nodes().len(), 2);
///
/// let svg = builder.render_svg(&view).expect("Failed to render");
/// assert!(svg.contains("add 5"));
/// ```
#[derive(Debug, Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a new view builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout, grouping and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder uses.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a tree document.
    ///
    /// # Errors
    ///
    /// Returns [`ProvtreeError::Document`] carrying the source text if the
    /// document is malformed.
    pub fn parse(&self, source: &str) -> Result<TreeDocument, ProvtreeError> {
        info!("Parsing tree document");

        let document = TreeDocument::parse(source)
            .map_err(|err| ProvtreeError::new_document_error(err, source))?;

        debug!(nodes = document.tree().node_count(); "Tree document parsed successfully");
        Ok(document)
    }

    /// Group and lay out `tree` around the record `current`.
    ///
    /// Grouping follows the configured [`GroupMode`](group::GroupMode) and the
    /// layout uses the configured extents.
    ///
    /// # Errors
    ///
    /// Returns [`ProvtreeError::Layout`] if `current` is not a node of `tree`.
    pub fn build_view<'t, P>(
        &self,
        tree: &'t HistoryTree<P>,
        current: NodeIndex,
    ) -> Result<TreeView<'t, P>, ProvtreeError> {
        let layout_config = self.config.layout();
        info!(
            group_mode:? = layout_config.group_mode(),
            current:% = current;
            "Building tree view"
        );

        let grouping = GroupingEngine::from_mode(layout_config.group_mode());
        let layout = GratzlLayout::new().with_size(layout_config.size());
        let view = TreeView::build(tree, current, &grouping, &layout)?;

        info!(
            groups = view.layout().nodes().len(),
            max_column = view.layout().max_column();
            "Layout calculated"
        );
        Ok(view)
    }

    /// Render a view to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ProvtreeError::Export`] if the configured style is invalid.
    pub fn render_svg<P: Display>(&self, view: &TreeView<'_, P>) -> Result<String, ProvtreeError> {
        let svg = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        let output = svg.render_view(view).to_string();
        trace!(bytes = output.len(); "SVG rendered");
        Ok(output)
    }

    /// Render a view and write it to `path` as SVG.
    ///
    /// # Errors
    ///
    /// Returns [`ProvtreeError::Export`] if the configured style is invalid
    /// or the file cannot be written.
    pub fn export_svg<P: Display>(
        &self,
        view: &TreeView<'_, P>,
        path: impl AsRef<Path>,
    ) -> Result<(), ProvtreeError> {
        let mut svg = export::svg::SvgBuilder::new()
            .with_file_name(path.as_ref())
            .with_style(self.config.style())
            .build()?;

        svg.export_view(view)?;
        Ok(())
    }
}
