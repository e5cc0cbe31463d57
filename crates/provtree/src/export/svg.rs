//! SVG rendering of tree views.
//!
//! The document mirrors the structure interactive viewers style with CSS:
//!
//! - one `path.link` per edge, drawn beneath the nodes; edges into the active
//!   column also carry `active`;
//! - one `g.node` per group, translated to the group's position, with
//!   `branch-active` in the active column and `node-active` on the group
//!   holding the current record;
//! - inside each node a `circle` classed by the classifier and a `text`
//!   label, visible only on the active column.

use std::{fmt::Display, path::PathBuf};

use log::{debug, info};
use svg::{self, node::Text as SvgText, node::element as svg_element};

use provtree_core::{color::Color, geometry::Insets, tree::TreeNode};

use super::{Error, Exporter};
use crate::{
    classify,
    config::StyleConfig,
    layout::{PositionedLink, PositionedNode},
    view::{Group, TreeView},
};

const NODE_RADIUS: f32 = 2.0;
const LABEL_OFFSET_X: f32 = 7.0;
const LABEL_OFFSET_Y: f32 = 3.0;
const LABEL_STYLE: &str = "font-size: 8px";

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    file_name: Option<PathBuf>,
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file [`Exporter::export_view`] writes to.
    pub fn with_file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the style's background color is invalid.
    pub fn build(self) -> Result<Svg, Error> {
        let background = match self.style {
            Some(style) => style.background_color().map_err(Error::Render)?,
            None => None,
        };

        Ok(Svg {
            file_name: self.file_name,
            background,
            padding: Insets::new(10.0, 70.0, 10.0, 10.0),
        })
    }
}

/// Renders [`TreeView`]s to SVG documents.
#[derive(Debug)]
pub struct Svg {
    file_name: Option<PathBuf>,
    background: Option<Color>,
    /// Space around the laid-out tree; the right side holds the labels of
    /// the active column.
    padding: Insets,
}

impl Svg {
    /// Renders `view` to an SVG document.
    pub fn render_view<P: Display>(&self, view: &TreeView<'_, P>) -> svg::Document {
        let layout = view.layout();
        let content_bounds = layout.bounds();
        let svg_size = content_bounds.to_size().add_padding(self.padding);

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        if let Some(color) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", svg_size.width())
                    .set("height", svg_size.height())
                    .set("fill", color)
                    .set("fill-opacity", color.alpha()),
            );
        }

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                self.padding.left() - content_bounds.min_x(),
                self.padding.top() - content_bounds.min_y()
            ),
        );

        // Links first so nodes are drawn over them.
        let links = layout.links();
        for link in &links {
            main_group = main_group.add(Self::render_link(link));
        }
        for node in layout.nodes() {
            main_group = main_group.add(self.render_node(view, node));
        }

        debug!(nodes = layout.nodes().len(), links = links.len(); "View rendered to SVG");
        doc.add(main_group)
    }

    fn render_link(link: &PositionedLink) -> svg_element::Path {
        let (s, t) = (link.source_point(), link.target_point());
        let mid_y = s.midpoint(t).y();
        let class = if link.is_active() { "link active" } else { "link" };

        svg_element::Path::new()
            .set("class", class)
            .set(
                "d",
                format!(
                    "M{},{}C{},{} {},{} {},{}",
                    s.x(),
                    s.y(),
                    s.x(),
                    mid_y,
                    t.x(),
                    mid_y,
                    t.x(),
                    t.y()
                ),
            )
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 0.5)
    }

    fn render_node<P: Display>(
        &self,
        view: &TreeView<'_, P>,
        node: &PositionedNode<Group<'_, P>>,
    ) -> svg_element::Group {
        let mut class = String::from("node");
        if node.is_on_active_path() {
            class.push_str(" branch-active");
        }
        if node.index() == view.active() {
            class.push_str(" node-active");
        }

        let records = node.data();
        let mut group = svg_element::Group::new()
            .set("class", class)
            .set("data-depth", node.depth().to_string())
            .set("data-column", node.column().to_string())
            .set(
                "transform",
                format!("translate({}, {})", node.position().x(), node.position().y()),
            );

        if let Some(last) = records.last() {
            group = group
                .set("data-id", last.id().to_string())
                .add(
                    svg_element::Circle::new()
                        .set("r", NODE_RADIUS)
                        .set("class", classify::css_classes(view.tree(), last.index())),
                );
        }

        if let Some(label) = Self::label(records) {
            let visibility = if node.is_on_active_path() {
                "visible"
            } else {
                "hidden"
            };
            group = group.add(
                svg_element::Text::new("")
                    .set("x", LABEL_OFFSET_X)
                    .set("y", LABEL_OFFSET_Y)
                    .set("style", LABEL_STYLE)
                    .set("visibility", visibility)
                    .add(SvgText::new(label)),
            );
        }

        group
    }

    /// Label of a group: the payload of its last record, followed by the
    /// number of records collapsed before it. A group holding only the root
    /// has no label.
    fn label<P: Display>(records: &[&TreeNode<P>]) -> Option<String> {
        let last = records.last()?;
        if !last.is_state() {
            return None;
        }
        Some(match records.len() {
            1 => last.data().to_string(),
            len => format!("{} (+{})", last.data(), len - 1),
        })
    }
}

impl Exporter for Svg {
    fn export_view<P: Display>(&mut self, view: &TreeView<'_, P>) -> Result<(), Error> {
        let Some(file_name) = &self.file_name else {
            return Err(Error::Render("no output file configured".to_string()));
        };

        let doc = self.render_view(view);
        svg::save(file_name, &doc).map_err(Error::Io)?;

        info!(output_file = file_name.display().to_string(); "SVG exported");
        Ok(())
    }
}
