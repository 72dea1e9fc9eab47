//! Tree layout: phylogram and cladogram placement.
//!
//! The engine works in three passes over the arena, all iterative:
//!
//! 1. **x**, in pre-order: a node sits at its parent's x plus its branch
//!    length (phylogram) or plus one (cladogram).
//! 2. **y**, leaves first: every leaf takes the next slot, `font_size` apart,
//!    in traversal order. Walking the arena backwards then places each
//!    internal node at the mean y of its children, which are always visited
//!    before their parent.
//! 3. **scale**: both axes are stretched to fill `width` x `height`.
//!
//! Edges and labels are derived from the scaled positions. Branch shading
//! goes through a [`BranchShader`], so callers can swap the colour ramp.
//!
//! # Example
//!
//! ```
//! # use canopy::layout::tree::{TreeEngine, TreeOptions};
//! # use canopy_core::tree::{NodeData, TreeBuilder};
//! let mut builder = TreeBuilder::new(NodeData::new());
//! let root = builder.root();
//! builder.add_child(root, NodeData::new().with_name("A").with_branch_length(1.0));
//! builder.add_child(root, NodeData::new().with_name("B").with_branch_length(3.0));
//! let tree = builder.build().unwrap();
//!
//! let layout = TreeEngine::new(TreeOptions::default().with_size(300.0, 100.0))
//!     .calculate(&tree)
//!     .unwrap();
//!
//! assert_eq!(layout.nodes().len(), 3);
//! assert_eq!(layout.edges().len(), 2);
//! assert_eq!(layout.extent().width(), 300.0);
//! ```

use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use canopy_core::{
    color::{Color, Gradient},
    draw::TextAnchor,
    geometry::{Path, Point, Size},
    tree::{NodeId, Tree},
};

use super::{LayoutError, check_dimension, check_font_size};

/// How an edge connects a parent to a child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Vertical from the parent, then horizontal into the child.
    #[default]
    Elbow,
    /// A straight line from parent to child.
    Diagonal,
}

impl EdgeStyle {
    fn path(self, from: Point, to: Point) -> Path {
        match self {
            Self::Elbow => Path::elbow(from, to),
            Self::Diagonal => Path::line(from, to),
        }
    }
}

/// Display options for [`TreeEngine`].
///
/// Every field has a default, so partial TOML tables deserialise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    cladogram: bool,
    font_size: f32,
    width: f32,
    height: f32,
    show_support_values: bool,
    shade_branch_by_support: bool,
    support_range: [f64; 2],
    support_precision: usize,
    edge_style: EdgeStyle,
    branch_length_default: f64,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            cladogram: false,
            font_size: 11.0,
            width: 940.0,
            height: 740.0,
            show_support_values: false,
            shade_branch_by_support: false,
            support_range: [0.0, 100.0],
            support_precision: 0,
            edge_style: EdgeStyle::Elbow,
            branch_length_default: 1.0,
        }
    }
}

impl TreeOptions {
    pub fn with_cladogram(mut self, cladogram: bool) -> Self {
        self.cladogram = cladogram;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the canvas the tree is scaled into.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_support_values(mut self, show: bool) -> Self {
        self.show_support_values = show;
        self
    }

    pub fn with_shading(mut self, shade: bool) -> Self {
        self.shade_branch_by_support = shade;
        self
    }

    /// Sets the declared `[min, max]` range of support values.
    pub fn with_support_range(mut self, min: f64, max: f64) -> Self {
        self.support_range = [min, max];
        self
    }

    pub fn with_support_precision(mut self, precision: usize) -> Self {
        self.support_precision = precision;
        self
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }

    /// Sets the length used for branches without one (phylogram only).
    pub fn with_branch_length_default(mut self, length: f64) -> Self {
        self.branch_length_default = length;
        self
    }

    pub fn cladogram(&self) -> bool {
        self.cladogram
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn show_support_values(&self) -> bool {
        self.show_support_values
    }

    pub fn shade_branch_by_support(&self) -> bool {
        self.shade_branch_by_support
    }

    pub fn support_range(&self) -> (f64, f64) {
        (self.support_range[0], self.support_range[1])
    }

    pub fn support_precision(&self) -> usize {
        self.support_precision
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn branch_length_default(&self) -> f64 {
        self.branch_length_default
    }

    fn validate(&self) -> Result<(), LayoutError> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        check_font_size(self.font_size)?;

        let (min, max) = self.support_range();
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(LayoutError::InvalidSupportRange { min, max });
        }

        if !(self.branch_length_default.is_finite() && self.branch_length_default >= 0.0) {
            return Err(LayoutError::InvalidDimension {
                option: "default branch length",
                value: self.branch_length_default,
            });
        }
        Ok(())
    }
}

/// Maps a node's support to the colour of the edge leading into it.
///
/// `support` is normalised to `[0, 1]` over the declared support range, or
/// `None` when the node carries no usable support value.
pub trait BranchShader: fmt::Debug {
    fn shade(&self, support: Option<f32>) -> Color;
}

/// Default shader: warning red for weak support, through amber, to a neutral
/// dark grey for strong support. Missing support is drawn in mid grey.
#[derive(Debug, Clone)]
pub struct SupportGradient {
    gradient: Gradient,
    missing: Color,
}

impl SupportGradient {
    /// Creates a shader from a gradient and the colour used without support.
    pub fn new(gradient: Gradient, missing: Color) -> Self {
        Self { gradient, missing }
    }
}

impl Default for SupportGradient {
    fn default() -> Self {
        let gradient = Gradient::new(
            (0.0, Color::from_rgb8(0xd7, 0x30, 0x27)),
            [
                (0.5, Color::from_rgb8(0xfd, 0xae, 0x61)),
                (1.0, Color::from_rgb8(0x33, 0x33, 0x33)),
            ],
        );
        Self::new(gradient, Color::from_rgb8(0x99, 0x99, 0x99))
    }
}

impl BranchShader for SupportGradient {
    fn shade(&self, support: Option<f32>) -> Color {
        match support {
            Some(t) => self.gradient.sample(t),
            None => self.missing,
        }
    }
}

/// A tree node placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    id: NodeId,
    position: Point,
}

impl PositionedNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// The connector from a parent to one of its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    parent: NodeId,
    child: NodeId,
    path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    shade: Option<Color>,
}

impl Edge {
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Support-derived colour, present only when shading is enabled.
    pub fn shade(&self) -> Option<Color> {
        self.shade
    }
}

/// What a [`Label`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// A leaf name
    Name,
    /// A formatted support value
    Support,
}

/// A piece of text attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    node: NodeId,
    kind: LabelKind,
    text: String,
    position: Point,
    anchor: TextAnchor,
}

impl Label {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

/// Geometry produced by [`TreeEngine::calculate`].
///
/// Nodes are listed in the tree's pre-order, so `nodes()[id.index()]` is the
/// node with that id. Edges follow the pre-order of their child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
    labels: Vec<Label>,
    extent: Size,
    font_size: f32,
}

impl TreeLayout {
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The scaled size of the node cloud, labels excluded.
    pub fn extent(&self) -> Size {
        self.extent
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Position of a node by id.
    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id.index()].position
    }
}

/// Lays out a [`Tree`] according to [`TreeOptions`].
#[derive(Debug)]
pub struct TreeEngine {
    options: TreeOptions,
    shader: Box<dyn BranchShader>,
}

impl TreeEngine {
    /// Creates an engine using the default [`SupportGradient`] shader.
    pub fn new(options: TreeOptions) -> Self {
        Self {
            options,
            shader: Box::new(SupportGradient::default()),
        }
    }

    /// Replaces the branch shader.
    pub fn with_shader(mut self, shader: Box<dyn BranchShader>) -> Self {
        self.shader = shader;
        self
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Computes node positions, edges and labels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when a dimension is negative or not finite,
    /// the font size is not positive, the support range is empty, or the
    /// branch lengths along a path add up past the `f64` range.
    pub fn calculate(&self, tree: &Tree) -> Result<TreeLayout, LayoutError> {
        self.options.validate()?;
        let options = &self.options;

        let (xs, ys) = self.raw_coordinates(tree)?;

        let max_x = xs.iter().copied().fold(0.0, f64::max);
        let max_y = ys.iter().copied().fold(0.0, f64::max);
        let (scale_x, extent_width) = axis_scale(max_x, options.width);
        let (scale_y, extent_height) = axis_scale(max_y, options.height);

        let positions: Vec<Point> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| Point::new((x * scale_x) as f32, (y * scale_y) as f32))
            .collect();

        let supports: Vec<Option<f64>> = tree
            .iter()
            .map(|(id, node)| self.clamped_support(id, node.support()))
            .collect();

        let nodes = tree
            .iter()
            .map(|(id, _)| PositionedNode {
                id,
                position: positions[id.index()],
            })
            .collect();

        let edges = self.edges(tree, &positions, &supports);
        let labels = self.labels(tree, &positions, &supports);

        debug!(
            nodes = tree.len(),
            leaves = tree.leaf_count(),
            cladogram = options.cladogram,
            max_x,
            max_y;
            "Tree layout calculated"
        );

        Ok(TreeLayout {
            nodes,
            edges,
            labels,
            extent: Size::new(extent_width, extent_height),
            font_size: options.font_size,
        })
    }

    /// Unscaled coordinates indexed by node.
    fn raw_coordinates(&self, tree: &Tree) -> Result<(Vec<f64>, Vec<f64>), LayoutError> {
        let options = &self.options;
        let mut xs = vec![0.0_f64; tree.len()];
        let mut ys = vec![0.0_f64; tree.len()];

        // Parents precede their children in the arena
        for (id, node) in tree.iter() {
            if let Some(parent) = node.parent() {
                let step = if options.cladogram {
                    1.0
                } else {
                    node.branch_length()
                        .unwrap_or(options.branch_length_default)
                };
                let x = xs[parent.index()] + step;
                if !x.is_finite() {
                    return Err(LayoutError::BranchLengthOverflow { node: id.index() });
                }
                xs[id.index()] = x;
            }
        }

        let slot_height = f64::from(options.font_size);
        let mut slot = 0_usize;
        for (id, node) in tree.iter() {
            if node.is_leaf() {
                ys[id.index()] = slot as f64 * slot_height;
                slot += 1;
            }
        }

        // Children follow their parent, so walking backwards sees them first
        for (id, node) in tree.iter().rev() {
            let children = node.children();
            if !children.is_empty() {
                let sum: f64 = children.iter().map(|child| ys[child.index()]).sum();
                ys[id.index()] = sum / children.len() as f64;
            }
        }

        trace!(leaf_slots = slot; "Raw tree coordinates computed");
        Ok((xs, ys))
    }

    /// Clamps support into the declared range; non-finite values count as missing.
    fn clamped_support(&self, id: NodeId, support: Option<f64>) -> Option<f64> {
        let value = support?;
        if !value.is_finite() {
            warn!(node = id.index(), value; "Ignoring non-finite support value");
            return None;
        }
        let (min, max) = self.options.support_range();
        let clamped = value.clamp(min, max);
        if clamped != value {
            warn!(node = id.index(), value, clamped; "Support value outside range clamped");
        }
        Some(clamped)
    }

    fn normalise(&self, support: Option<f64>) -> Option<f32> {
        let (min, max) = self.options.support_range();
        support.map(|value| ((value - min) / (max - min)) as f32)
    }

    fn edges(&self, tree: &Tree, positions: &[Point], supports: &[Option<f64>]) -> Vec<Edge> {
        let options = &self.options;
        tree.iter()
            .filter_map(|(child, node)| {
                let parent = node.parent()?;
                let shade = options
                    .shade_branch_by_support
                    .then(|| self.shader.shade(self.normalise(supports[child.index()])));
                Some(Edge {
                    parent,
                    child,
                    path: options
                        .edge_style
                        .path(positions[parent.index()], positions[child.index()]),
                    shade,
                })
            })
            .collect()
    }

    fn labels(&self, tree: &Tree, positions: &[Point], supports: &[Option<f64>]) -> Vec<Label> {
        let options = &self.options;
        let font_size = options.font_size;
        let mut labels = Vec::new();

        for (id, node) in tree.iter() {
            let position = positions[id.index()];
            if node.is_leaf() {
                if let Some(name) = node.name() {
                    if !name.is_empty() {
                        labels.push(Label {
                            node: id,
                            kind: LabelKind::Name,
                            text: name.to_string(),
                            position: Point::new(position.x() + font_size / 2.0, position.y()),
                            anchor: TextAnchor::Start,
                        });
                    }
                }
            } else if options.show_support_values {
                if let Some(support) = supports[id.index()] {
                    labels.push(Label {
                        node: id,
                        kind: LabelKind::Support,
                        text: format!("{:.*}", options.support_precision, support),
                        position: Point::new(
                            position.x() - font_size / 4.0,
                            position.y() - font_size / 2.0,
                        ),
                        anchor: TextAnchor::End,
                    });
                }
            }
        }

        labels
    }
}

/// Scale factor and extent for one axis; a zero-length axis collapses.
fn axis_scale(max: f64, target: f32) -> (f64, f32) {
    if max > 0.0 {
        (f64::from(target) / max, target)
    } else {
        (0.0, 0.0)
    }
}
