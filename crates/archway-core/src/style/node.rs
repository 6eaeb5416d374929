//! Node shapes and the per-type node style table.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    UnknownVariant,
    color::Color,
    geometry::Size,
    semantic::NodeKind,
    style::stroke::{FillStyle, StrokeStyle},
};

/// Default outline color shared by every node type.
const DEFAULT_STROKE: &str = "#1e1e1e";

/// Parses a palette entry known to be a valid CSS color.
pub(crate) fn palette(hex: &'static str) -> Color {
    Color::new(hex).expect("palette entries are valid CSS colors")
}

/// Primitive shape drawn for a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
        }
    }

    /// Rectangles are drawn with rounded corners; the other shapes ignore it.
    pub fn supports_roundness(self) -> bool {
        matches!(self, Self::Rectangle)
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            "diamond" => Ok(Self::Diamond),
            _ => Err(UnknownVariant::new("shape", s)),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual definition of one node type.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    shape: ShapeKind,
    size: Size,
    stroke_color: Color,
    background_color: Color,
    stroke_style: StrokeStyle,
    fill_style: FillStyle,
}

impl NodeStyle {
    pub fn new(shape: ShapeKind, size: Size, background_color: Color) -> Self {
        Self {
            shape,
            size,
            stroke_color: palette(DEFAULT_STROKE),
            background_color,
            stroke_style: StrokeStyle::Solid,
            fill_style: FillStyle::Solid,
        }
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = style;
        self
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Default size of a leaf node of this type.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    /// The built-in style of `kind`.
    pub fn builtin(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Actor => Self::new(
                ShapeKind::Ellipse,
                Size::new(120.0, 80.0),
                palette("#ffc9c9"),
            ),
            NodeKind::Service => Self::new(
                ShapeKind::Rectangle,
                Size::new(160.0, 80.0),
                palette("#a5d8ff"),
            ),
            NodeKind::Database => Self::new(
                ShapeKind::Ellipse,
                Size::new(140.0, 90.0),
                palette("#b2f2bb"),
            ),
            NodeKind::Queue => Self::new(
                ShapeKind::Rectangle,
                Size::new(160.0, 60.0),
                palette("#ffec99"),
            ),
            NodeKind::Cache => Self::new(
                ShapeKind::Rectangle,
                Size::new(140.0, 70.0),
                palette("#d0bfff"),
            ),
            NodeKind::Gateway => Self::new(
                ShapeKind::Diamond,
                Size::new(160.0, 100.0),
                palette("#ffd8a8"),
            ),
            NodeKind::Ui => Self::new(
                ShapeKind::Rectangle,
                Size::new(180.0, 70.0),
                palette("#e7f5ff"),
            ),
            NodeKind::External => Self::new(
                ShapeKind::Rectangle,
                Size::new(160.0, 80.0),
                palette("#e9ecef"),
            )
            .with_stroke_style(StrokeStyle::Dashed),
        }
    }
}

/// Node styles keyed by node type.
///
/// [`StyleTable::default`] holds an entry for every [`NodeKind`]. Tables
/// assembled by hand may be partial; [`StyleTable::get`] then returns `None`
/// and callers use [`StyleTable::fallback`], the built-in service style.
///
/// ```
/// # use archway_core::{semantic::NodeKind, style::{ShapeKind, StyleTable}};
/// let table = StyleTable::default();
/// assert_eq!(table.get(NodeKind::Database).unwrap().shape(), ShapeKind::Ellipse);
///
/// let empty = StyleTable::empty();
/// assert!(empty.get(NodeKind::Database).is_none());
/// assert_eq!(empty.fallback().shape(), ShapeKind::Rectangle);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    nodes: IndexMap<NodeKind, NodeStyle>,
    fallback: NodeStyle,
}

impl StyleTable {
    /// A table with no per-type entries.
    pub fn empty() -> Self {
        Self {
            nodes: IndexMap::new(),
            fallback: NodeStyle::builtin(NodeKind::Service),
        }
    }

    /// Replaces or inserts the style of `kind`.
    pub fn with_node_style(mut self, kind: NodeKind, style: NodeStyle) -> Self {
        self.nodes.insert(kind, style);
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<&NodeStyle> {
        self.nodes.get(&kind)
    }

    pub fn get_mut(&mut self, kind: NodeKind) -> Option<&mut NodeStyle> {
        self.nodes.get_mut(&kind)
    }

    /// Style used for a type missing from the table.
    pub fn fallback(&self) -> &NodeStyle {
        &self.fallback
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        NodeKind::CANONICAL_ORDER
            .into_iter()
            .fold(Self::empty(), |table, kind| {
                table.with_node_style(kind, NodeStyle::builtin(kind))
            })
    }
}
