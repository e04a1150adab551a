//! Declarative graph description handed to the external renderer.
//!
//! Builders accumulate nodes and edges in a [`GraphBuilder`] arena and call
//! [`GraphBuilder::finish`] once; the resulting [`GraphDescription`] is immutable and carries no
//! layout information beyond rank groups and renderer hints.

mod builder;
pub mod dot;
pub mod legend;

pub use builder::GraphBuilder;
pub use legend::{Legend, LegendEntry};

/// Prefix of every node id the builders synthesise (union, twin divergence, legend). Member ids
/// never carry it, so synthetic nodes cannot be shadowed by caller data.
pub const RESERVED_ID_PREFIX: &str = "__";

use crate::palette;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramKind {
    Genogram,
    Ecomap,
}

/// Graphviz layout program the description is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutEngine {
    Dot,
    Twopi,
}

impl LayoutEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Twopi => "twopi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Member,
    Union,
    TwinDivergence,
    FamilyCore,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Box,
    Ellipse,
    Triangle,
    Diamond,
    Point,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Ellipse => "ellipse",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
            Shape::Point => "point",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Invisible,
}

impl LineStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::Invisible => "invis",
        }
    }
}

/// Which ends of an edge carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Forward,
    Back,
    Both,
    None,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Both => "both",
            Direction::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Arrowhead {
    Normal,
    None,
}

impl Arrowhead {
    pub fn as_str(self) -> &'static str {
        match self {
            Arrowhead::Normal => "normal",
            Arrowhead::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextTone {
    Normal,
    Bold,
    Small,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLine {
    pub text: String,
    pub tone: TextTone,
}

impl LabelLine {
    pub fn new(text: impl Into<String>, tone: TextTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub shape: Shape,
    pub label: Vec<LabelLine>,
    pub fill_color: String,
    pub border_color: String,
    pub border_width: f64,
    /// `2` draws a double border.
    pub peripheries: u8,
    pub rank: Option<u8>,
    pub size: Option<f64>,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub tooltip: Option<String>,
    pub radial_distance: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, shape: Shape) -> Self {
        Self {
            id: id.into(),
            kind,
            shape,
            label: Vec::new(),
            fill_color: palette::FILL_NEUTRAL.to_string(),
            border_color: palette::BORDER_DARK.to_string(),
            border_width: palette::BORDER_WIDTH,
            peripheries: 1,
            rank: None,
            size: None,
            font_size: None,
            bold: false,
            tooltip: None,
            radial_distance: None,
        }
    }

    pub fn label_text(&self) -> String {
        self.label
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_double_bordered(&self) -> bool {
        self.peripheries >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub style: LineStyle,
    pub width: f64,
    pub color: String,
    pub direction: Direction,
    pub arrowhead: Arrowhead,
    pub arrow_size: Option<f64>,
    pub label: Option<String>,
    pub label_color: Option<String>,
    pub label_size: Option<f64>,
    /// `false` keeps the edge out of rank assignment.
    pub constraint: bool,
}

impl Edge {
    /// A plain kinship line: solid, no arrowhead, rank-constraining.
    pub fn line(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            style: LineStyle::Solid,
            width: palette::DESCENT_WIDTH,
            color: palette::EDGE_COLOR.to_string(),
            direction: Direction::Forward,
            arrowhead: Arrowhead::None,
            arrow_size: None,
            label: None,
            label_color: None,
            label_size: None,
            constraint: true,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn with_label(mut self, label: &str, color: &str) -> Self {
        self.label = Some(label.to_string());
        self.label_color = Some(color.to_string());
        self
    }

    pub fn non_constraining(mut self) -> Self {
        self.constraint = false;
        self
    }

    pub fn is_invisible(&self) -> bool {
        self.style == LineStyle::Invisible
    }
}

/// Nodes that the renderer must keep on the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankGroup {
    pub rank: u8,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDescription {
    pub kind: DiagramKind,
    pub engine: LayoutEngine,
    pub title: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub rank_groups: Vec<RankGroup>,
    pub legend: Option<Legend>,
}

impl GraphDescription {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn edges_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.from == from)
    }

    pub fn edges_to<'a>(&'a self, to: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.to == to)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }
}
