//! Ecomap (radial support-network diagram) builder.
//!
//! One `family_core` node in the middle and one node per external system. Edges run from the core
//! to each system; bond strength sets the line, flow direction sets the arrowheads.

mod catalog;

use crate::graph::{
    Arrowhead, DiagramKind, Direction, Edge, GraphBuilder, GraphDescription, LabelLine,
    LayoutEngine, Legend, LineStyle, Node, NodeKind, Shape, TextTone,
};
use crate::palette;
use crate::risk::RiskFactorSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FAMILY_CORE_ID: &str = "family_core";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SystemTier {
    Primary,
    Secondary,
}

impl SystemTier {
    /// Relative distance from the family core.
    pub fn radial_distance(self) -> f64 {
        match self {
            SystemTier::Primary => 1.2,
            SystemTier::Secondary => 2.2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemTier::Primary => "PRIMARIA",
            SystemTier::Secondary => "SECUNDARIA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum BondStrength {
    Strong,
    Moderate,
    Stress,
    Weak,
}

impl BondStrength {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "strong" | "fuerte" => Some(BondStrength::Strong),
            "moderate" | "moderado" | "moderada" => Some(BondStrength::Moderate),
            "stress" | "estresante" | "tenso" => Some(BondStrength::Stress),
            "weak" | "débil" | "debil" => Some(BondStrength::Weak),
            _ => None,
        }
    }

    fn edge_style(self) -> (&'static str, f64, LineStyle) {
        match self {
            BondStrength::Strong => (palette::LINK_STRONG, 6.0, LineStyle::Solid),
            BondStrength::Moderate => (palette::LINK_MODERATE, 2.0, LineStyle::Solid),
            BondStrength::Stress => (palette::LINK_STRESS, 3.0, LineStyle::Dashed),
            BondStrength::Weak => (palette::LINK_WEAK, 1.0, LineStyle::Dotted),
        }
    }
}

impl TryFrom<String> for BondStrength {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown bond strength `{value}`"))
    }
}

/// Direction of support exchange between the family and a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum FlowDirection {
    TowardFamily,
    FromFamily,
    #[default]
    Reciprocal,
    None,
}

impl FlowDirection {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "in" | "toward" | "towardfamily" => Some(FlowDirection::TowardFamily),
            "out" | "from" | "fromfamily" => Some(FlowDirection::FromFamily),
            "both" | "reciprocal" => Some(FlowDirection::Reciprocal),
            "none" => Some(FlowDirection::None),
            _ => None,
        }
    }

    /// Edge direction for an edge drawn core → system.
    fn edge_direction(self) -> (Direction, Arrowhead) {
        match self {
            FlowDirection::TowardFamily => (Direction::Back, Arrowhead::Normal),
            FlowDirection::FromFamily => (Direction::Forward, Arrowhead::Normal),
            FlowDirection::Reciprocal => (Direction::Both, Arrowhead::Normal),
            FlowDirection::None => (Direction::None, Arrowhead::None),
        }
    }
}

impl TryFrom<String> for FlowDirection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown flow direction `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcomapSystem {
    pub name: String,
    pub tier: SystemTier,
    pub bond: BondStrength,
    pub flow: FlowDirection,
}

/// Caller selection for one ecomap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcomapSpec {
    #[serde(default)]
    pub family_name: String,
    /// Systems to draw. Empty means the configured default set.
    #[serde(default)]
    pub systems: Vec<String>,
    #[serde(default)]
    pub flows: IndexMap<String, FlowDirection>,
    /// Explicit bonds; these win over catalog defaults and risk overrides.
    #[serde(default)]
    pub bonds: IndexMap<String, BondStrength>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcomapOptions {
    pub default_systems: Vec<String>,
    pub legend: bool,
}

impl Default for EcomapOptions {
    fn default() -> Self {
        Self {
            default_systems: ["CESFAM", "TRABAJO", "RED FAMILIAR", "COMUNIDAD"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            legend: true,
        }
    }
}

fn system_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Resolves tier, bond and flow for every system to draw, in selection order, deduplicated.
pub fn resolve_systems(
    spec: &EcomapSpec,
    risks: &RiskFactorSet,
    options: &EcomapOptions,
) -> Vec<EcomapSystem> {
    let selection: &[String] = if spec.systems.is_empty() {
        &options.default_systems
    } else {
        &spec.systems
    };
    let flows: IndexMap<String, FlowDirection> = spec
        .flows
        .iter()
        .map(|(k, v)| (system_key(k), *v))
        .collect();
    let bonds: IndexMap<String, BondStrength> = spec
        .bonds
        .iter()
        .map(|(k, v)| (system_key(k), *v))
        .collect();

    let mut seen: IndexMap<String, EcomapSystem> = IndexMap::new();
    for raw in selection {
        let name = system_key(raw);
        if name.is_empty() || seen.contains_key(&name) {
            continue;
        }
        let (tier, default_bond) = match catalog::lookup(&name) {
            Some(entry) => (entry.tier, entry.bond),
            None => {
                tracing::debug!(system = %name, "system outside the catalog; using secondary/moderate");
                (SystemTier::Secondary, BondStrength::Moderate)
            }
        };
        let risk_bond = catalog::RISK_OVERRIDES
            .iter()
            .find(|(flags, system, _)| {
                *system == name && flags.iter().any(|f| risks.is_active(f))
            })
            .map(|(_, _, bond)| *bond);
        let bond = bonds
            .get(&name)
            .copied()
            .or(risk_bond)
            .unwrap_or(default_bond);
        let flow = flows.get(&name).copied().unwrap_or_default();
        seen.insert(
            name.clone(),
            EcomapSystem {
                name,
                tier,
                bond,
                flow,
            },
        );
    }
    seen.into_values().collect()
}

pub fn build(
    spec: &EcomapSpec,
    risks: &RiskFactorSet,
    options: &EcomapOptions,
) -> GraphDescription {
    let mut g = GraphBuilder::new(DiagramKind::Ecomap, LayoutEngine::Twopi);
    g.set_title(format!("Ecomapa — {}", spec.family_name));
    for (key, value) in [
        ("root", FAMILY_CORE_ID),
        ("ranksep", "2.5"),
        ("overlap", "false"),
        ("splines", "true"),
        ("bgcolor", "white"),
    ] {
        g.set_attr(key, value);
    }

    let mut core = Node::new(FAMILY_CORE_ID, NodeKind::FamilyCore, Shape::Ellipse);
    core.label = vec![
        LabelLine::new("FAMILIA", TextTone::Normal),
        LabelLine::new(spec.family_name.clone(), TextTone::Normal),
    ];
    core.fill_color = palette::FAMILY_CORE_BG.to_string();
    core.bold = true;
    core.font_size = Some(14.0);
    core.size = Some(2.5);
    g.add_node(core);

    let systems = resolve_systems(spec, risks, options);
    for system in &systems {
        let mut node = Node::new(system.name.clone(), NodeKind::System, Shape::Ellipse);
        node.label = vec![LabelLine::new(system.name.clone(), TextTone::Normal)];
        node.fill_color = palette::SYSTEM_BG.to_string();
        node.font_size = Some(10.0);
        node.size = Some(1.4);
        node.tooltip = Some(format!("Red {}", system.tier.label()));
        node.radial_distance = Some(system.tier.radial_distance());
        g.add_node(node);

        let (color, width, style) = system.bond.edge_style();
        let (direction, arrowhead) = system.flow.edge_direction();
        let mut edge = Edge::line(FAMILY_CORE_ID, system.name.as_str())
            .with_color(color)
            .with_width(width)
            .with_style(style);
        edge.direction = direction;
        edge.arrowhead = arrowhead;
        edge.arrow_size = Some(0.8);
        g.add_edge(edge);
    }
    tracing::debug!(systems = systems.len(), "ecomap built");

    if options.legend {
        g.set_legend(Legend::ecomap());
    }
    g.finish()
}
