//! Genogram (multi-generation kinship diagram) builder.
//!
//! Symbol contract:
//! - male → box, female → ellipse, gestation → triangle, unknown → diamond
//! - deceased → grey fill, chronic illness → thick red border, index person → double border
//! - union line: married solid, cohabiting dashed, separated `/`, divorced `//`
//! - generations 1 (grandparents) … 5 (grandchildren), one row each

mod descent;
mod nodes;
mod relations;

use crate::config::TwinPairing;
use crate::generation::GenerationCategory;
use crate::graph::{DiagramKind, GraphBuilder, GraphDescription, LayoutEngine, Legend};
use crate::model::{FamilyMember, RelationRecord, UnionType};
use serde::{Deserialize, Serialize};

pub use descent::UNION_NODE_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenogramOptions {
    pub twin_pairing: TwinPairing,
    pub label_max_chars: usize,
    pub legend: bool,
}

impl Default for GenogramOptions {
    fn default() -> Self {
        Self {
            twin_pairing: TwinPairing::Adjacent,
            label_max_chars: 22,
            legend: true,
        }
    }
}

/// Everything besides the members that shapes a genogram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenogramSpec {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub union_type: UnionType,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

/// Members bucketed by generation, input order preserved within each bucket.
pub(crate) struct Levels<'a>([Vec<&'a FamilyMember>; 5]);

impl<'a> Levels<'a> {
    fn new(members: &[&'a FamilyMember]) -> Self {
        let mut levels: [Vec<&'a FamilyMember>; 5] = Default::default();
        for m in members {
            levels[usize::from(m.generation.rank()) - 1].push(*m);
        }
        Self(levels)
    }

    /// Members at `rank` (`1..=5`).
    pub(crate) fn at(&self, rank: u8) -> &[&'a FamilyMember] {
        &self.0[usize::from(rank) - 1]
    }
}

pub fn build(
    members: &[FamilyMember],
    spec: &GenogramSpec,
    options: &GenogramOptions,
) -> GraphDescription {
    let mut g = GraphBuilder::new(DiagramKind::Genogram, LayoutEngine::Dot);
    g.set_title(format!("Genograma Familiar — {}", spec.family_name));
    for (key, value) in [
        ("rankdir", "TB"),
        ("splines", "ortho"),
        ("nodesep", "0.9"),
        ("ranksep", "0.7"),
        ("newrank", "true"),
        ("bgcolor", "white"),
        ("fontname", "Arial"),
        ("fontsize", "14"),
    ] {
        g.set_attr(key, value);
    }

    let mut placed: Vec<&FamilyMember> = Vec::with_capacity(members.len());
    for member in members {
        if g.has_node(&member.id) {
            tracing::warn!(id = %member.id, "skipping member with duplicate id");
            continue;
        }
        g.add_node(nodes::member_node(member, options.label_max_chars));
        placed.push(member);
    }

    let levels = Levels::new(&placed);
    for category in GenerationCategory::ALL {
        let rank = category.rank();
        g.add_rank_group(rank, levels.at(rank).iter().map(|m| m.id.clone()).collect());
    }

    let couple = descent::Couple::find(&placed);
    let anchor = descent::wire_union(&mut g, &couple, spec.union_type);
    if let Some(anchor) = anchor.as_deref() {
        descent::wire_children(&mut g, anchor, levels.at(4), options.twin_pairing);
    }
    descent::wire_grandchildren(&mut g, &levels, anchor.as_deref());
    descent::wire_ascendants(&mut g, &levels, &couple);
    descent::chain_ranks(&mut g, &levels);

    let drawn = relations::overlay(&mut g, &placed, &spec.relations);
    tracing::debug!(
        members = placed.len(),
        relations = drawn,
        edges = g.edge_count(),
        "genogram built"
    );

    if options.legend {
        g.set_legend(Legend::genogram());
    }
    g.finish()
}
