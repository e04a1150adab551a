use super::Levels;
use crate::config::TwinPairing;
use crate::graph::{Edge, GraphBuilder, LineStyle, Node, NodeKind, Shape};
use crate::model::{FamilyMember, TwinKind, UnionType};
use crate::palette;
use indexmap::IndexMap;

pub const UNION_NODE_ID: &str = "__union_central";

/// Head of household and partner, each the first member carrying the matching role.
pub(super) struct Couple<'a> {
    pub head: Option<&'a FamilyMember>,
    pub partner: Option<&'a FamilyMember>,
}

impl<'a> Couple<'a> {
    pub fn find(members: &[&'a FamilyMember]) -> Self {
        Self {
            head: members.iter().copied().find(|m| m.is_household_head()),
            partner: members.iter().copied().find(|m| m.is_partner()),
        }
    }

    fn is_couple_member(&self, id: &str) -> bool {
        self.head.is_some_and(|m| m.id == id) || self.partner.is_some_and(|m| m.id == id)
    }
}

/// Draws the conjugal union and returns the node descendants hang from.
///
/// With both head and partner a union node is synthesized; with a head only, the head itself is
/// the anchor (monoparental household).
pub(super) fn wire_union(
    g: &mut GraphBuilder,
    couple: &Couple<'_>,
    union_type: UnionType,
) -> Option<String> {
    match (couple.head, couple.partner) {
        (Some(head), Some(partner)) => {
            let mut node = Node::new(UNION_NODE_ID, NodeKind::Union, Shape::Point);
            node.size = Some(0.08);
            node.fill_color = palette::UNION_COLOR.to_string();
            g.add_node(node);

            let (style, label) = match union_type {
                UnionType::Married => (LineStyle::Solid, None),
                UnionType::Cohabiting => (LineStyle::Dashed, None),
                UnionType::Separated => (LineStyle::Solid, Some("/")),
                UnionType::Divorced => (LineStyle::Solid, Some("//")),
            };
            let union_edge = |from: &str| {
                Edge::line(from, UNION_NODE_ID)
                    .with_color(palette::EDGE_UNION)
                    .with_width(2.0)
                    .with_style(style)
            };
            g.add_edge(union_edge(&head.id));
            let mut partner_edge = union_edge(&partner.id);
            if let Some(label) = label {
                partner_edge = partner_edge.with_label(label, palette::ALERT);
                partner_edge.label_size = Some(12.0);
            }
            g.add_edge(partner_edge);
            Some(UNION_NODE_ID.to_string())
        }
        (Some(head), None) => Some(head.id.clone()),
        (None, _) => None,
    }
}

/// Children hang from the anchor left to right in input order.
pub(super) fn wire_children(
    g: &mut GraphBuilder,
    anchor: &str,
    children: &[&FamilyMember],
    pairing: TwinPairing,
) {
    match pairing {
        TwinPairing::Adjacent => wire_children_adjacent(g, anchor, children),
        TwinPairing::SiblingGroup => wire_children_grouped(g, anchor, children),
    }
}

fn child_edge(anchor: &str, child: &FamilyMember) -> Edge {
    let style = if child.adopted {
        LineStyle::Dashed
    } else {
        LineStyle::Solid
    };
    Edge::line(anchor, child.id.as_str()).with_style(style)
}

fn divergence_node(id: &str) -> Node {
    let mut node = Node::new(id, NodeKind::TwinDivergence, Shape::Point);
    node.size = Some(0.01);
    node.fill_color = palette::EDGE_COLOR.to_string();
    node
}

fn wire_twins(g: &mut GraphBuilder, anchor: &str, mid_id: &str, twins: &[&FamilyMember], identical: bool) {
    g.add_node(divergence_node(mid_id));
    g.add_edge(Edge::line(anchor, mid_id));
    for twin in twins {
        g.add_edge(Edge::line(mid_id, twin.id.as_str()));
    }
    if identical {
        for pair in twins.windows(2) {
            g.add_edge(
                Edge::line(pair[0].id.as_str(), pair[1].id.as_str())
                    .with_width(1.0)
                    .non_constraining(),
            );
        }
    }
}

/// Compatibility pairing: a twin is paired only with the child right after it. Whether the pair
/// is identical is decided by the first twin's label.
fn wire_children_adjacent(g: &mut GraphBuilder, anchor: &str, children: &[&FamilyMember]) {
    let mut i = 0;
    while i < children.len() {
        let first = children[i];
        if first.twin.is_some() {
            if let Some(second) = children.get(i + 1).filter(|c| c.twin.is_some()) {
                let identical = first.twin == Some(TwinKind::Identical);
                wire_twins(g, anchor, &format!("__twin_mid_{i}"), &[first, *second], identical);
                i += 2;
                continue;
            }
        }
        g.add_edge(child_edge(anchor, first));
        i += 1;
    }
}

/// Pairs children by explicit sibling-group id, independent of input order.
fn wire_children_grouped(g: &mut GraphBuilder, anchor: &str, children: &[&FamilyMember]) {
    let mut groups: IndexMap<&str, Vec<&FamilyMember>> = IndexMap::new();
    for child in children {
        if let Some(group) = child.twin_group.as_deref() {
            groups.entry(group).or_default().push(*child);
        }
    }

    for child in children {
        let group = child
            .twin_group
            .as_deref()
            .and_then(|id| groups.get(id).map(|members| (id, members)))
            .filter(|(_, members)| members.len() >= 2);
        match group {
            Some((id, members)) => {
                if members[0].id != child.id {
                    continue;
                }
                let identical = members.iter().any(|m| m.twin == Some(TwinKind::Identical));
                wire_twins(g, anchor, &format!("__twin_{id}"), members, identical);
            }
            None => {
                g.add_edge(child_edge(anchor, child));
            }
        }
    }
}

/// Grandchildren hang from the first child, or from the descent anchor when there are none.
pub(super) fn wire_grandchildren(g: &mut GraphBuilder, levels: &Levels<'_>, anchor: Option<&str>) {
    let from = levels.at(4).first().map(|m| m.id.as_str()).or(anchor);
    let Some(from) = from else {
        return;
    };
    for grandchild in levels.at(5) {
        g.add_edge(Edge::line(from, grandchild.id.as_str()));
    }
}

/// Grandparents → parents → head and collateral siblings.
pub(super) fn wire_ascendants(g: &mut GraphBuilder, levels: &Levels<'_>, couple: &Couple<'_>) {
    let grandparents = levels.at(1);
    let parents = levels.at(2);
    let collaterals: Vec<&FamilyMember> = levels
        .at(3)
        .iter()
        .copied()
        .filter(|m| !couple.is_couple_member(&m.id))
        .collect();
    let head = couple.head.map(|m| m.id.as_str());

    let grandparent_target = parents.first().map(|m| m.id.as_str()).or(head);
    if let Some(target) = grandparent_target {
        for gp in grandparents {
            g.add_edge(Edge::line(gp.id.as_str(), target));
        }
    }

    match head {
        Some(head) if !parents.is_empty() => {
            for parent in parents {
                g.add_edge(Edge::line(parent.id.as_str(), head));
                for sibling in &collaterals {
                    g.add_edge(Edge::line(parent.id.as_str(), sibling.id.as_str()));
                }
            }
        }
        Some(head) => {
            for sibling in &collaterals {
                g.add_edge(
                    Edge::line(head, sibling.id.as_str())
                        .with_style(LineStyle::Dotted)
                        .non_constraining(),
                );
            }
        }
        None => {}
    }
}

/// Invisible edges between the first node of consecutive occupied ranks, so empty generation
/// rows never collapse.
pub(super) fn chain_ranks(g: &mut GraphBuilder, levels: &Levels<'_>) {
    let anchors: Vec<&str> = (1..=5)
        .filter_map(|rank| levels.at(rank).first().map(|m| m.id.as_str()))
        .collect();
    for pair in anchors.windows(2) {
        g.add_edge(Edge::line(pair[0], pair[1]).with_style(LineStyle::Invisible));
    }
}
