use crate::graph::{Edge, GraphBuilder, LineStyle};
use crate::model::{FamilyMember, RelationKind, RelationRecord};
use crate::palette;
use rustc_hash::FxHashSet;

/// Draws the interpersonal-relation overlay. Relations never constrain ranks.
///
/// Returns the number of relations drawn.
pub(super) fn overlay(
    g: &mut GraphBuilder,
    members: &[&FamilyMember],
    relations: &[RelationRecord],
) -> usize {
    let known: FxHashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
    let mut drawn = 0;
    for record in relations {
        let Some(rel) = record.resolve() else {
            tracing::warn!(
                from = %record.from,
                to = %record.to,
                kind = %record.kind,
                "dropping relation with unrecognized type"
            );
            continue;
        };
        if !known.contains(rel.from.as_str()) || !known.contains(rel.to.as_str()) {
            tracing::warn!(
                from = %rel.from,
                to = %rel.to,
                "dropping relation that references an unknown member"
            );
            continue;
        }
        if g.add_edge(relation_edge(&rel.from, &rel.to, rel.kind)) {
            drawn += 1;
        }
    }
    drawn
}

fn relation_edge(from: &str, to: &str, kind: RelationKind) -> Edge {
    let base = Edge::line(from, to)
        .with_width(2.0)
        .with_color(palette::EDGE_COLOR)
        .non_constraining();
    match kind {
        RelationKind::VeryCloseConflictive => {
            let mut e = base
                .with_width(6.0)
                .with_color(palette::ALERT)
                .with_label(" ⚡⚡⚡ ", palette::LABEL_ON_DARK);
            e.label_size = Some(10.0);
            e
        }
        RelationKind::VeryClose => base.with_width(6.0).with_color(palette::BOND_POSITIVE),
        RelationKind::Conflictive => base
            .with_width(3.0)
            .with_color(palette::ALERT)
            .with_label(" ⚡ ", palette::ALERT),
        RelationKind::Close => base.with_width(4.0).with_color(palette::BOND_POSITIVE),
        RelationKind::Rupture => base.with_label(" || ", palette::ALERT),
        RelationKind::Distant => base.with_style(LineStyle::Dotted),
    }
}
