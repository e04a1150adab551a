use crate::graph::{LabelLine, Node, NodeKind, Shape, TextTone};
use crate::model::{FamilyMember, GestationalOutcome, Sex};
use crate::palette;

pub(super) fn member_node(member: &FamilyMember, label_max_chars: usize) -> Node {
    let (shape, fill) = match member.sex {
        Sex::Male => (Shape::Box, palette::FILL_MALE),
        Sex::Female => (Shape::Ellipse, palette::FILL_FEMALE),
        Sex::Gestation => (Shape::Triangle, palette::FILL_NEUTRAL),
        Sex::Unknown => (Shape::Diamond, palette::FILL_NEUTRAL),
    };

    let mut node = Node::new(member.id.clone(), NodeKind::Member, shape);
    node.rank = Some(member.generation.rank());
    node.fill_color = if member.is_deceased() {
        palette::FILL_DECEASED
    } else {
        fill
    }
    .to_string();
    if member.is_chronic {
        node.border_color = palette::ALERT.to_string();
        node.border_width = palette::CHRONIC_BORDER_WIDTH;
    }
    if member.is_index {
        node.peripheries = 2;
    }
    node.label = if member.sex == Sex::Gestation {
        gestation_label(member.gestational_outcome)
    } else {
        member_label(member, label_max_chars)
    };
    node
}

fn gestation_label(outcome: GestationalOutcome) -> Vec<LabelLine> {
    let glyph = match outcome {
        GestationalOutcome::Ongoing => return Vec::new(),
        GestationalOutcome::SpontaneousLoss => "X",
        GestationalOutcome::InducedLoss => "●",
    };
    vec![LabelLine::new(glyph, TextTone::Normal)]
}

fn member_label(member: &FamilyMember, label_max_chars: usize) -> Vec<LabelLine> {
    let name: String = member.name.chars().take(label_max_chars).collect();
    let mut lines = vec![LabelLine::new(name, TextTone::Bold)];
    if let Some(age) = member.age {
        lines.push(LabelLine::new(format!("{age} años"), TextTone::Normal));
    }
    lines.push(LabelLine::new(member.relationship.clone(), TextTone::Small));
    if member.is_deceased() {
        lines.push(LabelLine::new("[✝ Fallecido/a]", TextTone::Alert));
    }
    lines
}
