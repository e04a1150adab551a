use super::engine;
use crate::ecomap::{
    BondStrength, EcomapOptions, EcomapSpec, FAMILY_CORE_ID, FlowDirection, SystemTier,
    resolve_systems,
};
use crate::graph::{Arrowhead, Direction, LayoutEngine, LineStyle, NodeKind};
use crate::palette;
use crate::risk::RiskFactorSet;
use serde_json::json;

fn spec(systems: &[&str]) -> EcomapSpec {
    EcomapSpec {
        family_name: "Pérez".to_string(),
        systems: systems.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn default_system_set_is_used_when_none_selected() {
    let g = engine().build_ecomap(&spec(&[]), &RiskFactorSet::new());
    let systems: Vec<&str> = g
        .nodes_of_kind(NodeKind::System)
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(systems, vec!["CESFAM", "TRABAJO", "RED FAMILIAR", "COMUNIDAD"]);
    assert_eq!(g.engine, LayoutEngine::Twopi);
    assert_eq!(g.attributes.get("root").map(String::as_str), Some(FAMILY_CORE_ID));
}

#[test]
fn core_node_sits_at_the_center() {
    let g = engine().build_ecomap(&spec(&["Amigos"]), &RiskFactorSet::new());
    let core = g.node(FAMILY_CORE_ID).unwrap();
    assert_eq!(core.kind, NodeKind::FamilyCore);
    assert_eq!(core.label_text(), "FAMILIA\nPérez");
    assert!(core.bold);
    assert_eq!(g.title.as_deref(), Some("Ecomapa — Pérez"));
    assert!(g.edges.iter().all(|e| e.from == FAMILY_CORE_ID));
}

#[test]
fn tiers_set_radial_distance() {
    let g = engine().build_ecomap(&spec(&["vecinos", "Justicia"]), &RiskFactorSet::new());
    let vecinos = g.node("VECINOS").unwrap();
    assert_eq!(vecinos.radial_distance, Some(1.2));
    assert_eq!(vecinos.tooltip.as_deref(), Some("Red PRIMARIA"));
    let justicia = g.node("JUSTICIA").unwrap();
    assert_eq!(justicia.radial_distance, Some(2.2));
    assert_eq!(justicia.tooltip.as_deref(), Some("Red SECUNDARIA"));
}

#[test]
fn unknown_systems_are_secondary_and_moderate() {
    let systems = resolve_systems(
        &spec(&["Club Deportivo"]),
        &RiskFactorSet::new(),
        &EcomapOptions::default(),
    );
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].name, "CLUB DEPORTIVO");
    assert_eq!(systems[0].tier, SystemTier::Secondary);
    assert_eq!(systems[0].bond, BondStrength::Moderate);
}

#[test]
fn selection_is_deduplicated_case_insensitively() {
    let systems = resolve_systems(
        &spec(&["Cesfam", "CESFAM ", "", "Escuela"]),
        &RiskFactorSet::new(),
        &EcomapOptions::default(),
    );
    let names: Vec<&str> = systems.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["CESFAM", "ESCUELA"]);
}

#[test]
fn bond_strength_styles() {
    let mut s = spec(&["Red Familiar", "Cesfam", "Escuela", "Trabajo"]);
    s.bonds.insert("ESCUELA".to_string(), BondStrength::Stress);
    s.bonds.insert("trabajo".to_string(), BondStrength::Weak);
    let g = engine().build_ecomap(&s, &RiskFactorSet::new());

    let strong = g.edge(FAMILY_CORE_ID, "RED FAMILIAR").unwrap();
    assert_eq!((strong.width, strong.style), (6.0, LineStyle::Solid));
    assert_eq!(strong.color, palette::LINK_STRONG);

    let moderate = g.edge(FAMILY_CORE_ID, "CESFAM").unwrap();
    assert_eq!((moderate.width, moderate.style), (2.0, LineStyle::Solid));

    let stress = g.edge(FAMILY_CORE_ID, "ESCUELA").unwrap();
    assert_eq!((stress.width, stress.style), (3.0, LineStyle::Dashed));
    assert_eq!(stress.color, palette::LINK_STRESS);

    let weak = g.edge(FAMILY_CORE_ID, "TRABAJO").unwrap();
    assert_eq!((weak.width, weak.style), (1.0, LineStyle::Dotted));
}

#[test]
fn flow_directions_map_to_arrowheads() {
    let mut s = spec(&["Cesfam", "Trabajo", "Escuela", "Vecinos"]);
    s.flows.insert("CESFAM".to_string(), FlowDirection::TowardFamily);
    s.flows.insert("TRABAJO".to_string(), FlowDirection::FromFamily);
    s.flows.insert("Vecinos".to_string(), FlowDirection::None);
    let g = engine().build_ecomap(&s, &RiskFactorSet::new());

    let toward = g.edge(FAMILY_CORE_ID, "CESFAM").unwrap();
    assert_eq!((toward.direction, toward.arrowhead), (Direction::Back, Arrowhead::Normal));
    let from = g.edge(FAMILY_CORE_ID, "TRABAJO").unwrap();
    assert_eq!((from.direction, from.arrowhead), (Direction::Forward, Arrowhead::Normal));
    let both = g.edge(FAMILY_CORE_ID, "ESCUELA").unwrap();
    assert_eq!((both.direction, both.arrowhead), (Direction::Both, Arrowhead::Normal));
    let none = g.edge(FAMILY_CORE_ID, "VECINOS").unwrap();
    assert_eq!((none.direction, none.arrowhead), (Direction::None, Arrowhead::None));
    assert_eq!(none.arrow_size, Some(0.8));
}

#[test]
fn active_risks_degrade_default_bonds() {
    let risks = RiskFactorSet::new()
        .with("t2_judicial", true)
        .with("t3_cesantia", true)
        .with("t3_desercionEscolar", true);
    let systems = resolve_systems(
        &spec(&["Justicia", "Trabajo", "Escuela", "Cesfam"]),
        &risks,
        &EcomapOptions::default(),
    );
    let bonds: Vec<(&str, BondStrength)> =
        systems.iter().map(|s| (s.name.as_str(), s.bond)).collect();
    assert_eq!(
        bonds,
        vec![
            ("JUSTICIA", BondStrength::Stress),
            ("TRABAJO", BondStrength::Weak),
            ("ESCUELA", BondStrength::Stress),
            ("CESFAM", BondStrength::Moderate),
        ]
    );
}

#[test]
fn explicit_bond_wins_over_risk_override() {
    let risks = RiskFactorSet::new().with("t1_vif", true);
    let mut s = spec(&["Justicia"]);
    s.bonds.insert("Justicia".to_string(), BondStrength::Strong);
    let systems = resolve_systems(&s, &risks, &EcomapOptions::default());
    assert_eq!(systems[0].bond, BondStrength::Strong);
}

#[test]
fn spec_deserializes_form_vocabulary() {
    let s: EcomapSpec = serde_json::from_value(json!({
        "familyName": "Soto",
        "systems": ["Cesfam", "Religión"],
        "flows": { "Cesfam": "in", "Religión": "none" },
        "bonds": { "Religión": "fuerte" }
    }))
    .unwrap();
    assert_eq!(s.flows["Cesfam"], FlowDirection::TowardFamily);
    assert_eq!(s.bonds["Religión"], BondStrength::Strong);

    let systems = resolve_systems(&s, &RiskFactorSet::new(), &EcomapOptions::default());
    assert_eq!(systems[1].name, "RELIGIÓN");
    assert_eq!(systems[1].tier, SystemTier::Secondary);
    assert_eq!(systems[1].flow, FlowDirection::None);
}

#[test]
fn unknown_bond_label_is_rejected() {
    let err = serde_json::from_value::<EcomapSpec>(json!({ "bonds": { "CESFAM": "regular" } }))
        .unwrap_err();
    assert!(err.to_string().contains("unknown bond strength"));
}

#[test]
fn legend_is_optional() {
    let options = EcomapOptions {
        legend: false,
        ..Default::default()
    };
    let g = crate::ecomap::build(&spec(&[]), &RiskFactorSet::new(), &options);
    assert!(g.legend.is_none());
    let g = engine().build_ecomap(&spec(&[]), &RiskFactorSet::new());
    assert_eq!(g.legend.unwrap().columns, 2);
}
