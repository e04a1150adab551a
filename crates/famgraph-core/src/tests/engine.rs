use super::engine;
use crate::graph::{NodeKind, dot::to_dot};
use crate::*;
use serde_json::json;

#[test]
fn assess_risk_json_accepts_bare_maps_and_requests() {
    let e = engine();
    let bare = e.assess_risk_json(r#"{"t1_vif": true}"#).unwrap();
    assert_eq!(bare.level, RiskLevel::High);

    let wrapped = e
        .assess_risk_json(r#"{"familyName": "Soto", "risks": {"t2_judicial": true}}"#)
        .unwrap();
    assert_eq!(wrapped.level, RiskLevel::Medium);
}

#[test]
fn malformed_requests_are_invalid_request_errors() {
    let err = engine().build_genogram_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { what: "family", .. }));
    assert!(err.to_string().starts_with("Invalid family request: "));

    let err = engine().assess_risk_json("[1, 2]").unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { what: "risk", .. }));
}

#[test]
fn unrecognised_flag_values_count_as_false() {
    let e = engine();
    let a = e.assess_risk_json(r#"{"t1_vif": "yes"}"#).unwrap();
    assert_eq!(a.t1_count, 0);
    assert_eq!(a.level, RiskLevel::Low);

    let a = e.assess_risk_json(r#"{"t1_vif": null, "t2_judicial": 1}"#).unwrap();
    assert_eq!((a.t1_count, a.t2_count), (0, 1));

    let a = e
        .assess_risk_json(r#"{"risks": {"t1_vif": "FALSE", "t3_cesantia": "TRUE"}}"#)
        .unwrap();
    assert_eq!((a.t1_count, a.t3_count, a.score), (0, 1, 4));

    let request = FamilyRequest::from_json(r#"{"risks": {"t1_vif": null}}"#).unwrap();
    assert!(!request.risks.is_active("t1_vif"));
    assert_eq!(e.evaluate(&request).assessment.level, RiskLevel::Low);
}

#[test]
fn genogram_json_accepts_spreadsheet_rows() {
    let text = json!({
        "familyName": "Pérez",
        "unionType": "Divorciados",
        "members": [
            { "Nombre y Apellidos": "Juan Pérez", "Sexo": "M", "Parentesco": "Jefe/a de Hogar", "F. Nac": "1980-06-02", "Resp": "SÍ" },
            { "Nombre y Apellidos": "Ana Díaz", "Sexo": "F", "Parentesco": "Cónyuge", "Edad": "44", "Cronico": 1 },
            { "Nombre y Apellidos": "", "Sexo": "G", "Parentesco": "Hijo/a", "E. Civil": "Espontáneo" }
        ]
    })
    .to_string();
    let g = engine().build_genogram_json(&text).unwrap();
    assert_eq!(g.nodes_of_kind(NodeKind::Member).count(), 3);

    let head = g.node("m0").unwrap();
    assert!(head.is_double_bordered());
    assert_eq!(head.label[1].text, "45 años");
    assert_eq!(g.node("m1").unwrap().label[1].text, "44 años");
    assert_eq!(g.node("m2").unwrap().label_text(), "X");
    assert_eq!(
        g.edge("m1", genogram::UNION_NODE_ID)
            .and_then(|e| e.label.as_deref()),
        Some("//")
    );
}

#[test]
fn invalid_twin_pairing_is_rejected_at_configuration() {
    let config = EngineConfig::from_value(json!({ "genogram": { "twinPairing": "random" } }));
    let err = Engine::new().with_config(config).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "genogram.twinPairing"));
}

#[test]
fn wrongly_typed_config_values_are_rejected_at_configuration() {
    for (overrides, key) in [
        (json!({ "genogram": { "legend": "false" } }), "genogram.legend"),
        (json!({ "genogram": { "labelMaxChars": "4" } }), "genogram.labelMaxChars"),
        (json!({ "ingest": { "legacyDeceasedText": "true" } }), "ingest.legacyDeceasedText"),
        (json!({ "ecomap": { "legend": 1 } }), "ecomap.legend"),
        (json!({ "ecomap": { "defaultSystems": "CESFAM" } }), "ecomap.defaultSystems"),
    ] {
        let err = Engine::new()
            .with_config(EngineConfig::from_value(overrides))
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfig { key: ref k, .. } if k == key),
            "{key}: {err}"
        );
    }
}

#[test]
fn config_overrides_flow_into_builders() {
    let config = EngineConfig::from_value(json!({
        "genogram": { "labelMaxChars": 4, "legend": false },
        "ingest": { "legacyDeceasedText": true },
        "ecomap": { "defaultSystems": ["Escuela"] }
    }));
    let e = engine().with_config(config).unwrap();
    assert_eq!(e.config().get_str("genogram.twinPairing"), Some("adjacent"));

    let records = vec![MemberRecord {
        name: "Rodrigo".to_string(),
        relationship: "Padre".to_string(),
        status: "Fallecido/a (F)".to_string(),
        ..Default::default()
    }];
    let g = e.build_genogram(&records, &GenogramSpec::default());
    let node = g.node("m0").unwrap();
    assert_eq!(node.label[0].text, "Rodr");
    assert_eq!(node.fill_color, palette::FILL_DECEASED);
    assert!(g.legend.is_none());

    let eco = e.build_ecomap(&EcomapSpec::default(), &RiskFactorSet::new());
    assert!(eco.node("ESCUELA").is_some());
    assert_eq!(eco.nodes_of_kind(NodeKind::System).count(), 1);
}

#[test]
fn sibling_group_mode_is_selected_by_config() {
    let config = EngineConfig::from_value(json!({ "genogram": { "twinPairing": "siblingGroup" } }));
    let e = engine().with_config(config).unwrap();
    let text = json!({
        "members": [
            { "id": "h", "relationship": "Jefe de hogar" },
            { "id": "a", "relationship": "Hijo (gemelo)", "twinGroup": "g" },
            { "id": "b", "relationship": "Hija" },
            { "id": "c", "relationship": "Hija (gemela)", "twinGroup": "g" }
        ]
    })
    .to_string();
    let g = e.build_genogram_json(&text).unwrap();
    assert!(g.node("__twin_g").is_some());
    assert!(g.edge("h", "__twin_g").is_some());
}

#[test]
fn evaluate_bundles_every_output() {
    let request = FamilyRequest::from_json(
        &json!({
            "familyName": "Soto",
            "program": "Infancia",
            "members": [
                { "id": "h", "name": "Carla Soto", "sex": "F", "relationship": "Jefe/a de Hogar", "indexPerson": true },
                { "id": "c", "name": "Benja", "sex": "M", "relationship": "Hijo/a", "age": 7 }
            ],
            "risks": { "t3_cesantia": true, "t4_monoparental": true },
            "systems": ["Trabajo", "Escuela"]
        })
        .to_string(),
    )
    .unwrap();
    let report = engine().evaluate(&request);
    assert_eq!(report.assessment.score, 7);
    assert_eq!(report.assessment.level, RiskLevel::Low);
    assert!(report.genogram.edge("h", "c").is_some());
    assert_eq!(
        report
            .ecomap
            .edge(ecomap::FAMILY_CORE_ID, "TRABAJO")
            .map(|e| e.style),
        Some(graph::LineStyle::Dotted)
    );
    assert!(report.narrative.contains("**Carla Soto**"));

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["assessment"]["level"], json!("RIESGO BAJO"));
    assert_eq!(value["genogram"]["kind"], json!("genogram"));
    assert_eq!(value["ecomap"]["engine"], json!("twopi"));
}

#[test]
fn genogram_dot_output_is_stable() {
    let text = json!({
        "familyName": "Soto",
        "members": [
            { "id": "h", "name": "Carla", "sex": "F", "relationship": "Jefe/a de Hogar" },
            { "id": "p", "name": "Mario", "sex": "M", "relationship": "Pareja" },
            { "id": "c", "name": "Benja", "sex": "M", "relationship": "Hijo/a" }
        ]
    })
    .to_string();
    let e = engine();
    let a = to_dot(&e.build_genogram_json(&text).unwrap());
    let b = to_dot(&e.build_genogram_json(&text).unwrap());
    assert_eq!(a, b);
    assert!(a.starts_with("digraph \"genogram\" {\n"));
    assert!(a.contains("layout=\"dot\""));
    assert!(a.contains("\"__union_central\" -> \"c\""));
    assert!(a.contains("{ rank=same; \"h\"; \"p\"; }"));
    assert!(a.trim_end().ends_with('}'));
}

#[test]
fn ecomap_dot_uses_radial_layout() {
    let dot = to_dot(
        &engine()
            .build_ecomap_json(r#"{"systems": ["Cesfam"], "flows": {"Cesfam": "none"}}"#)
            .unwrap(),
    );
    assert!(dot.starts_with("digraph \"ecomap\" {\n"));
    assert!(dot.contains("layout=\"twopi\""));
    assert!(dot.contains("dir=\"none\""));
    assert!(dot.contains("arrowhead=\"none\""));
}
