#![forbid(unsafe_code)]

//! Family risk scoring and clinical graph construction (headless).
//!
//! Turns a flat list of family-member records plus a boolean risk-factor set into:
//! - a deterministic risk classification ([`risk`])
//! - a genogram graph description ([`genogram`])
//! - an ecomap graph description ([`ecomap`])
//!
//! Graph descriptions are declarative (nodes, edges, rank groups, style hints, legend). Layout
//! and drawing belong to an external renderer; [`graph::dot`] writes Graphviz DOT for it.

pub mod config;
pub mod ecomap;
pub mod error;
pub mod generation;
pub mod genogram;
pub mod graph;
pub mod model;
pub mod narrative;
pub mod palette;
pub mod risk;

pub use config::{EngineConfig, TwinPairing};
pub use ecomap::{EcomapOptions, EcomapSpec};
pub use error::{Error, Result};
pub use genogram::{GenogramOptions, GenogramSpec};
pub use graph::GraphDescription;
pub use model::{FamilyMember, MemberRecord, RelationRecord, UnionType};
pub use risk::{RiskAssessment, RiskFactorSet, RiskLevel};

use chrono::NaiveDate;
use model::IngestOptions;
use serde::{Deserialize, Serialize};

/// One family evaluation as the data-entry layer supplies it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRequest {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub union_type: UnionType,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
    #[serde(default)]
    pub risks: RiskFactorSet,
    #[serde(default)]
    pub systems: Vec<String>,
    #[serde(default)]
    pub flows: indexmap::IndexMap<String, ecomap::FlowDirection>,
    #[serde(default)]
    pub bonds: indexmap::IndexMap<String, ecomap::BondStrength>,
}

impl FamilyRequest {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::request("family", e))
    }

    pub fn genogram_spec(&self) -> GenogramSpec {
        GenogramSpec {
            family_name: self.family_name.clone(),
            union_type: self.union_type,
            relations: self.relations.clone(),
        }
    }

    pub fn ecomap_spec(&self) -> EcomapSpec {
        EcomapSpec {
            family_name: self.family_name.clone(),
            systems: self.systems.clone(),
            flows: self.flows.clone(),
            bonds: self.bonds.clone(),
        }
    }
}

/// Everything the report and dashboard collaborators consume for one family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyReport {
    pub assessment: RiskAssessment,
    pub genogram: GraphDescription,
    pub ecomap: GraphDescription,
    pub narrative: String,
}

/// Stateless entry point. Holds only configuration; every call builds from scratch.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    genogram: GenogramOptions,
    ecomap: EcomapOptions,
    legacy_deceased_text: bool,
    fixed_today: Option<NaiveDate>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            genogram: GenogramOptions::default(),
            ecomap: EcomapOptions::default(),
            legacy_deceased_text: false,
            fixed_today: None,
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration. Overrides are merged onto the defaults and validated here, so
    /// the build calls themselves cannot fail.
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self> {
        self.genogram = GenogramOptions {
            twin_pairing: config.twin_pairing()?,
            label_max_chars: config.label_max_chars()?,
            legend: config.genogram_legend()?,
        };
        let default_systems = config.default_ecomap_systems()?;
        self.ecomap = EcomapOptions {
            default_systems: if default_systems.is_empty() {
                EcomapOptions::default().default_systems
            } else {
                default_systems
            },
            legend: config.ecomap_legend()?,
        };
        self.legacy_deceased_text = config.legacy_deceased_text()?;
        self.config = config;
        Ok(self)
    }

    /// Overrides the "today" used to compute ages from birth dates.
    ///
    /// This exists primarily to make outputs reproducible in tests and fixtures. By default the
    /// current local date is used.
    pub fn with_fixed_today(mut self, today: Option<NaiveDate>) -> Self {
        self.fixed_today = today;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            today: self
                .fixed_today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            legacy_deceased_text: self.legacy_deceased_text,
        }
    }

    pub fn resolve_members(&self, records: &[MemberRecord]) -> Vec<FamilyMember> {
        model::resolve_members(records, &self.ingest_options())
    }

    pub fn assess_risk(&self, risks: &RiskFactorSet) -> RiskAssessment {
        risks.assess()
    }

    pub fn build_genogram(&self, records: &[MemberRecord], spec: &GenogramSpec) -> GraphDescription {
        let members = self.resolve_members(records);
        genogram::build(&members, spec, &self.genogram)
    }

    pub fn build_ecomap(&self, spec: &EcomapSpec, risks: &RiskFactorSet) -> GraphDescription {
        ecomap::build(spec, risks, &self.ecomap)
    }

    pub fn narrative(&self, request: &FamilyRequest) -> String {
        let members = self.resolve_members(&request.members);
        let assessment = request.risks.assess();
        narrative::render(&members, &request.risks, &assessment, &request.program)
    }

    /// Accepts either a bare flag map (`{"t1_vif": true}`) or a family request with `risks`.
    pub fn assess_risk_json(&self, text: &str) -> Result<RiskAssessment> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::request("risk", e))?;
        let risks: RiskFactorSet = match value.get("risks") {
            Some(risks) => serde_json::from_value(risks.clone()),
            None => serde_json::from_value(value),
        }
        .map_err(|e| Error::request("risk", e))?;
        Ok(self.assess_risk(&risks))
    }

    pub fn build_genogram_json(&self, text: &str) -> Result<GraphDescription> {
        let request = FamilyRequest::from_json(text)?;
        Ok(self.build_genogram(&request.members, &request.genogram_spec()))
    }

    pub fn build_ecomap_json(&self, text: &str) -> Result<GraphDescription> {
        let request = FamilyRequest::from_json(text)?;
        Ok(self.build_ecomap(&request.ecomap_spec(), &request.risks))
    }

    pub fn evaluate(&self, request: &FamilyRequest) -> FamilyReport {
        let members = self.resolve_members(&request.members);
        let assessment = request.risks.assess();
        FamilyReport {
            assessment,
            genogram: genogram::build(&members, &request.genogram_spec(), &self.genogram),
            ecomap: ecomap::build(&request.ecomap_spec(), &request.risks, &self.ecomap),
            narrative: narrative::render(&members, &request.risks, &assessment, &request.program),
        }
    }
}

#[cfg(test)]
mod tests;
