//! Family risk scoring.
//!
//! T1/T2 flags never add points; they only force the level up. T3 flags are worth 4 points and
//! T4 flags 3 points. T5 flags are protective and never affect the level.

pub mod catalog;

use crate::model::de;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use catalog::{RISK_FACTORS, RiskFactor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "T1")]
    Critical,
    #[serde(rename = "T2")]
    High,
    #[serde(rename = "T3")]
    Medium,
    #[serde(rename = "T4")]
    Low,
    #[serde(rename = "T5")]
    Protective,
}

impl Tier {
    pub fn points(self) -> u32 {
        match self {
            Tier::Medium => 4,
            Tier::Low => 3,
            Tier::Critical | Tier::High | Tier::Protective => 0,
        }
    }

    pub fn key_prefix(self) -> &'static str {
        match self {
            Tier::Critical => "t1_",
            Tier::High => "t2_",
            Tier::Medium => "t3_",
            Tier::Low => "t4_",
            Tier::Protective => "t5_",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Tier::Critical => "T1",
            Tier::High => "T2",
            Tier::Medium => "T3",
            Tier::Low => "T4",
            Tier::Protective => "T5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "RIESGO BAJO")]
    Low,
    #[serde(rename = "RIESGO MEDIO")]
    Medium,
    #[serde(rename = "RIESGO ALTO")]
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "RIESGO BAJO",
            RiskLevel::Medium => "RIESGO MEDIO",
            RiskLevel::High => "RIESGO ALTO",
        }
    }

    /// Badge colors used by the report/dashboard collaborators: `(accent, background, text)`.
    pub fn badge_colors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            RiskLevel::Low => ("#10b981", "#d1fae5", "#064e3b"),
            RiskLevel::Medium => ("#f59e0b", "#fef3c7", "#78350f"),
            RiskLevel::High => ("#ef4444", "#fee2e2", "#7f1d1d"),
        }
    }
}

/// Applies the protocol decision table. First match wins:
///
/// - High: any T1, two or more T2, or score ≥ 26
/// - Medium: exactly one T2, or score in `17..=25`
/// - Low: otherwise
pub fn classify(t1_count: usize, t2_count: usize, score: u32) -> RiskLevel {
    if t1_count >= 1 || t2_count >= 2 || score >= 26 {
        RiskLevel::High
    } else if t2_count == 1 || (17..=25).contains(&score) {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Boolean risk flags keyed by the form vocabulary (`t1_vif`, `t3_cesantia`, ...).
///
/// Keys outside the catalog are carried along but never counted. Values are decoded like
/// spreadsheet checkbox cells; anything that is not recognisably true (`null`, `"no"`, objects)
/// is stored as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RiskFactorSet(IndexMap<String, bool>);

impl<'de> Deserialize<'de> for RiskFactorSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw
            .into_iter()
            .map(|(key, value)| {
                let active = de::value_as_bool(&value).unwrap_or(false);
                (key, active)
            })
            .collect())
    }
}

impl RiskFactorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, active: bool) -> Self {
        self.set(key, active);
        self
    }

    pub fn set(&mut self, key: &str, active: bool) {
        self.0.insert(key.to_string(), active);
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn count(&self, tier: Tier) -> usize {
        catalog::factors_in(tier)
            .filter(|f| self.is_active(f.key))
            .count()
    }

    pub fn score(&self) -> u32 {
        self.count(Tier::Medium) as u32 * Tier::Medium.points()
            + self.count(Tier::Low) as u32 * Tier::Low.points()
    }

    pub fn assess(&self) -> RiskAssessment {
        for key in self.0.keys() {
            if catalog::lookup(key).is_none() {
                tracing::debug!(key = %key, "ignoring risk flag outside the catalog");
            }
        }

        let t1_count = self.count(Tier::Critical);
        let t2_count = self.count(Tier::High);
        let t3_count = self.count(Tier::Medium);
        let t4_count = self.count(Tier::Low);
        let score_medium = t3_count as u32 * Tier::Medium.points();
        let score_low = t4_count as u32 * Tier::Low.points();
        let score = score_medium + score_low;
        RiskAssessment {
            t1_count,
            t2_count,
            t3_count,
            t4_count,
            score_medium,
            score_low,
            score,
            level: classify(t1_count, t2_count, score),
        }
    }

    /// Active non-protective flags in catalog order, for report listings.
    pub fn active_flags(&self) -> Vec<ActiveFlag> {
        RISK_FACTORS
            .iter()
            .filter(|f| f.tier != Tier::Protective && self.is_active(f.key))
            .map(|f| ActiveFlag {
                tier: f.tier,
                key: f.key,
                label: f.label,
            })
            .collect()
    }

    pub fn active_in(&self, tier: Tier) -> Vec<&'static RiskFactor> {
        catalog::factors_in(tier)
            .filter(|f| self.is_active(f.key))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for RiskFactorSet {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub t1_count: usize,
    pub t2_count: usize,
    pub t3_count: usize,
    pub t4_count: usize,
    pub score_medium: u32,
    pub score_low: u32,
    pub score: u32,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveFlag {
    pub tier: Tier,
    pub key: &'static str,
    pub label: &'static str,
}
