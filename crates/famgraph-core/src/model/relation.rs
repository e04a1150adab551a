use serde::{Deserialize, Serialize};

/// Conjugal union between the household head and their partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum UnionType {
    #[default]
    Married,
    Cohabiting,
    Separated,
    Divorced,
}

impl UnionType {
    /// Accepts the form values (`Casados`, `Convivencia`, `Separados`, `Divorciados`) and the
    /// serialized names. Anything else is a marriage.
    pub fn parse(label: &str) -> Self {
        let t = label.trim().to_lowercase();
        if t.contains("conviv") || t == "cohabiting" {
            UnionType::Cohabiting
        } else if t.contains("separ") {
            UnionType::Separated
        } else if t.contains("divorc") {
            UnionType::Divorced
        } else {
            UnionType::Married
        }
    }
}

impl From<String> for UnionType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    VeryClose,
    Close,
    Conflictive,
    VeryCloseConflictive,
    Rupture,
    Distant,
}

impl RelationKind {
    /// Parses the clinical vocabulary (`Muy estrecha`, `Fusionada`, `Conflictiva`, `Cercana`,
    /// `Quiebre`, `Distante`) or the serialized names.
    pub fn parse(label: &str) -> Option<Self> {
        let t = label.trim().to_lowercase();
        match t.as_str() {
            "veryclose" => return Some(RelationKind::VeryClose),
            "close" => return Some(RelationKind::Close),
            "conflictive" => return Some(RelationKind::Conflictive),
            "verycloseconflictive" => return Some(RelationKind::VeryCloseConflictive),
            "rupture" => return Some(RelationKind::Rupture),
            "distant" => return Some(RelationKind::Distant),
            _ => {}
        }

        let fused = t.contains("estrecha") || t.contains("fusion") || t.contains("fusión");
        let conflict = t.contains("conflict");
        if fused && conflict {
            Some(RelationKind::VeryCloseConflictive)
        } else if fused {
            Some(RelationKind::VeryClose)
        } else if conflict {
            Some(RelationKind::Conflictive)
        } else if t.contains("cercan") {
            Some(RelationKind::Close)
        } else if t.contains("quiebre") {
            Some(RelationKind::Rupture)
        } else if t.contains("distan") {
            Some(RelationKind::Distant)
        } else {
            None
        }
    }
}

/// A relation as supplied by the caller; `type` is free text until resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRecord {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpersonalRelation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

impl RelationRecord {
    pub fn resolve(&self) -> Option<InterpersonalRelation> {
        Some(InterpersonalRelation {
            from: self.from.trim().to_string(),
            to: self.to.trim().to_string(),
            kind: RelationKind::parse(&self.kind)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_types_from_form_values() {
        assert_eq!(UnionType::parse("Casados"), UnionType::Married);
        assert_eq!(UnionType::parse("Convivencia"), UnionType::Cohabiting);
        assert_eq!(UnionType::parse("Separados"), UnionType::Separated);
        assert_eq!(UnionType::parse("Divorciados"), UnionType::Divorced);
        assert_eq!(UnionType::parse(""), UnionType::Married);
        assert_eq!(UnionType::parse("divorced"), UnionType::Divorced);
    }

    #[test]
    fn union_type_deserializes_from_any_string() {
        let t: UnionType = serde_json::from_str("\"Divorciados\"").unwrap();
        assert_eq!(t, UnionType::Divorced);
    }

    #[test]
    fn relation_kinds_from_clinical_labels() {
        assert_eq!(RelationKind::parse("Muy estrecha"), Some(RelationKind::VeryClose));
        assert_eq!(RelationKind::parse("Fusionada"), Some(RelationKind::VeryClose));
        assert_eq!(
            RelationKind::parse("Muy estrecha / conflictiva"),
            Some(RelationKind::VeryCloseConflictive)
        );
        assert_eq!(RelationKind::parse("Conflictiva"), Some(RelationKind::Conflictive));
        assert_eq!(RelationKind::parse("Cercana"), Some(RelationKind::Close));
        assert_eq!(RelationKind::parse("Quiebre"), Some(RelationKind::Rupture));
        assert_eq!(RelationKind::parse("Distante"), Some(RelationKind::Distant));
        assert_eq!(RelationKind::parse("veryCloseConflictive"), Some(RelationKind::VeryCloseConflictive));
        assert_eq!(RelationKind::parse("amistosa"), None);
    }
}
