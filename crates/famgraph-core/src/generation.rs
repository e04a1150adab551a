//! Relationship label → kinship generation.
//!
//! Matching is a case-insensitive substring test against a fixed vocabulary; the first generation
//! whose vocabulary matches wins. Labels that match nothing land in the household head's
//! generation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationCategory {
    Grandparents,
    Parents,
    Central,
    Children,
    Grandchildren,
}

const GRANDPARENT_TERMS: &[&str] = &["ABUEL", "BISABUEL"];
const PARENT_TERMS: &[&str] = &["PADRE", "MADRE", "SUEGR", "TÍO", "TÍA", "TIA", "TIO", "TUAT"];
const CENTRAL_TERMS: &[&str] = &[
    "JEFE", "CÓNYUGE", "CONYUGUE", "PAREJA", "CONVIV", "HERMANO", "HERMANA", "HERMAN",
];
const CHILD_TERMS: &[&str] = &["HIJO", "HIJA", "NIÑO", "SOBRIN", "ADOP"];
const GRANDCHILD_TERMS: &[&str] = &["NIETO", "NIETA", "BIZNIETO"];

const HEAD_TERMS: &[&str] = &["JEFE"];
const PARTNER_TERMS: &[&str] = &["CÓNYUGE", "CONYUGUE", "PAREJA", "CONVIV"];
const ADOPTED_TERMS: &[&str] = &["ADOP"];

impl GenerationCategory {
    pub const ALL: [GenerationCategory; 5] = [
        GenerationCategory::Grandparents,
        GenerationCategory::Parents,
        GenerationCategory::Central,
        GenerationCategory::Children,
        GenerationCategory::Grandchildren,
    ];

    pub fn classify(label: &str) -> Self {
        let upper = normalize(label);
        let tiers: [(&[&str], GenerationCategory); 5] = [
            (GRANDPARENT_TERMS, GenerationCategory::Grandparents),
            (PARENT_TERMS, GenerationCategory::Parents),
            (CENTRAL_TERMS, GenerationCategory::Central),
            (CHILD_TERMS, GenerationCategory::Children),
            (GRANDCHILD_TERMS, GenerationCategory::Grandchildren),
        ];
        tiers
            .into_iter()
            .find(|(terms, _)| contains_any(&upper, terms))
            .map(|(_, category)| category)
            .unwrap_or(GenerationCategory::Central)
    }

    /// Rank in `1..=5`, grandparents first.
    pub fn rank(self) -> u8 {
        match self {
            GenerationCategory::Grandparents => 1,
            GenerationCategory::Parents => 2,
            GenerationCategory::Central => 3,
            GenerationCategory::Children => 4,
            GenerationCategory::Grandchildren => 5,
        }
    }
}

pub fn generation_rank(label: &str) -> u8 {
    GenerationCategory::classify(label).rank()
}

pub fn is_household_head(label: &str) -> bool {
    contains_any(&normalize(label), HEAD_TERMS)
}

pub fn is_partner(label: &str) -> bool {
    contains_any(&normalize(label), PARTNER_TERMS)
}

pub fn is_adopted(label: &str) -> bool {
    contains_any(&normalize(label), ADOPTED_TERMS)
}

pub(crate) fn normalize(label: &str) -> String {
    label.trim().to_uppercase()
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_maps_to_ranks() {
        assert_eq!(generation_rank("Abuelo materno"), 1);
        assert_eq!(generation_rank("Bisabuela"), 1);
        assert_eq!(generation_rank("Madre"), 2);
        assert_eq!(generation_rank("Suegra"), 2);
        assert_eq!(generation_rank("Tía"), 2);
        assert_eq!(generation_rank("Tío/a"), 2);
        assert_eq!(generation_rank("Jefe/a de Hogar"), 3);
        assert_eq!(generation_rank("Cónyuge"), 3);
        assert_eq!(generation_rank("Hermana"), 3);
        assert_eq!(generation_rank("Hijo/a (Gemelo Fraterno)"), 4);
        assert_eq!(generation_rank("Sobrino"), 4);
        assert_eq!(generation_rank("Nieta"), 5);
    }

    #[test]
    fn unknown_and_blank_labels_default_to_central() {
        assert_eq!(generation_rank(""), 3);
        assert_eq!(generation_rank("   "), 3);
        assert_eq!(generation_rank("Allegado"), 3);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(generation_rank("abuela"), 1);
        assert_eq!(generation_rank("HIJA"), 4);
    }

    #[test]
    fn earlier_tiers_win_on_overlap() {
        assert_eq!(generation_rank("Padre del nieto"), 2);
        assert_eq!(generation_rank("Compadre"), 2);
    }

    #[test]
    fn role_predicates() {
        assert!(is_household_head("Jefe/a de Hogar"));
        assert!(!is_household_head("Hermano"));
        assert!(is_partner("Pareja"));
        assert!(is_partner("Conviviente"));
        assert!(!is_partner("Hija"));
        assert!(is_adopted("Hijo adoptivo"));
    }
}
