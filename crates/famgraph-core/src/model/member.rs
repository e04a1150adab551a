use super::de;
use crate::generation::{self, GenerationCategory, contains_any, normalize};
use crate::graph::RESERVED_ID_PREFIX;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sex {
    Male,
    Female,
    Gestation,
    Unknown,
}

impl Sex {
    /// Resolves a sex code. Gestation is checked first, then female, then male.
    pub fn from_code(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "G" | "GESTACION" | "GESTACIÓN" | "EMBARAZO" => Sex::Gestation,
            "F" | "FEM" | "FEMENINO" | "MUJER" => Sex::Female,
            "M" | "MAS" | "MASCULINO" | "HOMBRE" | "H" => Sex::Male,
            _ => Sex::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalStatus {
    #[default]
    Alive,
    Deceased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestationalOutcome {
    #[default]
    Ongoing,
    SpontaneousLoss,
    InducedLoss,
}

impl GestationalOutcome {
    pub fn from_status(status: &str) -> Self {
        let s = normalize(status);
        if s.contains("ESPONT") {
            GestationalOutcome::SpontaneousLoss
        } else if contains_any(&s, &["PROVOC", "INDUC"]) {
            GestationalOutcome::InducedLoss
        } else {
            GestationalOutcome::Ongoing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TwinKind {
    Fraternal,
    Identical,
}

impl TwinKind {
    pub fn from_relationship(label: &str) -> Option<Self> {
        let s = normalize(label);
        if !s.contains("GEMEL") {
            return None;
        }
        if contains_any(&s, &["IDÉNTICO", "IDENTICO"]) {
            Some(TwinKind::Identical)
        } else {
            Some(TwinKind::Fraternal)
        }
    }
}

/// A member row as the data-entry layer hands it over.
///
/// Field aliases accept the spreadsheet column headers so exported rows can be fed in as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "Nombre y Apellidos", deserialize_with = "de::flexible_string")]
    pub name: String,
    #[serde(default, alias = "Sexo", deserialize_with = "de::flexible_string")]
    pub sex: String,
    #[serde(default, alias = "Edad", deserialize_with = "de::flexible_opt_u32")]
    pub age: Option<u32>,
    #[serde(default, alias = "F. Nac")]
    pub birth_date: Option<String>,
    #[serde(default, alias = "Parentesco", deserialize_with = "de::flexible_string")]
    pub relationship: String,
    #[serde(default, alias = "Resp", deserialize_with = "de::flexible_bool")]
    pub index_person: bool,
    #[serde(default, alias = "Cronico", deserialize_with = "de::flexible_bool")]
    pub chronic: bool,
    #[serde(default, deserialize_with = "de::flexible_opt_bool")]
    pub deceased: Option<bool>,
    /// Civil status / gestational outcome text (`"Casado/a (C)"`, `"Espontáneo"`, ...).
    #[serde(default, alias = "E. Civil", deserialize_with = "de::flexible_string")]
    pub status: String,
    #[serde(default)]
    pub twin_group: Option<String>,
}

/// Knobs that affect how raw records are resolved.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub today: NaiveDate,
    /// Also treat status text containing `FALLEC` as deceased when `deceased` is unset.
    pub legacy_deceased_text: bool,
}

/// A member with every free-text tag resolved into an explicit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub sex: Sex,
    pub age: Option<u32>,
    pub relationship: String,
    pub generation: GenerationCategory,
    pub is_index: bool,
    pub is_chronic: bool,
    pub vital_status: VitalStatus,
    pub gestational_outcome: GestationalOutcome,
    pub twin: Option<TwinKind>,
    pub twin_group: Option<String>,
    pub adopted: bool,
}

impl FamilyMember {
    pub fn is_deceased(&self) -> bool {
        self.vital_status == VitalStatus::Deceased
    }

    pub fn is_household_head(&self) -> bool {
        generation::is_household_head(&self.relationship)
    }

    pub fn is_partner(&self) -> bool {
        generation::is_partner(&self.relationship)
    }
}

impl MemberRecord {
    pub fn resolve(&self, position: usize, options: &IngestOptions) -> FamilyMember {
        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| {
                let reserved = s.starts_with(RESERVED_ID_PREFIX);
                if reserved {
                    tracing::warn!(id = %s, position, "reserved member id replaced by a positional id");
                }
                !reserved
            })
            .map(str::to_string)
            .unwrap_or_else(|| format!("m{position}"));
        let name = if self.name.trim().is_empty() {
            format!("Miembro {}", position + 1)
        } else {
            self.name.clone()
        };
        let relationship = if self.relationship.trim().is_empty() {
            "Familiar".to_string()
        } else {
            self.relationship.clone()
        };

        let deceased = match self.deceased {
            Some(flag) => flag,
            None => options.legacy_deceased_text && normalize(&self.status).contains("FALLEC"),
        };

        let sex = Sex::from_code(&self.sex);
        let gestational_outcome = if sex == Sex::Gestation {
            GestationalOutcome::from_status(&self.status)
        } else {
            GestationalOutcome::Ongoing
        };

        FamilyMember {
            id,
            name,
            sex,
            age: self
                .age
                .or_else(|| age_from_birth_date(self.birth_date.as_deref()?, options.today)),
            generation: GenerationCategory::classify(&relationship),
            is_index: self.index_person,
            is_chronic: self.chronic,
            vital_status: if deceased {
                VitalStatus::Deceased
            } else {
                VitalStatus::Alive
            },
            gestational_outcome,
            twin: TwinKind::from_relationship(&relationship),
            twin_group: self
                .twin_group
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            adopted: generation::is_adopted(&relationship),
            relationship,
        }
    }
}

/// Full years between `birth` and `today`. Dates that are not ISO `YYYY-MM-DD` fall back to a
/// year-only difference using their first four characters.
pub fn age_from_birth_date(birth: &str, today: NaiveDate) -> Option<u32> {
    let birth = birth.trim();
    if let Ok(date) = NaiveDate::parse_from_str(birth, "%Y-%m-%d") {
        let mut years = today.year() - date.year();
        if (today.month(), today.day()) < (date.month(), date.day()) {
            years -= 1;
        }
        return u32::try_from(years).ok();
    }
    let year: i32 = birth.get(..4)?.parse().ok()?;
    u32::try_from(today.year() - year).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> IngestOptions {
        IngestOptions {
            today: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            legacy_deceased_text: false,
        }
    }

    #[test]
    fn sex_codes() {
        assert_eq!(Sex::from_code("g"), Sex::Gestation);
        assert_eq!(Sex::from_code("Embarazo"), Sex::Gestation);
        assert_eq!(Sex::from_code("F"), Sex::Female);
        assert_eq!(Sex::from_code(" mujer "), Sex::Female);
        assert_eq!(Sex::from_code("H"), Sex::Male);
        assert_eq!(Sex::from_code("Masculino"), Sex::Male);
        assert_eq!(Sex::from_code("?"), Sex::Unknown);
        assert_eq!(Sex::from_code(""), Sex::Unknown);
    }

    #[test]
    fn gestational_outcomes() {
        assert_eq!(
            GestationalOutcome::from_status("Espontáneo"),
            GestationalOutcome::SpontaneousLoss
        );
        assert_eq!(
            GestationalOutcome::from_status("Provocado"),
            GestationalOutcome::InducedLoss
        );
        assert_eq!(
            GestationalOutcome::from_status("inducido"),
            GestationalOutcome::InducedLoss
        );
        assert_eq!(GestationalOutcome::from_status(""), GestationalOutcome::Ongoing);
    }

    #[test]
    fn twin_kinds() {
        assert_eq!(
            TwinKind::from_relationship("Hijo/a (Gemelo Idéntico)"),
            Some(TwinKind::Identical)
        );
        assert_eq!(
            TwinKind::from_relationship("Hijo/a (Gemelo Fraterno)"),
            Some(TwinKind::Fraternal)
        );
        assert_eq!(
            TwinKind::from_relationship("Hija (gemela)"),
            Some(TwinKind::Fraternal)
        );
        assert_eq!(TwinKind::from_relationship("Hijo/a"), None);
    }

    #[test]
    fn ages_from_birth_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(age_from_birth_date("1990-06-01", today), Some(36));
        assert_eq!(age_from_birth_date("1990-06-02", today), Some(35));
        assert_eq!(age_from_birth_date("1990", today), Some(36));
        assert_eq!(age_from_birth_date("abc", today), None);
        assert_eq!(age_from_birth_date("2030-01-01", today), None);
    }

    #[test]
    fn explicit_deceased_flag_wins_over_status_text() {
        let record = MemberRecord {
            name: "Ana".into(),
            status: "Fallecido/a (F)".into(),
            deceased: Some(false),
            ..Default::default()
        };
        let legacy = IngestOptions {
            legacy_deceased_text: true,
            ..options()
        };
        assert_eq!(record.resolve(0, &legacy).vital_status, VitalStatus::Alive);
    }

    #[test]
    fn status_text_only_marks_deceased_in_legacy_mode() {
        let record = MemberRecord {
            name: "Ana".into(),
            status: "Fallecido/a (F)".into(),
            ..Default::default()
        };
        assert_eq!(record.resolve(0, &options()).vital_status, VitalStatus::Alive);

        let legacy = IngestOptions {
            legacy_deceased_text: true,
            ..options()
        };
        assert_eq!(record.resolve(0, &legacy).vital_status, VitalStatus::Deceased);

        // A civil status that merely contains an "F" is not a death record.
        let divorced = MemberRecord {
            status: "Fem. divorciada".into(),
            ..Default::default()
        };
        assert_eq!(divorced.resolve(0, &legacy).vital_status, VitalStatus::Alive);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let m = MemberRecord::default().resolve(4, &options());
        assert_eq!(m.id, "m4");
        assert_eq!(m.name, "Miembro 5");
        assert_eq!(m.relationship, "Familiar");
        assert_eq!(m.generation, GenerationCategory::Central);
        assert_eq!(m.sex, Sex::Unknown);
    }

    #[test]
    fn reserved_ids_fall_back_to_position() {
        let record = MemberRecord {
            id: Some("__union_central".into()),
            ..Default::default()
        };
        assert_eq!(record.resolve(2, &options()).id, "m2");

        let record = MemberRecord {
            id: Some(" union_central ".into()),
            ..Default::default()
        };
        assert_eq!(record.resolve(2, &options()).id, "union_central");
    }

    #[test]
    fn spreadsheet_headers_are_accepted() {
        let record: MemberRecord = serde_json::from_value(serde_json::json!({
            "Nombre y Apellidos": "Juan Pérez",
            "Sexo": "M",
            "Parentesco": "Jefe/a de Hogar",
            "F. Nac": "1980-01-15",
            "Resp": "TRUE",
            "E. Civil": "Casado/a (C)",
        }))
        .unwrap();
        let m = record.resolve(0, &options());
        assert_eq!(m.name, "Juan Pérez");
        assert_eq!(m.sex, Sex::Male);
        assert!(m.is_index);
        assert_eq!(m.age, Some(46));
        assert!(m.is_household_head());
    }
}
