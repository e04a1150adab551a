mod ecomap;
mod engine;

use crate::*;
use chrono::NaiveDate;

pub(crate) fn engine() -> Engine {
    Engine::new().with_fixed_today(NaiveDate::from_ymd_opt(2026, 6, 1))
}

pub(crate) fn member(id: &str, name: &str, sex: &str, relationship: &str) -> MemberRecord {
    MemberRecord {
        id: Some(id.to_string()),
        name: name.to_string(),
        sex: sex.to_string(),
        relationship: relationship.to_string(),
        ..Default::default()
    }
}
