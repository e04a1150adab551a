//! Input records and their resolved, strongly typed forms.

pub(crate) mod de;
pub mod member;
pub mod relation;

pub use member::{
    FamilyMember, GestationalOutcome, IngestOptions, MemberRecord, Sex, TwinKind, VitalStatus,
    age_from_birth_date,
};
pub use relation::{InterpersonalRelation, RelationKind, RelationRecord, UnionType};

/// Resolves every record once, in input order.
pub fn resolve_members(records: &[MemberRecord], options: &IngestOptions) -> Vec<FamilyMember> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.resolve(i, options))
        .collect()
}
