use super::{BondStrength, SystemTier};

pub(super) struct CatalogEntry {
    pub name: &'static str,
    pub tier: SystemTier,
    pub bond: BondStrength,
}

const fn entry(name: &'static str, tier: SystemTier, bond: BondStrength) -> CatalogEntry {
    CatalogEntry { name, tier, bond }
}

/// Primary networks sit close to the family; secondary (institutional) ones further out.
pub(super) const SYSTEMS: &[CatalogEntry] = &[
    entry("AMIGOS", SystemTier::Primary, BondStrength::Moderate),
    entry("VECINOS", SystemTier::Primary, BondStrength::Moderate),
    entry("RED FAMILIAR", SystemTier::Primary, BondStrength::Strong),
    entry("CESFAM", SystemTier::Secondary, BondStrength::Moderate),
    entry("RELIGIÓN", SystemTier::Secondary, BondStrength::Moderate),
    entry("TRABAJO", SystemTier::Secondary, BondStrength::Moderate),
    entry("ESCUELA", SystemTier::Secondary, BondStrength::Moderate),
    entry("COMUNIDAD", SystemTier::Secondary, BondStrength::Moderate),
    entry("JUSTICIA", SystemTier::Secondary, BondStrength::Moderate),
];

/// Active risk flags that degrade a system's default bond. Any listed flag triggers the row.
pub(super) const RISK_OVERRIDES: &[(&[&str], &str, BondStrength)] = &[
    (&["t1_vif", "t2_judicial"], "JUSTICIA", BondStrength::Stress),
    (&["t3_cesantia"], "TRABAJO", BondStrength::Weak),
    (&["t3_desercionEscolar"], "ESCUELA", BondStrength::Stress),
];

pub(super) fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    SYSTEMS.iter().find(|e| e.name == name)
}
