//! Fixed clinical palette. These are the only colors the builders emit.

pub const BORDER_DARK: &str = "#1A365D";
pub const FILL_MALE: &str = "#EBF4FF";
pub const FILL_FEMALE: &str = "#FFF0F6";
pub const FILL_NEUTRAL: &str = "white";
pub const FILL_DECEASED: &str = "#E2E8F0";
pub const EDGE_COLOR: &str = "#2D3748";
pub const EDGE_UNION: &str = "#1A365D";
pub const UNION_COLOR: &str = "#1A365D";
pub const ALERT: &str = "#C53030";
pub const BOND_POSITIVE: &str = "#2F855A";
pub const LABEL_ON_DARK: &str = "white";

pub const LEGEND_BORDER: &str = "#A0AEC0";
pub const LEGEND_TEXT: &str = "#4A5568";
pub const LEGEND_BG: &str = "#F7FAFC";

pub const FAMILY_CORE_BG: &str = "#E2E8F0";
pub const SYSTEM_BG: &str = "#EDF2F7";
pub const LINK_STRONG: &str = "#1F3864";
pub const LINK_MODERATE: &str = "#718096";
pub const LINK_STRESS: &str = "#C53030";
pub const LINK_WEAK: &str = "#CBD5E0";

pub const BORDER_WIDTH: f64 = 2.0;
pub const CHRONIC_BORDER_WIDTH: f64 = 4.0;
pub const DESCENT_WIDTH: f64 = 1.5;
