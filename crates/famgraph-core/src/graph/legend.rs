use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub symbol: String,
    pub meaning: String,
}

/// A fixed symbol key rendered next to the diagram. `columns` is the number of entries per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub title: String,
    pub columns: usize,
    pub entries: Vec<LegendEntry>,
}

const GENOGRAM_ENTRIES: &[(&str, &str)] = &[
    ("□", "Hombre"),
    ("○", "Mujer"),
    ("□□", "Persona índice"),
    ("✝", "Fallecido/a"),
    ("┄", "Hijo Adoptivo"),
    ("○ (Rojo)", "Enf. Crónica"),
    ("△", "Gestación"),
    ("△ X", "Aborto espontáneo"),
    ("△ ●", "Aborto provocado"),
    ("—", "Casados"),
    ("···", "Convivencia"),
    ("—/—", "Sep/Divorc"),
    ("≡", "Fusionada"),
    ("⚡", "Conflictiva"),
    ("||", "Quiebre"),
];

const ECOMAP_ENTRIES: &[(&str, &str)] = &[
    ("━━", "Vínculo fuerte"),
    ("──", "Vínculo moderado"),
    ("╌╌", "Vínculo estresante"),
    ("┈┈", "Vínculo débil"),
    ("↔", "Flujo recíproco"),
    ("→ ○", "Flujo hacia la familia"),
    ("○ →", "Flujo desde la familia"),
];

fn build(title: &str, columns: usize, entries: &[(&str, &str)]) -> Legend {
    Legend {
        title: title.to_string(),
        columns,
        entries: entries
            .iter()
            .map(|(symbol, meaning)| LegendEntry {
                symbol: symbol.to_string(),
                meaning: meaning.to_string(),
            })
            .collect(),
    }
}

impl Legend {
    pub fn genogram() -> Self {
        build("Leyenda Clínica (Norma Técnica)", 3, GENOGRAM_ENTRIES)
    }

    pub fn ecomap() -> Self {
        build("Leyenda Ecomapa", 2, ECOMAP_ENTRIES)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[LegendEntry]> {
        self.entries.chunks(self.columns.max(1))
    }
}
