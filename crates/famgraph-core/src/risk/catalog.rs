use super::Tier;

/// One entry of the clinical risk-factor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskFactor {
    pub key: &'static str,
    pub tier: Tier,
    pub label: &'static str,
}

const fn factor(key: &'static str, tier: Tier, label: &'static str) -> RiskFactor {
    RiskFactor { key, tier, label }
}

pub const RISK_FACTORS: &[RiskFactor] = &[
    factor("t1_vif", Tier::Critical, "Familia con VIF (física, psicológica, sexual, económica)"),
    factor("t1_drogas", Tier::Critical, "Consumo problema de drogas o dependencia"),
    factor("t1_alcohol", Tier::Critical, "Consumo problema de alcohol (AUDIT > 13)"),
    factor("t1_saludMentalDescomp", Tier::Critical, "Patología salud mental descompensada o sin TTO"),
    factor("t1_abusoSexual", Tier::Critical, "Abuso sexual (sufrido por algún integrante)"),
    factor("t1_riesgoBiopsicoGrave", Tier::Critical, "Adulto mayor y/o niño/a en riesgo biopsicosocial grave"),
    factor("t1_epsaRiesgo", Tier::Critical, "Pauta EPSA (ChCC) con riesgo"),
    factor("t1_vulnerabilidadExtrema", Tier::Critical, "Vulnerabilidad socioeconómica extrema (indigencia)"),
    factor("t1_trabajoInfantil", Tier::Critical, "Trabajo infantil en niños < 14 años"),
    factor("t2_enfermedadGrave", Tier::High, "Enfermedad grave o terminal integrante"),
    factor("t2_altoRiesgoHosp", Tier::High, "Paciente con alto riesgo de hospitalizar"),
    factor("t2_discapacidad", Tier::High, "Discapacidad física y/o mental (Bartel 35 o menos)"),
    factor("t2_saludMentalLeve", Tier::High, "Patología de salud mental leve o moderada"),
    factor("t2_judicial", Tier::High, "Conflictos o problemas con la justicia"),
    factor("t2_rolesParentales", Tier::High, "Incumplimiento de roles parentales"),
    factor("t2_adultosRiesgo", Tier::High, "Adultos en riesgo biopsicosocial a cargo de niños"),
    factor("t3_patologiaCronica", Tier::Medium, "Patología crónica descompensada sintomática"),
    factor("t3_discapacidadLeve", Tier::Medium, "Miembro con discapacidad leve/moderada (40-55pts)"),
    factor("t3_rezago", Tier::Medium, "Rezago desarrollo psicomotor"),
    factor("t3_madreAdolescente", Tier::Medium, "Madre adolescente"),
    factor("t3_sinRedApoyo", Tier::Medium, "Ausencia o escasa red de apoyo social/familiar"),
    factor("t3_cesantia", Tier::Medium, "Cesantía de más de 1 mes del proveedor"),
    factor("t3_vulneNoExtrema", Tier::Medium, "Vulnerabilidad socioeconómica no extrema"),
    factor("t3_precariedadLaboral", Tier::Medium, "Precariedad laboral (temporal/honorarios)"),
    factor("t3_hacinamiento", Tier::Medium, "Hacinamiento (2.5+ personas por dormitorio)"),
    factor("t3_entornoInseguro", Tier::Medium, "Entorno inseguro (delincuencia)"),
    factor("t3_adultoSolo", Tier::Medium, "Adulto mayor que vive solo"),
    factor("t3_desercionEscolar", Tier::Medium, "Deserción o fracaso escolar"),
    factor("t3_analfabetismo", Tier::Medium, "Analfabetismo padre/madre/cuidador"),
    factor("t3_escolaridadIncompleta", Tier::Medium, "Escolaridad básica incompleta padres"),
    factor("t3_dificultadAcceso", Tier::Medium, "Dificultad de acceso a servicios"),
    factor("t4_monoparental", Tier::Low, "Hogar monoparental"),
    factor("t4_riesgoCardio", Tier::Low, "Riesgo cardiovascular (tabaco, obesidad)"),
    factor("t4_contaminacion", Tier::Low, "Foco contaminación ambiental cercano"),
    factor("t4_higiene", Tier::Low, "Deficiencia hábitos higiene"),
    factor("t4_sinRecreacion", Tier::Low, "Ausencia prácticas recreación"),
    factor("t4_sinEspaciosSeguros", Tier::Low, "Ausencia espacios seguros recreación"),
    factor("t4_endeudamiento", Tier::Low, "Endeudamiento familiar elevado (>40%)"),
    factor("t4_serviciosIncompletos", Tier::Low, "Servicios básicos incompletos/inadecuados"),
    factor("t5_lactancia", Tier::Protective, "Lactancia materna exclusiva/complementaria"),
    factor("t5_habitos", Tier::Protective, "Hábitos saludables (actividad física, alim.)"),
    factor("t5_redesSociales", Tier::Protective, "Presencia redes sociales/comunitarias"),
    factor("t5_redFamiliar", Tier::Protective, "Presencia red apoyo familiar"),
    factor("t5_comunicacion", Tier::Protective, "Habilidades comunicacionales (afecto)"),
    factor("t5_recursosSuficientes", Tier::Protective, "Recursos socioeconómicos suficientes"),
    factor("t5_resiliencia", Tier::Protective, "Resiliencia (sobreponerse a crisis)"),
    factor("t5_viviendaAdecuada", Tier::Protective, "Vivienda adecuada"),
];

pub fn lookup(key: &str) -> Option<&'static RiskFactor> {
    RISK_FACTORS.iter().find(|f| f.key == key)
}

pub fn factors_in(tier: Tier) -> impl Iterator<Item = &'static RiskFactor> {
    RISK_FACTORS.iter().filter(move |f| f.tier == tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_sizes_match_the_form() {
        assert_eq!(factors_in(Tier::Critical).count(), 9);
        assert_eq!(factors_in(Tier::High).count(), 7);
        assert_eq!(factors_in(Tier::Medium).count(), 15);
        assert_eq!(factors_in(Tier::Low).count(), 8);
        assert_eq!(factors_in(Tier::Protective).count(), 8);
    }

    #[test]
    fn key_prefix_matches_tier() {
        for f in RISK_FACTORS {
            assert!(f.key.starts_with(f.tier.key_prefix()), "{}", f.key);
        }
    }
}
