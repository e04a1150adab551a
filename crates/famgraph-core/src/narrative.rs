//! Automated clinical narrative for the family report.
//!
//! Produces Markdown from the resolved members, the risk flags and their assessment. The text is
//! deterministic: the same inputs always produce the same report.

use crate::generation::GenerationCategory;
use crate::model::FamilyMember;
use crate::risk::{RiskAssessment, RiskFactorSet, RiskLevel, Tier};
use std::fmt::Write as _;

pub fn render(
    members: &[FamilyMember],
    risks: &RiskFactorSet,
    assessment: &RiskAssessment,
    program: &str,
) -> String {
    let mut out = String::new();
    let index_name = members
        .iter()
        .find(|m| m.is_index)
        .map(|m| m.name.as_str())
        .unwrap_or("No especificado");

    out.push_str("### Informe de Análisis Familiar Consolidado\n\n");
    let _ = writeln!(
        out,
        "**Identificación**: Familia evaluada bajo el programa **{program}**. \
         La persona índice es **{index_name}**. El núcleo familiar está compuesto por **{}** integrantes.\n",
        members.len()
    );

    out.push_str("#### 1. Clasificación del Riesgo Familiar\n");
    let marker = match assessment.level {
        RiskLevel::High => "🔴",
        RiskLevel::Medium => "🟡",
        RiskLevel::Low => "🟢",
    };
    let _ = writeln!(out, "{marker} **Nivel Detectado**: {}", assessment.level.label());

    let critical = risks.active_in(Tier::Critical);
    if !critical.is_empty() {
        let labels = critical.iter().map(|f| f.label).collect::<Vec<_>>().join(", ");
        let _ = writeln!(
            out,
            "- **Alerta Crítica**: Se detectan riesgos de alta complejidad (T1), incluyendo: {labels}."
        );
    } else if assessment.t2_count > 0 {
        out.push_str(
            "- **Alerta Moderada**: Se observan factores protectores debilitados con presencia de riesgos T2.\n",
        );
    } else {
        out.push_str(
            "- **Estado**: La familia mantiene un equilibrio funcional, aunque requiere monitoreo preventivo.\n",
        );
    }

    out.push_str("\n#### 2. Interpretación del Genograma y Ecomapa\n");
    out.push_str("- **Estructura**: La dinámica generacional sugiere ");
    if members
        .iter()
        .any(|m| m.generation == GenerationCategory::Grandparents)
    {
        out.push_str("una estructura de familia extensa con posible apoyo multigeneracional. ");
    } else {
        out.push_str("una estructura nuclear con foco en la autonomía del grupo primario. ");
    }
    if risks.is_active("t5_redFamiliar") {
        out.push_str("Se identifica una red familiar sólida como factor protector principal. ");
    } else {
        out.push_str(
            "Se observa fragilidad en los nexos internos que podría requerir intervención en comunicación. ",
        );
    }

    out.push_str("\n- **Redes Externas**: El ecomapa revela ");
    if risks.is_active("t3_sinRedApoyo") {
        out.push_str(
            "un aislamiento social significativo. Es imperativo vincular a la familia con la red comunitaria y el CESFAM. ",
        );
    } else {
        out.push_str(
            "una vinculación activa con sistemas externos, lo que facilita el proceso de intervención. ",
        );
    }

    out.push_str("\n\n#### 3. Sugerencias Prospectivas\n");
    match assessment.level {
        RiskLevel::High => {
            out.push_str("1. Enviar caso a **Consejo Consultivo/Reunión de Equipo** para gestión de casos complejos.\n");
            out.push_str("2. Visita domiciliaria integral (VDI) en un plazo no mayor a 15 días.\n");
        }
        RiskLevel::Medium => {
            out.push_str("1. Reforzar pautas de crianza y/o autocuidado según corresponda.\n");
            out.push_str("2. Seguimiento telefónico en 30 días.\n");
        }
        RiskLevel::Low => {
            out.push_str("1. Mantener controles habituales según programa de salud.\n");
        }
    }
    out
}
