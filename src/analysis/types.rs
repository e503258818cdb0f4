use serde::{Deserialize, Serialize};

use super::classify::{
    classify_fitness, classify_reimbursement, FitnessStatus, ReimbursementStatus,
};
use super::parser::FIELD_COUNT;
use super::AnalysisError;

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Formulary,
    Live,
}

/// One drug's regulatory analysis.
///
/// The six text fields are always present — missing segments were
/// placeholder-filled by the parser. Constructed fresh per query and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugAnalysis {
    pub drug_name: String,
    pub icd_code: String,
    pub diagnosis_name: String,
    pub reimbursement_status: String,
    pub clinician_note: String,
    pub fitness_for_work: String,
    pub prescribing_specialties: String,
    pub reimbursement: ReimbursementStatus,
    pub fitness: FitnessStatus,
    pub source: AnalysisSource,
}

impl DrugAnalysis {
    /// Bind parsed fields positionally and derive the badge classifications.
    pub fn from_fields(
        drug_name: &str,
        fields: [String; FIELD_COUNT],
        source: AnalysisSource,
    ) -> Self {
        let [icd_code, diagnosis_name, reimbursement_status, clinician_note, fitness_for_work, prescribing_specialties] =
            fields;
        let reimbursement = classify_reimbursement(&reimbursement_status);
        let fitness = classify_fitness(&fitness_for_work);
        Self {
            drug_name: drug_name.to_string(),
            icd_code,
            diagnosis_name,
            reimbursement_status,
            clinician_note,
            fitness_for_work,
            prescribing_specialties,
            reimbursement,
            fitness,
            source,
        }
    }

    /// Render back to the canonical labeled wire line.
    pub fn to_pipe_line(&self) -> String {
        format!(
            "ICD: {} | TANI: {} | SGK: {} | HEKİM: {} | ENGEL: {} | BRANS: {}",
            self.icd_code,
            self.diagnosis_name,
            self.reimbursement_status,
            self.clinician_note,
            self.fitness_for_work,
            self.prescribing_specialties,
        )
    }
}

/// One dashboard card: a completed analysis, or the degraded state an
/// external-service failure collapses to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelCard {
    Ready { analysis: DrugAnalysis },
    Unavailable { drug_name: String },
}

/// Text-generation seam to the AI collaborator (allows mocking).
pub trait LlmClient {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, AnalysisError>;
}

/// Image-to-text seam to the AI collaborator (allows mocking).
pub trait VisionClient {
    fn transcribe_image(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parser::parse_analysis_fields;

    fn fields() -> [String; FIELD_COUNT] {
        [
            "X1".into(),
            "Flu".into(),
            "Ödenir".into(),
            "note".into(),
            "Uygun".into(),
            "GP".into(),
        ]
    }

    #[test]
    fn from_fields_binds_positionally() {
        let analysis = DrugAnalysis::from_fields("Parol", fields(), AnalysisSource::Formulary);
        assert_eq!(analysis.drug_name, "Parol");
        assert_eq!(analysis.icd_code, "X1");
        assert_eq!(analysis.diagnosis_name, "Flu");
        assert_eq!(analysis.reimbursement_status, "Ödenir");
        assert_eq!(analysis.clinician_note, "note");
        assert_eq!(analysis.fitness_for_work, "Uygun");
        assert_eq!(analysis.prescribing_specialties, "GP");
        assert!(analysis.reimbursement.is_covered());
        assert!(analysis.fitness.is_fit());
    }

    #[test]
    fn derived_badges_follow_verdict_fields() {
        let mut f = fields();
        f[2] = "Ödenmez".into();
        f[4] = "Uygun Değil".into();
        let analysis = DrugAnalysis::from_fields("Concerta", f, AnalysisSource::Live);
        assert!(!analysis.reimbursement.is_covered());
        assert!(!analysis.fitness.is_fit());
    }

    #[test]
    fn pipe_line_round_trips_through_parser() {
        let analysis = DrugAnalysis::from_fields("Parol", fields(), AnalysisSource::Live);
        let reparsed = parse_analysis_fields(&analysis.to_pipe_line()).unwrap();
        assert_eq!(reparsed, fields());
    }

    #[test]
    fn panel_card_serializes_with_status_tag() {
        let card = PanelCard::Unavailable {
            drug_name: "Parol".into(),
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["drug_name"], "Parol");

        let ready = PanelCard::Ready {
            analysis: DrugAnalysis::from_fields("Parol", fields(), AnalysisSource::Formulary),
        };
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["analysis"]["reimbursement"], "covered");
        assert_eq!(json["analysis"]["source"], "formulary");
    }
}
