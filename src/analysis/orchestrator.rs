//! Orchestrates one analysis cycle per drug:
//! sanitize → formulary lookup → (live fetch on miss) → parse → classify.

use super::parser::{is_well_formed, parse_analysis_fields, FIELD_COUNT};
use super::prompt::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::sanitize::sanitize_drug_name;
use super::types::{AnalysisSource, DrugAnalysis, LlmClient, PanelCard};
use super::AnalysisError;
use crate::formulary::Formulary;

/// A cached formulary cell must carry a complete six-field record.
/// Anything shorter is treated as stale and re-fetched live — a live
/// response, by contrast, only has to clear the parser's own minimum.
pub const CACHE_MIN_SEGMENTS: usize = 6;

/// Live fetch attempts (first call + retries). Malformed responses and
/// transport failures share the budget; when it runs out the analysis
/// degrades to unavailable instead of looping on the external service.
const MAX_LLM_ATTEMPTS: usize = 3;

pub struct DrugAnalyzer {
    formulary: Formulary,
    llm: Box<dyn LlmClient + Send + Sync>,
}

impl DrugAnalyzer {
    pub fn new(formulary: Formulary, llm: Box<dyn LlmClient + Send + Sync>) -> Self {
        Self { formulary, llm }
    }

    pub fn formulary(&self) -> &Formulary {
        &self.formulary
    }

    /// Analyze one drug: read-through against the formulary, live fetch on
    /// a miss or an incomplete cell.
    pub fn analyze(&self, drug_name: &str) -> Result<DrugAnalysis, AnalysisError> {
        let name = sanitize_drug_name(drug_name);
        if name.is_empty() {
            return Err(AnalysisError::EmptyDrugName);
        }
        let _span = tracing::info_span!("analyze_drug", drug = %name).entered();

        if let Some(raw) = self.formulary.get_raw(&name) {
            if is_well_formed(raw, CACHE_MIN_SEGMENTS) {
                let fields = parse_analysis_fields(raw)?;
                return Ok(DrugAnalysis::from_fields(
                    &name,
                    fields,
                    AnalysisSource::Formulary,
                ));
            }
            tracing::debug!(drug = %name, "Formulary cell incomplete, fetching live");
        }

        let fields = self.fetch_live(&name)?;
        Ok(DrugAnalysis::from_fields(&name, fields, AnalysisSource::Live))
    }

    /// Analyze a whole selection. Per-drug failures degrade to
    /// unavailable cards; the panel itself always renders.
    pub fn analyze_panel(&self, drug_names: &[String]) -> Vec<PanelCard> {
        drug_names
            .iter()
            .map(|name| match self.analyze(name) {
                Ok(analysis) => PanelCard::Ready { analysis },
                Err(e) => {
                    tracing::warn!(drug = %name, error = %e, "Analysis degraded to unavailable");
                    PanelCard::Unavailable {
                        drug_name: name.clone(),
                    }
                }
            })
            .collect()
    }

    /// Call the LLM and parse, within the bounded attempt budget.
    fn fetch_live(&self, name: &str) -> Result<[String; FIELD_COUNT], AnalysisError> {
        let prompt = build_analysis_prompt(name);

        for attempt in 1..=MAX_LLM_ATTEMPTS {
            match self
                .llm
                .generate(&prompt, ANALYSIS_SYSTEM_PROMPT)
                .and_then(|response| parse_analysis_fields(&response))
            {
                Ok(fields) => return Ok(fields),
                Err(e) => {
                    tracing::warn!(
                        drug = %name,
                        attempt,
                        error = %e,
                        "Live analysis attempt failed"
                    );
                }
            }
        }

        Err(AnalysisError::ServiceUnavailable(name.to_string()))
    }
}
