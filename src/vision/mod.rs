//! Drug-box identification — camera photo in, formulary candidates out.
//!
//! The vision model only transcribes the packaging text; matching against
//! known drug names stays on our side (folded substring search over the
//! formulary). No entity extraction is asked of the model.

use std::sync::Arc;

use serde::Serialize;

use crate::analysis::types::VisionClient;
use crate::analysis::AnalysisError;
use crate::formulary::Formulary;

/// Instruction for the vision model when reading a drug-box photo.
const BOX_TRANSCRIBE_PROMPT: &str = "\
Read all visible text on this medicine box photo. \
Return the text only, one line per printed line, no commentary.";

/// Result of one identification pass.
#[derive(Debug, Clone, Serialize)]
pub struct BoxIdentification {
    pub transcript: String,
    pub candidates: Vec<String>,
}

pub struct BoxIdentifier {
    vision: Arc<dyn VisionClient + Send + Sync>,
}

impl BoxIdentifier {
    pub fn new(vision: Arc<dyn VisionClient + Send + Sync>) -> Self {
        Self { vision }
    }

    /// Transcribe a box photo and match the transcript against the formulary.
    pub fn identify(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        formulary: &Formulary,
    ) -> Result<BoxIdentification, AnalysisError> {
        let _span =
            tracing::info_span!("identify_box", image_size = image_bytes.len()).entered();

        let transcript = self
            .vision
            .transcribe_image(image_bytes, mime_type, BOX_TRANSCRIBE_PROMPT)?;
        let candidates = formulary.match_text(&transcript);

        tracing::info!(
            transcript_len = transcript.len(),
            candidates = candidates.len(),
            "Box identification complete"
        );

        Ok(BoxIdentification {
            transcript,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::gemini::MockVisionClient;

    struct DownVisionClient;

    impl VisionClient for DownVisionClient {
        fn transcribe_image(
            &self,
            _image_bytes: &[u8],
            _mime_type: &str,
            _prompt: &str,
        ) -> Result<String, AnalysisError> {
            Err(AnalysisError::Connection("http://localhost:0".into()))
        }
    }

    #[test]
    fn transcript_matches_formulary_names() {
        let identifier = BoxIdentifier::new(Arc::new(MockVisionClient::new(
            "PAROL 500 mg\n20 film tablet\nParasetamol",
        )));
        let formulary = Formulary::load_test();

        let result = identifier.identify(&[0xFF, 0xD8], "image/jpeg", &formulary).unwrap();
        assert_eq!(result.candidates, vec!["Parol".to_string()]);
        assert!(result.transcript.contains("PAROL"));
    }

    #[test]
    fn unknown_box_yields_empty_candidates() {
        let identifier =
            BoxIdentifier::new(Arc::new(MockVisionClient::new("ASPIRIN PLUS C 40 tablet")));
        let formulary = Formulary::load_test();

        let result = identifier.identify(&[0xFF, 0xD8], "image/jpeg", &formulary).unwrap();
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn vision_failure_propagates() {
        let identifier = BoxIdentifier::new(Arc::new(DownVisionClient));
        let formulary = Formulary::load_test();

        assert!(identifier.identify(&[0], "image/png", &formulary).is_err());
    }
}
