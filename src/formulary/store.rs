use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::FormularyError;
use crate::turkish;

/// Drug names shorter than this never match free OCR text — two-letter
/// fragments occur in almost every transcript.
const MIN_MATCH_LEN: usize = 3;

/// One formulary row: a drug name and its raw analysis cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormularyEntry {
    pub drug_name: String,
    pub analysis_data: String,
}

/// In-memory formulary, indexed by Turkish-folded drug name.
pub struct Formulary {
    entries: Vec<FormularyEntry>,
    index: HashMap<String, usize>,
}

impl Formulary {
    /// Load the formulary from a JSON file of `FormularyEntry` rows.
    pub fn load(path: &Path) -> Result<Self, FormularyError> {
        let json = std::fs::read_to_string(path).map_err(|e| FormularyError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let entries: Vec<FormularyEntry> =
            serde_json::from_str(&json).map_err(|e| FormularyError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(Self::from_entries(entries))
    }

    /// Build a formulary from already-parsed rows.
    /// Duplicate drug names keep the first row.
    pub fn from_entries(entries: Vec<FormularyEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(turkish::fold(entry.drug_name.trim())).or_insert(i);
        }
        Self { entries, index }
    }

    /// Raw analysis cell for a drug, looked up case-insensitively.
    pub fn get_raw(&self, drug_name: &str) -> Option<&str> {
        self.index
            .get(&turkish::fold(drug_name.trim()))
            .map(|i| self.entries[*i].analysis_data.as_str())
    }

    /// Sorted drug names for the selection UI.
    pub fn drug_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .index
            .values()
            .map(|i| self.entries[*i].drug_name.trim().to_string())
            .collect();
        names.sort();
        names
    }

    /// Every formulary drug whose name occurs in the given free text.
    ///
    /// Used to match a drug-box OCR transcript against the formulary:
    /// the transcript is folded once, then each drug name is checked as a
    /// substring. Returns sorted, deduplicated names.
    pub fn match_text(&self, free_text: &str) -> Vec<String> {
        let folded_text = turkish::fold(free_text);
        let mut matches: Vec<String> = self
            .index
            .iter()
            .filter(|(folded_name, _)| {
                folded_name.chars().count() >= MIN_MATCH_LEN
                    && folded_text.contains(folded_name.as_str())
            })
            .map(|(_, i)| self.entries[*i].drug_name.trim().to_string())
            .collect();
        matches.sort();
        matches.dedup();
        matches
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Small formulary for tests (no file I/O).
    pub fn load_test() -> Self {
        Self::from_entries(vec![
            FormularyEntry {
                drug_name: "Parol".into(),
                analysis_data: "ICD: R50.9 | TANI: Ateş | SGK: Ödenir | HEKİM: Günlük 3 gramı aşmayın | ENGEL: Uygun | BRANS: Tüm hekimler".into(),
            },
            FormularyEntry {
                drug_name: "Coumadin".into(),
                analysis_data: "ICD: I48 | TANI: Atriyal Fibrilasyon | SGK: Ödenir | HEKİM: INR takibi zorunlu | ENGEL: Uygun Değil | BRANS: Kardiyoloji, İç Hastalıkları".into(),
            },
            FormularyEntry {
                drug_name: "Concerta".into(),
                analysis_data: "ICD: F90.0 | TANI: Dikkat Eksikliği Hiperaktivite Bozukluğu | SGK: Ödenmez | HEKİM: Kırmızı reçete | ENGEL: Engel | BRANS: Psikiyatri, Çocuk Psikiyatrisi".into(),
            },
            // Incomplete cell: forces a live re-fetch.
            FormularyEntry {
                drug_name: "Ventolin".into(),
                analysis_data: "ICD: J45 | TANI: Astım | SGK: Ödenir".into(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lookup_is_case_insensitive() {
        let formulary = Formulary::load_test();
        let raw = formulary.get_raw("PAROL").unwrap();
        assert!(raw.contains("R50.9"));
        assert_eq!(formulary.get_raw("parol"), formulary.get_raw("Parol"));
    }

    #[test]
    fn lookup_handles_dotted_capital_i() {
        let formulary = Formulary::from_entries(vec![FormularyEntry {
            drug_name: "İbufen".into(),
            analysis_data: "ICD: M79.6 | x | x | x | x | x".into(),
        }]);
        assert!(formulary.get_raw("ibufen").is_some());
        assert!(formulary.get_raw("İBUFEN").is_some());
    }

    #[test]
    fn unknown_drug_misses() {
        let formulary = Formulary::load_test();
        assert!(formulary.get_raw("Aspirin").is_none());
    }

    #[test]
    fn drug_names_sorted() {
        let formulary = Formulary::load_test();
        let names = formulary.drug_names();
        assert_eq!(names.len(), 4);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn duplicate_names_keep_first_row() {
        let formulary = Formulary::from_entries(vec![
            FormularyEntry {
                drug_name: "Parol".into(),
                analysis_data: "first".into(),
            },
            FormularyEntry {
                drug_name: "PAROL".into(),
                analysis_data: "second".into(),
            },
        ]);
        assert_eq!(formulary.len(), 1);
        assert_eq!(formulary.get_raw("parol"), Some("first"));
    }

    #[test]
    fn match_text_finds_names_in_transcript() {
        let formulary = Formulary::load_test();
        let transcript = "PAROL 500 mg tablet\n20 tablet\nSon kullanma: 2027";
        assert_eq!(formulary.match_text(transcript), vec!["Parol".to_string()]);
    }

    #[test]
    fn match_text_returns_every_hit_sorted() {
        let formulary = Formulary::load_test();
        let transcript = "eczane fişi: ventolin inhaler, coumadin 5mg";
        assert_eq!(
            formulary.match_text(transcript),
            vec!["Coumadin".to_string(), "Ventolin".to_string()]
        );
    }

    #[test]
    fn match_text_empty_for_unrelated_text() {
        let formulary = Formulary::load_test();
        assert!(formulary.match_text("vitamin c efervesan").is_empty());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"drug_name": "Parol", "analysis_data": "ICD: R50.9 | a | b | c | d | e"}}]"#
        )
        .unwrap();

        let formulary = Formulary::load(file.path()).unwrap();
        assert_eq!(formulary.len(), 1);
        assert!(formulary.get_raw("Parol").unwrap().starts_with("ICD:"));
    }

    #[test]
    fn load_missing_file_errors() {
        let result = Formulary::load(Path::new("/nonexistent/formulary.json"));
        assert!(matches!(result, Err(FormularyError::Read { .. })));
    }

    #[test]
    fn load_malformed_json_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = Formulary::load(file.path());
        assert!(matches!(result, Err(FormularyError::Parse { .. })));
    }
}
