//! Parser for the six-field analysis line the AI service answers with.
//!
//! The wire shape is one line of `LABEL: value | LABEL: value | ...`. Labels
//! are advisory: a segment may carry its label, a misspelled one, or none at
//! all — only position is binding. Structural invalidity (no separator,
//! too few segments) is a typed error; a semantically missing trailing field
//! is padded with a placeholder instead.

use super::AnalysisError;

/// Number of fields in a complete analysis record.
pub const FIELD_COUNT: usize = 6;

/// Minimum segments for a response to be structurally usable.
/// One missing trailing field is tolerated and placeholder-padded;
/// below this the caller must re-fetch.
pub const MIN_SEGMENTS: usize = 5;

/// Placeholder for fields the response did not carry.
pub const FIELD_PLACEHOLDER: &str = "Belirtilmedi";

/// Field separator in the wire format.
pub const FIELD_SEPARATOR: char = '|';

/// Split a raw response into exactly [`FIELD_COUNT`] label-stripped fields.
pub fn parse_analysis_fields(raw: &str) -> Result<[String; FIELD_COUNT], AnalysisError> {
    if !raw.contains(FIELD_SEPARATOR) {
        return Err(AnalysisError::MissingSeparator);
    }

    let segments: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(AnalysisError::TooFewSegments {
            found: segments.len(),
            required: MIN_SEGMENTS,
        });
    }

    // Placeholder-prefill, then overwrite positionally. Segments past
    // FIELD_COUNT are dropped.
    let mut fields = [(); FIELD_COUNT].map(|_| FIELD_PLACEHOLDER.to_string());
    for (slot, segment) in fields.iter_mut().zip(segments.iter()) {
        *slot = strip_label(segment).to_string();
    }
    Ok(fields)
}

/// Structural validity test without extracting fields.
///
/// Cached formulary cells are held to a stricter minimum than live
/// responses (see the orchestrator's `CACHE_MIN_SEGMENTS`).
pub fn is_well_formed(raw: &str, min_segments: usize) -> bool {
    raw.contains(FIELD_SEPARATOR) && raw.split(FIELD_SEPARATOR).count() >= min_segments
}

/// Value of a segment: the substring after the last colon when one is
/// present (`ICD: Kod: X12` → `X12`), the whole segment otherwise.
fn strip_label(segment: &str) -> &str {
    match segment.rfind(':') {
        Some(pos) => segment[pos + ':'.len_utf8()..].trim(),
        None => segment.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_LINE: &str =
        "ICD: X1 | TANI: Flu | SGK: Ödenir | HEKİM: note | ENGEL: Uygun | BRANS: GP";

    #[test]
    fn parses_labeled_line() {
        let fields = parse_analysis_fields(FULL_LINE).unwrap();
        assert_eq!(fields, ["X1", "Flu", "Ödenir", "note", "Uygun", "GP"]);
    }

    #[test]
    fn parses_unlabeled_line() {
        let fields = parse_analysis_fields("X1 | Flu | Ödenir | note | Uygun | GP").unwrap();
        assert_eq!(fields, ["X1", "Flu", "Ödenir", "note", "Uygun", "GP"]);
    }

    #[test]
    fn mixed_labels_are_tolerated() {
        let fields =
            parse_analysis_fields("ICD: X1 | Flu | SKG: Ödenir | note | Uygun | GP").unwrap();
        assert_eq!(fields, ["X1", "Flu", "Ödenir", "note", "Uygun", "GP"]);
    }

    #[test]
    fn takes_substring_after_last_colon() {
        let fields =
            parse_analysis_fields("ICD: Kod: X1 | Flu | Ödenir | note | Uygun | GP").unwrap();
        assert_eq!(fields[0], "X1");
    }

    #[test]
    fn five_segments_pad_the_sixth() {
        let fields =
            parse_analysis_fields("ICD: X1 | TANI: Flu | SGK: Ödenir | HEKİM: note | ENGEL: Uygun")
                .unwrap();
        assert_eq!(fields[4], "Uygun");
        assert_eq!(fields[5], FIELD_PLACEHOLDER);
    }

    #[test]
    fn extra_segments_are_dropped() {
        let fields =
            parse_analysis_fields("X1 | Flu | Ödenir | note | Uygun | GP | extra | junk").unwrap();
        assert_eq!(fields.len(), FIELD_COUNT);
        assert_eq!(fields[5], "GP");
    }

    #[test]
    fn three_segments_are_structurally_invalid() {
        let result = parse_analysis_fields("X1 | Flu | Ödenir");
        assert!(matches!(
            result,
            Err(AnalysisError::TooFewSegments {
                found: 3,
                required: MIN_SEGMENTS,
            })
        ));
    }

    #[test]
    fn missing_separator_is_structurally_invalid() {
        assert!(matches!(
            parse_analysis_fields("no separator here"),
            Err(AnalysisError::MissingSeparator)
        ));
        assert!(matches!(
            parse_analysis_fields(""),
            Err(AnalysisError::MissingSeparator)
        ));
    }

    #[test]
    fn empty_segment_value_is_kept_verbatim() {
        let fields = parse_analysis_fields("ICD: | Flu | Ödenir | note | Uygun | GP").unwrap();
        assert_eq!(fields[0], "");
    }

    #[test]
    fn padding_is_idempotent() {
        let first =
            parse_analysis_fields("ICD: X1 | TANI: Flu | SGK: Ödenir | HEKİM: note | ENGEL: Uygun")
                .unwrap();
        let rendered = first.join(" | ");
        let second = parse_analysis_fields(&rendered).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn well_formed_respects_minimum() {
        assert!(is_well_formed(FULL_LINE, 6));
        assert!(!is_well_formed("a | b | c", 6));
        assert!(!is_well_formed("no pipes", 1));
    }
}
