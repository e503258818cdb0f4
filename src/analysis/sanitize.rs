// Sanitize the drug name before interpolating it into an LLM prompt.
// Removes invisible Unicode, collapses whitespace, caps length.

/// Maximum drug-name length sent to the LLM (characters).
const MAX_NAME_LENGTH: usize = 120;

/// Clean a user-supplied drug name for prompt interpolation.
pub fn sanitize_drug_name(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !is_invisible(*c)).collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_NAME_LENGTH).collect()
}

/// Invisible Unicode characters that could manipulate LLM behavior.
/// Standard whitespace survives so word boundaries are preserved for the
/// collapse pass.
fn is_invisible(c: char) -> bool {
    if c == ' ' || c == '\n' || c == '\t' || c == '\r' {
        return false;
    }
    matches!(
        c,
        '\u{200B}'  // Zero-width space
        | '\u{200C}' // Zero-width non-joiner
        | '\u{200D}' // Zero-width joiner
        | '\u{200E}' // Left-to-right mark
        | '\u{200F}' // Right-to-left mark
        | '\u{202A}' // Left-to-right embedding
        | '\u{202B}' // Right-to-left embedding
        | '\u{202C}' // Pop directional formatting
        | '\u{202D}' // Left-to-right override
        | '\u{202E}' // Right-to-left override
        | '\u{2060}' // Word joiner
        | '\u{FEFF}' // BOM / zero-width no-break space
    ) || c.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(sanitize_drug_name("Parol 500 mg"), "Parol 500 mg");
    }

    #[test]
    fn zero_width_chars_are_removed() {
        assert_eq!(sanitize_drug_name("Pa\u{200B}rol\u{FEFF}"), "Parol");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(sanitize_drug_name("  Parol \n  Forte\t"), "Parol Forte");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_drug_name(&long).chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn turkish_letters_survive() {
        assert_eq!(sanitize_drug_name("İbufen Şurup"), "İbufen Şurup");
    }

    #[test]
    fn control_chars_are_removed() {
        assert_eq!(sanitize_drug_name("Par\u{0007}ol"), "Parol");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(sanitize_drug_name("   \n\t "), "");
    }
}
