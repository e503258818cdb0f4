//! Turkish-aware case folding.
//!
//! SGK and fitness verdicts come back from the AI service in mixed case
//! (`Ödenir`, `ÖDENİR`, `Uygun Değil`). Plain `to_lowercase` maps the dotted
//! capital `İ` to `i` plus a combining dot (U+0307), which silently breaks
//! substring checks against plain `i`. Folding here handles the dotted and
//! dotless i pair explicitly before the generic Unicode lowering.

/// Fold text for case-insensitive Turkish comparison.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'İ' => folded.push('i'),
            'I' => folded.push('ı'),
            _ => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

/// Case-insensitive containment check under Turkish folding.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}
