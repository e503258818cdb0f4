//! PDF export of an analysis panel via `printpdf`.
//!
//! One A4 page sequence, one section per card. Layout is deliberately
//! plain: builtin Helvetica, no vector graphics, wraps long free-text
//! fields at a fixed column.

use std::io::BufWriter;

use chrono::Utc;
use printpdf::*;

use crate::analysis::{FitnessStatus, PanelCard, ReimbursementStatus};

const WRAP_COLUMNS: usize = 90;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF build error: {0}")]
    Build(String),
}

/// Render a panel of cards to PDF bytes.
pub fn generate_panel_pdf(cards: &[PanelCard]) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "LatiMed İlaç Analiz Paneli",
        Mm(210.0),
        Mm(297.0),
        "Layer 1",
    );
    let mut layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Build(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Build(format!("PDF font error: {e}")))?;

    let mut y = Mm(280.0);

    // Header
    layer.use_text("LatiMed - Ilac Analiz Paneli", 14.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        format!("Olusturulma: {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
        9.0,
        Mm(20.0),
        y,
        &font,
    );
    y -= Mm(10.0);

    for card in cards {
        // New page when a card would run into the bottom margin.
        if y < Mm(40.0) {
            let (page, l) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
            layer = doc.get_page(page).get_layer(l);
            y = Mm(280.0);
        }

        match card {
            PanelCard::Ready { analysis } => {
                layer.use_text(&analysis.drug_name, 12.0, Mm(20.0), y, &bold);
                y -= Mm(6.0);

                let fitness_badge = match analysis.fitness {
                    FitnessStatus::Fit => "UYGUN",
                    FitnessStatus::Restricted => "ENGEL",
                };
                let sgk_badge = match analysis.reimbursement {
                    ReimbursementStatus::Covered => "Odenir",
                    ReimbursementStatus::NotCovered => "Odenmez",
                };
                layer.use_text(
                    format!("ISG: {fitness_badge}   SGK: {sgk_badge}"),
                    10.0,
                    Mm(20.0),
                    y,
                    &bold,
                );
                y -= Mm(6.0);

                let detail_lines = [
                    format!("ICD-10: {} - {}", analysis.icd_code, analysis.diagnosis_name),
                    format!("SGK durumu: {}", analysis.reimbursement_status),
                    format!("Hekim notu: {}", analysis.clinician_note),
                    format!("Branslar: {}", analysis.prescribing_specialties),
                ];
                for line in &detail_lines {
                    for wrapped in wrap_text(line, WRAP_COLUMNS) {
                        layer.use_text(&wrapped, 9.0, Mm(25.0), y, &font);
                        y -= Mm(4.5);
                    }
                }
                y -= Mm(6.0);
            }
            PanelCard::Unavailable { drug_name } => {
                layer.use_text(drug_name, 12.0, Mm(20.0), y, &bold);
                y -= Mm(6.0);
                layer.use_text("Analiz su anda kullanilamiyor.", 9.0, Mm(25.0), y, &font);
                y -= Mm(10.0);
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Build(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Build(format!("PDF buffer error: {e}")))
}

/// Greedy word wrap at a character column.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty()
            && current.chars().count() + 1 + word.chars().count() > max_chars
        {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::parser::parse_analysis_fields;
    use crate::analysis::{AnalysisSource, DrugAnalysis};

    fn ready_card(name: &str) -> PanelCard {
        let fields = parse_analysis_fields(
            "ICD: R50.9 | TANI: Ateş | SGK: Ödenir | HEKİM: not | ENGEL: Uygun | BRANS: Tüm hekimler",
        )
        .unwrap();
        PanelCard::Ready {
            analysis: DrugAnalysis::from_fields(name, fields, AnalysisSource::Formulary),
        }
    }

    #[test]
    fn pdf_bytes_have_pdf_header() {
        let cards = vec![
            ready_card("Parol"),
            PanelCard::Unavailable {
                drug_name: "Aspirin".into(),
            },
        ];
        let bytes = generate_panel_pdf(&cards).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_panel_still_renders() {
        let bytes = generate_panel_pdf(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn many_cards_overflow_to_extra_pages() {
        let one = generate_panel_pdf(&[ready_card("Parol")]).unwrap();
        let cards: Vec<PanelCard> = (0..30).map(|i| ready_card(&format!("Drug{i}"))).collect();
        let many = generate_panel_pdf(&cards).unwrap();

        let page_count = |bytes: &[u8]| String::from_utf8_lossy(bytes).matches("/Page").count();
        assert!(page_count(&many) > page_count(&one));
    }

    #[test]
    fn wrap_respects_column_limit() {
        let wrapped = wrap_text(&"kelime ".repeat(40), 30);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 30));
    }

    #[test]
    fn wrap_short_text_is_single_line() {
        assert_eq!(wrap_text("kısa metin", 80), vec!["kısa metin".to_string()]);
    }

    #[test]
    fn wrap_empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", 80), vec![String::new()]);
    }
}
