//! Derived classifications over the free-text verdict fields.
//!
//! SGK and fitness columns stay free text on the record; the badges the
//! panel shows are substring classifications under Turkish case folding.

use serde::{Deserialize, Serialize};

use crate::turkish;

/// Token meaning "reimbursed" in an SGK status cell.
const COVERED_TOKEN: &str = "ödenir";

/// Tokens that flip a fitness-for-work cell to restricted.
const RESTRICTED_TOKENS: &[&str] = &["engel", "uygun değil"];

/// SGK reimbursement verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReimbursementStatus {
    Covered,
    NotCovered,
}

impl ReimbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Covered => "covered",
            Self::NotCovered => "not_covered",
        }
    }

    pub fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }
}

/// Occupational-health suitability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessStatus {
    Fit,
    Restricted,
}

impl FitnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Restricted => "restricted",
        }
    }

    pub fn is_fit(self) -> bool {
        matches!(self, Self::Fit)
    }
}

/// Classify an SGK status cell. Covered iff the cell mentions `ödenir`.
pub fn classify_reimbursement(status_text: &str) -> ReimbursementStatus {
    if turkish::contains_folded(status_text, COVERED_TOKEN) {
        ReimbursementStatus::Covered
    } else {
        ReimbursementStatus::NotCovered
    }
}

/// Classify a fitness-for-work cell. Any restricted token wins; the
/// absence of all of them reads as fit.
pub fn classify_fitness(fitness_text: &str) -> FitnessStatus {
    let restricted = RESTRICTED_TOKENS
        .iter()
        .any(|token| turkish::contains_folded(fitness_text, token));
    if restricted {
        FitnessStatus::Restricted
    } else {
        FitnessStatus::Fit
    }
}
