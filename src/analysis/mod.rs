pub mod classify;
pub mod gemini;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod sanitize;
pub mod types;

pub use classify::*;
pub use gemini::*;
pub use orchestrator::*;
pub use parser::*;
pub use prompt::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Gemini endpoint unreachable at {0}")]
    Connection(String),

    #[error("Gemini returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response carries no text candidate: {0}")]
    ResponseShape(String),

    #[error("Response has no field separator")]
    MissingSeparator,

    #[error("Response has {found} segments, expected at least {required}")]
    TooFewSegments { found: usize, required: usize },

    #[error("Drug name is empty after sanitization")]
    EmptyDrugName,

    #[error("Analysis for {0:?} is unavailable, attempts exhausted")]
    ServiceUnavailable(String),
}
