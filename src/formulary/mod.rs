//! Read-through formulary cache.
//!
//! The formulary is a tabular collaborator keyed by drug name whose one
//! free-text column holds a pre-formatted analysis line. It is loaded once
//! per process and never written by this code; an absent or incomplete cell
//! makes the orchestrator fall back to a live fetch.

pub mod store;

pub use store::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormularyError {
    #[error("Cannot read formulary file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse formulary file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
