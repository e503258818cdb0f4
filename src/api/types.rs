//! Shared state for the API router.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::analysis::DrugAnalyzer;
use crate::api::error::ApiError;
use crate::session::SelectionStore;
use crate::vision::BoxIdentifier;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<DrugAnalyzer>,
    pub identifier: Arc<BoxIdentifier>,
    pub sessions: Arc<Mutex<SelectionStore>>,
}

impl ApiContext {
    pub fn new(analyzer: Arc<DrugAnalyzer>, identifier: Arc<BoxIdentifier>) -> Self {
        Self {
            analyzer,
            identifier,
            sessions: Arc::new(Mutex::new(SelectionStore::new())),
        }
    }

    /// Lock the selection store; a poisoned lock is an internal error,
    /// not a panic.
    pub fn sessions(&self) -> Result<MutexGuard<'_, SelectionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("selection store lock poisoned".into()))
    }
}
