use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobStore;
use crate::llm_client::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The AI orchestrator. Read-only after startup; no locking needed.
    pub orchestrator: Arc<Orchestrator>,
    pub jobs: JobStore,
    #[allow(dead_code)]
    pub config: Config,
}
