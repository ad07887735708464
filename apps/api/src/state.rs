use std::sync::Arc;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::quotes::display::DisplayState;
use crate::quotes::orchestrator::QuoteOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<QuoteOrchestrator>,
    /// The single screen's content. Generated content is written only by the orchestrator.
    pub display: Arc<RwLock<DisplayState>>,
    /// Plain HTTP client for proxying image downloads.
    pub http: Client,
}

impl AppState {
    pub fn new(orchestrator: QuoteOrchestrator, http: Client) -> Self {
        Self {
            display: orchestrator.display(),
            orchestrator: Arc::new(orchestrator),
            http,
        }
    }
}
