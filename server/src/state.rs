//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the edge gate via the
//! `State` extractor. It carries the parsed gateway config and the backend
//! relay, both cheap to clone.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::services::relay::BackendRelay;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub relay: BackendRelay,
}

impl AppState {
    #[must_use]
    pub fn new(config: GatewayConfig, relay: BackendRelay) -> Self {
        Self { config: Arc::new(config), relay }
    }
}
