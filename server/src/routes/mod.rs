//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the form relay endpoints and stitches them with Leptos
//! SSR rendering under a single Axum router. Every request passes the edge
//! gate first; the gate itself skips `/api` and asset paths.

pub mod relay;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::gate;
use crate::state::AppState;

/// Form relay API and health check.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(relay::contact))
        .route("/api/volunteer", post(relay::volunteer))
        .route("/api/newsletter", post(relay::newsletter))
        .route("/api/payments/create", post(relay::create_payment))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Wrap `router` in the edge gate plus CORS, compression and trace layers.
pub fn with_edge_gate(router: Router, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn_with_state(state, gate::edge_gate))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// API routes + Leptos SSR + static assets, behind the edge gate.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(vanya_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || vanya_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let site_service = ServeDir::new(&site_root_path).append_index_html_on_directories(true);

    let router = api_routes(state.clone())
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(site_service);
    Ok(with_edge_gate(router, state))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
