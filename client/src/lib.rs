//! # vanya-client
//!
//! Leptos frontend for the Vanya Foundation site: session persistence,
//! backend auth calls, the auth context provider, route guards and the pages
//! that depend on them.
//!
//! Built with `hydrate` for the browser and with `ssr` when linked into the
//! server for rendering.

pub mod app;
pub mod auth;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
