//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls behind the `AuthApi`/`AdminApi` traits so the
//! auth layer can be exercised without a browser; `types` defines the wire
//! schema.

pub mod api;
pub mod types;
