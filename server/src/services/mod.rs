//! Services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own outbound calls and payload shaping so route handlers
//! can stay focused on protocol translation.

pub mod relay;
