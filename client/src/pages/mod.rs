//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages stay thin: protected ones wrap their content in a guard and read
//! the session through `use_auth()`.

pub mod admin_dashboard;
pub mod home;
pub mod login;
pub mod profile;
