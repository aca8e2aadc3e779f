//! Full-page navigation.
//!
//! Logout leaves the app through a hard navigation so every piece of
//! in-memory state is discarded, not merely flagged.

/// Login entry point used by logout and failing guards.
pub const LOGIN_PATH: &str = "/login";

pub trait Navigator {
    /// Replace the current document with `path`.
    fn hard_navigate(&self, path: &str);
}

/// Navigates through `window.location`. A no-op outside the hydrated client.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn hard_navigate(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                if window.location().set_href(path).is_err() {
                    log::error!("navigation to {path} failed");
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}
