//! Application state.

use gdoc_site::Handler;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page handler; holds no per-request state.
    pub(crate) handler: Handler,
}
