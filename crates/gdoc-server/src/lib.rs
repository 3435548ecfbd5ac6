//! HTTP server for gdoc documentation pages.
//!
//! Serves rendered pages below a URL prefix using axum:
//!
//! ```text
//! GET /                  -> redirect to /<prefix>/
//! GET /<prefix>/         -> default version index
//! GET /<prefix>/{*path}  -> Handler::handle(path)
//! ```
//!
//! Existing pages answer 200, requests without a source answer 404 with the
//! placeholder page, and storage or template failures answer 500 with a JSON
//! error body.
//!
//! # Quick Start
//!
//! ```no_run
//! use gdoc_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use gdoc_site::{Handler, HandlerConfig};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documents root.
    pub docs_dir: PathBuf,
    /// Version served when a request names none.
    pub default_version: String,
    /// URL prefix pages are mounted under.
    pub prefix_uri: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let handler = HandlerConfig::default();
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            docs_dir: handler.docs_dir,
            default_version: handler.default_version,
            prefix_uri: handler.prefix_uri,
        }
    }
}

impl ServerConfig {
    /// Page handler configuration for this server.
    #[must_use]
    pub fn handler_config(&self) -> HandlerConfig {
        HandlerConfig {
            default_version: self.default_version.clone(),
            docs_dir: self.docs_dir.clone(),
            prefix_uri: self.prefix_uri.clone(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the page template fails to compile, the address is
/// invalid, or the listener cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let handler = Handler::new(config.handler_config())?;
    let state = Arc::new(AppState { handler });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        docs_dir = %config.docs_dir.display(),
        prefix = %config.prefix_uri,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from gdoc config.
#[must_use]
pub fn server_config_from_config(config: &gdoc_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        docs_dir: config.docs_resolved.source_dir.clone(),
        default_version: config.docs_resolved.default_version.clone(),
        prefix_uri: config.docs_resolved.prefix_uri.clone(),
    }
}
