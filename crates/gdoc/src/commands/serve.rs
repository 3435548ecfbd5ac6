//! `gdoc serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use gdoc_config::{CliSettings, Config};
use gdoc_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover gdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documents root directory (overrides config).
    #[arg(short, long, env = "GDOC_DOCS_DIR")]
    docs_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Version served when a request names none (overrides config).
    #[arg(long)]
    default_version: Option<String>,

    /// URL prefix pages are mounted under (overrides config).
    #[arg(long)]
    prefix: Option<String>,

    /// Enable verbose output (request and lookup logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.docs_dir,
            default_version: self.default_version,
            prefix_uri: self.prefix,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let server_config = server_config_from_config(&config);
        output.field(
            "Listening on",
            format!(
                "http://{}:{}{}",
                server_config.host,
                server_config.port,
                gdoc_site::mount_path(&server_config.prefix_uri)
            ),
        );
        output.field("Documents", server_config.docs_dir.display());
        output.field("Default version", &server_config.default_version);
        if !server_config.docs_dir.is_dir() {
            output.warning("Documents directory does not exist; every page will be a placeholder");
        }

        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
