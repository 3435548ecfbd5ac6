//! `gdoc render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use gdoc_config::{CliSettings, Config};
use gdoc_site::{Handler, HandlerConfig, RenderedPage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Request path relative to the mount point (e.g. `v2/guide.md`).
    path: String,

    /// Write the page to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover gdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documents root directory (overrides config).
    #[arg(short, long, env = "GDOC_DOCS_DIR")]
    docs_dir: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.docs_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let page = render(&config, &self.path)?;
        if !page.is_found() {
            output.warning(&format!(
                "No source for '{}', rendered the placeholder page",
                self.path
            ));
        }

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, page.as_bytes())?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(page.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Render one request path with the loaded configuration.
fn render(config: &Config, path: &str) -> Result<RenderedPage, CliError> {
    let handler = Handler::new(HandlerConfig {
        default_version: config.docs_resolved.default_version.clone(),
        docs_dir: config.docs_resolved.source_dir.clone(),
        prefix_uri: config.docs_resolved.prefix_uri.clone(),
    })?;
    Ok(handler.handle(path)?)
}
