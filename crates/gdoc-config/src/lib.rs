//! Configuration management for gdoc.
//!
//! Parses `gdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "${GDOC_HOST:-127.0.0.1}"
//! port = 7979
//!
//! [docs]
//! source_dir = "storage/docs"
//! default_version = "default"
//! prefix_uri = "docs"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in `server.host` and
//! `docs.prefix_uri`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override documents root directory.
    pub source_dir: Option<PathBuf>,
    /// Override default version identifier.
    pub default_version: Option<String>,
    /// Override URL mount prefix.
    pub prefix_uri: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "gdoc.toml";

const DEFAULT_SOURCE_DIR: &str = "storage/docs";
const DEFAULT_VERSION: &str = "default";
const DEFAULT_PREFIX_URI: &str = "docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration as written in TOML.
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    default_version: Option<String>,
    prefix_uri: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug)]
pub struct DocsConfig {
    /// Documents root (`versions.yml`, `sidebar.yml`, `_source/`).
    pub source_dir: PathBuf,
    /// Version used when a request names none.
    pub default_version: String,
    /// URL mount prefix, without slashes (e.g. `docs`).
    pub prefix_uri: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            default_version: DEFAULT_VERSION.to_owned(),
            prefix_uri: DEFAULT_PREFIX_URI.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`GDOC_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `gdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(default_version) = &settings.default_version {
            self.docs_resolved.default_version.clone_from(default_version);
        }
        if let Some(prefix_uri) = &settings.prefix_uri {
            self.docs_resolved.prefix_uri = normalize_prefix(prefix_uri);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_docs()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 lets the OS pick a port, which is never what a docs server wants
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs_resolved.default_version, "docs.default_version")?;

        if self.docs_resolved.default_version.contains('/') {
            return Err(ConfigError::Validation(
                "docs.default_version cannot contain '/'".to_owned(),
            ));
        }

        if self
            .docs_resolved
            .prefix_uri
            .split('/')
            .any(|segment| segment == "..")
        {
            return Err(ConfigError::Validation(
                "docs.prefix_uri cannot contain '..' segments".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref prefix_uri) = self.docs.prefix_uri {
            self.docs.prefix_uri = Some(expand::expand_env(prefix_uri, "docs.prefix_uri")?);
        }

        Ok(())
    }

    /// Resolve raw docs values against the config file directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(
                self.docs
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
            default_version: self
                .docs
                .default_version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_owned()),
            prefix_uri: self
                .docs
                .prefix_uri
                .as_deref()
                .map_or_else(|| DEFAULT_PREFIX_URI.to_owned(), normalize_prefix),
        };
    }
}

/// Strip surrounding slashes from a URL prefix.
fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().trim_matches('/').to_owned()
}
