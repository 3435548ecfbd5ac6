//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// - `${VAR}` expands to the value of VAR and errors if it is unset
/// - `${VAR:-default}` falls back to `default` when VAR is unset
///
/// A string without `${` is returned verbatim, bare `$VAR` included. Once
/// `${` appears, bare `$VAR` references in the same string are expanded too
/// and error when unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Lookup failure for an unset variable.
struct UnsetVar {
    name: String,
}
