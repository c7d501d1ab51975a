//! Environment variable expansion for configuration strings.

use std::env::{self, VarError};

use crate::ConfigError;

/// Expand environment references in a config value.
///
/// `$VAR` and `${VAR}` must be set; `${VAR:-default}` falls back to the
/// default. `field` names the config key in the error.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains('$') {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, VarError> { env::var(name).map(Some) };
    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}}: {}", e.var_name, e.cause),
        }),
    }
}
