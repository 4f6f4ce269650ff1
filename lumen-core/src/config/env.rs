//! Environment variable readers for configuration
//!
//! Every reader goes through a lookup function instead of `std::env`
//! directly, so settings can be resolved from an in-memory map in tests.

use super::error::{ConfigError, ConfigResult};
use super::secrets::SecretString;
use std::str::FromStr;
use url::Url;

/// Variable lookup used while resolving settings
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a variable, treating blank values as unset
pub fn read_string(lookup: Lookup<'_>, var: &str) -> Option<String> {
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read a variable with a default for unset or blank values
pub fn read_or(lookup: Lookup<'_>, var: &str, default: &str) -> String {
    read_string(lookup, var).unwrap_or_else(|| default.to_string())
}

/// Read a secret, treating blank values as unset
pub fn read_secret(lookup: Lookup<'_>, var: &str) -> Option<SecretString> {
    read_string(lookup, var).map(SecretString::new)
}

/// Read and parse a variable, falling back to `default` when unset
pub fn read_parsed<T>(lookup: Lookup<'_>, var: &str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match read_string(lookup, var) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::invalid_value(var, format!("'{}': {}", raw, e))),
        None => Ok(default),
    }
}

/// Read a URL, checking that it parses
pub fn read_url(lookup: Lookup<'_>, var: &str, default: &str) -> ConfigResult<String> {
    let raw = read_or(lookup, var, default);
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        var: var.to_string(),
        message: format!("'{}': {}", raw, e),
    })?;
    Ok(raw)
}

/// Split a comma-separated provider list, trimming entries and dropping
/// empty ones. Order is preserved.
pub fn parse_provider_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a provider list. Unset or blank resolves to `None`; any other value
/// is parsed as is, so `",,"` yields an empty list.
pub fn read_provider_list(lookup: Lookup<'_>, var: &str) -> Option<Vec<String>> {
    read_string(lookup, var).map(|raw| parse_provider_list(&raw))
}
