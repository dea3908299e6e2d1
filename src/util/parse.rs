use std::collections::HashSet;

use crate::error::config::ConfigError;

fn invalid(name: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a u64 value from a configuration string.
///
/// # Arguments
/// - `name` - Name of the variable, used in the error
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed value
/// - `Err(ConfigError::InvalidValue)` - The string is not a valid `u64`
pub fn parse_u64(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|e| invalid(name, value, e))
}

/// Parses a strictly positive u64 value from a configuration string.
pub fn parse_positive_u64(name: &str, value: &str) -> Result<u64, ConfigError> {
    match parse_u64(name, value)? {
        0 => Err(invalid(name, value, "must be greater than zero")),
        parsed => Ok(parsed),
    }
}

/// Parses a list of role id sets.
///
/// Sets are separated by `;`, role ids within a set by `,`. Whitespace around ids
/// is ignored and empty segments (e.g. a trailing `;`) are skipped, so an empty
/// string yields no sets at all.
///
/// # Example
/// `"111,222;111,333,444"` → `[{111, 222}, {111, 333, 444}]`
pub fn parse_role_sets(name: &str, value: &str) -> Result<Vec<HashSet<u64>>, ConfigError> {
    value
        .split(';')
        .map(str::trim)
        .filter(|set| !set.is_empty())
        .map(|set| {
            set.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| id.parse::<u64>().map_err(|e| invalid(name, value, e)))
                .collect::<Result<HashSet<u64>, ConfigError>>()
        })
        .collect()
}
