// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to configuration values.
//!
//! The server reads all of its configuration through the [Environment] trait, so that tests can
//! supply a [MapEnvironment] instead of mutating the process environment.

mod map;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value.to_string())
    }

    /// Parse a positive integer value (such as a port or a pool size), falling back to
    /// `default_value` if the key is not set.
    fn get_usize(&self, key: &str, default_value: usize) -> Result<usize, EnvError> {
        match self.get(key) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| EnvError::InvalidNumber {
                    key: key.to_string(),
                    value,
                }),
            None => Ok(default_value),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid value for {key}: {value}. Expected a non-negative integer")]
    InvalidNumber { key: String, value: String },

    #[error("Env {0} must be provided")]
    Missing(&'static str),
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_values() {
        let env = MapEnvironment::from([("A", "yes"), ("B", "Off"), ("C", "maybe")]);

        assert!(env.enabled("A", false).unwrap());
        assert!(!env.enabled("B", true).unwrap());
        assert!(env.enabled("MISSING", true).unwrap());
        assert!(matches!(
            env.enabled("C", true),
            Err(EnvError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn numeric_values() {
        let env = MapEnvironment::from([("PORT", " 8080 "), ("BAD", "-3")]);

        assert_eq!(env.get_usize("PORT", 1).unwrap(), 8080);
        assert_eq!(env.get_usize("MISSING", 42).unwrap(), 42);
        assert!(matches!(
            env.get_usize("BAD", 1),
            Err(EnvError::InvalidNumber { .. })
        ));
    }
}
