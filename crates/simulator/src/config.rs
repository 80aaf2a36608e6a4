//! Simulator settings read from the environment.
//!
//! | Variable           | Meaning                                  | Default |
//! |--------------------|------------------------------------------|---------|
//! | `DWIN_TICK_MS`     | loop period and controller tick interval | 50      |
//! | `DWIN_DEBOUNCE_MS` | encoder debounce window                  | 20      |
//! | `DWIN_SCRIPT`      | input script, see [`crate::script`]      | demo    |

use platform::config::ENCODER_DEBOUNCE_MS;

/// Script used when `DWIN_SCRIPT` is unset: open the gradient screen,
/// back out to Main and print ten layers.
pub const DEMO_SCRIPT: &str = ">. >>>. >>. . <<. <<<. ^^^^^^^^^^";

const DEFAULT_TICK_MS: u64 = 50;

/// Errors from reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable did not parse
    #[error("{var}={value:?} is not a positive integer")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Resolved simulator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Loop period in ms
    pub tick_ms: u64,
    /// Encoder debounce window in ms
    pub debounce_ms: u32,
    /// Input script
    pub script: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            debounce_ms: ENCODER_DEBOUNCE_MS,
            script: DEMO_SCRIPT.to_owned(),
        }
    }
}

impl SimConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read through `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("DWIN_TICK_MS") {
            config.tick_ms = parse_positive("DWIN_TICK_MS", &value)?;
        }
        if let Some(value) = lookup("DWIN_DEBOUNCE_MS") {
            config.debounce_ms = parse_positive("DWIN_DEBOUNCE_MS", &value)?;
        }
        if let Some(script) = lookup("DWIN_SCRIPT") {
            config.script = script;
        }
        Ok(config)
    }
}

fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = SimConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.debounce_ms, 20);
    }

    #[test]
    fn test_overrides() {
        let config = SimConfig::from_lookup(|var| match var {
            "DWIN_TICK_MS" => Some("5".into()),
            "DWIN_SCRIPT" => Some(">.".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.tick_ms, 5);
        assert_eq!(config.script, ">.");
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        for bad in ["0", "-3", "fast"] {
            let err = SimConfig::from_lookup(|var| (var == "DWIN_DEBOUNCE_MS").then(|| bad.to_owned()));
            assert!(err.is_err(), "{bad} accepted");
        }
    }
}
