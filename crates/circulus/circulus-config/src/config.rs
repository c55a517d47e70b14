use serde::Deserialize;
use std::path::Path;

/// Settings for the playground driver.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundConfig {
    /// Requested ring capacity; rounded up to a power of two by the ring.
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    /// How many sequential values to append before the scenario runs.
    #[serde(default = "defaults::fill")]
    pub fill: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

mod defaults {
    pub fn capacity() -> usize {
        4
    }

    pub fn log_level() -> String {
        "info".into()
    }

    pub fn fill() -> usize {
        4
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::capacity(),
            log_level: defaults::log_level(),
            fill: defaults::fill(),
        }
    }
}

impl PlaygroundConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&toml_to_str)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let playground_config: PlaygroundConfig = toml::from_str(raw)?;
        Ok(playground_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let parsed = PlaygroundConfig::from_toml("").expect("empty config parses");
        assert_eq!(parsed, PlaygroundConfig::default());
        assert_eq!(parsed.capacity, 4);
        assert_eq!(parsed.log_level, "info");
        assert_eq!(parsed.fill, 4);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let raw = r#"
            capacity = 100
            log_level = "debug"
            fill = 130
        "#;
        let parsed = PlaygroundConfig::from_toml(raw).expect("config parses");
        assert_eq!(parsed.capacity, 100);
        assert_eq!(parsed.log_level, "debug");
        assert_eq!(parsed.fill, 130);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = PlaygroundConfig::from_toml(r#"capacity = "four""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = PlaygroundConfig::load("/nonexistent/circulus/playground.toml").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, "/nonexistent/circulus/playground.toml")
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
