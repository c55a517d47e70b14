mod config;

pub use config::{ConfigError, PlaygroundConfig};
