//! Error types for hostmatch.

use thiserror::Error;

/// Error type for hostmatch operations.
///
/// Matching itself never fails; these errors only surface while loading
/// rule configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable holding the rule list is not set
    #[error("environment variable not set: {0}")]
    EnvNotSet(String),
}

/// Result type alias for hostmatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for host rule parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostRuleError {
    /// Nothing left to match on once whitespace, port and brackets are gone
    #[error("{0:?} is no host")]
    EmptyHost(String),
}
