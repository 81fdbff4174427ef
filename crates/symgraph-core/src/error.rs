use thiserror::Error;

/// Top-level error type for symgraph.
///
/// Transforms themselves never fail; only the configuration surface does.
#[derive(Error, Debug)]
pub enum SymgraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unknown access level: {value}")]
    InvalidAccessLevel { value: String },
}

pub type Result<T> = std::result::Result<T, SymgraphError>;
