/// Errors surfaced by the configuration store.
///
/// Out-of-range values are never an error: they are clamped.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("invalid preset definition: {0}")]
    InvalidPreset(#[from] serde_json::Error),
}
