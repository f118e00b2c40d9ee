//! Domain error types.

/// Top-level error type for warelog.
#[derive(Debug, thiserror::Error)]
pub enum WarelogError {
    #[error("no source files found in {dir}")]
    NoSourceFiles { dir: String },

    #[error("data load error: {reason}")]
    DataLoad { reason: String },

    #[error("invalid timestamp {value:?} in {file} line {line}")]
    TimestampParse {
        file: String,
        line: u64,
        value: String,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid filter criteria: {reason}")]
    InvalidCriteria { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&WarelogError> for std::process::ExitCode {
    fn from(err: &WarelogError) -> Self {
        let code: u8 = match err {
            WarelogError::Io(_) => 1,
            WarelogError::ConfigParse { .. }
            | WarelogError::ConfigMissing { .. }
            | WarelogError::ConfigInvalid { .. } => 2,
            WarelogError::NoSourceFiles { .. } | WarelogError::DataLoad { .. } => 3,
            WarelogError::TimestampParse { .. } | WarelogError::InvalidCriteria { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
