//! Boundary error types.
//!
//! The analytics engines themselves never fail: short histories and
//! malformed fields degrade into absent values or neutral defaults. Errors
//! exist only where data crosses into the process — config files, data
//! files, and the CLI.

/// Top-level error type for stocklens.
#[derive(Debug, thiserror::Error)]
pub enum StocklensError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for symbol {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StocklensError> for std::process::ExitCode {
    fn from(err: &StocklensError) -> Self {
        let code: u8 = match err {
            StocklensError::Io(_) => 1,
            StocklensError::ConfigParse { .. } | StocklensError::ConfigInvalid { .. } => 2,
            StocklensError::DataSource { .. } => 3,
            StocklensError::NoData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
