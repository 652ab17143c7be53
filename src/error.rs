use thiserror::Error;

#[derive(Error, Debug)]
pub enum HiggsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data error: {message}")]
    Data { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl HiggsError {
    /// Shorthand for a `Data` error from anything stringifiable.
    pub fn data(message: impl Into<String>) -> Self {
        HiggsError::Data { message: message.into() }
    }

    /// Shorthand for a `Config` error from anything stringifiable.
    pub fn config(message: impl Into<String>) -> Self {
        HiggsError::Config { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, HiggsError>;
