use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenefitsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HMRC API request failed ({status})")]
    Api { status: u16 },

    #[error("HMRC API returned no usable records.")]
    NoUsableRecords,

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, BenefitsError>;
