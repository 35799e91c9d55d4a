use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovviewError {
    #[error("Malformed report: {0}")]
    MalformedReport(String),

    #[error("Invalid percentage: {0}")]
    Format(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CovviewError>;
