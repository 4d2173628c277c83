use thiserror::Error;

/// Failure raised before any HTTP response was obtained.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A response body that could not be reformatted for display.
#[derive(Error, Debug)]
pub enum BeautifyError {
    #[error("body is not structured text: {0}")]
    NotStructured(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown locale `{0}`, expected `zh` or `en`")]
pub struct UnknownLocale(pub String);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unsupported HTTP method `{0}`")]
pub struct UnknownMethod(pub String);
