use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote provider answered, but not with something we can use.
    #[error("Provider error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Provider {
        status: Option<u16>,
        message: String,
        code: Option<String>,
    },

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn provider(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Provider {
            status,
            message: message.into(),
            code: None,
        }
    }

    /// HTTP status reported by the remote side, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Provider { status, .. } => *status,
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Structured error code reported by the provider, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
