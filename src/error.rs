// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions of a run. Anything that should be skipped rather than
/// abort the run (a malformed posting card, a transient page load) never
/// becomes one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("search query produced an invalid results page: {url}")]
    InvalidQuery { url: String },

    #[error("page still unavailable after {attempts} attempts: {url}")]
    Exhausted { url: String, attempts: u32 },

    #[error("fetch of {url} stopped after another page failed")]
    Cancelled { url: String },

    #[error("unrecognized time unit {unit:?} in age text {text:?}")]
    UnknownTimeUnit { text: String, unit: String },

    #[error("malformed age text {0:?}")]
    MalformedAge(String),

    #[error("snapshot line {line} has {found} fields, expected 5")]
    MalformedRow { line: usize, found: usize },

    #[error("browser: {0}")]
    Browser(String),

    #[error("bad selector {0}")]
    Selector(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error. Invalid queries and exhausted
    /// retries get their own codes so wrappers can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidQuery { .. } => 2,
            Error::Exhausted { .. } => 3,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
