use std::{io, path::PathBuf};

/// Errors for the retrieval chatbot.
///
/// Startup errors (resources that must exist before the session loop starts)
/// are fatal. Everything else is local to a single turn and the session turns
/// it into the fallback reply.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Corpus text could not be read.
    #[error("corpus unavailable at {path}: {source}")]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Lemma dictionary could not be read.
    #[error("lemma dictionary unavailable at {path}: {source}")]
    LemmaDictionaryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Config file could not be read.
    #[error("config unavailable at {path}: {source}")]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Config file is not valid TOML for `ChatConfig`.
    #[error("invalid config at {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Config parsed but a value is unusable.
    #[error("invalid config value: {0}")]
    InvalidConfigValue(&'static str),
    /// Matcher was asked about a row the matrix does not have.
    #[error("row {row} out of range for a matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },
    /// Console read/write failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error must abort the process before the session starts.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Error::CorpusUnavailable { .. }
                | Error::LemmaDictionaryUnavailable { .. }
                | Error::ConfigUnavailable { .. }
                | Error::InvalidConfig { .. }
                | Error::InvalidConfigValue(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
