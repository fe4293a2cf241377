use std::path::PathBuf;
use thiserror::Error;

/// Everything a snippet command can fail with.
#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("no snippet store at {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("snippet store {} is not valid JSON: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode snippet store: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("clipboard is empty")]
    CaptureEmpty,

    #[error("missing value for {0}")]
    MissingArgument(String),

    #[error("`{program}` failed: {reason}")]
    ExternalCommand { program: String, reason: String },

    #[error("invalid language tag {0:?}")]
    InvalidLanguage(String),

    #[error("unsupported platform {0:?}; configure snippets_dir and clipboard.command")]
    UnsupportedPlatform(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SnippetError>;

impl SnippetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnippetError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure came from how the command was invoked rather than
    /// from the store or a collaborator.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            SnippetError::MissingArgument(_) | SnippetError::InvalidLanguage(_)
        )
    }
}
