use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gridmap operations
#[derive(Error, Diagnostic, Debug)]
pub enum MapError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(gridmap::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(gridmap::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Store error: {message}")]
    #[diagnostic(code(gridmap::store))]
    Store {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Generator error: {message}")]
    #[diagnostic(code(gridmap::id))]
    Generator {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
