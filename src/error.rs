use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the command boundary. Each carries a numeric code
/// that the shell reports alongside the message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required argument: {name}")]
    MissingArgument { name: String },

    #[error("unexpected argument: {token}")]
    UnexpectedArgument { token: String },

    #[error("command not found: {command}")]
    UnknownCommand { command: String },

    #[error("authentication required for {route}")]
    Unauthenticated { route: String },

    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    SourceUnavailable(String),

    #[error("task not found")]
    EntityNotFound,
}

impl Error {
    pub fn code(&self) -> u16 {
        match self {
            Error::MissingArgument { .. } | Error::UnexpectedArgument { .. } => 400,
            Error::Unauthenticated { .. } => 401,
            Error::UnknownCommand { .. } | Error::FileNotFound { .. } | Error::EntityNotFound => 404,
            Error::Parse { .. } => 422,
            Error::Io(_) => 500,
            Error::SourceUnavailable(_) => 503,
        }
    }

    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Error::MissingArgument { name: name.into() }
    }

    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        Error::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_coded_404_with_fixed_message() {
        let err = Error::EntityNotFound;
        assert_eq!(err.code(), 404);
        assert_eq!(err.to_string(), "task not found");
    }

    #[test]
    fn usage_errors_are_400() {
        assert_eq!(Error::missing("pipelineName").code(), 400);
        assert_eq!(
            Error::missing("pipelineName").to_string(),
            "missing required argument: pipelineName"
        );
        let err = Error::UnexpectedArgument { token: "--bogus".into() };
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn source_unavailable_keeps_collaborator_message() {
        let err = Error::SourceUnavailable("connection refused".into());
        assert_eq!(err.code(), 503);
        assert_eq!(err.to_string(), "connection refused");
    }
}
