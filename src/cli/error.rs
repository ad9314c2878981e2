//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DocumentError, RenderError};
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        ApplicationError::from(e).into()
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        ApplicationError::from(e).into()
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Serialize { .. } => exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::Document(_) => exitcode::DATAERR,
                    ApplicationError::Render(_) => exitcode::SOFTWARE,
                    ApplicationError::Config { .. } => exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => exitcode::NOINPUT,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_error_kinds_when_mapping_then_sysexits_codes() {
        let document: CliError = DocumentError::DuplicateKey {
            section: "menu".into(),
            key: "title".into(),
        }
        .into();
        let render: CliError = RenderError::NotRenderable {
            path: "menu".into(),
        }
        .into();
        let config: CliError = ApplicationError::Config {
            message: "bad".into(),
        }
        .into();

        assert_eq!(document.exit_code(), exitcode::DATAERR);
        assert_eq!(render.exit_code(), exitcode::SOFTWARE);
        assert_eq!(config.exit_code(), exitcode::CONFIG);
        assert_eq!(CliError::Usage("x".into()).exit_code(), exitcode::USAGE);
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exitcode::USAGE);
    }
}
