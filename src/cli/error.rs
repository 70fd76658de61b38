//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::{InfraError, QueryError};

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

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(e) => match e {
                    ApplicationError::Domain(DomainError::Usage { .. }) => crate::exitcode::USAGE,
                    ApplicationError::Domain(DomainError::BodyTooLong { .. }) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::MissingConfig { .. } | ApplicationError::Config { .. } => {
                        crate::exitcode::CONFIG
                    }
                    ApplicationError::Query(QueryError::Read { .. }) => crate::exitcode::NOINPUT,
                    ApplicationError::Query(_) => crate::exitcode::DATAERR,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::UNAVAILABLE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Usage;

    #[test]
    fn test_usage_error_maps_to_usage_exit_code() {
        let err = CliError::from(ApplicationError::from(Usage::SYNC.error()));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
        assert_eq!(err.to_string(), "usage: sync <command>");
    }

    #[test]
    fn test_missing_config_maps_to_config_exit_code() {
        let err = CliError::from(ApplicationError::MissingConfig { key: "file" });
        assert_eq!(err.exit_code(), crate::exitcode::CONFIG);
        assert_eq!(err.to_string(), "missing configuration: file");
    }

    #[test]
    fn test_body_too_long_maps_to_data_error() {
        let err = CliError::from(ApplicationError::from(DomainError::BodyTooLong { len: 400 }));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn test_unreadable_commands_file_maps_to_no_input() {
        let err = CliError::from(ApplicationError::from(QueryError::Read {
            path: "/tmp/absent.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "absent"),
        }));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn test_io_failure_maps_to_io_error() {
        let err = CliError::from(InfraError::io(
            "write /tmp/twitch.toml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            CliError::Usage("x".into()),
            CliError::InvalidArgs("x".into()),
            CliError::from(ApplicationError::Config {
                message: "x".into(),
            }),
            CliError::from(ApplicationError::OperationFailed {
                context: "send chat message".into(),
                source: Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "chat")),
            }),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), crate::exitcode::OK, "{err}");
        }
    }
}
