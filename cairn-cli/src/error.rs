//! CLI-specific error types and exit code mapping

use cairn_catalog::{CatalogerError, PurlError};
use cairn_core::error::CairnError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Input could not be parsed as a Package URL.
    #[error("invalid package url: {0}")]
    Purl(#[from] PurlError),

    /// Cataloging or SBOM generation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogerError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from cairn-core.
    #[error("{0}")]
    Core(#[from] CairnError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                  |
    /// |------|--------------------------|
    /// | 0    | Success                  |
    /// | 1    | General / command error  |
    /// | 2    | Configuration error      |
    /// | 10   | IO error                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(CairnError::Config(_)) => 2,
            Self::Catalog(CatalogerError::Config { .. }) => 2,
            Self::Io(_) | Self::Core(CairnError::Io(_)) => 10,
            Self::Command(_)
            | Self::Purl(_)
            | Self::Catalog(_)
            | Self::JsonSerialize(_)
            | Self::Core(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::error::ConfigError;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::from(CairnError::Config(ConfigError::ParseFailed {
            reason: "bad toml".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2, "core config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_cataloger_config_error() {
        let err = CliError::from(CatalogerError::Config {
            field: "workers".to_owned(),
            reason: "must be 1-256".to_owned(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(CliError::Io(io_err).exit_code(), 10);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(CliError::from(CairnError::Io(io_err)).exit_code(), 10);
    }

    #[test]
    fn test_exit_code_command_errors() {
        assert_eq!(CliError::Command("boom".to_owned()).exit_code(), 1);
        assert_eq!(CliError::from(PurlError::MissingName).exit_code(), 1);
        assert_eq!(
            CliError::from(CatalogerError::TooManyPackages { count: 2, max: 1 }).exit_code(),
            1
        );
    }

    #[test]
    fn test_error_messages() {
        let err = CliError::from(PurlError::MissingScheme);
        assert!(err.to_string().starts_with("invalid package url"));

        let err = CliError::Config("bad value".to_owned());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }
}
