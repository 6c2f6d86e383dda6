//! Error types for gcpctl
//!
//! Core failures are mapped onto user-facing variants that know how to
//! suggest a next step.

use colored::Colorize;
use gcpctl_core::{ConfigError, CoreError, RemoteServiceError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: ResponseError: code=404, message=Spoke not found
///
///   tip: check the resource name and scope flags
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Plain-text form, without colors
    #[cfg(test)]
    pub fn render(&self) -> String {
        let mut out = format!("error: {}", self.message);
        if let Some(detail) = &self.detail {
            out.push_str(&format!("\n  {}", detail));
        }
        for (description, commands) in &self.tips {
            out.push_str(&format!("\n\n  tip: {}", description));
            for cmd in commands {
                out.push_str(&format!("\n      {}", cmd));
            }
        }
        out
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the gcpctl application
#[derive(Error, Debug)]
pub enum GcpCtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The API rejected the request
    #[error("{error}")]
    Api { error: RemoteServiceError },

    /// The request never reached the API
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The operation finished with an error status
    #[error("{error}")]
    OperationFailed {
        operation: String,
        error: RemoteServiceError,
    },

    #[error("Timed out after {timeout_secs}s waiting for operation [{operation}]")]
    Timeout { operation: String, timeout_secs: u64 },

    #[error("Output formatting error: {message}")]
    Output { message: String },
}

/// Result type for gcpctl operations
pub type Result<T> = std::result::Result<T, GcpCtlError>;

impl GcpCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            GcpCtlError::ProfileNotFound { name } => vec![
                format!("Add a [profiles.{}] table to your config file", name),
                "Check the profile name spelling, or unset GCPCTL_PROFILE".to_string(),
            ],
            GcpCtlError::InvalidArgument { message } if message.contains("[project]") => vec![
                "Pass --project, set GCPCTL_PROJECT, or set `project` in your profile"
                    .to_string(),
            ],
            GcpCtlError::InvalidArgument { .. } => vec![
                "Check the command syntax: gcpctl <command> --help".to_string(),
                "Use a full resource name (projects/...) to skip scope resolution".to_string(),
            ],
            GcpCtlError::Api { error } if error.is_unauthorized() => vec![
                "Refresh the access token: export GCPCTL_ACCESS_TOKEN=$(gcloud auth print-access-token)".to_string(),
                "Or set `access_token` in your profile".to_string(),
            ],
            GcpCtlError::Api { error } if error.status == Some(403) => vec![
                "Verify the caller has permission on the project".to_string(),
                "Check that the API is enabled for the project".to_string(),
            ],
            GcpCtlError::Api { error } if error.is_not_found() => vec![
                "Verify the resource name and its project/location".to_string(),
                "Check that you're using the correct profile".to_string(),
            ],
            GcpCtlError::Connection { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify endpoint overrides in your profile or GCPCTL_*_ENDPOINT".to_string(),
            ],
            GcpCtlError::Timeout { operation, .. } => vec![
                format!("The operation is still running server-side: {}", operation),
                "Raise the limit with --wait-timeout, or use --async".to_string(),
            ],
            _ => vec![],
        }
    }

    pub fn diagnostic(&self) -> CliDiagnostic {
        let mut diag = CliDiagnostic::error(&self.to_string());
        if let GcpCtlError::OperationFailed { operation, .. } = self {
            diag = diag.detail(&format!("operation: {}", operation));
        }
        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }
        diag
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        self.diagnostic().print();
    }
}

impl From<RemoteServiceError> for GcpCtlError {
    fn from(error: RemoteServiceError) -> Self {
        if error.status.is_none() {
            GcpCtlError::Connection {
                message: error.message,
            }
        } else {
            GcpCtlError::Api { error }
        }
    }
}

impl From<CoreError> for GcpCtlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument(message) => GcpCtlError::InvalidArgument { message },
            CoreError::RemoteService(error) => GcpCtlError::from(error),
            CoreError::PollingFailure { operation, error } => {
                GcpCtlError::OperationFailed { operation, error }
            }
            CoreError::OperationTimeout { operation, timeout } => GcpCtlError::Timeout {
                operation,
                timeout_secs: timeout.as_secs(),
            },
            CoreError::Config(config_err) => GcpCtlError::from(config_err),
        }
    }
}

impl From<ConfigError> for GcpCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => GcpCtlError::ProfileNotFound { name },
            other => GcpCtlError::Configuration(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for GcpCtlError {
    fn from(err: anyhow::Error) -> Self {
        GcpCtlError::Output {
            message: format!("{:#}", err),
        }
    }
}

impl From<serde_json::Error> for GcpCtlError {
    fn from(err: serde_json::Error) -> Self {
        GcpCtlError::Output {
            message: format!("JSON error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_remote_error_keeps_response_error_text() {
        let err = GcpCtlError::from(CoreError::RemoteService(RemoteServiceError::http(
            404,
            Some("NOT_FOUND"),
            "Spoke not found",
        )));
        assert_eq!(err.to_string(), "ResponseError: code=404, message=Spoke not found");
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn test_transport_error_becomes_connection_error() {
        let err = GcpCtlError::from(CoreError::RemoteService(RemoteServiceError::transport(
            "connection refused",
        )));
        assert!(matches!(err, GcpCtlError::Connection { .. }));
    }

    #[test]
    fn test_polling_failure_mentions_operation_in_detail() {
        let err = GcpCtlError::from(CoreError::PollingFailure {
            operation: "operations/op-1".to_string(),
            error: RemoteServiceError::from_rpc_code(9, "Spoke is already inactive"),
        });
        let rendered = err.diagnostic().render();
        assert!(rendered.starts_with("error: ResponseError: code=400"));
        assert!(rendered.contains("operation: operations/op-1"));
    }

    #[test]
    fn test_timeout_suggests_async() {
        let err = GcpCtlError::from(CoreError::OperationTimeout {
            operation: "operations/op-2".to_string(),
            timeout: Duration::from_secs(30),
        });
        assert_eq!(
            err.to_string(),
            "Timed out after 30s waiting for operation [operations/op-2]"
        );
        assert!(err.suggestions().iter().any(|s| s.contains("--async")));
    }

    #[test]
    fn test_missing_project_tip() {
        let err = GcpCtlError::from(CoreError::InvalidArgument(
            "The required property [project] is not currently set.".to_string(),
        ));
        let rendered = err.diagnostic().render();
        assert!(rendered.contains("tip: Pass --project"));
    }

    #[test]
    fn test_profile_not_found_maps_through_config_error() {
        let err = GcpCtlError::from(CoreError::Config(ConfigError::ProfileNotFound {
            name: "work".to_string(),
        }));
        assert_eq!(err.to_string(), "Profile 'work' not found");
    }
}
