//! Error types for the DailyInfo client.
//!
//! [`CbrError`] separates three families of failure so callers never have to
//! guess what an empty answer meant:
//! - transport failures (the service could not be reached or refused the call)
//! - caller errors (an operation name nobody registered, bad configuration)
//! - payload errors (the service answered with XML we cannot read)
//!
//! "No data" is not an error at all; it is reported as
//! [`NormalizedResult::Null`](crate::models::NormalizedResult::Null).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CbrError>;

/// Errors that can occur while talking to the DailyInfo service.
#[derive(Error, Debug)]
pub enum CbrError {
    /// The HTTP round trip failed (connection refused, DNS, bad status, ...).
    #[error("Transport error: {operation} - {message}")]
    Transport {
        /// Remote operation that was being invoked
        operation: String,
        /// Description of the failure
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {operation}")]
    Timeout {
        /// Remote operation that timed out
        operation: String,
    },

    /// The service answered with a SOAP Fault.
    #[error("SOAP fault: {operation} - {code}: {message}")]
    Fault {
        /// Remote operation that faulted
        operation: String,
        /// Fault code reported by the service (e.g. `soap:Client`)
        code: String,
        /// Fault string reported by the service
        message: String,
    },

    /// The symbolic operation name is not one of the registered operations.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The envelope or the payload XML could not be interpreted.
    #[error("Malformed response: {operation} - {message}")]
    MalformedResponse {
        /// Remote operation whose response was malformed
        operation: String,
        /// Description of the problem
        message: String,
    },

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CbrError {
    /// Returns `true` for failures of the round trip itself, as opposed to
    /// caller mistakes or unreadable payloads.
    ///
    /// ```
    /// use cbr_daily_info::errors::CbrError;
    ///
    /// let error = CbrError::Timeout { operation: "GetCursOnDate".to_string() };
    /// assert!(error.is_transport());
    ///
    /// let error = CbrError::UnknownOperation("foo".to_string());
    /// assert!(!error.is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Fault { .. }
        )
    }

    pub(crate) fn malformed(operation: &str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn transport(operation: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
