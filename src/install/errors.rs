//! Error types for the native seams, the coordinator and the bridge.
//!
//! Gate rejections and native failures are never errors: they travel to
//! the caller as an [`InstallationOutcome`](crate::InstallationOutcome).
//! The types here cover what the native layer raises while starting an
//! installation and what the caller gets wrong.

use thiserror::Error;

/// Errors the native layer raises while starting an installation.
///
/// Each variant includes an actionable fix suggestion. The coordinator
/// classifies them into outcomes; they never reach the caller as `Err`.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::SubmissionError;
///
/// let error = SubmissionError::Security {
///     message: "caller lacks WRITE_EMBEDDED_SUBSCRIPTIONS".to_string(),
/// };
/// eprintln!("Dispatch failed: {}", error);
/// eprintln!("To fix: {}", error.fix_suggestion());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    /// The native layer could not build a subscription object at all.
    #[error("Invalid activation code format: native subscription object was null")]
    NullSubscription,

    /// The native layer rejected the activation code as an argument.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Native exception description.
        message: String,
    },

    /// The native layer refused the caller.
    #[error("Security exception: {message}")]
    Security {
        /// Native exception description.
        message: String,
    },

    /// Any other failure while starting the installation.
    #[error("Installation dispatch failed: {message}")]
    Dispatch {
        /// Native exception description.
        message: String,
    },
}

impl SubmissionError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &'static str {
        match self {
            Self::NullSubscription | Self::InvalidArgument { .. } => {
                "Check the activation code; it usually has the form LPA:1$<SM-DP+ address>$<matching ID>"
            }
            Self::Security { .. } => {
                "Check WRITE_EMBEDDED_SUBSCRIPTIONS permission, carrier privileges or the eSIM entitlement"
            }
            Self::Dispatch { .. } => "Retry the installation; if it keeps failing, inspect the native logs",
        }
    }
}

/// Errors reported by a capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The native provisioning service could not be reached.
    #[error("Provisioning service unavailable: {message}")]
    ServiceUnavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Errors constructing an installation coordinator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoordinatorError {
    /// The coordinator was built outside a tokio runtime.
    ///
    /// The completion listener runs on the runtime captured at construction.
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// A completion timeout was configured but the runtime has no timer.
    #[error("Completion timeout requires a tokio runtime with timers enabled")]
    TimerDisabled,
}

/// Caller errors rejected by the method-call bridge before anything runs.
///
/// These are the only failures reported as transport-level errors; every
/// installation result, good or bad, is a normal response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// The call's arguments are missing or have the wrong shape.
    #[error("Invalid arguments: {message}")]
    InvalidArguments {
        /// What was wrong with the arguments.
        message: String,
    },

    /// The method name is not part of the bridge contract.
    #[error("Method not implemented: {method}")]
    NotImplemented {
        /// The method that was called.
        method: String,
    },

    /// A response could not be encoded for the transport.
    #[error("Failed to encode response: {message}")]
    Encoding {
        /// Encoder error description.
        message: String,
    },
}

impl From<serde_json::Error> for BridgeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Encoding {
            message: error.to_string(),
        }
    }
}

impl BridgeError {
    /// Error code sent back over the transport.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esim_provisioning::BridgeError;
    ///
    /// let error = BridgeError::InvalidArguments {
    ///     message: "Activation code is required.".to_string(),
    /// };
    /// assert_eq!(error.code(), "INVALID_ARGUMENTS");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => "INVALID_ARGUMENTS",
            Self::NotImplemented { .. } => "NOT_IMPLEMENTED",
            Self::Encoding { .. } => "ENCODING_FAILED",
        }
    }
}
