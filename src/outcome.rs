//! Installation outcome types and the normalized status taxonomy.

use serde::{Deserialize, Serialize};

/// Error code: another installation already occupies the slot.
pub const ERROR_CODE_INSTALLATION_IN_PROGRESS: &str = "INSTALLATION_IN_PROGRESS";
/// Error code: the native layer could not build a subscription object.
pub const ERROR_CODE_NULL_SUBSCRIPTION: &str = "NULL_SUBSCRIPTION_OBJECT";
/// Error code: the native dispatch was refused for lack of permission.
pub const ERROR_CODE_SECURITY_EXCEPTION: &str = "SECURITY_EXCEPTION";
/// Error code: the native layer rejected the activation code format.
pub const ERROR_CODE_ILLEGAL_ARGUMENT: &str = "ILLEGAL_ARGUMENT_EXCEPTION";
/// Error code: any other failure while starting the installation.
pub const ERROR_CODE_GENERIC_INIT_FAILURE: &str = "GENERIC_INIT_FAILURE";
/// Error code: the coordinator shut down with a caller still waiting.
pub const ERROR_CODE_TORN_DOWN: &str = "TORN_DOWN";
/// Error code: no completion signal arrived within the configured timeout.
pub const ERROR_CODE_TIMEOUT: &str = "TIMEOUT";
/// Error code: the native layer released its completion handle without firing it.
pub const ERROR_CODE_COMPLETION_SIGNAL_DROPPED: &str = "COMPLETION_SIGNAL_DROPPED";

/// Normalized status string shared by every platform.
///
/// This is the `status` field the application layer switches on. The
/// textual form is camelCase both for `Display`/`FromStr` and for serde.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::InstallStatus;
///
/// assert_eq!(InstallStatus::NotSupportedOrPermitted.to_string(), "notSupportedOrPermitted");
/// assert_eq!("userCancelled".parse::<InstallStatus>().unwrap(), InstallStatus::UserCancelled);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum InstallStatus {
    Success,
    Failure,
    NotSupportedOrPermitted,
    InvalidActivationCode,
    EsimDisabledOrUnavailable,
    UnknownError,
    UserCancelled,
}

/// Why provisioning is not available for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailability {
    /// The native service is absent or switched off.
    Disabled,
    /// The native service refused the caller (missing entitlement or carrier privileges).
    NotPermitted,
}

impl Unavailability {
    /// Status string reported for this kind of unavailability.
    pub fn status(&self) -> InstallStatus {
        match self {
            Self::Disabled => InstallStatus::EsimDisabledOrUnavailable,
            Self::NotPermitted => InstallStatus::NotSupportedOrPermitted,
        }
    }

    /// Error code reported for this kind of unavailability, if any.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Disabled => None,
            Self::NotPermitted => Some(ERROR_CODE_SECURITY_EXCEPTION),
        }
    }
}

/// Result of a single installation request.
///
/// Exactly one outcome is produced per request, whichever path finished
/// it: a gate rejection, a submission error, the native completion signal,
/// a timeout or teardown.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new outcome
/// types in future versions.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::{InstallStatus, InstallationOutcome};
///
/// fn report(outcome: &InstallationOutcome) {
///     if outcome.is_success() {
///         println!("profile installed");
///     } else {
///         println!("{}: {:?}", outcome.status(), outcome.error_code());
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InstallationOutcome {
    /// The native layer reported a successful installation.
    Success { message: String },

    /// The installation failed.
    Failure {
        message: String,
        error_code: String,
        /// Raw native diagnostic, such as an exception string or detail code.
        native_detail: Option<String>,
    },

    /// The native layer could not make sense of the activation code.
    InvalidActivationCode {
        message: String,
        error_code: String,
        native_detail: Option<String>,
    },

    /// Provisioning is not available to this caller.
    NotSupportedOrUnavailable {
        message: String,
        reason: Unavailability,
        native_detail: Option<String>,
    },

    /// The user dismissed the system consent UI.
    ///
    /// Only reachable on platforms whose signal distinguishes cancellation.
    UserCancelled { message: String, error_code: String },

    /// The native layer reported a code no result table recognizes.
    Unknown {
        message: String,
        error_code: String,
        raw_native_code: i32,
    },
}

impl InstallationOutcome {
    /// Outcome for a request refused because another one is in flight.
    pub fn in_progress() -> Self {
        Self::Failure {
            message: "Another eSIM installation is already in progress.".to_string(),
            error_code: ERROR_CODE_INSTALLATION_IN_PROGRESS.to_string(),
            native_detail: None,
        }
    }

    /// Outcome for a request refused because the capability probe said no.
    pub fn disabled() -> Self {
        Self::NotSupportedOrUnavailable {
            message: "eSIM manager is not available or disabled.".to_string(),
            reason: Unavailability::Disabled,
            native_detail: None,
        }
    }

    /// Outcome delivered to a caller still waiting at teardown.
    pub fn torn_down() -> Self {
        Self::Failure {
            message: "eSIM installation was abandoned because the coordinator shut down."
                .to_string(),
            error_code: ERROR_CODE_TORN_DOWN.to_string(),
            native_detail: None,
        }
    }

    /// Normalized status string for this outcome.
    pub fn status(&self) -> InstallStatus {
        match self {
            Self::Success { .. } => InstallStatus::Success,
            Self::Failure { .. } => InstallStatus::Failure,
            Self::InvalidActivationCode { .. } => InstallStatus::InvalidActivationCode,
            Self::NotSupportedOrUnavailable { reason, .. } => reason.status(),
            Self::UserCancelled { .. } => InstallStatus::UserCancelled,
            Self::Unknown { .. } => InstallStatus::UnknownError,
        }
    }

    /// Human-readable message for display.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message }
            | Self::Failure { message, .. }
            | Self::InvalidActivationCode { message, .. }
            | Self::NotSupportedOrUnavailable { message, .. }
            | Self::UserCancelled { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// Machine-readable error code, if the outcome carries one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_code, .. }
            | Self::InvalidActivationCode { error_code, .. }
            | Self::UserCancelled { error_code, .. }
            | Self::Unknown { error_code, .. } => Some(error_code),
            Self::NotSupportedOrUnavailable { reason, .. } => reason.error_code(),
        }
    }

    /// Raw native diagnostic, if the outcome carries one.
    pub fn native_detail(&self) -> Option<&str> {
        match self {
            Self::Failure { native_detail, .. }
            | Self::InvalidActivationCode { native_detail, .. }
            | Self::NotSupportedOrUnavailable { native_detail, .. } => native_detail.as_deref(),
            _ => None,
        }
    }

    /// Unrecognized native result code, for `Unknown` outcomes only.
    pub fn raw_native_code(&self) -> Option<i32> {
        match self {
            Self::Unknown {
                raw_native_code, ..
            } => Some(*raw_native_code),
            _ => None,
        }
    }

    /// Check if the profile was installed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Wire form of an outcome as delivered to the application layer.
///
/// `message`, `errorCode` and `nativeException` are always present and
/// serialize as `null` when absent. `rawNativeCode` only appears for
/// unrecognized native codes.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::{InstallationOutcome, InstallationResponse};
///
/// let response = InstallationResponse::from(InstallationOutcome::in_progress());
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["status"], "failure");
/// assert_eq!(json["errorCode"], "INSTALLATION_IN_PROGRESS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationResponse {
    pub status: InstallStatus,
    pub message: Option<String>,
    pub error_code: Option<String>,
    pub native_exception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_native_code: Option<i32>,
}

impl From<InstallationOutcome> for InstallationResponse {
    fn from(outcome: InstallationOutcome) -> Self {
        Self {
            status: outcome.status(),
            message: Some(outcome.message().to_string()),
            error_code: outcome.error_code().map(str::to_string),
            native_exception: outcome.native_detail().map(str::to_string),
            raw_native_code: outcome.raw_native_code(),
        }
    }
}
