//! Result tables mapping native codes into [`InstallationOutcome`].
//!
//! Every platform has its own result enumeration. Each table is total over
//! `i32` pairs: a code it does not know becomes
//! [`InstallationOutcome::Unknown`] carrying the raw value, so a new OS
//! release never needs a coordinator change.

use crate::outcome::{
    ERROR_CODE_GENERIC_INIT_FAILURE, ERROR_CODE_ILLEGAL_ARGUMENT, ERROR_CODE_NULL_SUBSCRIPTION,
};
use crate::{InstallationOutcome, SubmissionError, Unavailability};

/// Classifies a native completion signal.
///
/// The coordinator depends only on this signature.
pub trait ResultMapper: Send + Sync {
    /// Map a native result code and detail code to an outcome.
    ///
    /// Must return a valid outcome for every possible input.
    fn classify(&self, result_code: i32, detail_code: i32) -> InstallationOutcome;
}

/// Android `EuiccManager` download result table.
///
/// | Code | Meaning | Outcome |
/// |---|---|---|
/// | 0 | `EMBEDDED_SUBSCRIPTION_RESULT_OK` | `Success` |
/// | 1 | `EMBEDDED_SUBSCRIPTION_RESULT_RESOLVABLE_ERROR` | `Failure` |
/// | 2 | `EMBEDDED_SUBSCRIPTION_RESULT_ERROR` | `Failure` |
/// | other | | `Unknown` |
///
/// The error code is the numeric result code; the detailed code goes into
/// the native detail.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuiccResultMapper;

impl EuiccResultMapper {
    pub const RESULT_OK: i32 = 0;
    pub const RESULT_RESOLVABLE_ERROR: i32 = 1;
    pub const RESULT_ERROR: i32 = 2;
}

impl ResultMapper for EuiccResultMapper {
    fn classify(&self, result_code: i32, detail_code: i32) -> InstallationOutcome {
        let error_code = result_code.to_string();
        let native_detail = Some(format!(
            "Detailed code (from EuiccManager): {}",
            detail_code
        ));

        match result_code {
            Self::RESULT_OK => InstallationOutcome::Success {
                message: "eSIM profile download initiated successfully by OS.".to_string(),
            },
            Self::RESULT_ERROR => InstallationOutcome::Failure {
                message: format!(
                    "eSIM download failed with a generic error. Detailed code: {}.",
                    detail_code
                ),
                error_code,
                native_detail,
            },
            // The OS may offer a follow-up action here; it is still reported as a failure.
            Self::RESULT_RESOLVABLE_ERROR => InstallationOutcome::Failure {
                message: format!(
                    "eSIM download encountered a resolvable error. User interaction might be required via OS UI. Detailed code: {}.",
                    detail_code
                ),
                error_code,
                native_detail,
            },
            _ => InstallationOutcome::Unknown {
                message: format!(
                    "eSIM download finished with an unexpected result code: {}, detailed code: {}.",
                    result_code, detail_code
                ),
                error_code,
                raw_native_code: result_code,
            },
        }
    }
}

/// iOS `CTCellularPlanProvisioning` add-plan result table.
///
/// | Raw value | Meaning | Outcome |
/// |---|---|---|
/// | 0 | `.success` | `Success` |
/// | 1 | `.unknown` | `Unknown` (`ADD_PLAN_UNKNOWN`) |
/// | 2 | `.fail` | `Failure` (`ADD_PLAN_FAILED`) |
/// | 3 | `.userCancelled` (iOS 16+) | `UserCancelled`, or `Unknown` on older releases |
/// | other | | `Unknown` (`ADD_PLAN_UNHANDLED_RAW_VALUE`) |
///
/// The detail code is ignored; iOS has none.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::{InstallStatus, PlanProvisioningResultMapper, ResultMapper};
///
/// let ios16 = PlanProvisioningResultMapper::new(true);
/// assert_eq!(ios16.classify(3, 0).status(), InstallStatus::UserCancelled);
///
/// let ios15 = PlanProvisioningResultMapper::new(false);
/// assert_eq!(ios15.classify(3, 0).status(), InstallStatus::UnknownError);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlanProvisioningResultMapper {
    user_cancelled_supported: bool,
}

impl PlanProvisioningResultMapper {
    pub const RESULT_SUCCESS: i32 = 0;
    pub const RESULT_UNKNOWN: i32 = 1;
    pub const RESULT_FAIL: i32 = 2;
    pub const RESULT_USER_CANCELLED: i32 = 3;

    /// Build the table. `user_cancelled_supported` is true on OS releases
    /// whose result enumeration includes user cancellation.
    pub fn new(user_cancelled_supported: bool) -> Self {
        Self {
            user_cancelled_supported,
        }
    }

    /// Table for a given OS major version.
    pub fn for_os_major_version(major: u32) -> Self {
        Self::new(major >= 16)
    }
}

impl ResultMapper for PlanProvisioningResultMapper {
    fn classify(&self, result_code: i32, _detail_code: i32) -> InstallationOutcome {
        match result_code {
            Self::RESULT_SUCCESS => InstallationOutcome::Success {
                message: "eSIM plan provisioning initiated successfully by OS.".to_string(),
            },
            Self::RESULT_UNKNOWN => InstallationOutcome::Unknown {
                message: "Failed to add eSIM plan. The outcome is unknown.".to_string(),
                error_code: "ADD_PLAN_UNKNOWN".to_string(),
                raw_native_code: result_code,
            },
            Self::RESULT_FAIL => InstallationOutcome::Failure {
                message: "Failed to add eSIM plan. The OS reported a failure.".to_string(),
                error_code: "ADD_PLAN_FAILED".to_string(),
                native_detail: None,
            },
            Self::RESULT_USER_CANCELLED if self.user_cancelled_supported => {
                InstallationOutcome::UserCancelled {
                    message: "User cancelled the eSIM installation process.".to_string(),
                    error_code: "USER_CANCELLED_IOS".to_string(),
                }
            }
            Self::RESULT_USER_CANCELLED => InstallationOutcome::Unknown {
                message: "Received unexpected raw value 3 for add-plan result on an OS without user cancellation.".to_string(),
                error_code: "ADD_PLAN_UNEXPECTED_RAW_VALUE_3".to_string(),
                raw_native_code: result_code,
            },
            _ => InstallationOutcome::Unknown {
                message: format!(
                    "Failed to add eSIM plan due to an unknown or new result raw value: {}.",
                    result_code
                ),
                error_code: "ADD_PLAN_UNHANDLED_RAW_VALUE".to_string(),
                raw_native_code: result_code,
            },
        }
    }
}

/// Classify an error raised while starting an installation.
pub fn classify_submission_error(error: &SubmissionError) -> InstallationOutcome {
    match error {
        SubmissionError::NullSubscription => InstallationOutcome::InvalidActivationCode {
            message: "Invalid activation code format (subscription object was null).".to_string(),
            error_code: ERROR_CODE_NULL_SUBSCRIPTION.to_string(),
            native_detail: None,
        },
        SubmissionError::InvalidArgument { message } => InstallationOutcome::InvalidActivationCode {
            message: format!(
                "{}. Likely invalid activation code format.",
                error
            ),
            error_code: ERROR_CODE_ILLEGAL_ARGUMENT.to_string(),
            native_detail: Some(message.clone()),
        },
        SubmissionError::Security { message } => InstallationOutcome::NotSupportedOrUnavailable {
            message: format!("{}. {}.", error, error.fix_suggestion()),
            reason: Unavailability::NotPermitted,
            native_detail: Some(message.clone()),
        },
        SubmissionError::Dispatch { message } => InstallationOutcome::Failure {
            message: format!(
                "Generic exception during eSIM installation initiation: {}",
                message
            ),
            error_code: ERROR_CODE_GENERIC_INIT_FAILURE.to_string(),
            native_detail: Some(message.clone()),
        },
    }
}
