//! Native provisioning dispatch.

use super::CompletionSender;
use crate::{InstallationRequest, SubmissionError};

/// Fire-and-forget dispatch of one installation to the native layer.
///
/// Implementations build the platform subscription or plan request from the
/// activation code and hand it to the OS, which usually presents a modal
/// consent UI. The call must return as soon as the request is handed off.
///
/// On `Ok(())` the implementation owns `signal` and must fire it once when
/// the OS reports the result, from any thread. On `Err` the signal is
/// discarded; the coordinator classifies the error itself.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::{
///     CompletionSender, InstallationRequest, ProvisioningBackend, SubmissionError,
/// };
///
/// struct AlwaysSucceeds;
///
/// impl ProvisioningBackend for AlwaysSucceeds {
///     fn submit(
///         &self,
///         request: &InstallationRequest,
///         signal: CompletionSender,
///     ) -> Result<(), SubmissionError> {
///         if !request.activation_code().starts_with("LPA:") {
///             return Err(SubmissionError::NullSubscription);
///         }
///         std::thread::spawn(move || signal.complete(0, 0));
///         Ok(())
///     }
/// }
/// ```
pub trait ProvisioningBackend: Send + Sync {
    /// Hand one installation to the native layer.
    fn submit(
        &self,
        request: &InstallationRequest,
        signal: CompletionSender,
    ) -> Result<(), SubmissionError>;
}
