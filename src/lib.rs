//! # esim-provisioning
//!
//! Single-flight eSIM profile installation behind one request/response
//! contract, for Android's embedded UICC download manager and iOS cellular
//! plan provisioning alike.
//!
//! The native calls themselves are thin and owned by the host application,
//! which implements [`CapabilityProbe`] and [`ProvisioningBackend`]. This
//! crate owns the part that is easy to get wrong: one installation at a
//! time, the out-of-band completion signal routed back to the right caller,
//! every native code normalized into [`InstallStatus`], and exactly one
//! answer per caller even when the signal never comes.
//!
//! ## Features
//!
//! - [`InstallationCoordinator`] with capability and single-flight gates
//! - [`InstallationOutcome`] / [`InstallationResponse`] status taxonomy
//! - Per-platform [`ResultMapper`] tables, total over every native code
//! - [`EsimBridge`] dispatching `isEsimSupported` and `startEsimInstallation`
//!
//! ## Example
//!
//! ```rust,no_run
//! use esim_provisioning::{
//!     CapabilityProbe, CompletionSender, CoordinatorOptions, EsimBridge,
//!     InstallationCoordinator, InstallationRequest, MethodCall, ProbeAdapter, ProbeError,
//!     ProvisioningBackend, SubmissionError,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Euicc;
//!
//! impl CapabilityProbe for Euicc {
//!     fn is_provisioning_available(&self) -> Result<bool, ProbeError> {
//!         Ok(true)
//!     }
//! }
//!
//! impl ProvisioningBackend for Euicc {
//!     fn submit(
//!         &self,
//!         _request: &InstallationRequest,
//!         signal: CompletionSender,
//!     ) -> Result<(), SubmissionError> {
//!         // Hand off to the OS; fire the signal from its callback.
//!         std::thread::spawn(move || signal.complete(0, 0));
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let euicc = Arc::new(Euicc);
//!     let coordinator = InstallationCoordinator::new(
//!         ProbeAdapter::new(euicc.clone()),
//!         euicc,
//!         CoordinatorOptions::default(),
//!     )
//!     .unwrap();
//!     let bridge = EsimBridge::new(coordinator);
//!
//!     let reply = bridge
//!         .handle(MethodCall::new(
//!             "startEsimInstallation",
//!             json!({ "activationCode": "LPA:1$smdp.example.com$MATCHING_ID" }),
//!         ))
//!         .await
//!         .unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod bridge;
mod install;
mod native;
mod options;
mod outcome;
mod platform;
mod request;

pub use bridge::{
    EsimBridge, MethodCall, CHANNEL_NAME, METHOD_IS_ESIM_SUPPORTED, METHOD_START_ESIM_INSTALLATION,
};
pub use install::{
    classify_submission_error, BridgeError, CoordinatorError, EuiccResultMapper,
    InstallationCoordinator, PendingInstallation, PlanProvisioningResultMapper, ProbeError,
    ResultMapper, Submission, SubmissionError,
};
pub use native::{CapabilityProbe, CompletionSender, NativeCompletion, ProbeAdapter, ProvisioningBackend};
pub use options::CoordinatorOptions;
pub use outcome::{
    InstallStatus, InstallationOutcome, InstallationResponse, Unavailability,
    ERROR_CODE_COMPLETION_SIGNAL_DROPPED, ERROR_CODE_GENERIC_INIT_FAILURE,
    ERROR_CODE_ILLEGAL_ARGUMENT, ERROR_CODE_INSTALLATION_IN_PROGRESS,
    ERROR_CODE_NULL_SUBSCRIPTION, ERROR_CODE_SECURITY_EXCEPTION, ERROR_CODE_TIMEOUT,
    ERROR_CODE_TORN_DOWN,
};
pub use platform::Platform;
pub use request::{InstallationRequest, OPTION_CONFIRMATION_CODE};
