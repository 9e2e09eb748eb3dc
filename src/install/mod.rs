//! eSIM profile installation.
//!
//! This module provides the [`InstallationCoordinator`] and everything it
//! needs around it: the caller-side handles, the per-platform result
//! tables, and the error types.
//!
//! # Example
//!
//! ```rust,no_run
//! use esim_provisioning::{
//!     CoordinatorOptions, InstallationCoordinator, InstallationRequest, ProbeAdapter,
//!     ProvisioningBackend, Submission,
//! };
//! use std::sync::Arc;
//!
//! async fn run(probe: ProbeAdapter, backend: Arc<dyn ProvisioningBackend>) {
//!     let coordinator =
//!         InstallationCoordinator::new(probe, backend, CoordinatorOptions::default()).unwrap();
//!
//!     match coordinator.submit(InstallationRequest::new("LPA:1$smdp.example.com$ID")) {
//!         Submission::Immediate(outcome) => println!("rejected: {}", outcome.message()),
//!         Submission::Deferred(pending) => {
//!             let outcome = pending.await;
//!             println!("{}: {:?}", outcome.status(), outcome.error_code());
//!         }
//!     }
//! }
//! ```

mod coordinator;
mod errors;
mod mapping;
mod pending;

pub use coordinator::InstallationCoordinator;
pub use errors::{BridgeError, CoordinatorError, ProbeError, SubmissionError};
pub use mapping::{
    classify_submission_error, EuiccResultMapper, PlanProvisioningResultMapper, ResultMapper,
};
pub use pending::{PendingInstallation, Submission};
