//! Caller-side handles for a submitted installation.

use crate::InstallationOutcome;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// The sending half stored in the coordinator's slot.
///
/// Consumed on delivery, so one sink can deliver at most one outcome.
#[derive(Debug)]
pub(crate) struct ResultSink {
    tx: oneshot::Sender<InstallationOutcome>,
}

impl ResultSink {
    pub(crate) fn channel() -> (Self, PendingInstallation) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, PendingInstallation { rx })
    }

    pub(crate) fn deliver(self, outcome: InstallationOutcome) {
        let status = outcome.status();
        if self.tx.send(outcome).is_err() {
            tracing::debug!(%status, "caller stopped waiting before the outcome arrived");
        }
    }
}

/// An installation accepted by the coordinator whose outcome is deferred.
///
/// Resolves to exactly one [`InstallationOutcome`]. Awaiting never fails:
/// if the coordinator disappears without answering, the outcome is a
/// `TORN_DOWN` failure.
#[derive(Debug)]
pub struct PendingInstallation {
    rx: oneshot::Receiver<InstallationOutcome>,
}

impl PendingInstallation {
    /// Take the outcome if it has already been delivered.
    ///
    /// Returns `None` while the installation is still running.
    pub fn try_outcome(&mut self) -> Option<InstallationOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(InstallationOutcome::torn_down()),
        }
    }
}

impl Future for PendingInstallation {
    type Output = InstallationOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx
            .poll_unpin(cx)
            .map(|received| received.unwrap_or_else(|_| InstallationOutcome::torn_down()))
    }
}

/// What [`InstallationCoordinator::submit`](crate::InstallationCoordinator::submit)
/// hands back.
///
/// # Example
///
/// ```rust,no_run
/// use esim_provisioning::{InstallationCoordinator, InstallationRequest, Submission};
///
/// async fn install(coordinator: &InstallationCoordinator) {
///     match coordinator.submit(InstallationRequest::new("LPA:1$smdp.example.com$ID")) {
///         Submission::Immediate(outcome) => println!("rejected: {}", outcome.status()),
///         Submission::Deferred(pending) => println!("finished: {}", pending.await.status()),
///     }
/// }
/// ```
#[derive(Debug)]
#[must_use = "a deferred submission only reports its outcome when awaited"]
pub enum Submission {
    /// Rejected at a gate; the slot was never touched.
    Immediate(InstallationOutcome),
    /// Accepted; the outcome arrives later through the handle.
    Deferred(PendingInstallation),
}

impl Submission {
    /// Check if the request was rejected at a gate.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// Wait for the outcome, whichever way it comes.
    pub async fn outcome(self) -> InstallationOutcome {
        match self {
            Self::Immediate(outcome) => outcome,
            Self::Deferred(pending) => pending.await,
        }
    }
}
