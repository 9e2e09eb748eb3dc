//! Single-flight installation coordinator.
//!
//! This module provides [`InstallationCoordinator`], which hands at most one
//! installation at a time to the native layer and routes the out-of-band
//! completion signal back to the caller that started it.

use crate::install::mapping::{classify_submission_error, ResultMapper};
use crate::install::pending::{ResultSink, Submission};
use crate::native::{completion_channel, CompletionReceiver, CompletionSender, ProbeAdapter, ProvisioningBackend};
use crate::outcome::{ERROR_CODE_COMPLETION_SIGNAL_DROPPED, ERROR_CODE_TIMEOUT};
use crate::{
    CoordinatorError, CoordinatorOptions, InstallationOutcome, InstallationRequest, Platform,
    SubmissionError,
};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// The occupied slot: one waiting caller and the listener for its signal.
struct PendingSlot {
    generation: u64,
    sink: ResultSink,
    listener: Option<AbortHandle>,
}

struct Shared {
    probe: ProbeAdapter,
    backend: Arc<dyn ProvisioningBackend>,
    mapper: Arc<dyn ResultMapper>,
    options: CoordinatorOptions,
    runtime: Handle,
    // Every transition of the slot happens under this lock; delivery happens after it is released.
    slot: Mutex<Option<PendingSlot>>,
    next_generation: AtomicU64,
}

/// Coordinates eSIM installations so that exactly one is in flight.
///
/// `submit` never blocks. A request is either rejected at a gate and
/// answered immediately, or accepted and answered later through a
/// [`PendingInstallation`](crate::PendingInstallation). Every accepted request gets exactly one
/// outcome: from the native completion signal, a submission error, the
/// completion timeout, or teardown.
///
/// Cloning yields another handle to the same coordinator. When the last
/// handle is dropped, a still-pending caller receives a `TORN_DOWN` failure.
///
/// # Example
///
/// ```rust,no_run
/// use esim_provisioning::{
///     CoordinatorOptions, InstallationCoordinator, InstallationRequest, ProbeAdapter,
///     ProvisioningBackend,
/// };
/// use std::sync::Arc;
///
/// async fn run(probe: ProbeAdapter, backend: Arc<dyn ProvisioningBackend>) {
///     let coordinator =
///         InstallationCoordinator::new(probe, backend, CoordinatorOptions::default()).unwrap();
///
///     let outcome = coordinator
///         .submit(InstallationRequest::new("LPA:1$smdp.example.com$MATCHING_ID"))
///         .outcome()
///         .await;
///     println!("{}: {}", outcome.status(), outcome.message());
/// }
/// ```
#[derive(Clone)]
pub struct InstallationCoordinator {
    shared: Arc<Shared>,
}

impl InstallationCoordinator {
    /// Create a coordinator using the result table of `options.platform`.
    ///
    /// Must be called inside a tokio runtime; completion listeners are
    /// spawned on it. When `options.completion_timeout` is set, the runtime
    /// also needs timers (`enable_time`), otherwise
    /// [`CoordinatorError::TimerDisabled`] is returned.
    pub fn new(
        probe: ProbeAdapter,
        backend: Arc<dyn ProvisioningBackend>,
        options: CoordinatorOptions,
    ) -> Result<Self, CoordinatorError> {
        let mapper = options.platform.result_mapper();
        Self::with_mapper(probe, backend, mapper, options)
    }

    /// Create a coordinator with a custom result table.
    pub fn with_mapper(
        probe: ProbeAdapter,
        backend: Arc<dyn ProvisioningBackend>,
        mapper: Arc<dyn ResultMapper>,
        options: CoordinatorOptions,
    ) -> Result<Self, CoordinatorError> {
        let runtime = Handle::try_current()?;
        if options.completion_timeout.is_some() && !timers_enabled() {
            return Err(CoordinatorError::TimerDisabled);
        }
        Ok(Self {
            shared: Arc::new(Shared {
                probe,
                backend,
                mapper,
                options,
                runtime,
                slot: Mutex::new(None),
                next_generation: AtomicU64::new(1),
            }),
        })
    }

    /// Report whether eSIM provisioning is available on this device.
    pub fn is_supported(&self) -> bool {
        self.shared.probe.is_supported()
    }

    /// Check if an installation currently occupies the slot.
    pub fn is_installation_pending(&self) -> bool {
        self.shared.lock_slot().is_some()
    }

    /// Platform whose result table this coordinator was configured with.
    pub fn platform(&self) -> Platform {
        self.shared.options.platform
    }

    /// Submit an installation.
    ///
    /// 1. If provisioning is unavailable, answers `esimDisabledOrUnavailable`
    ///    immediately.
    /// 2. If another installation is pending, answers
    ///    `INSTALLATION_IN_PROGRESS` immediately, leaving it untouched.
    /// 3. Otherwise occupies the slot, then dispatches to the native layer.
    ///    A dispatch error is classified and delivered through the returned
    ///    handle straight away; a successful dispatch leaves a listener
    ///    waiting for the completion signal.
    pub fn submit(&self, request: InstallationRequest) -> Submission {
        let shared = &self.shared;

        if !shared.probe.is_supported() {
            tracing::info!("rejecting eSIM installation: provisioning is unavailable");
            return Submission::Immediate(InstallationOutcome::disabled());
        }

        let (sink, pending) = ResultSink::channel();
        let Some(generation) = shared.occupy(sink) else {
            tracing::info!("rejecting eSIM installation: another installation is in progress");
            return Submission::Immediate(InstallationOutcome::in_progress());
        };

        tracing::info!(
            generation,
            platform = shared.options.platform.display_name(),
            activation_code = %request.redacted_code(),
            "submitting eSIM installation"
        );

        let (signal, completion) = completion_channel();
        match shared.dispatch(&request, signal) {
            Ok(()) => self.spawn_listener(generation, completion),
            Err(error) => {
                // Deregister before answering so a late signal finds no listener.
                drop(completion);
                tracing::warn!(generation, error = %error, "eSIM installation failed to start");
                shared.finish(generation, classify_submission_error(&error));
            }
        }

        Submission::Deferred(pending)
    }

    /// Abandon any pending installation.
    ///
    /// Stops listening for the completion signal and answers a still-waiting
    /// caller with `TORN_DOWN`. Safe to call repeatedly; the coordinator
    /// accepts new submissions afterwards.
    pub fn teardown(&self) {
        self.shared.teardown();
    }

    fn spawn_listener(&self, generation: u64, completion: CompletionReceiver) {
        let guard = ListenerGuard {
            shared: Arc::downgrade(&self.shared),
            generation,
            delivered: false,
        };
        let task = listen(guard, completion, self.shared.options.completion_timeout);
        let listener = self.shared.runtime.spawn(task).abort_handle();
        self.shared.attach_listener(generation, listener);
    }
}

impl std::fmt::Debug for InstallationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationCoordinator")
            .field("probe", &self.shared.probe)
            .field("options", &self.shared.options)
            .field("pending", &self.is_installation_pending())
            .finish()
    }
}

impl Shared {
    fn lock_slot(&self) -> MutexGuard<'_, Option<PendingSlot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Test-and-set. Returns the new generation, or `None` if occupied.
    fn occupy(&self, sink: ResultSink) -> Option<u64> {
        let mut slot = self.lock_slot();
        if slot.is_some() {
            return None;
        }
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        *slot = Some(PendingSlot {
            generation,
            sink,
            listener: None,
        });
        Some(generation)
    }

    fn dispatch(
        &self,
        request: &InstallationRequest,
        signal: CompletionSender,
    ) -> Result<(), SubmissionError> {
        let backend = &self.backend;
        catch_unwind(AssertUnwindSafe(|| backend.submit(request, signal))).unwrap_or_else(
            |panic| {
                Err(SubmissionError::Dispatch {
                    message: panic_message(panic.as_ref()),
                })
            },
        )
    }

    fn attach_listener(&self, generation: u64, listener: AbortHandle) {
        let stale = {
            let mut slot = self.lock_slot();
            match slot.as_mut() {
                Some(pending) if pending.generation == generation => {
                    pending.listener = Some(listener);
                    None
                }
                // Already answered or torn down.
                _ => Some(listener),
            }
        };
        // Aborting may drop the listener, whose guard takes the lock.
        if let Some(listener) = stale {
            listener.abort();
        }
    }

    /// Test-and-clear, then deliver outside the lock.
    fn finish(&self, generation: u64, outcome: InstallationOutcome) {
        let taken = {
            let mut slot = self.lock_slot();
            match slot.as_ref() {
                Some(pending) if pending.generation == generation => slot.take(),
                _ => None,
            }
        };

        match taken {
            Some(pending) => {
                tracing::info!(
                    generation,
                    status = %outcome.status(),
                    error_code = ?outcome.error_code(),
                    "eSIM installation finished"
                );
                pending.sink.deliver(outcome);
            }
            None => {
                tracing::warn!(
                    generation,
                    status = %outcome.status(),
                    "dropping eSIM outcome: installation is no longer pending"
                );
            }
        }
    }

    /// Answer `TORN_DOWN` if `generation` still holds the slot. Quiet when it
    /// does not, since that is the normal case after delivery or teardown.
    fn abandon(&self, generation: u64) {
        let taken = {
            let mut slot = self.lock_slot();
            match slot.as_ref() {
                Some(pending) if pending.generation == generation => slot.take(),
                _ => None,
            }
        };
        if let Some(pending) = taken {
            tracing::warn!(
                generation,
                "completion listener stopped before a result was delivered"
            );
            pending.sink.deliver(InstallationOutcome::torn_down());
        }
    }

    fn teardown(&self) {
        let Some(pending) = self.lock_slot().take() else {
            return;
        };
        if let Some(listener) = pending.listener {
            listener.abort();
        }
        tracing::warn!(
            generation = pending.generation,
            "tearing down with an eSIM installation still pending"
        );
        pending.sink.deliver(InstallationOutcome::torn_down());
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Delivery duty of one listener task.
///
/// If the task is dropped before delivering (runtime shutdown, a panic while
/// waiting), the slot is still cleared and the caller answered `TORN_DOWN`.
struct ListenerGuard {
    shared: Weak<Shared>,
    generation: u64,
    delivered: bool,
}

impl ListenerGuard {
    fn deliver(mut self, outcome: InstallationOutcome) {
        self.delivered = true;
        match self.shared.upgrade() {
            Some(shared) => shared.finish(self.generation, outcome),
            None => {
                tracing::debug!(
                    generation = self.generation,
                    "completion signal arrived after teardown"
                );
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.delivered {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.abandon(self.generation);
        }
    }
}

/// One-shot listener for a single generation's completion signal.
async fn listen(guard: ListenerGuard, completion: CompletionReceiver, limit: Option<Duration>) {
    let generation = guard.generation;
    let received = match limit {
        Some(limit) => tokio::time::timeout(limit, completion).await.ok(),
        None => Some(completion.await),
    };

    let Some(mapper) = guard.shared.upgrade().map(|shared| shared.mapper.clone()) else {
        guard.deliver(InstallationOutcome::torn_down());
        return;
    };

    let outcome = match received {
        Some(Ok(signal)) => {
            tracing::debug!(
                generation,
                result_code = signal.result_code,
                detail_code = signal.detail_code,
                "received native completion signal"
            );
            mapper.classify(signal.result_code, signal.detail_code)
        }
        Some(Err(_)) => InstallationOutcome::Failure {
            message: "The native layer released its completion handle without reporting a result."
                .to_string(),
            error_code: ERROR_CODE_COMPLETION_SIGNAL_DROPPED.to_string(),
            native_detail: None,
        },
        None => {
            tracing::warn!(generation, ?limit, "no completion signal before timeout");
            InstallationOutcome::Failure {
                message: format!(
                    "No result from the OS within {:?}; the consent dialog may have been abandoned.",
                    limit.unwrap_or_default()
                ),
                error_code: ERROR_CODE_TIMEOUT.to_string(),
                native_detail: None,
            }
        }
    };

    guard.deliver(outcome);
}

/// Creating a timer panics on a runtime built without `enable_time`.
fn timers_enabled() -> bool {
    catch_unwind(|| drop(tokio::time::sleep(Duration::ZERO))).is_ok()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("native dispatch panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("native dispatch panicked: {}", message)
    } else {
        "native dispatch panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CapabilityProbe, InstallStatus, ProbeError};
    use std::sync::atomic::AtomicUsize;

    struct FixedProbe(bool);

    impl CapabilityProbe for FixedProbe {
        fn is_provisioning_available(&self) -> Result<bool, ProbeError> {
            Ok(self.0)
        }
    }

    /// Keeps every completion handle so tests decide when the OS answers.
    #[derive(Default)]
    struct ManualBackend {
        calls: AtomicUsize,
        signals: Mutex<Vec<CompletionSender>>,
    }

    impl ManualBackend {
        fn fire(&self, result_code: i32, detail_code: i32) {
            let signal = self.signals.lock().unwrap().pop().expect("no signal held");
            signal.complete(result_code, detail_code);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProvisioningBackend for ManualBackend {
        fn submit(
            &self,
            _request: &InstallationRequest,
            signal: CompletionSender,
        ) -> Result<(), SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.signals.lock().unwrap().push(signal);
            Ok(())
        }
    }

    struct FailingBackend {
        error: SubmissionError,
        kept: Mutex<Option<CompletionSender>>,
    }

    impl ProvisioningBackend for FailingBackend {
        fn submit(
            &self,
            _request: &InstallationRequest,
            signal: CompletionSender,
        ) -> Result<(), SubmissionError> {
            *self.kept.lock().unwrap() = Some(signal);
            Err(self.error.clone())
        }
    }

    struct PanickingBackend;

    impl ProvisioningBackend for PanickingBackend {
        fn submit(
            &self,
            _request: &InstallationRequest,
            _signal: CompletionSender,
        ) -> Result<(), SubmissionError> {
            panic!("binder transaction failed");
        }
    }

    /// Answers inside `submit`, before the listener exists.
    struct EagerBackend {
        result_code: i32,
    }

    impl ProvisioningBackend for EagerBackend {
        fn submit(
            &self,
            _request: &InstallationRequest,
            signal: CompletionSender,
        ) -> Result<(), SubmissionError> {
            signal.complete(self.result_code, 0);
            Ok(())
        }
    }

    struct ForgetfulBackend;

    impl ProvisioningBackend for ForgetfulBackend {
        fn submit(
            &self,
            _request: &InstallationRequest,
            signal: CompletionSender,
        ) -> Result<(), SubmissionError> {
            drop(signal);
            Ok(())
        }
    }

    fn coordinator(
        available: bool,
        backend: Arc<dyn ProvisioningBackend>,
        options: CoordinatorOptions,
    ) -> InstallationCoordinator {
        let probe = ProbeAdapter::new(Arc::new(FixedProbe(available)));
        InstallationCoordinator::new(probe, backend, options).unwrap()
    }

    fn request() -> InstallationRequest {
        InstallationRequest::new("LPA:1$smdp.example.com$MATCHING_ID")
    }

    async fn within(pending: impl std::future::Future<Output = InstallationOutcome>) -> InstallationOutcome {
        tokio::time::timeout(Duration::from_secs(5), pending)
            .await
            .expect("outcome should be delivered")
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = InstallationCoordinator::new(
            ProbeAdapter::absent(),
            Arc::new(ManualBackend::default()),
            CoordinatorOptions::default(),
        );
        assert!(matches!(result, Err(CoordinatorError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn test_capability_gate_leaves_slot_empty() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(false, backend.clone(), CoordinatorOptions::default());

        let submission = coordinator.submit(request());
        assert!(submission.is_immediate());
        assert_eq!(
            submission.outcome().await.status(),
            InstallStatus::EsimDisabledOrUnavailable
        );
        assert!(!coordinator.is_installation_pending());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_completion_signal_resolves_caller() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());

        let submission = coordinator.submit(request());
        assert!(!submission.is_immediate());
        assert!(coordinator.is_installation_pending());

        backend.fire(0, 0);
        let outcome = within(submission.outcome()).await;
        assert!(outcome.is_success());
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_second_submission_is_rejected_without_disturbing_first() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());

        let first = coordinator.submit(request());
        let second = coordinator.submit(request());

        assert!(second.is_immediate());
        let rejected = second.outcome().await;
        assert_eq!(rejected.status(), InstallStatus::Failure);
        assert_eq!(rejected.error_code(), Some("INSTALLATION_IN_PROGRESS"));
        assert_eq!(backend.calls(), 1);
        assert!(coordinator.is_installation_pending());

        backend.fire(2, 7);
        let outcome = within(first.outcome()).await;
        assert_eq!(outcome.status(), InstallStatus::Failure);
        assert_eq!(outcome.error_code(), Some("2"));
    }

    #[tokio::test]
    async fn test_slot_is_reusable_after_completion() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());

        let first = coordinator.submit(request());
        backend.fire(0, 0);
        within(first.outcome()).await;

        let second = coordinator.submit(request());
        assert!(!second.is_immediate());
        backend.fire(0, 0);
        assert!(within(second.outcome()).await.is_success());
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_submission_error_is_delivered_synchronously() {
        let backend = Arc::new(FailingBackend {
            error: SubmissionError::NullSubscription,
            kept: Mutex::new(None),
        });
        let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());

        let Submission::Deferred(mut pending) = coordinator.submit(request()) else {
            panic!("submission errors are delivered through the slot");
        };
        let outcome = pending.try_outcome().expect("outcome delivered before submit returned");

        assert_eq!(outcome.status(), InstallStatus::InvalidActivationCode);
        assert_eq!(outcome.error_code(), Some("NULL_SUBSCRIPTION_OBJECT"));
        assert!(!coordinator.is_installation_pending());

        let kept = backend.kept.lock().unwrap().take().unwrap();
        assert!(kept.is_abandoned(), "listener must be deregistered");
    }

    #[tokio::test]
    async fn test_security_error_is_not_permitted() {
        let backend = Arc::new(FailingBackend {
            error: SubmissionError::Security {
                message: "no carrier privileges".to_string(),
            },
            kept: Mutex::new(None),
        });
        let coordinator = coordinator(true, backend, CoordinatorOptions::default());

        let outcome = coordinator.submit(request()).outcome().await;
        assert_eq!(outcome.status(), InstallStatus::NotSupportedOrPermitted);
        assert_eq!(outcome.error_code(), Some("SECURITY_EXCEPTION"));
        assert_eq!(outcome.native_detail(), Some("no carrier privileges"));
    }

    #[tokio::test]
    async fn test_panicking_backend_is_generic_failure() {
        let coordinator = coordinator(true, Arc::new(PanickingBackend), CoordinatorOptions::default());

        let outcome = coordinator.submit(request()).outcome().await;
        assert_eq!(outcome.error_code(), Some("GENERIC_INIT_FAILURE"));
        assert!(outcome.message().contains("binder transaction failed"));
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_dropped_signal_is_reported() {
        let coordinator = coordinator(true, Arc::new(ForgetfulBackend), CoordinatorOptions::default());

        let outcome = within(coordinator.submit(request()).outcome()).await;
        assert_eq!(outcome.error_code(), Some("COMPLETION_SIGNAL_DROPPED"));
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_timeout_answers_caller() {
        let backend = Arc::new(ManualBackend::default());
        let options = CoordinatorOptions {
            completion_timeout: Some(Duration::from_millis(20)),
            ..Default::default()
        };
        let coordinator = coordinator(true, backend.clone(), options);

        let outcome = within(coordinator.submit(request()).outcome()).await;
        assert_eq!(outcome.status(), InstallStatus::Failure);
        assert_eq!(outcome.error_code(), Some("TIMEOUT"));
        assert!(!coordinator.is_installation_pending());

        // A late signal is dropped without effect.
        backend.fire(0, 0);
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_teardown_answers_caller_once() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());

        let submission = coordinator.submit(request());
        coordinator.teardown();
        coordinator.teardown();

        let outcome = within(submission.outcome()).await;
        assert_eq!(outcome.error_code(), Some("TORN_DOWN"));
        assert!(!coordinator.is_installation_pending());

        backend.fire(0, 0);
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_dropping_last_handle_tears_down() {
        let backend = Arc::new(ManualBackend::default());
        let coordinator = coordinator(true, backend, CoordinatorOptions::default());
        let clone = coordinator.clone();

        let submission = coordinator.submit(request());
        drop(coordinator);
        drop(clone);

        let outcome = within(submission.outcome()).await;
        assert_eq!(outcome.error_code(), Some("TORN_DOWN"));
    }

    #[tokio::test]
    async fn test_synchronous_completion_is_delivered() {
        let backend = Arc::new(EagerBackend { result_code: 0 });
        let coordinator = coordinator(true, backend, CoordinatorOptions::default());

        let submission = coordinator.submit(request());
        assert!(!submission.is_immediate());

        let outcome = within(submission.outcome()).await;
        assert_eq!(outcome.status(), InstallStatus::Success);
        assert!(!coordinator.is_installation_pending());

        // The slot is free again.
        assert!(!coordinator.submit(request()).is_immediate());
    }

    #[test]
    fn test_runtime_without_timer_is_rejected() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let result = runtime.block_on(async {
            InstallationCoordinator::new(
                ProbeAdapter::new(Arc::new(FixedProbe(true))),
                Arc::new(ManualBackend::default()),
                CoordinatorOptions::default(),
            )
        });
        assert!(matches!(result, Err(CoordinatorError::TimerDisabled)));
    }

    #[test]
    fn test_runtime_without_timer_works_without_timeout() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let backend = Arc::new(ManualBackend::default());
        let options = CoordinatorOptions {
            completion_timeout: None,
            ..Default::default()
        };

        let outcome = runtime.block_on(async {
            let coordinator = coordinator(true, backend.clone(), options);
            let submission = coordinator.submit(request());
            backend.fire(0, 0);
            submission.outcome().await
        });
        assert!(outcome.is_success());
    }

    #[test]
    fn test_runtime_shutdown_answers_pending_caller() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let backend = Arc::new(ManualBackend::default());

        let (coordinator, submission) = runtime.block_on(async {
            let coordinator = coordinator(true, backend.clone(), CoordinatorOptions::default());
            let submission = coordinator.submit(request());
            (coordinator, submission)
        });
        assert!(coordinator.is_installation_pending());

        // Shutting down drops the listener task before the OS answers.
        drop(runtime);
        assert!(!coordinator.is_installation_pending());

        let Submission::Deferred(mut pending) = submission else {
            panic!("installation should have been accepted");
        };
        let outcome = pending.try_outcome().expect("caller should be answered");
        assert_eq!(outcome.error_code(), Some("TORN_DOWN"));

        // A signal arriving afterwards changes nothing.
        backend.fire(0, 0);
        assert!(!coordinator.is_installation_pending());
    }

    #[tokio::test]
    async fn test_ios_table_is_used_for_ios_platform() {
        let backend = Arc::new(ManualBackend::default());
        let options = CoordinatorOptions {
            platform: Platform::Ios,
            ..Default::default()
        };
        let coordinator = coordinator(true, backend.clone(), options);
        assert_eq!(coordinator.platform(), Platform::Ios);

        let submission = coordinator.submit(request());
        backend.fire(3, 0);
        let outcome = within(submission.outcome()).await;
        assert_eq!(outcome.status(), InstallStatus::UserCancelled);
    }

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "native dispatch panicked: boom");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "native dispatch panicked: bang");

        let boxed: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "native dispatch panicked");
    }
}
