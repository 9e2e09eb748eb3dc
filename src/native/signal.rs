//! One-shot completion signal between the native layer and the coordinator.

use tokio::sync::oneshot;

/// Raw result reported by the native layer when an installation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCompletion {
    /// Primary result code (e.g. `EMBEDDED_SUBSCRIPTION_RESULT_*` or the
    /// raw value of the plan provisioning result).
    pub result_code: i32,
    /// Secondary detail code, `0` when the platform has none.
    pub detail_code: i32,
}

impl NativeCompletion {
    pub fn new(result_code: i32, detail_code: i32) -> Self {
        Self {
            result_code,
            detail_code,
        }
    }
}

pub(crate) type CompletionReceiver = oneshot::Receiver<NativeCompletion>;

/// Handle the native layer fires exactly once when an installation finishes.
///
/// It is `Send` and can be moved into an OS callback or broadcast receiver
/// and fired from whatever thread the platform chooses. Firing never blocks
/// and never fails loudly: a signal nobody is listening for any more is
/// logged and dropped.
///
/// Dropping the sender without firing it tells the coordinator the signal
/// will never arrive.
#[derive(Debug)]
pub struct CompletionSender {
    tx: oneshot::Sender<NativeCompletion>,
}

impl CompletionSender {
    /// Report the native result.
    pub fn complete(self, result_code: i32, detail_code: i32) {
        let completion = NativeCompletion::new(result_code, detail_code);
        if self.tx.send(completion).is_err() {
            tracing::warn!(
                result_code,
                detail_code,
                "dropping completion signal: no installation is listening for it"
            );
        }
    }

    /// Check if the coordinator has stopped listening for this signal.
    ///
    /// True after a submission error, a timeout or teardown.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

pub(crate) fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    let (tx, rx) = oneshot::channel();
    (CompletionSender { tx }, rx)
}
