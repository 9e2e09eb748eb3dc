//! Native collaborator seams.
//!
//! The host application implements these traits on top of the platform
//! APIs. The coordinator only ever talks to the native layer through them:
//!
//! - [`CapabilityProbe`]: synchronous "can this device provision eSIMs?" check
//! - [`ProvisioningBackend`]: fire-and-forget dispatch of one installation
//! - [`CompletionSender`]: the handle the backend fires, from any thread,
//!   once the OS reports the result

mod backend;
mod probe;
mod signal;

pub use backend::ProvisioningBackend;
pub use probe::{CapabilityProbe, ProbeAdapter};
pub use signal::{CompletionSender, NativeCompletion};

pub(crate) use signal::{completion_channel, CompletionReceiver};
