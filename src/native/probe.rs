//! Capability probe and its never-failing adapter.

use crate::ProbeError;
use std::sync::Arc;

/// Synchronous check of whether the device can provision eSIM profiles.
///
/// Maps to `EuiccManager.isEnabled` on Android and
/// `CTCellularPlanProvisioning.supportsCellularPlan()` on iOS.
pub trait CapabilityProbe: Send + Sync {
    /// Ask the native layer whether provisioning is available right now.
    fn is_provisioning_available(&self) -> Result<bool, ProbeError>;
}

/// Stateless wrapper that turns every probe failure into `false`.
///
/// The native service may be missing entirely (no eUICC, OS too old) or the
/// query itself may fail. Callers only ever see a boolean.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::ProbeAdapter;
///
/// let probe = ProbeAdapter::absent();
/// assert!(!probe.is_supported());
/// ```
#[derive(Clone, Default)]
pub struct ProbeAdapter {
    service: Option<Arc<dyn CapabilityProbe>>,
}

impl ProbeAdapter {
    /// Wrap an available native service.
    pub fn new(service: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            service: Some(service),
        }
    }

    /// Adapter for a device where the native service does not exist.
    pub fn absent() -> Self {
        Self { service: None }
    }

    /// Report whether eSIM provisioning is available.
    pub fn is_supported(&self) -> bool {
        let Some(service) = &self.service else {
            tracing::debug!("capability probe: native provisioning service is absent");
            return false;
        };

        match service.is_provisioning_available() {
            Ok(available) => {
                tracing::debug!(available, "capability probe answered");
                available
            }
            Err(e) => {
                tracing::warn!(error = %e, "capability probe failed, reporting unsupported");
                false
            }
        }
    }
}

impl std::fmt::Debug for ProbeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeAdapter")
            .field("service_present", &self.service.is_some())
            .finish()
    }
}
