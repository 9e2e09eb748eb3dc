//! Platform enum identifying the native provisioning subsystem.

use crate::install::{EuiccResultMapper, PlanProvisioningResultMapper, ResultMapper};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// The native provisioning subsystem a coordinator talks to.
///
/// Each platform reports installation results through its own code
/// enumeration, so each one carries its own default result table.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new platforms
/// in future versions.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::Platform;
///
/// for platform in Platform::all() {
///     println!("{}: {}", platform.display_name(), platform.native_service_name());
/// }
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[non_exhaustive]
pub enum Platform {
    /// Android embedded UICC download manager.
    #[default]
    Android,
    /// iOS cellular plan provisioning service.
    Ios,
}

impl Platform {
    /// Human-readable display name for the platform.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esim_provisioning::Platform;
    ///
    /// assert_eq!(Platform::Ios.display_name(), "iOS");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// Name of the native service that performs the installation.
    pub fn native_service_name(&self) -> &'static str {
        match self {
            Self::Android => "EuiccManager",
            Self::Ios => "CTCellularPlanProvisioning",
        }
    }

    /// Default result table for this platform.
    ///
    /// The iOS table assumes an OS that reports user cancellation. Hosts on
    /// older releases should construct a [`PlanProvisioningResultMapper`]
    /// themselves.
    ///
    /// # Example
    ///
    /// ```rust
    /// use esim_provisioning::{InstallStatus, Platform, ResultMapper};
    ///
    /// let mapper = Platform::Android.result_mapper();
    /// assert_eq!(mapper.classify(0, 0).status(), InstallStatus::Success);
    /// ```
    pub fn result_mapper(&self) -> Arc<dyn ResultMapper> {
        match self {
            Self::Android => Arc::new(EuiccResultMapper),
            Self::Ios => Arc::new(PlanProvisioningResultMapper::new(true)),
        }
    }

    /// Iterator over all known platforms.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
