//! Coordinator options configuration.
//!
//! This module provides the [`CoordinatorOptions`] struct for configuring
//! the installation coordinator, including the completion timeout and the
//! platform whose result table is used.

use crate::Platform;
use std::time::Duration;

/// Configuration options for the installation coordinator.
///
/// # Default Behavior
///
/// The default completion timeout is 10 minutes. The native layers offer no
/// timeout of their own, and a user who leaves the system consent UI open
/// would otherwise keep the caller waiting until teardown.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::{CoordinatorOptions, Platform};
/// use std::time::Duration;
///
/// // Use default options (10 minute timeout, Android result table)
/// let opts = CoordinatorOptions::default();
///
/// // iOS with a shorter timeout
/// let opts = CoordinatorOptions {
///     platform: Platform::Ios,
///     completion_timeout: Some(Duration::from_secs(120)),
/// };
///
/// // Wait for the native signal indefinitely
/// let opts = CoordinatorOptions {
///     completion_timeout: None,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    /// Maximum time to wait for the native completion signal.
    ///
    /// On expiry the pending caller receives a `TIMEOUT` failure. `None`
    /// waits until the signal arrives or the coordinator is torn down.
    ///
    /// Default: 10 minutes
    pub completion_timeout: Option<Duration>,

    /// Platform whose result table classifies completion signals.
    ///
    /// Default: [`Platform::Android`]
    pub platform: Platform,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            completion_timeout: Some(Duration::from_secs(600)),
            platform: Platform::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let opts = CoordinatorOptions::default();
        assert_eq!(opts.completion_timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_default_platform() {
        let opts = CoordinatorOptions::default();
        assert_eq!(opts.platform, Platform::Android);
    }

    #[test]
    fn test_disable_timeout() {
        let opts = CoordinatorOptions {
            completion_timeout: None,
            ..Default::default()
        };
        assert!(opts.completion_timeout.is_none());
        assert_eq!(opts.platform, Platform::Android);
    }

    #[test]
    fn test_clone() {
        let opts = CoordinatorOptions {
            completion_timeout: Some(Duration::from_secs(5)),
            platform: Platform::Ios,
        };
        let cloned = opts.clone();
        assert_eq!(opts.completion_timeout, cloned.completion_timeout);
        assert_eq!(opts.platform, cloned.platform);
    }
}
