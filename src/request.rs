//! Installation request value object.

use std::collections::HashMap;

/// Option key for an SM-DP+ confirmation code.
pub const OPTION_CONFIRMATION_CODE: &str = "confirmationCode";

/// A request to install one carrier profile.
///
/// The activation code is opaque: the coordinator never inspects it, and
/// validation is left to the native layer. The request cannot be modified
/// once built.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::InstallationRequest;
///
/// let request = InstallationRequest::new("LPA:1$smdp.example.com$MATCHING_ID")
///     .with_option("confirmationCode", "1234");
/// assert_eq!(request.confirmation_code(), Some("1234"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRequest {
    activation_code: String,
    options: HashMap<String, String>,
}

impl InstallationRequest {
    /// Create a request with no options.
    pub fn new(activation_code: impl Into<String>) -> Self {
        Self {
            activation_code: activation_code.into(),
            options: HashMap::new(),
        }
    }

    /// Create a request carrying the given options.
    pub fn with_options(activation_code: impl Into<String>, options: HashMap<String, String>) -> Self {
        Self {
            activation_code: activation_code.into(),
            options,
        }
    }

    /// Add a single option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The activation code exactly as supplied.
    pub fn activation_code(&self) -> &str {
        &self.activation_code
    }

    /// All caller-supplied options.
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }

    /// Look up one option by key.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Confirmation code, if the caller supplied one.
    pub fn confirmation_code(&self) -> Option<&str> {
        self.option(OPTION_CONFIRMATION_CODE)
    }

    /// Activation code with everything after the SM-DP+ address masked.
    ///
    /// Matching IDs are credentials, so this is the form used in log output.
    pub(crate) fn redacted_code(&self) -> String {
        let mut parts = self.activation_code.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(format), Some(address), Some(_)) => format!("{}${}$***", format, address),
            _ => "***".to_string(),
        }
    }
}
