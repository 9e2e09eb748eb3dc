//! Method-call bridge between the application layer and the coordinator.

use crate::{
    BridgeError, InstallationCoordinator, InstallationRequest, InstallationResponse,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Channel name both sides of the transport register under. Existing
/// application layers connect to this exact name.
pub const CHANNEL_NAME: &str = "next.myais.mobile_and_device/esim_channel";

/// Method: report whether eSIM provisioning is available.
pub const METHOD_IS_ESIM_SUPPORTED: &str = "isEsimSupported";

/// Method: install a profile from an activation code.
pub const METHOD_START_ESIM_INSTALLATION: &str = "startEsimInstallation";

/// A method call received from the application layer.
///
/// # Example
///
/// ```rust
/// use esim_provisioning::MethodCall;
/// use serde_json::json;
///
/// let call = MethodCall::new(
///     "startEsimInstallation",
///     json!({ "activationCode": "LPA:1$smdp.example.com$ID" }),
/// );
/// assert_eq!(call.method, "startEsimInstallation");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
    /// Method name.
    pub method: String,
    /// Method arguments, `null` when the call has none.
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartInstallationArgs {
    activation_code: String,
    #[serde(default)]
    options: Value,
}

/// Dispatches method calls to the capability probe and the coordinator.
///
/// Caller mistakes (missing activation code, unknown method) are rejected
/// here as [`BridgeError`] without touching the coordinator. Everything else,
/// including gate rejections, comes back as a normal
/// [`InstallationResponse`].
///
/// # Example
///
/// ```rust,no_run
/// use esim_provisioning::{EsimBridge, InstallationCoordinator, MethodCall};
/// use serde_json::json;
///
/// async fn serve(coordinator: InstallationCoordinator) {
///     let bridge = EsimBridge::new(coordinator);
///     let reply = bridge
///         .handle(MethodCall::new(
///             "startEsimInstallation",
///             json!({ "activationCode": "LPA:1$smdp.example.com$ID" }),
///         ))
///         .await;
///     match reply {
///         Ok(value) => println!("{}", value),
///         Err(e) => println!("{}: {}", e.code(), e),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EsimBridge {
    coordinator: InstallationCoordinator,
}

impl EsimBridge {
    pub fn new(coordinator: InstallationCoordinator) -> Self {
        Self { coordinator }
    }

    /// The coordinator behind this bridge.
    pub fn coordinator(&self) -> &InstallationCoordinator {
        &self.coordinator
    }

    /// Handle one method call and produce its reply.
    pub async fn handle(&self, call: MethodCall) -> Result<Value, BridgeError> {
        tracing::debug!(method = %call.method, "handling method call");

        match call.method.as_str() {
            METHOD_IS_ESIM_SUPPORTED => Ok(Value::Bool(self.is_esim_supported())),
            METHOD_START_ESIM_INSTALLATION => {
                let request = parse_installation_request(call.arguments)?;
                let response = self.start_esim_installation(request).await;
                Ok(serde_json::to_value(response)?)
            }
            _ => Err(BridgeError::NotImplemented {
                method: call.method,
            }),
        }
    }

    /// Report whether eSIM provisioning is available.
    pub fn is_esim_supported(&self) -> bool {
        self.coordinator.is_supported()
    }

    /// Submit an installation and wait for its response.
    pub async fn start_esim_installation(
        &self,
        request: InstallationRequest,
    ) -> InstallationResponse {
        let outcome = self.coordinator.submit(request).outcome().await;
        InstallationResponse::from(outcome)
    }

    /// Detach from the transport, answering any pending caller.
    pub fn detach(&self) {
        self.coordinator.teardown();
    }
}

fn parse_installation_request(arguments: Value) -> Result<InstallationRequest, BridgeError> {
    let args: StartInstallationArgs =
        serde_json::from_value(arguments).map_err(|e| BridgeError::InvalidArguments {
            message: format!("Activation code is required and must be a string ({})", e),
        })?;

    Ok(InstallationRequest::with_options(
        args.activation_code,
        parse_options(args.options),
    ))
}

/// Options must be a map of strings. Anything else is ignored as a whole.
fn parse_options(options: Value) -> HashMap<String, String> {
    if options.is_null() {
        return HashMap::new();
    }
    serde_json::from_value(options).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring malformed installation options");
        HashMap::new()
    })
}
