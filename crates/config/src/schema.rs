use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NimbridgeConfig {
    pub host: HostConfig,
    pub logging: LoggingConfig,
}

/// Host binding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Name of the global object the host installs its entry points on.
    pub binding: String,
    /// What the bridge does when invoked with no host endpoint installed.
    pub on_missing_binding: MissingBindingPolicy,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            binding: nimbridge_binding_default(),
            on_missing_binding: MissingBindingPolicy::default(),
        }
    }
}

fn nimbridge_binding_default() -> String {
    "nimUi".to_owned()
}

/// Behavior when a bridge method is invoked without a host endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBindingPolicy {
    /// Fail the call with a missing-host-binding error.
    #[default]
    Error,
    /// Log a warning and treat the call as a no-op.
    Ignore,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit logs as JSON instead of human-readable lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}
