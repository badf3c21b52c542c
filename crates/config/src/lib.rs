//! Configuration loading and env substitution.
//!
//! Config files: `nimbridge.toml`, `nimbridge.yaml`, or `nimbridge.json`
//! Searched in `./` then `~/.config/nimbridge/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use crate::{
    loader::{config_dir, discover_and_load, load_config},
    schema::{HostConfig, LoggingConfig, MissingBindingPolicy, NimbridgeConfig},
};
