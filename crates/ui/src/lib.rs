//! Component layer: a tree of UI components and the plugin mechanism that
//! mixes host-bridge methods into every one of them.
//!
//! Installing a [`BridgePlugin`] gives each component `alert` and `nim_call`
//! methods backed by a shared [`HostBridge`]. Plugins apply to components
//! already mounted and to every component mounted afterwards; a component
//! created before the plugin was registered behaves identically to one
//! created after.

use std::{collections::BTreeMap, sync::Arc};

use {
    nimbridge_bridge::{CallFrame, Completion, Context, Error, HostBridge, Result},
    nimbridge_protocol::DEFAULT_BINDING,
    tracing::{debug, info},
};

// ── Component ────────────────────────────────────────────────────────────────

/// Identity of a mounted component within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One mounted UI component.
///
/// Components carry no host access of their own; the bridge handle arrives
/// through plugin installation.
pub struct Component {
    id: ComponentId,
    name: String,
    bridge: Option<Arc<HostBridge>>,
}

impl Component {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a bridge plugin has installed host access on this component.
    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    /// Surface a message through the host, coercing the argument to a string.
    pub async fn alert(&self, message: impl std::fmt::Display) -> Result<()> {
        self.bridge()?.alert(message).await
    }

    /// Dispatch a call frame to the host and return its completion handle.
    pub async fn nim_call(&self, frame: CallFrame) -> Result<Completion> {
        self.bridge()?.call(frame).await
    }

    fn bridge(&self) -> Result<&HostBridge> {
        match &self.bridge {
            Some(bridge) => Ok(bridge),
            None => Err(Error::MissingHostBinding {
                binding: DEFAULT_BINDING.to_owned(),
            }),
        }
    }
}

// ── Plugins ──────────────────────────────────────────────────────────────────

/// Extension installed on every component of a tree.
pub trait UiPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Install the plugin's capabilities on one component. Called once per
    /// component; installation must be idempotent across re-registration.
    fn install(&self, component: &mut Component);
}

/// Plugin mixing the host-bridge methods into every component.
pub struct BridgePlugin {
    bridge: Arc<HostBridge>,
}

impl BridgePlugin {
    pub fn new(bridge: Arc<HostBridge>) -> Self {
        Self { bridge }
    }
}

impl UiPlugin for BridgePlugin {
    fn name(&self) -> &str {
        "host-bridge"
    }

    fn install(&self, component: &mut Component) {
        component.bridge = Some(self.bridge.clone());
    }
}

// ── Component tree ───────────────────────────────────────────────────────────

/// Tree of mounted components plus the plugins applied to all of them.
#[derive(Default)]
pub struct ComponentTree {
    components: BTreeMap<ComponentId, Component>,
    plugins: Vec<Arc<dyn UiPlugin>>,
    next_id: u64,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a new component, applying every registered plugin to it.
    pub fn mount(&mut self, name: impl Into<String>) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;

        let mut component = Component {
            id,
            name: name.into(),
            bridge: None,
        };
        for plugin in &self.plugins {
            plugin.install(&mut component);
        }
        debug!(component = %id, name = component.name, "mounted component");
        self.components.insert(id, component);
        id
    }

    /// Remove a component from the tree.
    pub fn unmount(&mut self, id: ComponentId) -> Result<()> {
        self.components
            .remove(&id)
            .map(|_| ())
            .with_context(|| format!("component {id} is not mounted"))
    }

    /// Register a plugin, applying it to every component already mounted and
    /// to every component mounted from now on.
    pub fn register_plugin(&mut self, plugin: Arc<dyn UiPlugin>) {
        info!(plugin = plugin.name(), components = self.components.len(), "registering plugin");
        for component in self.components.values_mut() {
            plugin.install(component);
        }
        self.plugins.push(plugin);
    }

    pub fn get(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(&id)
            .with_context(|| format!("component {id} is not mounted"))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over mounted components in mount order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }
}
