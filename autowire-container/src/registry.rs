//! Definition store: bound factories, lifecycle policies, interface
//! bindings and the literal parameter table.
//!
//! The registry only stores recipes. Resolved values live in the
//! [`LifecycleCache`](crate::cache::LifecycleCache).

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::definition::Instance;
use crate::error::Result;
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;

/// Type alias for factory functions.
///
/// A factory receives the [`Resolver`] (to resolve its own dependencies)
/// and returns an [`Instance`] or an error.
///
/// # Why `Arc` and not `Box`?
/// Factories are cloned out of the registry before they run, so no lock is
/// held while user code re-enters the container.
pub type FactoryFn = Arc<dyn Fn(&dyn Resolver) -> Result<Instance> + Send + Sync>;

/// Trait for resolving services from inside factories.
///
/// The resolver handed to a factory carries the current resolution path,
/// so a factory that asks for a key already being built fails with
/// [`AutowireError::CircularDependency`](crate::error::AutowireError::CircularDependency)
/// instead of recursing forever.
pub trait Resolver {
    /// Cached-or-built lookup with the full precedence chain.
    fn get(&self, key: &str) -> Result<Instance>;

    /// Always builds a new value, bypassing the lifecycle cache.
    fn make(&self, key: &str) -> Result<Instance>;

    /// `get` for shared keys, a fresh instantiation pass otherwise.
    fn resolve(&self, key: &str) -> Result<Instance>;

    /// Runs an instantiation pass for `class`, ignoring bindings and cache.
    fn construct(&self, class: &str) -> Result<Instance>;

    /// Looks up the literal parameter table.
    fn parameter(&self, name: &str) -> Option<Instance>;
}

impl dyn Resolver + '_ {
    /// Typed [`Resolver::get`].
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        self.get(key)?.downcast_for(key)
    }

    /// Typed [`Resolver::make`].
    pub fn make_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        self.make(key)?.downcast_for(key)
    }

    /// Typed [`Resolver::resolve`].
    pub fn resolve_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        self.resolve(key)?.downcast_for(key)
    }
}

/// How an abstract key is satisfied when it is not itself a class.
#[derive(Clone)]
pub enum InterfaceBinding {
    /// An implementation resolved eagerly at registration time.
    Implementation(Instance),
    /// A factory invoked on every instantiation pass that needs the interface.
    Factory(FactoryFn),
}

impl std::fmt::Debug for InterfaceBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterfaceBinding::Implementation(instance) => {
                f.debug_tuple("Implementation").field(instance).finish()
            }
            InterfaceBinding::Factory(_) => f.write_str("Factory(<fn>)"),
        }
    }
}

/// A factory bound to a key with `bind`.
#[derive(Clone)]
pub(crate) struct Binding {
    pub factory: FactoryFn,
    /// Class the factory instantiates, when the binding came from a class name.
    pub class: Option<ServiceKey>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Stores every recipe registered with a container.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    bindings: HashMap<ServiceKey, Binding>,
    policies: HashMap<ServiceKey, Lifecycle>,
    interfaces: HashMap<ServiceKey, InterfaceBinding>,
    parameters: HashMap<String, Instance>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a factory to a key, replacing any previous binding.
    pub fn bind(&mut self, key: ServiceKey, binding: Binding) {
        debug!(key = %key, class = ?binding.class, "Bound factory");
        self.bindings.insert(key, binding);
    }

    /// Returns a clone of the binding for `key`.
    pub fn binding(&self, key: &str) -> Option<Binding> {
        self.bindings.get(key).cloned()
    }

    /// Sets the lifecycle policy of `key`, replacing the previous one.
    pub fn set_policy(&mut self, key: ServiceKey, lifecycle: Lifecycle) {
        trace!(key = %key, lifecycle = %lifecycle, "Set lifecycle");
        self.policies.insert(key, lifecycle);
    }

    /// Sets the policy of `key` only if it has none yet.
    pub fn ensure_policy(&mut self, key: ServiceKey, lifecycle: Lifecycle) {
        self.policies.entry(key).or_insert(lifecycle);
    }

    /// Explicit policy of `key`, if any.
    pub fn policy(&self, key: &str) -> Option<Lifecycle> {
        self.policies.get(key).copied()
    }

    /// Registers an interface binding, replacing any previous one.
    pub fn bind_interface(&mut self, key: ServiceKey, binding: InterfaceBinding) {
        debug!(key = %key, binding = ?binding, "Bound interface");
        self.interfaces.insert(key, binding);
    }

    /// Returns a clone of the interface binding for `key`.
    pub fn interface(&self, key: &str) -> Option<InterfaceBinding> {
        self.interfaces.get(key).cloned()
    }

    /// Writes the literal parameter table.
    pub fn set_parameter(&mut self, name: String, value: Instance) {
        trace!(name = %name, "Set literal parameter");
        self.parameters.insert(name, value);
    }

    /// Reads the literal parameter table.
    pub fn parameter(&self, name: &str) -> Option<Instance> {
        self.parameters.get(name).cloned()
    }

    /// True if `key` has a bound factory or an interface binding.
    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key) || self.interfaces.contains_key(key)
    }

    /// All bindings (for validation).
    pub fn bindings(&self) -> &HashMap<ServiceKey, Binding> {
        &self.bindings
    }

    /// Keys of every binding and interface (for suggestions).
    pub fn registered_keys(&self) -> Vec<ServiceKey> {
        let mut keys: Vec<_> = self.bindings.keys().cloned().collect();
        keys.extend(self.interfaces.keys().cloned());
        keys
    }

    /// Keys with an interface binding (for validation).
    pub fn interface_keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.interfaces.keys()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}
