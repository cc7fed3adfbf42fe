//! # The Container: the resolution engine
//!
//! Turns a bare service key into a fully wired object graph.
//!
//! # Architecture
//! ```text
//! get(key) ──> lifecycle cache ──hit──> instance
//!                 │ miss
//!                 ▼
//!              bound factory ──> invoke ──┐
//!                 │ none                  │
//!                 ▼                       ▼
//!              instantiate(key)      cache if Shared
//!                 │
//!   class? ──no──> interface binding / ServiceNotFound
//!                 │ yes
//!                 ▼
//!   each parameter: declared type → default → ambient → literal table
//! ```
//!
//! # Examples
//! ```rust
//! use autowire_container::prelude::*;
//! use std::sync::Arc;
//!
//! struct Logger;
//! struct Mailer {
//!     logger: Arc<Logger>,
//! }
//!
//! let container = Container::builder()
//!     .class(ClassDescriptor::new("Logger", |_| Ok(Logger)))
//!     .class(
//!         ClassDescriptor::new("Mailer", |args| Ok(Mailer { logger: args.take()? }))
//!             .param(Parameter::typed("logger", "Logger")),
//!     )
//!     .build()
//!     .expect("Failed to build container");
//!
//! let mailer: Arc<Mailer> = container.get_as("Mailer").expect("Failed to resolve");
//! let logger: Arc<Logger> = container.get_as("Logger").expect("Failed to resolve");
//! assert!(Arc::ptr_eq(&mailer.logger, &logger));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use autowire_support::rendering::suggest_similar;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, instrument, trace};

use crate::cache::{CacheEntry, LifecycleCache};
use crate::class::{Arguments, ClassCatalog, ClassDescriptor, Injectable, Parameter, global_catalog};
use crate::definition::{Definition, Instance};
use crate::error::{AutowireError, Result, ServiceNotFoundError, UnresolvableParameterError};
use crate::graph::{DependencyInfo, GraphValidator, ResolutionPath};
use crate::host::{AMBIENT_KEY, Host};
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;
use crate::loader::{self, ConfigDocument, LoadReport};
use crate::provider::Provider;
use crate::registry::{Binding, FactoryFn, InterfaceBinding, Registry, Resolver};

// ============================================================
// ContainerBuilder
// ============================================================

/// Builds a [`Container`] with classes, a host and bulk-loaded documents.
///
/// Everything the builder does can also be done later on the container
/// itself; the builder only fixes the order: settings, classes, host,
/// providers, then documents.
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .default_lifecycle(Lifecycle::Shared)
///     .injectable::<Mailer>()
///     .host(|| Instance::new(app.clone()))
///     .config_file("services.json")
///     .build()?;
/// ```
pub struct ContainerBuilder {
    default_lifecycle: Lifecycle,
    classes: Vec<ClassDescriptor>,
    host: Option<Arc<dyn Host>>,
    providers: Vec<Box<dyn Provider>>,
    documents: Vec<ConfigDocument>,
    config_files: Vec<PathBuf>,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            default_lifecycle: Lifecycle::default(),
            classes: Vec::new(),
            host: None,
            providers: Vec::new(),
            documents: Vec::new(),
            config_files: Vec::new(),
        }
    }

    /// Lifecycle of keys registered without an explicit policy.
    pub fn default_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.default_lifecycle = lifecycle;
        self
    }

    /// Adds a class to the container's own catalog.
    pub fn class(mut self, class: ClassDescriptor) -> Self {
        self.classes.push(class);
        self
    }

    /// Adds an [`Injectable`] type to the container's own catalog.
    pub fn injectable<T: Injectable>(self) -> Self {
        self.class(ClassDescriptor::of::<T>())
    }

    /// Attaches the host serving the ambient instance.
    pub fn host(mut self, host: impl Host + 'static) -> Self {
        self.host = Some(Arc::new(host));
        self
    }

    /// Adds a [`Provider`] module.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Bulk-loads a document during [`build()`](ContainerBuilder::build).
    pub fn document(mut self, document: ConfigDocument) -> Self {
        self.documents.push(document);
        self
    }

    /// Bulk-loads a JSON file during [`build()`](ContainerBuilder::build).
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push(path.into());
        self
    }

    /// Builds the container.
    ///
    /// # Errors
    /// Provider errors and fatal configuration errors (missing file, invalid
    /// shape). Per-entry load failures are logged and skipped.
    #[instrument(skip(self), name = "container_build")]
    pub fn build(self) -> Result<Container> {
        info!(
            classes = self.classes.len(),
            documents = self.documents.len() + self.config_files.len(),
            "Building container"
        );

        let container = Container::with_default_lifecycle(self.default_lifecycle);

        for class in self.classes {
            container.add_class(class);
        }

        if let Some(host) = self.host {
            container.attach_host(host);
        }

        for provider in &self.providers {
            container.add_provider(provider.as_ref())?;
        }

        for document in &self.documents {
            container.load(document);
        }

        for path in &self.config_files {
            container.load_file(path)?;
        }

        info!("Container built successfully ✓");
        Ok(container)
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// The resolution engine.
///
/// All operations take `&self`: registrations may happen at any time,
/// including from inside factories. Locks are only held for table access,
/// never while a factory, constructor or host runs.
///
/// One container is meant to live in one execution context. Nothing is
/// process-global except the class catalog collected with `inventory`.
pub struct Container {
    registry: RwLock<Registry>,
    cache: RwLock<LifecycleCache>,
    classes: RwLock<ClassCatalog>,
    default_lifecycle: Lifecycle,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Creates an empty container with `Shared` as the default lifecycle.
    pub fn new() -> Self {
        Self::with_default_lifecycle(Lifecycle::default())
    }

    /// Creates an empty container with the given default lifecycle.
    pub fn with_default_lifecycle(default_lifecycle: Lifecycle) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            cache: RwLock::new(LifecycleCache::new()),
            classes: RwLock::new(ClassCatalog::new()),
            default_lifecycle,
        }
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    // ── Classes ──

    /// Adds a class to this container, shadowing a global class of the same name.
    pub fn add_class(&self, class: ClassDescriptor) {
        debug!(class = %class.name(), parameters = class.parameters().len(), "Added class");
        self.classes.write().insert(class);
    }

    /// Adds an [`Injectable`] type to this container.
    pub fn add_injectable<T: Injectable>(&self) {
        self.add_class(ClassDescriptor::of::<T>());
    }

    /// Returns `true` if `name` is a constructible class.
    pub fn is_class(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    fn class(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        let local = self.classes.read().get(name);
        local.or_else(|| global_catalog().get(name))
    }

    // ── Registration ──

    /// Stores `value` directly in the lifecycle cache, overwriting any entry.
    ///
    /// Literals are wrapped once, so every `get` returns the same allocation.
    /// A factory is stored unevaluated and invoked on every `get`.
    pub fn set(&self, key: impl Into<ServiceKey>, value: impl Into<Definition>) {
        let key = key.into();
        let entry = match value.into() {
            Definition::Literal(literal) => CacheEntry::Resolved(Instance::literal(literal)),
            Definition::Instance(instance) => CacheEntry::Resolved(instance),
            Definition::Factory(factory) => CacheEntry::Deferred(factory),
            Definition::Class(name) => {
                CacheEntry::Resolved(Instance::literal(Value::String(name.as_str().to_owned())))
            }
        };
        debug!(key = %key, "Stored value");
        self.cache.write().put(key, entry);
    }

    /// Binds a deferred factory, keeping the key's lifecycle if it has one.
    ///
    /// # Errors
    /// [`AutowireError::InvalidBindingDefinition`] unless `resolver` is a
    /// factory or the name of a constructible class.
    pub fn bind(&self, key: impl Into<ServiceKey>, resolver: impl Into<Definition>) -> Result<()> {
        let key = key.into();
        let binding = self.binding_for(&key, resolver.into())?;
        self.install_binding(key, binding, None);
        Ok(())
    }

    /// Binds a deferred factory with an explicit lifecycle.
    pub fn bind_with(
        &self,
        key: impl Into<ServiceKey>,
        resolver: impl Into<Definition>,
        lifecycle: Lifecycle,
    ) -> Result<()> {
        let key = key.into();
        let binding = self.binding_for(&key, resolver.into())?;
        self.install_binding(key, binding, Some(lifecycle));
        Ok(())
    }

    /// Binds a deferred factory whose results are never cached.
    pub fn bind_fresh(&self, key: impl Into<ServiceKey>, resolver: impl Into<Definition>) -> Result<()> {
        self.bind_with(key, resolver, Lifecycle::Fresh)
    }

    /// Returns the cached value of `key`, or resolves and caches it.
    ///
    /// An existing cache entry wins even if `resolver` differs from what
    /// produced it. Literals and instances are stored with [`set`](Self::set).
    /// Otherwise `resolver` (or `key` itself when `None`) is resolved.
    pub fn register(&self, key: impl Into<ServiceKey>, resolver: Option<Definition>) -> Result<Instance> {
        let key = key.into();
        if self.cache.read().contains(&key) {
            trace!(key = %key, "Already registered");
            return self.get(&key);
        }

        let root = ResolutionPath::default();
        let instance = match resolver {
            Some(Definition::Literal(literal)) => Instance::literal(literal),
            Some(Definition::Instance(instance)) => instance,
            Some(Definition::Class(name)) => self.resolve_in(&name, &root)?,
            Some(Definition::Factory(factory)) => self.invoke(&factory, &root.enter(&key)?)?,
            None => self.resolve_in(&key, &root)?,
        };

        self.cache
            .write()
            .put(key, CacheEntry::Resolved(instance.clone()));
        Ok(instance)
    }

    /// Eagerly builds `key` and stores the result in the cache.
    ///
    /// # Errors
    /// [`AutowireError::InvalidBindingDefinition`] unless `resolver` is a
    /// factory or a constructible class name; any construction error.
    pub fn singleton(&self, key: impl Into<ServiceKey>, resolver: impl Into<Definition>) -> Result<Instance> {
        let key = key.into();
        let path = ResolutionPath::default().enter(&key)?;
        let instance = match resolver.into() {
            Definition::Factory(factory) => self.invoke(&factory, &path)?,
            Definition::Class(name) if self.is_class(&name) => self.instantiate(&name, &path)?,
            other => return Err(invalid_binding(&key, &other)),
        };

        debug!(key = %key, "Stored singleton");
        self.cache
            .write()
            .put(key, CacheEntry::Resolved(instance.clone()));
        Ok(instance)
    }

    /// Maps an abstract key to an implementation.
    ///
    /// Factories stay deferred; class names are resolved now; instances and
    /// literals are stored as they are.
    pub fn bind_interface(&self, key: impl Into<ServiceKey>, resolver: impl Into<Definition>) -> Result<()> {
        let key = key.into();
        let binding = match resolver.into() {
            Definition::Factory(factory) => InterfaceBinding::Factory(factory),
            Definition::Instance(instance) => InterfaceBinding::Implementation(instance),
            Definition::Class(name) => {
                let path = ResolutionPath::default().enter(&key)?;
                InterfaceBinding::Implementation(self.resolve_in(&name, &path)?)
            }
            Definition::Literal(literal) => InterfaceBinding::Implementation(Instance::literal(literal)),
        };
        self.registry.write().bind_interface(key, binding);
        Ok(())
    }

    /// Writes the literal parameter table.
    pub fn set_parameter(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.set_parameter_instance(name, Instance::literal(value));
    }

    /// Writes the literal parameter table with a non-literal value.
    pub fn set_parameter_instance(&self, name: impl Into<String>, value: Instance) {
        self.registry.write().set_parameter(name.into(), value);
    }

    /// Serves `host`'s ambient instance under [`AMBIENT_KEY`].
    pub fn attach_host(&self, host: Arc<dyn Host>) {
        debug!("Attached host");
        self.set(
            AMBIENT_KEY,
            Definition::factory(move |_: &dyn Resolver| Ok(host.external_instance())),
        );
    }

    /// Applies a [`Provider`] module.
    pub fn add_provider(&self, provider: &dyn Provider) -> Result<()> {
        debug!(provider = provider.name(), "Registering provider");
        provider.register(self)
    }

    /// Bulk-loads a document. Entry failures are logged and reported, never raised.
    pub fn load(&self, document: &ConfigDocument) -> LoadReport {
        loader::load(self, document)
    }

    /// Bulk-loads a JSON document from disk.
    ///
    /// # Errors
    /// `ConfigFileMissing`, `ConfigFileUnreadable`, `ConfigFileInvalidShape`.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let document = ConfigDocument::from_file(path.as_ref())?;
        Ok(self.load(&document))
    }

    // ── Resolution ──

    /// Resolves `key` through cache, bindings, then auto-wiring.
    pub fn get(&self, key: impl Into<ServiceKey>) -> Result<Instance> {
        self.get_in(&key.into(), &ResolutionPath::default())
    }

    /// Builds a new value for `key`, bypassing the cache.
    pub fn make(&self, key: impl Into<ServiceKey>) -> Result<Instance> {
        self.make_in(&key.into(), &ResolutionPath::default())
    }

    /// `get` for shared keys, a fresh instantiation pass otherwise.
    pub fn resolve(&self, key: impl Into<ServiceKey>) -> Result<Instance> {
        self.resolve_in(&key.into(), &ResolutionPath::default())
    }

    /// Typed [`get`](Self::get).
    pub fn get_as<T: Any + Send + Sync>(&self, key: impl Into<ServiceKey>) -> Result<Arc<T>> {
        let key = key.into();
        self.get(&key)?.downcast_for(key)
    }

    /// Typed [`make`](Self::make).
    pub fn make_as<T: Any + Send + Sync>(&self, key: impl Into<ServiceKey>) -> Result<Arc<T>> {
        let key = key.into();
        self.make(&key)?.downcast_for(key)
    }

    /// Typed [`resolve`](Self::resolve).
    pub fn resolve_as<T: Any + Send + Sync>(&self, key: impl Into<ServiceKey>) -> Result<Arc<T>> {
        let key = key.into();
        self.resolve(&key)?.downcast_for(key)
    }

    /// Returns `true` if `key` is cached, bound, an interface, or a class.
    pub fn has(&self, key: &str) -> bool {
        self.cache.read().contains(key) || self.registry.read().contains(key) || self.is_class(key)
    }

    /// Lifecycle policy that applies to `key`.
    pub fn lifecycle_of(&self, key: &str) -> Lifecycle {
        let explicit = self.registry.read().policy(key);
        explicit.unwrap_or(self.default_lifecycle)
    }

    /// Checks the declared dependency graph for cycles and missing services.
    ///
    /// Factories are opaque: only class bindings and typed constructor
    /// parameters contribute edges.
    pub fn validate(&self) -> Result<()> {
        let mut nodes: HashMap<ServiceKey, DependencyInfo> = HashMap::new();
        let class_deps = |class: &ClassDescriptor| -> Vec<ServiceKey> {
            class
                .parameters()
                .iter()
                .filter_map(|p| p.declared_type().cloned())
                .collect()
        };

        let mut class_names: Vec<ServiceKey> = global_catalog().names().cloned().collect();
        class_names.extend(self.classes.read().names().cloned());
        for name in class_names {
            if let Some(class) = self.class(&name) {
                let dependencies = class_deps(class.as_ref());
                nodes.insert(name.clone(), DependencyInfo { key: name, dependencies });
            }
        }

        let (bindings, interfaces): (Vec<(ServiceKey, Binding)>, Vec<ServiceKey>) = {
            let registry = self.registry.read();
            (
                registry.bindings().iter().map(|(k, b)| (k.clone(), b.clone())).collect(),
                registry.interface_keys().cloned().collect(),
            )
        };
        for key in interfaces {
            nodes.entry(key.clone()).or_insert(DependencyInfo { key, dependencies: vec![] });
        }
        for (key, binding) in bindings {
            let dependencies = binding
                .class
                .as_deref()
                .and_then(|name| self.class(name))
                .map(|class| class_deps(class.as_ref()))
                .unwrap_or_default();
            nodes.insert(key.clone(), DependencyInfo { key, dependencies });
        }

        let cached: Vec<ServiceKey> = self.cache.read().keys().cloned().collect();
        for key in cached {
            nodes.insert(key.clone(), DependencyInfo { key, dependencies: vec![] });
        }

        GraphValidator::new(nodes).validate()
    }

    // ── Engine internals ──

    fn get_in(&self, key: &ServiceKey, path: &ResolutionPath) -> Result<Instance> {
        let cached = self.cache.read().get(key);
        if let Some(CacheEntry::Resolved(instance)) = cached {
            trace!(key = %key, "Cache hit");
            return Ok(instance);
        }

        let path = path.enter(key)?;
        if let Some(CacheEntry::Deferred(factory)) = cached {
            trace!(key = %key, "Invoking stored factory");
            return self.invoke(&factory, &path);
        }

        let lifecycle = self.lifecycle_of(key);
        let binding = self.registry.read().binding(key);
        let instance = match binding {
            Some(binding) => {
                trace!(key = %key, lifecycle = %lifecycle, "Invoking bound factory");
                self.invoke(&binding.factory, &path)?
            }
            None => self.instantiate(key, &path)?,
        };

        if lifecycle.is_cached() {
            Ok(self.cache.write().insert_if_absent(key.clone(), instance))
        } else {
            Ok(instance)
        }
    }

    fn make_in(&self, key: &ServiceKey, path: &ResolutionPath) -> Result<Instance> {
        let path = path.enter(key)?;
        let binding = self.registry.read().binding(key);
        match binding {
            Some(binding) => self.invoke(&binding.factory, &path),
            None => self.instantiate(key, &path),
        }
    }

    fn resolve_in(&self, key: &ServiceKey, path: &ResolutionPath) -> Result<Instance> {
        // Values stored with set/singleton/register are served whatever the policy.
        if self.lifecycle_of(key).is_cached() || self.cache.read().contains(key) {
            return self.get_in(key, path);
        }
        self.make_in(key, path)
    }

    /// The auto-wiring pass for `id`.
    fn instantiate(&self, id: &ServiceKey, path: &ResolutionPath) -> Result<Instance> {
        let Some(class) = self.class(id) else {
            return self.resolve_interface(id, path);
        };

        if class.parameters().is_empty() {
            trace!(class = %id, "Constructing without arguments");
            return class.construct(Arguments::new(id.clone(), Vec::new()));
        }

        let mut values = Vec::with_capacity(class.parameters().len());
        for parameter in class.parameters() {
            let value = self.resolve_parameter(id, parameter, path)?;
            values.push((parameter.name().to_owned(), value));
        }

        debug!(class = %id, arguments = values.len(), depth = path.depth(), "Constructing");
        class.construct(Arguments::new(id.clone(), values))
    }

    fn resolve_interface(&self, id: &ServiceKey, path: &ResolutionPath) -> Result<Instance> {
        let binding = self.registry.read().interface(id);
        match binding {
            Some(InterfaceBinding::Implementation(instance)) => Ok(instance),
            Some(InterfaceBinding::Factory(factory)) => self.invoke(&factory, path),
            None => Err(AutowireError::ServiceNotFound(ServiceNotFoundError {
                requested: id.clone(),
                required_by: path.requester_of(id),
                suggestions: self.find_suggestions(id),
            })),
        }
    }

    fn resolve_parameter(
        &self,
        class: &ServiceKey,
        parameter: &Parameter,
        path: &ResolutionPath,
    ) -> Result<Instance> {
        if let Some(ty) = parameter.declared_type() {
            return self.resolve_in(ty, path);
        }

        if let Some(default) = parameter.default_value() {
            return Ok(default.clone());
        }

        if parameter.is_ambient() {
            return self.get_in(&ServiceKey::new(AMBIENT_KEY), path);
        }

        let literal = self.registry.read().parameter(parameter.name());
        literal.ok_or_else(|| {
            AutowireError::UnresolvableParameter(UnresolvableParameterError {
                class: class.clone(),
                parameter: parameter.name().to_owned(),
            })
        })
    }

    fn invoke(&self, factory: &FactoryFn, path: &ResolutionPath) -> Result<Instance> {
        let resolver = ContainerResolver {
            container: self,
            path: path.clone(),
        };
        factory(&resolver)
    }

    fn binding_for(&self, key: &ServiceKey, resolver: Definition) -> Result<Binding> {
        match resolver {
            Definition::Factory(factory) => Ok(Binding { factory, class: None }),
            Definition::Class(name) if self.is_class(&name) => {
                let class = name.clone();
                let factory: FactoryFn =
                    Arc::new(move |resolver: &dyn Resolver| resolver.construct(class.as_str()));
                Ok(Binding { factory, class: Some(name) })
            }
            other => Err(invalid_binding(key, &other)),
        }
    }

    fn install_binding(&self, key: ServiceKey, binding: Binding, lifecycle: Option<Lifecycle>) {
        // A new definition replaces whatever an earlier one cached.
        if self.cache.write().evict(&key) {
            trace!(key = %key, "Evicted cached value on rebind");
        }

        let mut registry = self.registry.write();
        match lifecycle {
            Some(lifecycle) => registry.set_policy(key.clone(), lifecycle),
            None => registry.ensure_policy(key.clone(), self.default_lifecycle),
        }
        registry.bind(key, binding);
    }

    fn find_suggestions(&self, key: &ServiceKey) -> Vec<String> {
        let mut known: Vec<ServiceKey> = self.registry.read().registered_keys();
        known.extend(self.cache.read().keys().cloned());
        known.extend(self.classes.read().names().cloned());
        known.extend(global_catalog().names().cloned());

        let names: Vec<&str> = known.iter().map(ServiceKey::as_str).collect();
        suggest_similar(key.as_str(), &names, 3)
    }
}

fn invalid_binding(key: &ServiceKey, resolver: &Definition) -> AutowireError {
    let found = match resolver {
        Definition::Class(_) => format!("{} (not a constructible class)", resolver.describe()),
        _ => resolver.describe(),
    };
    AutowireError::InvalidBindingDefinition {
        key: key.clone(),
        found,
    }
}

impl Resolver for Container {
    fn get(&self, key: &str) -> Result<Instance> {
        Container::get(self, key)
    }

    fn make(&self, key: &str) -> Result<Instance> {
        Container::make(self, key)
    }

    fn resolve(&self, key: &str) -> Result<Instance> {
        Container::resolve(self, key)
    }

    fn construct(&self, class: &str) -> Result<Instance> {
        self.instantiate(&ServiceKey::new(class), &ResolutionPath::default())
    }

    fn parameter(&self, name: &str) -> Option<Instance> {
        self.registry.read().parameter(name)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("Container")
            .field("cached", &self.cache.read().len())
            .field("bindings", &registry.binding_count())
            .field("interfaces", &registry.interface_count())
            .field("parameters", &registry.parameter_count())
            .field("classes", &self.classes.read().len())
            .field("default_lifecycle", &self.default_lifecycle)
            .finish()
    }
}

// ═══════════════════════════════════════════
// ContainerResolver (internal bridge)
// ═══════════════════════════════════════════

/// Resolver passed to factories: the container plus the current path.
struct ContainerResolver<'a> {
    container: &'a Container,
    path: ResolutionPath,
}

impl Resolver for ContainerResolver<'_> {
    fn get(&self, key: &str) -> Result<Instance> {
        self.container.get_in(&ServiceKey::new(key), &self.path)
    }

    fn make(&self, key: &str) -> Result<Instance> {
        self.container.make_in(&ServiceKey::new(key), &self.path)
    }

    fn resolve(&self, key: &str) -> Result<Instance> {
        self.container.resolve_in(&ServiceKey::new(key), &self.path)
    }

    fn construct(&self, class: &str) -> Result<Instance> {
        self.container.instantiate(&ServiceKey::new(class), &self.path)
    }

    fn parameter(&self, name: &str) -> Option<Instance> {
        self.container.registry.read().parameter(name)
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder};
    pub use crate::class::{Arguments, ClassDescriptor, ClassRegistration, Injectable, Parameter};
    pub use crate::definition::{Definition, Instance};
    pub use crate::error::{AutowireError, Result};
    pub use crate::host::{AMBIENT_KEY, Host};
    pub use crate::key::ServiceKey;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::loader::{ConfigDocument, LoadReport};
    pub use crate::provider::Provider;
    pub use crate::registry::Resolver;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
