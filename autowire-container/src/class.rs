//! Constructible classes.
//!
//! Rust has no runtime constructor introspection, so a class is described
//! explicitly: a name, its constructor parameters in declaration order, and
//! a constructor closure receiving the resolved [`Arguments`].
//!
//! Classes reach the engine two ways:
//! - submitted to the process-wide catalog with [`inventory::submit!`]
//!   and a [`ClassRegistration`]
//! - added to a single container with `Container::add_class`
//!
//! # Examples
//! ```
//! use autowire_container::class::{ClassDescriptor, Parameter};
//!
//! struct Mailer { retries: u32 }
//!
//! let class = ClassDescriptor::new("Mailer", |args| {
//!     let retries: u32 = args.take_cloned()?;
//!     Ok(Mailer { retries })
//! })
//! .param(Parameter::named("retries").with_default(3u32));
//!
//! assert_eq!(class.name().as_str(), "Mailer");
//! assert_eq!(class.parameters().len(), 1);
//! ```

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use autowire_support::rendering::shorten_type_name;
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;

use crate::definition::Instance;
use crate::error::{AutowireError, Result};
use crate::key::ServiceKey;

/// One constructor parameter.
///
/// The engine tries, in order: the declared type, the default value, the
/// ambient tag, then the literal parameter table.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    declared_type: Option<ServiceKey>,
    default: Option<Instance>,
    ambient: bool,
}

impl Parameter {
    /// An untyped parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
            ambient: false,
        }
    }

    /// A parameter declaring the class or interface it needs.
    pub fn typed(name: impl Into<String>, ty: impl Into<ServiceKey>) -> Self {
        Self {
            declared_type: Some(ty.into()),
            ..Self::named(name)
        }
    }

    /// A parameter receiving the host's ambient instance.
    pub fn ambient(name: impl Into<String>) -> Self {
        Self {
            ambient: true,
            ..Self::named(name)
        }
    }

    /// Adds a default value.
    pub fn with_default<T: Any + Send + Sync>(self, value: T) -> Self {
        self.with_default_instance(Instance::new(value))
    }

    /// Adds a literal default value.
    pub fn with_literal_default(self, value: impl Into<Value>) -> Self {
        self.with_default_instance(Instance::literal(value))
    }

    /// Adds a default value that is already an [`Instance`].
    pub fn with_default_instance(mut self, value: Instance) -> Self {
        self.default = Some(value);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn declared_type(&self) -> Option<&ServiceKey> {
        self.declared_type.as_ref()
    }

    #[inline]
    pub fn default_value(&self) -> Option<&Instance> {
        self.default.as_ref()
    }

    #[inline]
    pub fn is_ambient(&self) -> bool {
        self.ambient
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Parameter");
        s.field("name", &self.name);
        if let Some(ref ty) = self.declared_type {
            s.field("type", ty);
        }
        if self.default.is_some() {
            s.field("has_default", &true);
        }
        if self.ambient {
            s.field("ambient", &true);
        }
        s.finish()
    }
}

/// Resolved constructor arguments, in declaration order.
pub struct Arguments {
    class: ServiceKey,
    values: Vec<(String, Instance)>,
    cursor: usize,
}

impl Arguments {
    pub(crate) fn new(class: ServiceKey, values: Vec<(String, Instance)>) -> Self {
        Self { class, values, cursor: 0 }
    }

    /// The class being constructed.
    pub fn class(&self) -> &ServiceKey {
        &self.class
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Takes the next argument without looking at its type.
    pub fn take_instance(&mut self) -> Result<Instance> {
        let (_, value) = self.values.get(self.cursor).ok_or_else(|| {
            AutowireError::construction(
                self.class.clone(),
                format!("constructor read argument #{} but only {} declared", self.cursor + 1, self.values.len()),
            )
        })?;
        let value = value.clone();
        self.cursor += 1;
        Ok(value)
    }

    /// Takes the next argument as `Arc<T>`.
    pub fn take<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
        let name = self
            .values
            .get(self.cursor)
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        let value = self.take_instance()?;
        self.downcast(&name, &value)
    }

    /// Takes the next argument and clones it out of its `Arc`.
    pub fn take_cloned<T: Any + Send + Sync + Clone>(&mut self) -> Result<T> {
        self.take::<T>().map(|value| (*value).clone())
    }

    /// Looks up an argument by parameter name, regardless of position.
    pub fn named<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let (_, value) = self
            .values
            .iter()
            .find(|(param, _)| param == name)
            .ok_or_else(|| {
                AutowireError::construction(
                    self.class.clone(),
                    format!("constructor has no parameter named \"{name}\""),
                )
            })?;
        self.downcast(name, value)
    }

    fn downcast<T: Any + Send + Sync>(&self, name: &str, value: &Instance) -> Result<Arc<T>> {
        value.downcast::<T>().ok_or_else(|| {
            AutowireError::construction(
                self.class.clone(),
                format!(
                    "argument \"{name}\": expected {}, found {}",
                    type_name::<T>(),
                    value.type_name()
                ),
            )
        })
    }
}

/// Type alias for class constructors.
pub type ConstructorFn = Arc<dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync>;

/// A constructible class: name, ordered parameters, constructor.
#[derive(Clone)]
pub struct ClassDescriptor {
    name: ServiceKey,
    parameters: Vec<Parameter>,
    constructor: ConstructorFn,
}

impl ClassDescriptor {
    /// Describes a class whose constructor produces a `T`.
    pub fn new<T, F>(name: impl Into<ServiceKey>, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Arguments) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            constructor: Arc::new(move |args: &mut Arguments| constructor(args).map(Instance::new)),
        }
    }

    /// Describes a class from an [`Injectable`] type.
    pub fn of<T: Injectable>() -> Self {
        Self {
            name: ServiceKey::from(T::class_name()),
            parameters: T::parameters(),
            constructor: Arc::new(|args: &mut Arguments| T::construct(args).map(Instance::new)),
        }
    }

    /// Appends a constructor parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[inline]
    pub fn name(&self) -> &ServiceKey {
        &self.name
    }

    #[inline]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Calls the constructor.
    pub fn construct(&self, mut args: Arguments) -> Result<Instance> {
        (self.constructor)(&mut args)
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// A Rust type that describes its own constructor.
///
/// ```
/// use std::sync::Arc;
/// use autowire_container::class::{Arguments, ClassDescriptor, Injectable, Parameter};
/// use autowire_container::error::Result;
///
/// struct Logger;
/// impl Injectable for Logger {
///     fn construct(_: &mut Arguments) -> Result<Self> { Ok(Logger) }
/// }
///
/// struct Mailer { logger: Arc<Logger> }
/// impl Injectable for Mailer {
///     fn parameters() -> Vec<Parameter> {
///         vec![Parameter::typed("logger", "Logger")]
///     }
///     fn construct(args: &mut Arguments) -> Result<Self> {
///         Ok(Mailer { logger: args.take()? })
///     }
/// }
///
/// assert_eq!(ClassDescriptor::of::<Mailer>().name().as_str(), "Mailer");
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
    /// Name the class is registered under. Defaults to the short type name.
    fn class_name() -> String {
        shorten_type_name(type_name::<Self>())
    }

    /// Constructor parameters in declaration order.
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    /// Builds the value from resolved arguments.
    fn construct(args: &mut Arguments) -> Result<Self>;
}

/// A class submitted to the process-wide catalog.
///
/// ```rust,ignore
/// inventory::submit! {
///     ClassRegistration::new(|| ClassDescriptor::of::<Logger>())
/// }
/// ```
pub struct ClassRegistration {
    describe: fn() -> ClassDescriptor,
}

impl ClassRegistration {
    pub const fn new(describe: fn() -> ClassDescriptor) -> Self {
        Self { describe }
    }
}

inventory::collect!(ClassRegistration);

static GLOBAL_CATALOG: Lazy<ClassCatalog> = Lazy::new(|| {
    let mut catalog = ClassCatalog::new();
    for registration in inventory::iter::<ClassRegistration> {
        catalog.insert((registration.describe)());
    }
    debug!(classes = catalog.len(), "Collected global class catalog");
    catalog
});

/// The classes submitted with [`ClassRegistration`] anywhere in the program.
pub fn global_catalog() -> &'static ClassCatalog {
    &GLOBAL_CATALOG
}

/// Name -> class lookup table.
#[derive(Debug, Default, Clone)]
pub struct ClassCatalog {
    classes: HashMap<ServiceKey, Arc<ClassDescriptor>>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, replacing one with the same name.
    pub fn insert(&mut self, class: ClassDescriptor) {
        self.classes.insert(class.name().clone(), Arc::new(class));
    }

    pub fn get(&self, name: &str) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &ServiceKey> {
        self.classes.keys()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Engine {
        cylinders: u32,
    }

    impl Injectable for Engine {
        fn parameters() -> Vec<Parameter> {
            vec![Parameter::named("cylinders").with_default(4u32)]
        }

        fn construct(args: &mut Arguments) -> Result<Self> {
            Ok(Engine { cylinders: args.take_cloned()? })
        }
    }

    struct Catalogued;

    impl Injectable for Catalogued {
        fn class_name() -> String {
            "tests.Catalogued".into()
        }

        fn construct(_: &mut Arguments) -> Result<Self> {
            Ok(Catalogued)
        }
    }

    inventory::submit! {
        ClassRegistration::new(ClassDescriptor::of::<Catalogued>)
    }

    #[test]
    fn injectable_descriptor_uses_short_name() {
        let class = ClassDescriptor::of::<Engine>();
        assert_eq!(class.name().as_str(), "Engine");
        assert_eq!(class.parameters()[0].name(), "cylinders");
    }

    #[test]
    fn construct_reads_arguments_in_order() {
        let class = ClassDescriptor::of::<Engine>();
        let args = Arguments::new(
            class.name().clone(),
            vec![("cylinders".into(), Instance::new(8u32))],
        );
        let engine = class.construct(args).unwrap().downcast::<Engine>().unwrap();
        assert_eq!(engine.cylinders, 8);
    }

    #[test]
    fn wrong_argument_type_names_parameter() {
        let class = ClassDescriptor::of::<Engine>();
        let args = Arguments::new(
            class.name().clone(),
            vec![("cylinders".into(), Instance::new("eight"))],
        );

        let err = class.construct(args).err().expect("construction should fail");
        let msg = format!("{err}");
        assert!(msg.contains("Engine"));
        assert!(msg.contains("cylinders"));
    }

    #[test]
    fn reading_past_declared_arguments_fails() {
        let mut args = Arguments::new(ServiceKey::new("Empty"), vec![]);
        assert!(args.take_instance().is_err());
    }

    #[test]
    fn named_lookup() {
        let args = Arguments::new(
            ServiceKey::new("Pair"),
            vec![("left".into(), Instance::new(1u8)), ("right".into(), Instance::new(2u8))],
        );
        assert_eq!(*args.named::<u8>("right").unwrap(), 2);
        assert!(args.named::<u8>("middle").is_err());
    }

    #[test]
    fn parameter_kinds() {
        let typed = Parameter::typed("logger", "Logger");
        assert_eq!(typed.declared_type().map(ServiceKey::as_str), Some("Logger"));
        assert!(!typed.is_ambient());

        let ambient = Parameter::ambient("app");
        assert!(ambient.is_ambient());
        assert!(ambient.default_value().is_none());

        let literal = Parameter::named("region").with_literal_default("eu");
        assert_eq!(
            literal.default_value().and_then(Instance::as_literal),
            Some(&serde_json::json!("eu"))
        );
    }

    #[test]
    fn global_catalog_collects_submissions() {
        assert!(global_catalog().contains("tests.Catalogued"));
    }

    #[test]
    fn catalog_insert_replaces_same_name() {
        let mut catalog = ClassCatalog::new();
        catalog.insert(ClassDescriptor::new("Widget", |_| Ok(1u8)));
        catalog.insert(
            ClassDescriptor::new("Widget", |_| Ok(2u8)).param(Parameter::named("size")),
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Widget").unwrap().parameters().len(), 1);
    }
}
