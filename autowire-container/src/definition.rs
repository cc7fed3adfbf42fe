//! Resolved instances and the recipes that produce them.
//!
//! An [`Instance`] is what the container hands out. A [`Definition`] is the
//! recipe stored for a key: a literal, a pre-built instance, a factory, or
//! a reference to a constructible class.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{AutowireError, Result};
use crate::key::ServiceKey;
use crate::registry::{FactoryFn, Resolver};

/// A resolved, type-erased service value.
///
/// Cloning an `Instance` clones the pointer, never the value: two clones are
/// the same object as far as [`Instance::ptr_eq`] is concerned.
///
/// # Examples
/// ```
/// use autowire_container::definition::Instance;
///
/// let a = Instance::new(String::from("smtp://localhost"));
/// let b = a.clone();
/// assert!(Instance::ptr_eq(&a, &b));
/// assert_eq!(*a.downcast::<String>().unwrap(), "smtp://localhost");
/// ```
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Wraps an owned value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    /// Wraps a literal value (configuration mappings, numbers, strings).
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(value.into())
    }

    /// Rust type name of the wrapped value.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the wrapped value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns the wrapped value as `Arc<T>`, or `None` on a type mismatch.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    /// Like [`Instance::downcast`], but reports a mismatch as an error on `key`.
    pub fn downcast_for<T: Any + Send + Sync>(&self, key: impl Into<ServiceKey>) -> Result<Arc<T>> {
        self.downcast::<T>().ok_or_else(|| {
            AutowireError::construction(
                key,
                format!(
                    "Type mismatch: expected {}, found {}",
                    type_name::<T>(),
                    self.type_name
                ),
            )
        })
    }

    /// Returns the literal value if this instance wraps one.
    pub fn as_literal(&self) -> Option<&Value> {
        self.value.downcast_ref::<Value>()
    }

    /// Identity comparison: `true` if both point at the same allocation.
    pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&a.value), Arc::as_ptr(&b.value))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_literal() {
            Some(literal) => write!(f, "Instance(literal {literal})"),
            None => write!(f, "Instance({})", self.type_name),
        }
    }
}

/// The stored recipe for producing a key's value.
///
/// Every consumption site matches on all four variants; there is no runtime
/// probing of what a resolver "looks like".
#[derive(Clone)]
pub enum Definition {
    /// A plain value, e.g. a configuration mapping.
    Literal(Value),
    /// A pre-built object.
    Instance(Instance),
    /// A deferred factory receiving the resolver.
    Factory(FactoryFn),
    /// The name of a constructible class.
    Class(ServiceKey),
}

impl Definition {
    /// Reference to a constructible class.
    pub fn class(name: impl Into<ServiceKey>) -> Self {
        Definition::Class(name.into())
    }

    /// A literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Definition::Literal(value.into())
    }

    /// A pre-built object.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Definition::Instance(Instance::new(value))
    }

    /// A factory producing type-erased instances.
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn Resolver) -> Result<Instance> + Send + Sync + 'static,
    {
        Definition::Factory(Arc::new(factory))
    }

    /// A factory producing a concrete `T`, wrapped into an [`Instance`] per call.
    ///
    /// ```
    /// use autowire_container::definition::Definition;
    ///
    /// struct Clock;
    /// let definition = Definition::factory_of(|_| Ok(Clock));
    /// assert_eq!(definition.kind(), "factory");
    /// ```
    pub fn factory_of<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Resolver) -> Result<T> + Send + Sync + 'static,
    {
        Self::factory(move |resolver| factory(resolver).map(Instance::new))
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Definition::Literal(_) => "literal",
            Definition::Instance(_) => "instance",
            Definition::Factory(_) => "factory",
            Definition::Class(_) => "class",
        }
    }

    /// Human-readable description, used in binding errors.
    pub fn describe(&self) -> String {
        match self {
            Definition::Literal(value) => format!("literal {value}"),
            Definition::Instance(instance) => format!("instance of {}", instance.type_name()),
            Definition::Factory(_) => "factory".to_string(),
            Definition::Class(name) => format!("class name \"{name}\""),
        }
    }
}

impl From<Instance> for Definition {
    fn from(instance: Instance) -> Self {
        Definition::Instance(instance)
    }
}

impl From<Value> for Definition {
    fn from(value: Value) -> Self {
        Definition::Literal(value)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Definition::Instance(instance) => f.debug_tuple("Instance").field(instance).finish(),
            Definition::Factory(_) => f.write_str("Factory(<fn>)"),
            Definition::Class(name) => f.debug_tuple("Class").field(name).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Widget;

    #[test]
    fn clones_share_identity() {
        let a = Instance::new(Widget);
        let b = a.clone();
        let c = Instance::new(Widget);
        assert!(Instance::ptr_eq(&a, &b));
        assert!(!Instance::ptr_eq(&a, &c));
    }

    #[test]
    fn downcast_mismatch_is_error() {
        let instance = Instance::new(42u32);
        assert!(instance.downcast::<String>().is_none());

        match instance.downcast_for::<String>("answer") {
            Err(AutowireError::ConstructionFailed { key, source }) => {
                assert_eq!(key, "answer");
                assert!(source.to_string().contains("u32"));
            }
            other => panic!("Expected ConstructionFailed, got: {other:?}"),
        }
    }

    #[test]
    fn literal_is_readable() {
        let instance = Instance::literal(json!({"debug": true}));
        assert_eq!(instance.as_literal(), Some(&json!({"debug": true})));
        assert!(format!("{instance:?}").contains("debug"));
    }

    #[test]
    fn from_arc_keeps_allocation() {
        let shared = Arc::new(Widget);
        let instance = Instance::from_arc(shared.clone());
        let back = instance.downcast::<Widget>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
    }

    #[test]
    fn describe_variants() {
        assert_eq!(Definition::literal(42).describe(), "literal 42");
        assert_eq!(Definition::class("Widget").describe(), "class name \"Widget\"");
        assert_eq!(Definition::factory(|_| Ok(Instance::new(Widget))).kind(), "factory");
        assert!(Definition::value(Widget).describe().contains("Widget"));
    }
}
