//! Provider trait: a module of related registrations.
//!
//! Providers group related registrations so a program can install them
//! one concern at a time.
//!
//! # Examples
//! ```rust
//! use autowire_container::prelude::*;
//!
//! struct MailProvider;
//!
//! impl Provider for MailProvider {
//!     fn register(&self, container: &Container) -> Result<()> {
//!         container.set_parameter("smtp_host", "localhost");
//!         container.bind("Transport", Definition::factory_of(|_| Ok(String::from("smtp"))))?;
//!         Ok(())
//!     }
//! }
//!
//! let container = Container::new();
//! container.add_provider(&MailProvider).unwrap();
//! assert!(container.has("Transport"));
//! ```

use crate::container::Container;
use crate::error::Result;

/// A module that registers related services into a container.
///
/// Instead of one giant registration block, split services by concern:
///
/// ```rust,ignore
/// container.add_provider(&DatabaseProvider)?;
/// container.add_provider(&MailProvider)?;
/// ```
pub trait Provider {
    /// Registers services into the container.
    fn register(&self, container: &Container) -> Result<()>;

    /// Human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{Definition, Instance};
    use crate::error::AutowireError;
    use crate::key::ServiceKey;

    struct TestProvider;

    impl Provider for TestProvider {
        fn register(&self, container: &Container) -> Result<()> {
            container.set("greeting", Definition::literal("hello"));
            container.bind("Answer", Definition::factory(|_| Ok(Instance::new(42i32))))?;
            Ok(())
        }
    }

    struct BrokenProvider;

    impl Provider for BrokenProvider {
        fn register(&self, container: &Container) -> Result<()> {
            container.bind("Answer", Definition::literal(42))
        }
    }

    #[test]
    fn provider_registers_services() {
        let container = Container::new();
        container.add_provider(&TestProvider).unwrap();

        assert!(container.has("greeting"));
        assert_eq!(*container.get_as::<i32>("Answer").unwrap(), 42);
    }

    #[test]
    fn provider_errors_propagate() {
        let container = Container::new();
        match container.add_provider(&BrokenProvider) {
            Err(AutowireError::InvalidBindingDefinition { key, .. }) => {
                assert_eq!(key, ServiceKey::new("Answer"));
            }
            other => panic!("Expected InvalidBindingDefinition, got: {other:?}"),
        }
    }

    #[test]
    fn provider_has_name() {
        assert!(TestProvider.name().contains("TestProvider"));
    }
}
