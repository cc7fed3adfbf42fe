//! Core resolution engine for autowire.

mod cache;
pub mod class;
pub mod container;
pub mod definition;
pub mod error;
mod graph;
pub mod host;
pub mod key;
pub mod lifecycle;
pub mod loader;
pub mod provider;
pub mod registry;

pub use class::{ClassDescriptor, ClassRegistration, Injectable, Parameter};
pub use container::{Container, ContainerBuilder, prelude};
pub use definition::{Definition, Instance};
pub use error::{AutowireError, Result};
pub use host::{AMBIENT_KEY, Host};
pub use key::ServiceKey;
pub use lifecycle::Lifecycle;
pub use loader::{ConfigDocument, LoadReport};
pub use registry::Resolver;

// Re-exported so `inventory::submit!` works without a direct dependency.
pub use inventory;
