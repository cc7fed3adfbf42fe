//! Error types for autowire container operations.
//!
//! Every failure names the key, class or parameter involved and, where
//! possible, a hint on how to fix the registration.

use std::fmt;
use std::path::PathBuf;

use autowire_support::rendering::render_chain;

use crate::key::ServiceKey;

/// Main error type for all autowire operations.
#[derive(Debug, thiserror::Error)]
pub enum AutowireError {
    /// Requested key has no definition, no binding, and is not a constructible class.
    #[error("{}", .0)]
    ServiceNotFound(ServiceNotFoundError),

    /// A registration received a resolver of the wrong shape.
    #[error("Invalid binding for {key}: expected a factory or a constructible class name, got {found}")]
    InvalidBindingDefinition { key: ServiceKey, found: String },

    /// A constructor parameter could not be satisfied by any fallback rule.
    #[error("{}", .0)]
    UnresolvableParameter(UnresolvableParameterError),

    /// A key was re-entered while it was still being resolved.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// A constructor or factory failed, or produced a value of the wrong type.
    #[error("Failed to construct {key}: {source}")]
    ConstructionFailed {
        key: ServiceKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The bulk-load document does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    ConfigFileMissing { path: PathBuf },

    /// The bulk-load document exists but could not be read.
    #[error("Configuration file {} could not be read: {source}", .path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bulk-load document is not a mapping of the four known partitions.
    #[error("Configuration document {origin} has an invalid shape: {reason}")]
    ConfigFileInvalidShape { origin: String, reason: String },
}

impl AutowireError {
    /// Wraps any error raised while constructing `key`.
    pub fn construction(
        key: impl Into<ServiceKey>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AutowireError::ConstructionFailed {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// Error when a key cannot be resolved at all.
#[derive(Debug)]
pub struct ServiceNotFoundError {
    /// The key that was requested
    pub requested: ServiceKey,
    /// The key whose resolution needed it (if any)
    pub required_by: Option<ServiceKey>,
    /// Known keys with a similar name
    pub suggestions: Vec<String>,
}

impl fmt::Display for ServiceNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Service not found: {}", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: bind \"{}\" to a factory or class, or add a class with that name",
            self.requested
        )
    }
}

/// Error when no fallback rule can supply a constructor parameter.
#[derive(Debug)]
pub struct UnresolvableParameterError {
    /// The class being constructed
    pub class: ServiceKey,
    /// The exact parameter name
    pub parameter: String,
}

impl fmt::Display for UnresolvableParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unresolvable parameter \"{}\" of {}",
            self.parameter, self.class
        )?;
        write!(
            f,
            "\n  Hint: declare a type or a default for it, or call .set_parameter(\"{}\", ..)",
            self.parameter
        )
    }
}

/// Error when a resolution re-enters a key already on its path.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// The chain of keys forming the cycle, e.g. `["A", "B", "A"]`.
    pub chain: Vec<ServiceKey>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circular dependency detected:\n  ")?;
        write!(f, "{}", render_chain(&self.chain))?;
        write!(
            f,
            "\n  Hint: break the cycle with a factory that resolves one side lazily"
        )
    }
}

/// Convenient Result type for autowire operations.
pub type Result<T> = std::result::Result<T, AutowireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_not_found_display() {
        let err = AutowireError::ServiceNotFound(ServiceNotFoundError {
            requested: ServiceKey::new("Mailr"),
            required_by: Some(ServiceKey::new("Newsletter")),
            suggestions: vec!["Mailer".into()],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Service not found: Mailr"));
        assert!(msg.contains("Required by: Newsletter"));
        assert!(msg.contains("- Mailer"));
    }

    #[test]
    fn unresolvable_parameter_names_parameter() {
        let err = AutowireError::UnresolvableParameter(UnresolvableParameterError {
            class: ServiceKey::new("Counter"),
            parameter: "count".into(),
        });

        let msg = format!("{err}");
        assert!(msg.contains("\"count\""));
        assert!(msg.contains("Counter"));
    }

    #[test]
    fn circular_dependency_display() {
        let err = AutowireError::CircularDependency(CircularDependencyError {
            chain: vec![ServiceKey::new("A"), ServiceKey::new("B"), ServiceKey::new("A")],
        });

        let msg = format!("{err}");
        assert!(msg.contains("Circular"));
        assert!(msg.contains("A → B → A"));
    }
}
