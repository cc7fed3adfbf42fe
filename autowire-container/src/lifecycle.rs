//! Service lifecycle policies.
//!
//! A policy decides whether a resolved value is written into the
//! lifecycle cache:
//! - [`Lifecycle::Shared`]: one instance per container, created on first `get`
//! - [`Lifecycle::Fresh`]: a new instance on every resolution
use std::fmt;

/// Defines how long a resolved service lives within the container.
///
/// # Examples
/// ```
/// use autowire_container::lifecycle::Lifecycle;
///
/// assert!(Lifecycle::Shared.is_cached());
/// assert!(!Lifecycle::Fresh.is_cached());
/// assert_eq!(Lifecycle::default(), Lifecycle::Shared);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// One instance shared by every consumer of the container.
    ///
    /// Created lazily on the first successful resolution and cached until
    /// the container is dropped or the key is explicitly overwritten.
    ///
    /// # When to use
    /// - Connection pools
    /// - Configuration objects
    /// - Loggers
    #[default]
    Shared,

    /// A new instance built on every resolution. Never cached.
    ///
    /// # When to use
    /// - Objects carrying per-call mutable state
    /// - Command handlers
    Fresh,
}

impl Lifecycle {
    /// Returns `true` if resolved values under this policy are cached.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, Lifecycle::Shared)
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Shared => write!(f, "Shared"),
            Lifecycle::Fresh => write!(f, "Fresh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_cached() {
        assert!(Lifecycle::Shared.is_cached());
        assert!(!Lifecycle::Fresh.is_cached());
    }

    #[test]
    fn lifecycle_display() {
        assert_eq!(format!("{}", Lifecycle::Shared), "Shared");
        assert_eq!(format!("{}", Lifecycle::Fresh), "Fresh");
    }
}
