//! Service identification keys.
//!
//! [`ServiceKey`] names a service within the container. A key may coincide
//! with a class or interface name, or be an arbitrary label.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Uniquely identifies a service in the container.
///
/// Keys are plain strings: two keys are equal when their text is equal.
/// Cloning is cheap (the text is reference counted).
///
/// # Examples
/// ```
/// use autowire_container::key::ServiceKey;
///
/// let key = ServiceKey::new("Mailer");
/// assert_eq!(key.as_str(), "Mailer");
/// assert_eq!(key, ServiceKey::from("Mailer"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey(Arc<str>);

impl ServiceKey {
    /// Creates a key from any string-like value.
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Returns the key text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ServiceKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for ServiceKey {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl From<&ServiceKey> for ServiceKey {
    fn from(key: &ServiceKey) -> Self {
        key.clone()
    }
}

impl Deref for ServiceKey {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by ServiceKey be queried with a plain &str.
impl Borrow<str> for ServiceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ServiceKey {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ServiceKey {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey({:?})", &*self.0)
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn equal_text_equal_keys() {
        assert_eq!(ServiceKey::new("Logger"), ServiceKey::from(String::from("Logger")));
    }

    #[test]
    fn different_text_different_keys() {
        assert_ne!(ServiceKey::new("Logger"), ServiceKey::new("logger"));
    }

    #[test]
    fn key_in_hashmap_queried_by_str() {
        let mut map = HashMap::new();
        map.insert(ServiceKey::new("Logger"), 1);
        map.insert(ServiceKey::new("Mailer"), 2);
        assert_eq!(map.get("Mailer"), Some(&2));
        assert_eq!(map.get("Transport"), None);
    }

    #[test]
    fn display_is_raw_text() {
        assert_eq!(format!("{}", ServiceKey::new("app.config")), "app.config");
        assert_eq!(format!("{:?}", ServiceKey::new("x")), "ServiceKey(\"x\")");
    }
}
