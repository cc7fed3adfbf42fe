//! The host environment's ambient instance.
//!
//! A container never constructs or owns the ambient object. It holds a
//! reference to a [`Host`] and serves whatever the host returns under
//! [`AMBIENT_KEY`], through the ordinary `get` path.

use crate::definition::Instance;

/// Reserved key under which the ambient instance is served.
pub const AMBIENT_KEY: &str = "autowire.ambient";

/// External collaborator owning the ambient instance.
///
/// Closures returning an [`Instance`] are hosts too:
///
/// ```
/// use autowire_container::definition::Instance;
/// use autowire_container::host::Host;
///
/// let app = Instance::new("my-app");
/// let host = move || app.clone();
/// assert_eq!(*host.external_instance().downcast::<&str>().unwrap(), "my-app");
/// ```
pub trait Host: Send + Sync {
    /// Returns the ambient object. Called on every lookup of [`AMBIENT_KEY`].
    fn external_instance(&self) -> Instance;
}

impl<F> Host for F
where
    F: Fn() -> Instance + Send + Sync,
{
    fn external_instance(&self) -> Instance {
        self()
    }
}
