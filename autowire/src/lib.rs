//! # Autowire: a runtime object-graph resolver for Rust
//!
//! Ask a [`Container`] for a key and it returns a ready value: cached if the
//! key is shared, built by a bound factory, or constructed by recursively
//! resolving a class's constructor parameters.
//!
//! ```rust
//! use autowire::prelude::*;
//! use std::sync::Arc;
//!
//! struct Logger;
//!
//! impl Injectable for Logger {
//!     fn construct(_: &mut Arguments) -> Result<Self> {
//!         Ok(Logger)
//!     }
//! }
//!
//! struct Mailer {
//!     logger: Arc<Logger>,
//!     retries: u32,
//! }
//!
//! impl Injectable for Mailer {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![
//!             Parameter::typed("logger", "Logger"),
//!             Parameter::named("retries").with_default(3u32),
//!         ]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self> {
//!         Ok(Mailer { logger: args.take()?, retries: args.take_cloned()? })
//!     }
//! }
//!
//! let container = Container::builder()
//!     .injectable::<Logger>()
//!     .injectable::<Mailer>()
//!     .build()
//!     .unwrap();
//!
//! let mailer = container.get_as::<Mailer>("Mailer").unwrap();
//! assert_eq!(mailer.retries, 3);
//! ```

pub use autowire_container::*;
pub use autowire_support::*;
