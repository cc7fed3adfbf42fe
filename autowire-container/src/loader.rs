//! Bulk loader: feeds a container from a four-partition document.
//!
//! ```json
//! {
//!   "shared":     { "Mailer": "Mailer", "app.config": { "debug": true } },
//!   "fresh":      { "Job": "Job" },
//!   "interfaces": { "TransportInterface": "SmtpTransport" },
//!   "parameters": { "retries": 3 }
//! }
//! ```
//!
//! Partitions are applied in a fixed order: `parameters`, `shared`, `fresh`,
//! then `interfaces`, so eagerly resolved interfaces see everything else.
//! Entries are loaded best-effort: a failing entry is logged, recorded in the
//! [`LoadReport`] and skipped. Only an unreadable or malformed document is an
//! error.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::container::Container;
use crate::definition::Definition;
use crate::error::{AutowireError, Result};
use crate::key::ServiceKey;
use crate::lifecycle::Lifecycle;
use crate::provider::Provider;

/// One of the four sections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Cached definitions.
    Shared,
    /// Rebuilt-on-every-request bindings.
    Fresh,
    /// Abstract key -> implementation.
    Interfaces,
    /// Literal parameter table.
    Parameters,
}

impl Partition {
    /// Order in which partitions are applied.
    pub const LOAD_ORDER: [Partition; 4] = [
        Partition::Parameters,
        Partition::Shared,
        Partition::Fresh,
        Partition::Interfaces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Shared => "shared",
            Partition::Fresh => "fresh",
            Partition::Interfaces => "interfaces",
            Partition::Parameters => "parameters",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk shape. Missing partitions are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    shared: Map<String, Value>,
    fresh: Map<String, Value>,
    interfaces: Map<String, Value>,
    parameters: Map<String, Value>,
    #[serde(flatten)]
    unknown: Map<String, Value>,
}

/// A bulk-load document.
///
/// Built from JSON, or programmatically when entries need factories or
/// pre-built instances:
///
/// ```
/// use autowire_container::definition::Definition;
/// use autowire_container::loader::ConfigDocument;
///
/// let document = ConfigDocument::new()
///     .shared("Mailer", Definition::class("Mailer"))
///     .fresh("Job", Definition::factory_of(|_| Ok(0u64)))
///     .parameter("retries", 3);
/// assert_eq!(document.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    origin: String,
    shared: Vec<(ServiceKey, Definition)>,
    fresh: Vec<(ServiceKey, Definition)>,
    interfaces: Vec<(ServiceKey, Definition)>,
    parameters: Vec<(String, Definition)>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self {
            origin: "<inline>".to_string(),
            ..Default::default()
        }
    }

    /// Adds a `shared` entry.
    pub fn shared(mut self, key: impl Into<ServiceKey>, definition: impl Into<Definition>) -> Self {
        self.shared.push((key.into(), definition.into()));
        self
    }

    /// Adds a `fresh` entry.
    pub fn fresh(mut self, key: impl Into<ServiceKey>, definition: impl Into<Definition>) -> Self {
        self.fresh.push((key.into(), definition.into()));
        self
    }

    /// Adds an `interfaces` entry.
    pub fn interface(mut self, key: impl Into<ServiceKey>, definition: impl Into<Definition>) -> Self {
        self.interfaces.push((key.into(), definition.into()));
        self
    }

    /// Adds a literal `parameters` entry.
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters
            .push((name.into(), Definition::Literal(value.into())));
        self
    }

    /// Adds a `parameters` entry of any definition kind.
    pub fn parameter_definition(mut self, name: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.parameters.push((name.into(), definition.into()));
        self
    }

    /// Where the document came from (a file path, or `<inline>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Total number of entries across all partitions.
    pub fn len(&self) -> usize {
        self.shared.len() + self.fresh.len() + self.interfaces.len() + self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a JSON text.
    ///
    /// # Errors
    /// [`AutowireError::ConfigFileInvalidShape`] if the text is not JSON or
    /// does not have the document shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::parse(text, "<inline>")
    }

    /// Converts an already parsed JSON value.
    pub fn from_json(value: Value) -> Result<Self> {
        Self::from_value(value, "<inline>")
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    /// - [`AutowireError::ConfigFileMissing`] if `path` does not exist
    /// - [`AutowireError::ConfigFileUnreadable`] on any other I/O failure
    /// - [`AutowireError::ConfigFileInvalidShape`] if the content is malformed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AutowireError::ConfigFileMissing {
                path: path.to_path_buf(),
            },
            _ => AutowireError::ConfigFileUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        debug!(path = %path.display(), bytes = text.len(), "Read configuration file");
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| invalid_shape(origin, e))?;
        Self::from_value(value, origin)
    }

    fn from_value(value: Value, origin: &str) -> Result<Self> {
        if !value.is_object() {
            return Err(AutowireError::ConfigFileInvalidShape {
                origin: origin.to_string(),
                reason: "top level must be an object of partitions".to_string(),
            });
        }

        let raw: RawDocument = serde_json::from_value(value).map_err(|e| invalid_shape(origin, e))?;

        for name in raw.unknown.keys() {
            warn!(origin, partition = %name, "Ignoring unknown partition");
        }

        let services = |entries: Map<String, Value>| -> Vec<(ServiceKey, Definition)> {
            entries
                .into_iter()
                .map(|(key, value)| (ServiceKey::from(key), json_definition(value)))
                .collect()
        };

        Ok(Self {
            origin: origin.to_string(),
            shared: services(raw.shared),
            fresh: services(raw.fresh),
            interfaces: services(raw.interfaces),
            parameters: raw
                .parameters
                .into_iter()
                .map(|(name, value)| (name, Definition::Literal(value)))
                .collect(),
        })
    }
}

/// Strings name classes; everything else is a literal.
fn json_definition(value: Value) -> Definition {
    match value {
        Value::String(name) => Definition::Class(ServiceKey::from(name)),
        other => Definition::Literal(other),
    }
}

fn invalid_shape(origin: &str, error: serde_json::Error) -> AutowireError {
    AutowireError::ConfigFileInvalidShape {
        origin: origin.to_string(),
        reason: error.to_string(),
    }
}

/// An entry the loader could not apply.
#[derive(Debug)]
pub struct SkippedEntry {
    pub partition: Partition,
    pub key: String,
    pub error: AutowireError,
}

/// Outcome of one bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries applied successfully
    pub loaded: usize,
    /// Entries that failed, in load order
    pub skipped: Vec<SkippedEntry>,
}

impl LoadReport {
    /// Returns `true` if every entry was applied.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Returns `true` if `key` was skipped in `partition`.
    pub fn skipped_key(&self, partition: Partition, key: &str) -> bool {
        self.skipped
            .iter()
            .any(|entry| entry.partition == partition && entry.key == key)
    }

    fn record(&mut self, partition: Partition, key: &str, outcome: Result<()>) {
        match outcome {
            Ok(()) => self.loaded += 1,
            Err(error) => {
                warn!(partition = %partition, key, error = %error, "Skipping configuration entry");
                self.skipped.push(SkippedEntry {
                    partition,
                    key: key.to_string(),
                    error,
                });
            }
        }
    }
}

/// Applies every partition of `document` to `container`.
#[instrument(skip_all, fields(origin = %document.origin, entries = document.len()))]
pub(crate) fn load(container: &Container, document: &ConfigDocument) -> LoadReport {
    let mut report = LoadReport::default();

    for partition in Partition::LOAD_ORDER {
        match partition {
            Partition::Parameters => {
                for (name, definition) in &document.parameters {
                    report.record(partition, name, load_parameter(container, name, definition.clone()));
                }
            }
            Partition::Shared => {
                for (key, definition) in &document.shared {
                    report.record(partition, key, load_shared(container, key, definition.clone()));
                }
            }
            Partition::Fresh => {
                for (key, definition) in &document.fresh {
                    report.record(partition, key, load_fresh(container, key, definition.clone()));
                }
            }
            Partition::Interfaces => {
                for (key, definition) in &document.interfaces {
                    report.record(partition, key, container.bind_interface(key, definition.clone()));
                }
            }
        }
    }

    info!(loaded = report.loaded, skipped = report.skipped.len(), "Configuration loaded");
    report
}

fn load_parameter(container: &Container, name: &str, definition: Definition) -> Result<()> {
    match definition {
        Definition::Literal(value) => container.set_parameter(name, value),
        Definition::Instance(instance) => container.set_parameter_instance(name, instance),
        Definition::Class(class) => container.set_parameter(name, class.as_str()),
        other @ Definition::Factory(_) => {
            return Err(AutowireError::InvalidBindingDefinition {
                key: ServiceKey::new(name),
                found: format!("{} (parameters hold values only)", other.describe()),
            });
        }
    }
    Ok(())
}

fn load_shared(container: &Container, key: &ServiceKey, definition: Definition) -> Result<()> {
    match definition {
        Definition::Literal(value @ (Value::Object(_) | Value::Array(_))) => {
            container.set(key, value);
            Ok(())
        }
        Definition::Instance(instance) => {
            container.set(key, instance);
            Ok(())
        }
        other => container.bind_with(key, other, Lifecycle::Shared),
    }
}

fn load_fresh(container: &Container, key: &ServiceKey, definition: Definition) -> Result<()> {
    container.bind_with(key, definition, Lifecycle::Fresh)
}

impl Provider for ConfigDocument {
    fn register(&self, container: &Container) -> Result<()> {
        let report = container.load(self);
        debug!(
            origin = %self.origin,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Applied document as provider"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.origin
    }
}
