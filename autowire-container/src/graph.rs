//! Dependency graph checks.
//!
//! Two guards against broken object graphs:
//! - [`ResolutionPath`] travels with every resolution and fails fast when a
//!   key is re-entered while it is still being built
//! - [`GraphValidator`] walks the declared dependencies of every known key
//!   ahead of time (`Container::validate`), reporting cycles and missing
//!   services before the first `get`

use std::collections::{HashMap, HashSet};

use autowire_support::rendering::suggest_similar;
use tracing::{debug, instrument, warn};

use crate::error::{AutowireError, CircularDependencyError, Result, ServiceNotFoundError};
use crate::key::ServiceKey;

/// Keys currently being resolved on one call chain, outermost first.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResolutionPath {
    chain: Vec<ServiceKey>,
}

impl ResolutionPath {
    /// Returns the path extended with `key`.
    ///
    /// # Errors
    /// [`AutowireError::CircularDependency`] if `key` is already on the path.
    pub fn enter(&self, key: &ServiceKey) -> Result<Self> {
        if let Some(start) = self.chain.iter().position(|k| k == key) {
            let mut chain = self.chain[start..].to_vec();
            chain.push(key.clone());

            warn!(cycle = ?chain, "Circular dependency detected!");

            return Err(AutowireError::CircularDependency(CircularDependencyError { chain }));
        }

        let mut chain = self.chain.clone();
        chain.push(key.clone());
        Ok(Self { chain })
    }

    /// The innermost key on the path other than `key` itself.
    pub fn requester_of(&self, key: &ServiceKey) -> Option<ServiceKey> {
        self.chain.iter().rev().find(|k| *k != key).cloned()
    }

    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// Declared dependencies of one key.
#[derive(Debug, Clone)]
pub(crate) struct DependencyInfo {
    /// What this node produces
    pub key: ServiceKey,
    /// Keys its construction resolves (typed constructor parameters)
    pub dependencies: Vec<ServiceKey>,
}

/// Validates the declared dependency graph.
///
/// Checks performed:
/// 1. **Completeness**: every typed parameter names a known key
/// 2. **Acyclicity**: no key depends on itself, directly or transitively
///
/// Factories are opaque and contribute no edges.
///
/// # Algorithm
/// Depth-first search with a "visiting" set for cycle detection.
pub(crate) struct GraphValidator {
    dependencies: HashMap<ServiceKey, DependencyInfo>,
    visiting: HashSet<ServiceKey>,
    validated: HashSet<ServiceKey>,
    path: Vec<ServiceKey>,
}

impl GraphValidator {
    pub fn new(dependencies: HashMap<ServiceKey, DependencyInfo>) -> Self {
        Self {
            dependencies,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Validates the entire graph.
    ///
    /// # Errors
    /// - [`AutowireError::CircularDependency`]: cycle detected
    /// - [`AutowireError::ServiceNotFound`]: missing dependency
    #[instrument(skip(self), name = "graph_validation")]
    pub fn validate(&mut self) -> Result<()> {
        let mut keys: Vec<ServiceKey> = self.dependencies.keys().cloned().collect();
        keys.sort();

        debug!(node_count = keys.len(), "Starting dependency graph validation");

        for key in keys {
            if !self.validated.contains(&key) {
                self.validate_key(&key)?;
            }
        }

        debug!("Dependency graph validation passed ✓");
        Ok(())
    }

    fn validate_key(&mut self, key: &ServiceKey) -> Result<()> {
        if self.validated.contains(key) {
            return Ok(());
        }

        if self.visiting.contains(key) {
            let cycle_start = self.path.iter().position(|k| k == key).unwrap_or(0);

            let mut chain: Vec<ServiceKey> = self.path[cycle_start..].to_vec();
            chain.push(key.clone());

            warn!(cycle = ?chain, "Circular dependency detected!");

            return Err(AutowireError::CircularDependency(CircularDependencyError { chain }));
        }

        let info = self.dependencies.get(key).cloned().ok_or_else(|| {
            AutowireError::ServiceNotFound(ServiceNotFoundError {
                requested: key.clone(),
                required_by: self.path.last().cloned(),
                suggestions: self.find_similar_keys(key),
            })
        })?;

        self.visiting.insert(key.clone());
        self.path.push(key.clone());

        for dep_key in &info.dependencies {
            self.validate_key(dep_key)?;
        }

        self.path.pop();
        self.visiting.remove(key);
        self.validated.insert(key.clone());

        Ok(())
    }

    fn find_similar_keys(&self, target: &ServiceKey) -> Vec<String> {
        let known: Vec<&str> = self.dependencies.keys().map(ServiceKey::as_str).collect();
        suggest_similar(target.as_str(), &known, 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep_info(key: &str, deps: &[&str]) -> DependencyInfo {
        DependencyInfo {
            key: ServiceKey::new(key),
            dependencies: deps.iter().map(|d| ServiceKey::new(d)).collect(),
        }
    }

    fn make_graph(infos: Vec<DependencyInfo>) -> HashMap<ServiceKey, DependencyInfo> {
        infos.into_iter().map(|i| (i.key.clone(), i)).collect()
    }

    #[test]
    fn path_detects_reentry() {
        let path = ResolutionPath::default()
            .enter(&ServiceKey::new("A"))
            .unwrap()
            .enter(&ServiceKey::new("B"))
            .unwrap();
        assert_eq!(path.depth(), 2);

        match path.enter(&ServiceKey::new("A")) {
            Err(AutowireError::CircularDependency(err)) => {
                let names: Vec<&str> = err.chain.iter().map(ServiceKey::as_str).collect();
                assert_eq!(names, vec!["A", "B", "A"]);
            }
            other => panic!("Expected CircularDependency, got: {other:?}"),
        }
    }

    #[test]
    fn path_requester_skips_self() {
        let path = ResolutionPath::default()
            .enter(&ServiceKey::new("Mailer"))
            .unwrap()
            .enter(&ServiceKey::new("Transport"))
            .unwrap();
        assert_eq!(
            path.requester_of(&ServiceKey::new("Transport")),
            Some(ServiceKey::new("Mailer"))
        );
        assert_eq!(ResolutionPath::default().requester_of(&ServiceKey::new("X")), None);
    }

    #[test]
    fn valid_simple_graph() {
        let graph = make_graph(vec![
            dep_info("Database", &[]),
            dep_info("UserRepo", &["Database"]),
            dep_info("UserService", &["UserRepo"]),
        ]);
        assert!(GraphValidator::new(graph).validate().is_ok());
    }

    #[test]
    fn detect_circular_dependency() {
        let graph = make_graph(vec![
            dep_info("A", &["B"]),
            dep_info("B", &["C"]),
            dep_info("C", &["A"]),
        ]);

        match GraphValidator::new(graph).validate() {
            Err(AutowireError::CircularDependency(err)) => assert_eq!(err.chain.len(), 4),
            other => panic!("Expected CircularDependency, got: {other:?}"),
        }
    }

    #[test]
    fn detect_self_dependency() {
        let graph = make_graph(vec![dep_info("A", &["A"])]);
        assert!(GraphValidator::new(graph).validate().is_err());
    }

    #[test]
    fn detect_missing_dependency() {
        let graph = make_graph(vec![dep_info("Mailer", &["Transprt"]), dep_info("Transport", &[])]);

        match GraphValidator::new(graph).validate() {
            Err(AutowireError::ServiceNotFound(err)) => {
                assert_eq!(err.requested, "Transprt");
                assert_eq!(err.required_by, Some(ServiceKey::new("Mailer")));
                assert_eq!(err.suggestions, vec!["Transport".to_string()]);
            }
            other => panic!("Expected ServiceNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn diamond_dependency_ok() {
        let graph = make_graph(vec![
            dep_info("D", &[]),
            dep_info("B", &["D"]),
            dep_info("C", &["D"]),
            dep_info("A", &["B", "C"]),
        ]);
        assert!(GraphValidator::new(graph).validate().is_ok());
    }
}
