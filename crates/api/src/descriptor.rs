use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified name that uniquely identifies one implementation unit
/// within a namespace. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Build an identifier from a namespace and the unit's base name,
    /// e.g. `("rules", "Life")` -> `rules.Life`.
    pub fn new(namespace: &str, base_name: &str) -> Self {
        Self(format!("{namespace}.{base_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last `.`; empty when the id is unqualified.
    pub fn namespace(&self) -> &str {
        self.0.rsplit_once('.').map(|(ns, _)| ns).unwrap_or("")
    }

    /// Everything after the last `.`.
    pub fn base_name(&self) -> &str {
        self.0.rsplit_once('.').map(|(_, base)| base).unwrap_or(&self.0)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CanonicalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CanonicalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The three pluggable extension categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Rule,
    Analysis,
    Lattice,
}

impl ComponentKind {
    /// Namespace that qualifies identifiers of built-in units of this kind.
    pub fn default_namespace(&self) -> &'static str {
        match self {
            ComponentKind::Rule => "rules",
            ComponentKind::Analysis => "analyses",
            ComponentKind::Lattice => "lattices",
        }
    }

    /// Folder name holding this kind's units, both in an unpacked install
    /// and under a user extension root.
    pub fn folder_name(&self) -> &'static str {
        // Folder layout mirrors the namespace in path form.
        self.default_namespace()
    }

    /// Lowercase label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Rule => "rule",
            ComponentKind::Analysis => "analysis",
            ComponentKind::Lattice => "lattice",
        }
    }
}

/// Construction depth requested from a component factory.
///
/// `Minimal` must stay O(1) in grid dimensions: metadata only, no working
/// buffers. `Full` produces an execution-ready instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    Minimal,
    Full,
}

impl InitMode {
    pub fn is_minimal(self) -> bool {
        matches!(self, InitMode::Minimal)
    }
}

/// A successfully probed candidate: its display name, canonical identifier,
/// and the namespace the scan pass found it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub display_name: String,
    pub id: CanonicalId,
    pub namespace: String,
}

impl ComponentDescriptor {
    pub fn new(display_name: impl Into<String>, id: CanonicalId, namespace: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id,
            namespace: namespace.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_parts() {
        let id = CanonicalId::new("userRules", "Voter");
        assert_eq!(id.as_str(), "userRules.Voter");
        assert_eq!(id.namespace(), "userRules");
        assert_eq!(id.base_name(), "Voter");

        let unqualified = CanonicalId::from("Voter");
        assert_eq!(unqualified.namespace(), "");
        assert_eq!(unqualified.base_name(), "Voter");
    }

    #[test]
    fn test_kind_defaults() {
        assert_eq!(ComponentKind::Rule.default_namespace(), "rules");
        assert_eq!(ComponentKind::Analysis.folder_name(), "analyses");
        assert_eq!(ComponentKind::Lattice.label(), "lattice");
    }
}
