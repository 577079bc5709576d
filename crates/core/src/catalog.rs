//! Display-name catalogs, one per component kind.
//!
//! A catalog maps the human-readable display name to the canonical
//! identifier that resolves it. It is append-merged across scan passes and
//! cached for the session lifetime; the only rescans are triggered by a
//! change in the user-configured secondary folder.

use crate::discovery::Scanner;
use cellarium_api::{CanonicalId, ComponentDescriptor, ComponentKind};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};
use tracing::debug;

pub struct Catalog {
    kind: ComponentKind,
    entries: RwLock<HashMap<String, CanonicalId>>,
    primed: OnceLock<()>,
    /// Last-observed secondary (folder, namespace) pair; discovery re-runs
    /// only when the configured value changes.
    secondary: RwLock<Option<(PathBuf, String)>>,
}

impl Catalog {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
            primed: OnceLock::new(),
            secondary: RwLock::new(None),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn get(&self, display_name: &str) -> Option<CanonicalId> {
        self.entries.read().unwrap().get(display_name).cloned()
    }

    pub fn contains_id(&self, id: &CanonicalId) -> bool {
        self.entries.read().unwrap().values().any(|v| v == id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Snapshot of the current entries, sorted by display name.
    pub fn descriptors(&self) -> Vec<(String, CanonicalId)> {
        let mut all: Vec<(String, CanonicalId)> = self
            .entries
            .read()
            .unwrap()
            .iter()
            .map(|(name, id)| (name.clone(), id.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Append-merge a scan pass. A display name colliding with an earlier
    /// pass is overwritten; the later pass wins.
    pub fn merge(&self, descriptors: Vec<ComponentDescriptor>) {
        let mut entries = self.entries.write().unwrap();
        for d in descriptors {
            if let Some(prev) = entries.insert(d.display_name.clone(), d.id.clone()) {
                if prev != d.id {
                    debug!(
                        "{} display name \"{}\" now resolves to {} (was {})",
                        self.kind.label(),
                        d.display_name,
                        d.id,
                        prev
                    );
                }
            }
        }
    }

    /// One-time build from the kind's default namespace: registered
    /// built-ins first, then the install folder or bundle when present.
    pub(crate) fn prime(&self, scanner: &Scanner<'_>, install_root: &std::path::Path) {
        self.primed.get_or_init(|| {
            let namespace = self.kind.default_namespace();
            self.merge(scanner.scan_registered(namespace, self.kind));
            let folder = install_root.join(self.kind.folder_name());
            self.merge(scanner.scan(&folder, namespace, self.kind));
        });
    }

    /// Re-invoke discovery against the secondary folder only when the
    /// configured pair differs from the last one observed.
    pub(crate) fn sync_secondary(&self, scanner: &Scanner<'_>, configured: Option<(PathBuf, String)>) {
        {
            let observed = self.secondary.read().unwrap();
            if *observed == configured {
                return;
            }
        }
        let mut observed = self.secondary.write().unwrap();
        if *observed == configured {
            return;
        }
        *observed = configured.clone();
        if let Some((folder, namespace)) = configured {
            self.merge(scanner.scan(&folder, &namespace, self.kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, id: &str, namespace: &str) -> ComponentDescriptor {
        ComponentDescriptor::new(name, CanonicalId::from(id), namespace)
    }

    #[test]
    fn test_merge_and_lookup() {
        let catalog = Catalog::new(ComponentKind::Rule);
        catalog.merge(vec![
            descriptor("Game of Life", "rules.Life", "rules"),
            descriptor("Voter Model", "rules.Voter", "rules"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Voter Model"), Some(CanonicalId::from("rules.Voter")));
        assert_eq!(catalog.get("Nonexistent"), None);
        assert!(catalog.contains_id(&CanonicalId::from("rules.Life")));
        assert!(!catalog.contains_id(&CanonicalId::from("rules.Voter2")));
    }

    #[test]
    fn test_collision_last_scanned_wins() {
        let catalog = Catalog::new(ComponentKind::Rule);
        catalog.merge(vec![descriptor("X", "rules.A", "rules")]);
        catalog.merge(vec![descriptor("X", "userRules.B", "userRules")]);
        assert_eq!(catalog.get("X"), Some(CanonicalId::from("userRules.B")));

        // Reversed order resolves the other way.
        let reversed = Catalog::new(ComponentKind::Rule);
        reversed.merge(vec![descriptor("X", "userRules.B", "userRules")]);
        reversed.merge(vec![descriptor("X", "rules.A", "rules")]);
        assert_eq!(reversed.get("X"), Some(CanonicalId::from("rules.A")));
    }

    #[test]
    fn test_remerge_is_idempotent() {
        let catalog = Catalog::new(ComponentKind::Analysis);
        let pass = vec![
            descriptor("Population Count", "analyses.Population", "analyses"),
            descriptor("Activity Trace", "analyses.Activity", "analyses"),
        ];
        catalog.merge(pass.clone());
        let before = catalog.descriptors();
        catalog.merge(pass.clone());
        catalog.merge(pass);
        assert_eq!(catalog.descriptors(), before);
    }
}
