//! One-shot warning latches shared across the discovery and loading paths.
//!
//! Most probe failures are expected and stay silent; the few that deserve a
//! warning would otherwise repeat on every probe of the same broken unit.
//! Each warning category fires at most once per session.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Session-scoped set of warning categories that have already fired.
#[derive(Default)]
pub struct DiagnosticLatches {
    fired: DashMap<String, ()>,
}

impl DiagnosticLatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `emit` the first time `category` fires in this session.
    /// Returns true when `emit` actually ran.
    pub fn warn_once(&self, category: impl Into<String>, emit: impl FnOnce()) -> bool {
        match self.fired.entry(category.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(());
                emit();
                true
            }
        }
    }

    pub fn has_fired(&self, category: &str) -> bool {
        self.fired.contains_key(category)
    }

    /// Clears every latch. Invoked by the session controller when a new
    /// simulation session begins, never by registry code.
    pub fn reset_all(&self) {
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_warn_once_fires_once() {
        let latches = DiagnosticLatches::new();
        let count = AtomicUsize::new(0);

        for _ in 0..100 {
            latches.warn_once("missing-factory:rules.Broken", || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(latches.has_fired("missing-factory:rules.Broken"));
        assert!(!latches.has_fired("missing-factory:rules.Other"));
    }

    #[test]
    fn test_reset_rearms_latches() {
        let latches = DiagnosticLatches::new();
        let count = AtomicUsize::new(0);
        let bump = || {
            count.fetch_add(1, Ordering::SeqCst);
        };

        latches.warn_once("scan-folder", bump);
        latches.warn_once("scan-folder", bump);
        latches.reset_all();
        latches.warn_once("scan-folder", bump);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
