//! Factory tables and dynamic instantiation.
//!
//! The loader is a session's sole authority for component identity: every
//! scan pass, whatever its source (registered built-ins, an extension folder,
//! the packaged bundle), resolves identifiers through the same tables.
//! Two descriptors naming the same identifier therefore construct through the
//! same factory and share any class-scoped state the implementation keeps.

use crate::diagnostics::DiagnosticLatches;
use cellarium_api::{
    AnalysisFactory, AnalysisHandle, CanonicalId, ComponentFactory, ComponentKind, DelegateFactory,
    InitMode, LatticeFactory, LatticeHandle, ProbeOutcome, ResourceDelegate, RuleFactory,
    RuleHandle,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{error, warn};

/// Identifier of a stale unit shipped by pre-0.3 installers. In-place
/// upgrades can leave it behind, so probing it must not alarm extension
/// authors: it is exempt from the missing-factory warning.
pub const LEGACY_STUB_ID: &str = "rules.GasDemo";

/// Per-session component factory tables.
pub struct Loader {
    rules: RwLock<HashMap<CanonicalId, RuleFactory>>,
    analyses: RwLock<HashMap<CanonicalId, AnalysisFactory>>,
    lattices: RwLock<HashMap<CanonicalId, LatticeFactory>>,
    delegates: RwLock<HashMap<CanonicalId, DelegateFactory>>,
    /// Declarations that arrived without a constructor.
    stubs: RwLock<HashMap<CanonicalId, ComponentKind>>,
    /// Units that failed structural adaptation, with the reason.
    malformed: RwLock<HashMap<CanonicalId, String>>,
    latches: Arc<DiagnosticLatches>,
}

impl Loader {
    pub fn new(latches: Arc<DiagnosticLatches>) -> Self {
        Self {
            rules: RwLock::new(HashMap::new()),
            analyses: RwLock::new(HashMap::new()),
            lattices: RwLock::new(HashMap::new()),
            delegates: RwLock::new(HashMap::new()),
            stubs: RwLock::new(HashMap::new()),
            malformed: RwLock::new(HashMap::new()),
            latches,
        }
    }

    pub fn register_rule(&self, id: CanonicalId, factory: RuleFactory) {
        self.rules.write().unwrap().insert(id, factory);
    }

    pub fn register_analysis(&self, id: CanonicalId, factory: AnalysisFactory) {
        self.analyses.write().unwrap().insert(id, factory);
    }

    pub fn register_lattice(&self, id: CanonicalId, factory: LatticeFactory) {
        self.lattices.write().unwrap().insert(id, factory);
    }

    pub fn register_resource_delegate(&self, id: CanonicalId, factory: DelegateFactory) {
        self.delegates.write().unwrap().insert(id, factory);
    }

    /// Register a declaration under whichever factory slot it carries.
    pub fn register_decl(&self, id: CanonicalId, kind: ComponentKind, factory: Option<ComponentFactory>) {
        match factory {
            Some(ComponentFactory::Rule(f)) => self.register_rule(id, f),
            Some(ComponentFactory::Analysis(f)) => self.register_analysis(id, f),
            Some(ComponentFactory::Lattice(f)) => self.register_lattice(id, f),
            None => {
                self.stubs.write().unwrap().insert(id, kind);
            }
        }
    }

    /// Record a unit that failed structural adaptation. Probes of its
    /// identifier report `Malformed` from then on.
    pub fn register_malformed(&self, id: CanonicalId, reason: impl Into<String>) {
        self.malformed.write().unwrap().insert(id, reason.into());
    }

    /// Whether `id` is known at all: any factory table, or a stub or
    /// malformed record. Used to skip re-adapting units on rescans.
    pub fn contains_any(&self, id: &CanonicalId) -> bool {
        self.rules.read().unwrap().contains_key(id)
            || self.analyses.read().unwrap().contains_key(id)
            || self.lattices.read().unwrap().contains_key(id)
            || self.stubs.read().unwrap().contains_key(id)
            || self.malformed.read().unwrap().contains_key(id)
    }

    pub fn contains(&self, kind: ComponentKind, id: &CanonicalId) -> bool {
        match kind {
            ComponentKind::Rule => self.rules.read().unwrap().contains_key(id),
            ComponentKind::Analysis => self.analyses.read().unwrap().contains_key(id),
            ComponentKind::Lattice => self.lattices.read().unwrap().contains_key(id),
        }
    }

    /// Identifiers registered under `namespace` for `kind`, in no particular
    /// order. Stub and malformed identifiers are included so that probing a
    /// namespace surfaces their diagnostics.
    pub fn ids_in_namespace(&self, kind: ComponentKind, namespace: &str) -> Vec<CanonicalId> {
        let mut ids: Vec<CanonicalId> = match kind {
            ComponentKind::Rule => self.rules.read().unwrap().keys().cloned().collect(),
            ComponentKind::Analysis => self.analyses.read().unwrap().keys().cloned().collect(),
            ComponentKind::Lattice => self.lattices.read().unwrap().keys().cloned().collect(),
        };
        ids.extend(self.stubs.read().unwrap().keys().cloned());
        ids.extend(self.malformed.read().unwrap().keys().cloned());
        ids.retain(|id| id.namespace() == namespace);
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        ids
    }

    /// Test whether `id` satisfies `kind`'s contract by constructing it
    /// minimally and reading its display name.
    ///
    /// `Incompatible` is the expected, high-frequency outcome and is never
    /// logged. The missing-factory and malformed arms each carry a one-shot
    /// diagnostic.
    pub fn probe(&self, kind: ComponentKind, id: &CanonicalId) -> ProbeOutcome {
        if let Some(reason) = self.malformed.read().unwrap().get(id).cloned() {
            self.latches.warn_once(format!("malformed:{id}"), || {
                error!("extension unit `{id}` is malformed and was excluded: {reason}");
            });
            return ProbeOutcome::Malformed(reason);
        }

        if self.stubs.read().unwrap().contains_key(id) {
            if id.as_str() != LEGACY_STUB_ID {
                self.latches.warn_once(format!("missing-factory:{id}"), || {
                    warn!(
                        "component `{id}` declares no constructor; \
                         expected a factory taking an InitMode"
                    );
                });
            }
            return ProbeOutcome::MissingFactory;
        }

        let display_name = match kind {
            ComponentKind::Rule => self
                .rules
                .read()
                .unwrap()
                .get(id)
                .map(|f| f(InitMode::Minimal).display_name().to_string()),
            ComponentKind::Analysis => self
                .analyses
                .read()
                .unwrap()
                .get(id)
                .map(|f| f(InitMode::Minimal).display_name().to_string()),
            ComponentKind::Lattice => self
                .lattices
                .read()
                .unwrap()
                .get(id)
                .map(|f| f(InitMode::Minimal).display_name().to_string()),
        };

        match display_name {
            Some(display_name) => ProbeOutcome::Compatible { display_name },
            None => ProbeOutcome::Incompatible,
        }
    }

    pub fn instantiate_rule(&self, id: &CanonicalId, mode: InitMode) -> Option<RuleHandle> {
        let factory = self.rules.read().unwrap().get(id).copied()?;
        Some(factory(mode))
    }

    pub fn instantiate_analysis(&self, id: &CanonicalId, mode: InitMode) -> Option<AnalysisHandle> {
        let factory = self.analyses.read().unwrap().get(id).copied()?;
        Some(factory(mode))
    }

    pub fn instantiate_lattice(&self, id: &CanonicalId, mode: InitMode) -> Option<LatticeHandle> {
        let factory = self.lattices.read().unwrap().get(id).copied()?;
        Some(factory(mode))
    }

    pub fn instantiate_delegate(&self, id: &CanonicalId) -> Option<Arc<dyn ResourceDelegate>> {
        let factory = self.delegates.read().unwrap().get(id).copied()?;
        Some(factory())
    }
}
