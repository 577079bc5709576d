//! Extension unit ABI.
//!
//! A dynamic-library unit exports one entry function under [`ENTRY_SYMBOL`]
//! that fills in a [`PluginManifest`]: the ABI version it was built against
//! and one declaration per component it ships. Built-in component crates go
//! through the same declarations, registered directly at bootstrap, so the
//! discovery pipeline treats both load paths identically.

use crate::component::{AnalysisHandle, LatticeHandle, ResourceDelegate, RuleHandle};
use crate::descriptor::{ComponentKind, InitMode};
use std::sync::Arc;

/// Bumped whenever the manifest or a component trait changes shape.
pub const ABI_VERSION: u32 = 1;

/// Symbol every external unit must export.
pub const ENTRY_SYMBOL: &[u8] = b"cellarium_plugin_entry\0";

/// Signature of the entry symbol.
pub type PluginEntry = extern "C" fn(&mut PluginManifest);

pub type RuleFactory = fn(InitMode) -> RuleHandle;
pub type AnalysisFactory = fn(InitMode) -> AnalysisHandle;
pub type LatticeFactory = fn(InitMode) -> LatticeHandle;

/// Resource delegates take no construction arguments.
pub type DelegateFactory = fn() -> Arc<dyn ResourceDelegate>;

/// Per-kind constructor slot.
#[derive(Clone, Copy)]
pub enum ComponentFactory {
    Rule(RuleFactory),
    Analysis(AnalysisFactory),
    Lattice(LatticeFactory),
}

impl ComponentFactory {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentFactory::Rule(_) => ComponentKind::Rule,
            ComponentFactory::Analysis(_) => ComponentKind::Analysis,
            ComponentFactory::Lattice(_) => ComponentKind::Lattice,
        }
    }
}

/// One component advertised by a unit. The base name is qualified by the
/// namespace of whichever scan pass picked the unit up.
///
/// A declaration whose `factory` is `None` is structurally visible but not
/// constructible — the extension-author mistake the loader reports once.
pub struct ComponentDecl {
    pub base_name: String,
    pub kind: ComponentKind,
    pub factory: Option<ComponentFactory>,
}

/// Filled in by a unit's entry function.
#[derive(Default)]
pub struct PluginManifest {
    pub abi_version: u32,
    pub decls: Vec<ComponentDecl>,
}

impl PluginManifest {
    pub fn new() -> Self {
        Self {
            abi_version: ABI_VERSION,
            decls: Vec::new(),
        }
    }

    pub fn rule(&mut self, base_name: impl Into<String>, factory: RuleFactory) -> &mut Self {
        self.decls.push(ComponentDecl {
            base_name: base_name.into(),
            kind: ComponentKind::Rule,
            factory: Some(ComponentFactory::Rule(factory)),
        });
        self
    }

    pub fn analysis(&mut self, base_name: impl Into<String>, factory: AnalysisFactory) -> &mut Self {
        self.decls.push(ComponentDecl {
            base_name: base_name.into(),
            kind: ComponentKind::Analysis,
            factory: Some(ComponentFactory::Analysis(factory)),
        });
        self
    }

    pub fn lattice(&mut self, base_name: impl Into<String>, factory: LatticeFactory) -> &mut Self {
        self.decls.push(ComponentDecl {
            base_name: base_name.into(),
            kind: ComponentKind::Lattice,
            factory: Some(ComponentFactory::Lattice(factory)),
        });
        self
    }

    /// Declare a component without a constructor. Exists so units can ship
    /// forward declarations; probing one trips the missing-factory warning.
    pub fn declare(&mut self, base_name: impl Into<String>, kind: ComponentKind) -> &mut Self {
        self.decls.push(ComponentDecl {
            base_name: base_name.into(),
            kind,
            factory: None,
        });
        self
    }
}

/// Result of testing a candidate identifier against a component kind.
///
/// `Incompatible` is the dominant, expected outcome of compatibility probing
/// (every rule candidate probed against the analysis contract lands here) and
/// must never be reported. The other failure arms carry their own one-shot
/// diagnostics in the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Candidate constructed minimally and reported its display name.
    Compatible { display_name: String },
    /// Candidate is not an implementation of this kind.
    Incompatible,
    /// Candidate declared itself but ships no constructor.
    MissingFactory,
    /// Candidate unit is structurally broken (unloadable, ABI mismatch,
    /// unit/name mismatch).
    Malformed(String),
}

impl ProbeOutcome {
    pub fn is_compatible(&self) -> bool {
        matches!(self, ProbeOutcome::Compatible { .. })
    }
}
