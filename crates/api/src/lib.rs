pub mod component;
pub mod descriptor;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use component::{
    Analysis, AnalysisHandle, CellState, Component, Lattice, LatticeGeometry, LatticeHandle,
    ResourceDelegate, Rule, RuleHandle,
};
pub use descriptor::{CanonicalId, ComponentDescriptor, ComponentKind, InitMode};
pub use error::ContractViolation;
pub use manifest::{
    ABI_VERSION, AnalysisFactory, ComponentDecl, ComponentFactory, DelegateFactory, ENTRY_SYMBOL,
    LatticeFactory, PluginEntry, PluginManifest, ProbeOutcome, RuleFactory,
};
