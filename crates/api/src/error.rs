use thiserror::Error;

/// Structural violations of the extension unit contract. These describe a
/// broken unit, not an incompatible one; the loader folds them into its
/// malformed-unit diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("unit does not export the `cellarium_plugin_entry` symbol")]
    EntryMissing,
    #[error("incompatible ABI version: host={supported}, unit={found}")]
    AbiMismatch { found: u32, supported: u32 },
    #[error("unit file `{file_stem}` declares no component of that name")]
    NameMismatch { file_stem: String },
    #[error("unit could not be loaded: {0}")]
    Unloadable(String),
}
