//! Loading and adaptation of external extension units.
//!
//! A unit is a platform dynamic library exporting the manifest entry symbol.
//! Loaded libraries stay alive for the session lifetime because registered
//! factories point into their code.

use cellarium_api::manifest::{ABI_VERSION, ENTRY_SYMBOL, PluginEntry, PluginManifest};
use cellarium_api::ContractViolation;
use libloading::{Library, Symbol};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Mutex;

/// A successfully adapted unit: its manifest plus the library handle that
/// must outlive every factory registered from it.
pub struct LoadedUnit {
    pub manifest: PluginManifest,
    _lib: Library,
}

/// Keeps adapted units alive for the owning session.
#[derive(Default)]
pub struct UnitStore {
    units: Mutex<Vec<LoadedUnit>>,
}

impl UnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&self, unit: LoadedUnit) {
        self.units.lock().unwrap().push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Suffix filter for compiled units in extension folders.
pub fn is_dynamic_unit(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("so") | Some("dylib") | Some("dll")
    )
}

/// Open a candidate unit, resolve its entry symbol, and collect its manifest.
///
/// Every failure here is a structural contract violation; the caller folds it
/// into the malformed-unit taxonomy. An incompatible-but-well-formed unit
/// cannot fail here — compatibility is decided later, by probing.
pub fn open_unit(path: &Path) -> Result<LoadedUnit, ContractViolation> {
    let lib = unsafe { Library::new(path) }
        .map_err(|e| ContractViolation::Unloadable(e.to_string()))?;

    let entry: Symbol<PluginEntry> = unsafe { lib.get(ENTRY_SYMBOL) }
        .map_err(|_| ContractViolation::EntryMissing)?;

    let mut manifest = PluginManifest {
        abi_version: 0,
        decls: Vec::new(),
    };
    entry(&mut manifest);

    if manifest.abi_version != ABI_VERSION {
        return Err(ContractViolation::AbiMismatch {
            found: manifest.abi_version,
            supported: ABI_VERSION,
        });
    }

    drop(entry);
    Ok(LoadedUnit {
        manifest,
        _lib: lib,
    })
}

/// The unit's file stem must be among its declared component names, the same
/// way a compiled unit must contain the type its file name promises.
pub fn check_name(unit: &LoadedUnit, file_stem: &str) -> Result<(), ContractViolation> {
    if unit.manifest.decls.iter().any(|d| d.base_name == file_stem) {
        Ok(())
    } else {
        Err(ContractViolation::NameMismatch {
            file_stem: file_stem.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_suffix_filter() {
        assert!(is_dynamic_unit(Path::new("ext/libvoter.so")));
        assert!(is_dynamic_unit(Path::new("ext/voter.dylib")));
        assert!(is_dynamic_unit(Path::new("ext\\voter.dll")));
        assert!(!is_dynamic_unit(Path::new("ext/voter.txt")));
        assert!(!is_dynamic_unit(Path::new("ext/voter")));
    }

    #[test]
    fn test_garbage_unit_is_unloadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Garbage.so");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"not an object file").unwrap();

        match open_unit(&path) {
            Err(ContractViolation::Unloadable(_)) => {}
            Err(other) => panic!("expected Unloadable, got {other:?}"),
            Ok(_) => panic!("expected Unloadable, got a loaded unit"),
        }
    }
}
