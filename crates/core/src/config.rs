//! Workbench configuration, read on demand.
//!
//! Only the rule and analysis kinds have a user-configurable secondary
//! folder; lattices ship built-in only.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Source of the secondary folder/namespace pairs. Catalogs query this on
/// every access and rescan only when the answer changes.
pub trait ConfigProvider: Send + Sync {
    fn secondary_rules(&self) -> Option<(PathBuf, String)>;
    fn secondary_analyses(&self) -> Option<(PathBuf, String)>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    pub user_rule_folder: Option<PathBuf>,
    pub user_rule_namespace: Option<String>,
    pub user_analysis_folder: Option<PathBuf>,
    pub user_analysis_namespace: Option<String>,
}

impl WorkbenchConfig {
    /// Load and validate a configuration file. The on-demand provider
    /// degrades failures to defaults; settings UIs call this directly to
    /// report what is wrong.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn secondary(
        folder: &Option<PathBuf>,
        namespace: &Option<String>,
    ) -> Option<(PathBuf, String)> {
        match (folder, namespace) {
            (Some(folder), Some(namespace)) if !namespace.is_empty() => {
                Some((folder.clone(), namespace.clone()))
            }
            _ => None,
        }
    }
}

/// Reads `~/.cellarium/config.json` every time it is asked, so edits made
/// while the workbench runs are picked up on the next catalog access.
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: home.join(".cellarium/config.json"),
        }
    }

    /// Create with a custom config path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> WorkbenchConfig {
        match WorkbenchConfig::load_from(&self.path) {
            Ok(config) => config,
            Err(e) => {
                if self.path.exists() {
                    debug!("config file {} is unusable: {e}", self.path.display());
                }
                WorkbenchConfig::default()
            }
        }
    }
}

impl Default for FileConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for FileConfigProvider {
    fn secondary_rules(&self) -> Option<(PathBuf, String)> {
        let config = self.load();
        WorkbenchConfig::secondary(&config.user_rule_folder, &config.user_rule_namespace)
    }

    fn secondary_analyses(&self) -> Option<(PathBuf, String)> {
        let config = self.load();
        WorkbenchConfig::secondary(&config.user_analysis_folder, &config.user_analysis_namespace)
    }
}

/// In-memory provider for tests and embedders that configure
/// programmatically.
#[derive(Default)]
pub struct StaticConfig {
    pub rules: std::sync::RwLock<Option<(PathBuf, String)>>,
    pub analyses: std::sync::RwLock<Option<(PathBuf, String)>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rules(&self, folder: PathBuf, namespace: impl Into<String>) {
        *self.rules.write().unwrap() = Some((folder, namespace.into()));
    }

    pub fn set_analyses(&self, folder: PathBuf, namespace: impl Into<String>) {
        *self.analyses.write().unwrap() = Some((folder, namespace.into()));
    }
}

impl ConfigProvider for StaticConfig {
    fn secondary_rules(&self) -> Option<(PathBuf, String)> {
        self.rules.read().unwrap().clone()
    }

    fn secondary_analyses(&self) -> Option<(PathBuf, String)> {
        self.analyses.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{"user_rule_folder": "/home/ca/userRules", "user_rule_namespace": "userRules"}}"#
        )
        .unwrap();

        let provider = FileConfigProvider::with_path(path);
        assert_eq!(
            provider.secondary_rules(),
            Some((PathBuf::from("/home/ca/userRules"), "userRules".to_string()))
        );
        // Analysis pair is unset, so no secondary scan for that kind.
        assert_eq!(provider.secondary_analyses(), None);
    }

    #[test]
    fn test_load_from_reports_what_is_wrong() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();

        assert!(matches!(
            WorkbenchConfig::load_from(&bad),
            Err(crate::error::CellariumError::Json(_))
        ));
        assert!(matches!(
            WorkbenchConfig::load_from(&dir.path().join("absent.json")),
            Err(crate::error::CellariumError::Io(_))
        ));
    }

    #[test]
    fn test_missing_or_invalid_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileConfigProvider::with_path(dir.path().join("absent.json"));
        assert_eq!(provider.secondary_rules(), None);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        let provider = FileConfigProvider::with_path(bad);
        assert_eq!(provider.secondary_analyses(), None);
    }
}
