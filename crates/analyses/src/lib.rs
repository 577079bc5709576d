//! Built-in analyses: per-generation observers for the analysis panel.

pub mod activity;
pub mod population;

pub use activity::ActivityAnalysis;
pub use population::PopulationAnalysis;

use cellarium_api::manifest::PluginManifest;

/// Declarations for every built-in analysis, in one manifest.
pub fn builtin_manifest() -> PluginManifest {
    let mut manifest = PluginManifest::new();
    manifest
        .analysis(PopulationAnalysis::BASE_NAME, PopulationAnalysis::factory)
        .analysis(ActivityAnalysis::BASE_NAME, ActivityAnalysis::factory);
    manifest
}
