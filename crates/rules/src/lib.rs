//! Built-in simulation rules.
//!
//! Each rule exposes a factory with the standard component constructor shape
//! (one [`InitMode`] argument); the runtime registers them under the `rules`
//! namespace at bootstrap.

pub mod life;
pub mod majority;
pub mod voter;

pub use life::LifeRule;
pub use majority::MajorityRule;
pub use voter::VoterRule;

use cellarium_api::manifest::PluginManifest;

/// Declarations for every built-in rule, in one manifest. The runtime feeds
/// this to the loader; an external unit shipping these rules would fill the
/// identical manifest from its entry function.
pub fn builtin_manifest() -> PluginManifest {
    let mut manifest = PluginManifest::new();
    manifest
        .rule(LifeRule::BASE_NAME, LifeRule::factory)
        .rule(VoterRule::BASE_NAME, VoterRule::factory)
        .rule(MajorityRule::BASE_NAME, MajorityRule::factory);
    manifest
}
