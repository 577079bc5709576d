//! Secondary-folder merging: configured at runtime, rescanned only on
//! change, last scan pass wins display-name collisions.

use cellarium_api::CanonicalId;
use cellarium_core::config::StaticConfig;
use cellarium_core::session::{Session, SessionPaths};
use cellarium_rules::VoterRule;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn write_bundle(path: &Path, entries: &[&str]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for entry in entries {
        writer.start_file(*entry, options).unwrap();
        writer.write_all(b"").unwrap();
    }
    writer.finish().unwrap();
}

fn session_with_bundle(root: &Path, entries: &[&str]) -> (Session, Arc<StaticConfig>) {
    write_bundle(&root.join("cellarium-bundle.zip"), entries);
    let config = Arc::new(StaticConfig::new());
    let session = cellarium_runtime::build_default_session(
        Box::new(SharedConfig(config.clone())),
        SessionPaths::rooted_at(root.to_path_buf()),
    );
    (session, config)
}

/// Lets the test mutate the configuration the session reads on demand.
struct SharedConfig(Arc<StaticConfig>);

impl cellarium_core::config::ConfigProvider for SharedConfig {
    fn secondary_rules(&self) -> Option<(std::path::PathBuf, String)> {
        self.0.secondary_rules()
    }

    fn secondary_analyses(&self) -> Option<(std::path::PathBuf, String)> {
        self.0.secondary_analyses()
    }
}

#[test]
fn unchanged_secondary_path_is_never_rescanned() {
    let dir = tempfile::tempdir().unwrap();
    let (session, config) = session_with_bundle(dir.path(), &["userRules/Voter.unit"]);
    session
        .loader()
        .register_rule(CanonicalId::from("userRules.Voter"), VoterRule::factory);
    config.set_rules(dir.path().join("userRules"), "userRules");

    let first: Vec<_> = session.rule_catalog().descriptors();
    assert!(first.iter().any(|(_, id)| id == &CanonicalId::from("userRules.Voter")));

    // Repeated accesses with an unchanged configuration leave the catalog
    // exactly as it was.
    for _ in 0..3 {
        assert_eq!(session.rule_catalog().descriptors(), first);
    }
}

#[test]
fn secondary_merge_overwrites_colliding_display_names() {
    let dir = tempfile::tempdir().unwrap();
    let (session, config) = session_with_bundle(dir.path(), &["userRules/Voter.unit"]);
    session
        .loader()
        .register_rule(CanonicalId::from("userRules.Voter"), VoterRule::factory);

    // Before the secondary merge, "Voter Model" is the built-in.
    assert_eq!(
        session.rule_catalog().get("Voter Model"),
        Some(CanonicalId::from("rules.Voter"))
    );

    // The user pass scans later, so it wins the display name.
    config.set_rules(dir.path().join("userRules"), "userRules");
    assert_eq!(
        session.rule_catalog().get("Voter Model"),
        Some(CanonicalId::from("userRules.Voter"))
    );
}

#[test]
fn changing_the_secondary_pair_triggers_a_new_scan() {
    let dir = tempfile::tempdir().unwrap();
    let (session, config) = session_with_bundle(
        dir.path(),
        &["userRules/Voter.unit", "labRules/Voter.unit"],
    );
    session
        .loader()
        .register_rule(CanonicalId::from("userRules.Voter"), VoterRule::factory);
    session
        .loader()
        .register_rule(CanonicalId::from("labRules.Voter"), VoterRule::factory);

    config.set_rules(dir.path().join("userRules"), "userRules");
    assert_eq!(
        session.rule_catalog().get("Voter Model"),
        Some(CanonicalId::from("userRules.Voter"))
    );

    config.set_rules(dir.path().join("labRules"), "labRules");
    assert_eq!(
        session.rule_catalog().get("Voter Model"),
        Some(CanonicalId::from("labRules.Voter"))
    );
}
