//! Behavior tests for the three-tier resource fallback chain.

use cellarium_api::{CanonicalId, ResourceDelegate};
use cellarium_core::config::StaticConfig;
use cellarium_core::resources::DELEGATE_ID;
use cellarium_core::session::{Session, SessionPaths};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Factories are plain fn pointers, so the test delegate finds its root
/// through process state instead of a captured path.
static DELEGATE_ROOT: OnceLock<PathBuf> = OnceLock::new();

struct FixedRootDelegate;

impl ResourceDelegate for FixedRootDelegate {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let candidate = DELEGATE_ROOT.get()?.join(name);
        candidate.is_file().then_some(candidate)
    }
}

fn fixed_root_delegate() -> Arc<dyn ResourceDelegate> {
    Arc::new(FixedRootDelegate)
}

fn session_at(root: PathBuf) -> Session {
    Session::new(Box::new(StaticConfig::new()), SessionPaths::rooted_at(root))
}

#[test]
fn packaged_assets_win_first() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/icon.png"), b"png").unwrap();

    let session = session_at(dir.path().to_path_buf());
    let url = session.resolve_resource("icon.png").unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/assets/icon.png"));
}

#[test]
fn delegate_answers_when_packaged_assets_miss() {
    let install = tempfile::tempdir().unwrap();
    let external = tempfile::tempdir().unwrap();
    DELEGATE_ROOT.get_or_init(|| external.path().to_path_buf());
    std::fs::write(DELEGATE_ROOT.get().unwrap().join("help.txt"), "help").unwrap();

    let session = session_at(install.path().to_path_buf());
    session
        .loader()
        .register_resource_delegate(CanonicalId::from(DELEGATE_ID), fixed_root_delegate);

    let url = session.resolve_resource("help.txt").unwrap();
    assert_eq!(url.scheme(), "file");
    assert!(url.path().ends_with("/help.txt"));

    // A resource that exists nowhere resolves to absent, not an error.
    assert!(session.resolve_resource("missing.png").is_none());
    assert!(session.resolve_resource("").is_none());
}

#[test]
fn bundle_anchor_is_the_last_resort() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("cellarium-bundle.zip");
    let mut writer = zip::ZipWriter::new(File::create(&bundle).unwrap());
    writer
        .start_file("assets/splash.png", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"png").unwrap();
    writer.finish().unwrap();

    let session = session_at(dir.path().to_path_buf());
    let url = session.resolve_resource("splash.png").unwrap();
    assert_eq!(url.scheme(), "zip");
    assert!(url.as_str().ends_with("!/assets/splash.png"));
}
