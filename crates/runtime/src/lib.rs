use cellarium_api::manifest::PluginManifest;
use cellarium_api::{CanonicalId, ResourceDelegate};
use cellarium_core::config::ConfigProvider;
use cellarium_core::resources::{DELEGATE_ID, UserFolderDelegate};
use cellarium_core::session::{Session, SessionPaths};
use cellarium_core::Loader;
use std::sync::{Arc, OnceLock};

static BUILTINS: OnceLock<()> = OnceLock::new();

/// The process-wide session, with built-ins registered on first use.
pub fn global_session() -> &'static Session {
    let session = Session::global();
    BUILTINS.get_or_init(|| register_builtins(session.loader()));
    session
}

/// Bootstraps an isolated workbench session with every built-in component
/// registered.
///
/// This is the central factory for the Cellarium runtime: it assembles the
/// session context and feeds the built-in rule, analysis, and lattice
/// manifests into its loader, the same way an external unit's entry function
/// would.
pub fn build_default_session(
    config: Box<dyn ConfigProvider>,
    paths: SessionPaths,
) -> Session {
    let session = Session::new(config, paths);
    register_builtins(session.loader());
    session
}

/// Registers the built-in component manifests under their default
/// namespaces, plus the default external-resource delegate.
pub fn register_builtins(loader: &Loader) {
    register_manifest(loader, "rules", cellarium_rules::builtin_manifest());
    register_manifest(loader, "analyses", cellarium_analyses::builtin_manifest());
    register_manifest(loader, "lattices", cellarium_lattices::builtin_manifest());

    loader.register_resource_delegate(CanonicalId::from(DELEGATE_ID), user_folder_delegate);
}

fn user_folder_delegate() -> Arc<dyn ResourceDelegate> {
    Arc::new(UserFolderDelegate::new())
}

fn register_manifest(loader: &Loader, namespace: &str, manifest: PluginManifest) {
    for decl in manifest.decls {
        loader.register_decl(
            CanonicalId::new(namespace, &decl.base_name),
            decl.kind,
            decl.factory,
        );
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str) -> Option<impl Drop> {
    Some(cellarium_core::logging::init_logging(component, false))
}
