//! One-time library setup.
//!
//! The format registry is process-wide. [`init`] creates it on first call;
//! later calls are no-ops, so every loader entry point calls it freely.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::container::ContainerReader;
use crate::registry::{FormatKind, FormatRegistry};

static REGISTRY: OnceLock<RwLock<FormatRegistry>> = OnceLock::new();

fn registry() -> &'static RwLock<FormatRegistry> {
    REGISTRY.get_or_init(|| {
        log::info!("voxbake initialized");
        RwLock::new(FormatRegistry::with_builtin())
    })
}

/// Initializes the format registry. Safe to call any number of times.
pub fn init() {
    let _ = registry();
}

/// Returns whether [`init`] has run.
#[must_use]
pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}

/// Installs `env_logger` as the `log` backend, unless a logger is already set.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Routes files with `extension` to `reader`, replacing any previous loader.
pub fn register_container_reader(extension: &str, reader: Arc<dyn ContainerReader>) {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(extension, FormatKind::Container(reader));
    log::debug!("registered container reader for '.{extension}'");
}

/// Looks up the loader for `extension`.
pub fn lookup_format(extension: &str) -> Option<FormatKind> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .lookup(extension)
}

/// Extensions with a registered loader.
pub fn registered_extensions() -> Vec<String> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .extensions()
        .map(str::to_string)
        .collect()
}
