//! Extension-to-loader routing.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::container::{ContainerReader, JsonGridReader};

/// Extension of fixed-format raw dumps.
pub const RAW_EXTENSION: &str = "raw3d";

/// Extension of the built-in JSON sparse-grid container.
pub const JSON_GRID_EXTENSION: &str = "vgrid";

/// How files with a given extension are loaded.
#[derive(Clone)]
pub enum FormatKind {
    /// `name_W_H_D.ext` byte dump.
    Raw,
    /// Sparse-grid container read by the given reader.
    Container(Arc<dyn ContainerReader>),
}

impl fmt::Debug for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("Raw"),
            Self::Container(_) => f.write_str("Container(..)"),
        }
    }
}

/// Maps lowercase extensions (without the dot) to loaders.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: BTreeMap<String, FormatKind>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the raw and JSON grid formats.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(RAW_EXTENSION, FormatKind::Raw);
        registry.register(
            JSON_GRID_EXTENSION,
            FormatKind::Container(Arc::new(JsonGridReader)),
        );
        registry
    }

    /// Adds or replaces the loader for `extension`.
    pub fn register(&mut self, extension: &str, kind: FormatKind) -> Option<FormatKind> {
        self.formats.insert(normalize_extension(extension), kind)
    }

    /// Looks up the loader for `extension`.
    pub fn lookup(&self, extension: &str) -> Option<FormatKind> {
        self.formats.get(&normalize_extension(extension)).cloned()
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::with_builtin();
        assert!(matches!(registry.lookup("raw3d"), Some(FormatKind::Raw)));
        assert!(matches!(registry.lookup("vgrid"), Some(FormatKind::Container(_))));
        assert!(registry.lookup("vdb").is_none());
        assert_eq!(registry.extensions().collect::<Vec<_>>(), vec!["raw3d", "vgrid"]);
    }

    #[test]
    fn test_extension_is_normalized() {
        let registry = FormatRegistry::with_builtin();
        assert!(matches!(registry.lookup(".RAW3D"), Some(FormatKind::Raw)));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FormatRegistry::with_builtin();
        let previous = registry.register(".vgrid", FormatKind::Raw);
        assert!(matches!(previous, Some(FormatKind::Container(_))));
        assert!(matches!(registry.lookup("vgrid"), Some(FormatKind::Raw)));
    }
}
