//! Local template store path resolution.
//!
//! Maps `(depot, identifier)` to a deterministic directory in the local
//! template store. Pure path computation, no I/O; providers own the wipe
//! and extract steps.

use std::path::{Path, PathBuf};

use super::Identifier;

/// Resolves on-disk directories for downloaded templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Store rooted at the platform data directory.
    pub fn new() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("mason")
            .join("templates");
        Self { root }
    }

    /// Store rooted at an explicit directory (tests, `--store` override).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The unique directory for one `(depot, identifier)` pair.
    ///
    /// Layout: `<root>/<depot_name>/<name>-<version>`. Distinct depots and
    /// distinct identifiers never share a directory.
    pub fn template_dir(&self, depot_name: &str, identifier: &Identifier) -> PathBuf {
        self.root.join(depot_name).join(format!(
            "{}-{}",
            identifier.name(),
            identifier.version()
        ))
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str, version: &str) -> Identifier {
        Identifier::new(name, version).unwrap()
    }

    #[test]
    fn resolution_is_deterministic() {
        let store = TemplateStore::with_root("/tmp/store");
        let a = store.template_dir("mainline", &id("kernel", "v1.0"));
        let b = store.template_dir("mainline", &id("kernel", "v1.0"));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_identifiers_get_distinct_dirs() {
        let store = TemplateStore::with_root("/tmp/store");
        let kernel = store.template_dir("mainline", &id("kernel", "v1.0"));
        let newer = store.template_dir("mainline", &id("kernel", "v1.1"));
        let lib = store.template_dir("mainline", &id("mylib", "v1.0"));
        assert_ne!(kernel, newer);
        assert_ne!(kernel, lib);
    }

    #[test]
    fn distinct_depots_get_distinct_dirs() {
        let store = TemplateStore::with_root("/tmp/store");
        let a = store.template_dir("mainline", &id("kernel", "v1.0"));
        let b = store.template_dir("beta", &id("kernel", "v1.0"));
        assert_ne!(a, b);
    }

    #[test]
    fn layout_nests_under_depot_name() {
        let store = TemplateStore::with_root("/tmp/store");
        let dir = store.template_dir("mainline", &id("kernel", "v2.10.1"));
        assert_eq!(dir, PathBuf::from("/tmp/store/mainline/kernel-v2.10.1"));
    }
}
