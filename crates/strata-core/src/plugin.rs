//! Plugin descriptors and startup discovery.
//!
//! Plugins are resolved once at startup into an ordered descriptor list
//! and treated as immutable for the life of the process. Discovery reads
//! the plugin installation directory; the glob crate returns matches in
//! lexicographic order, so the resulting registry order is stable across
//! filesystems.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};

const PLUGIN_MANIFEST: &str = "plugin.json";

/// Manifest a plugin may ship at its root (`plugin.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PluginManifest {
    /// Load `plugin.json` from a plugin root, if present.
    pub fn load(plugin_dir: &Path) -> Result<Option<Self>> {
        let path = plugin_dir.join(PLUGIN_MANIFEST);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let manifest: PluginManifest =
            serde_json::from_str(&content).map_err(|e| StrataError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(Some(manifest))
    }
}

/// One installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: String,
    /// Absolute plugin root directory.
    pub root_dir: PathBuf,
}

/// Ordered, immutable list of installed plugins.
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    /// Build a registry from an explicit descriptor list, keeping its
    /// order.
    pub fn from_descriptors(plugins: Vec<PluginDescriptor>) -> Self {
        Self { plugins }
    }

    /// Discover plugins under the installation directory. Each immediate
    /// subdirectory is one plugin; its `plugin.json` may override the name,
    /// which otherwise defaults to the directory name. A missing
    /// installation directory yields an empty registry.
    pub fn discover(plugins_dir: &Path) -> Result<Self> {
        if !plugins_dir.is_dir() {
            return Ok(Self {
                plugins: Vec::new(),
            });
        }

        let pattern = format!(
            "{}/*",
            glob::Pattern::escape(&plugins_dir.to_string_lossy())
        );
        let entries = glob::glob(&pattern).map_err(|e| StrataError::ConfigParse {
            path: plugins_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut plugins = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StrataError::Io(e.into_error()))?;
            if !path.is_dir() {
                continue;
            }

            let dir_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let name = PluginManifest::load(&path)?
                .and_then(|m| m.name)
                .unwrap_or(dir_name);

            plugins.push(PluginDescriptor {
                name,
                root_dir: path,
            });
        }

        Ok(Self { plugins })
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn discover_missing_dir_yields_empty_registry() {
        let tmp = TempDir::new().unwrap();
        let registry = PluginRegistry::discover(&tmp.path().join("plugins")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn discover_orders_lexicographically() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("bravo")).unwrap();
        fs::create_dir_all(tmp.path().join("alpha")).unwrap();
        fs::create_dir_all(tmp.path().join("charlie")).unwrap();
        // stray files are not plugins
        fs::write(tmp.path().join("README.md"), "x").unwrap();

        let registry = PluginRegistry::discover(tmp.path()).unwrap();
        let names: Vec<&str> = registry.plugins().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn discover_reads_manifest_name() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("acme-theme");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(PLUGIN_MANIFEST),
            r#"{"name": "acme_theme", "version": "1.2.0"}"#,
        )
        .unwrap();

        let registry = PluginRegistry::discover(tmp.path()).unwrap();
        assert_eq!(registry.plugins()[0].name, "acme_theme");
        assert_eq!(registry.plugins()[0].root_dir, dir);
    }

    #[test]
    fn discover_rejects_bad_manifest() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PLUGIN_MANIFEST), "not json").unwrap();

        let err = PluginRegistry::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, StrataError::ConfigParse { .. }));
    }

    #[test]
    fn explicit_descriptors_keep_order() {
        let plugins = vec![
            PluginDescriptor {
                name: "zeta".into(),
                root_dir: PathBuf::from("/p/zeta"),
            },
            PluginDescriptor {
                name: "alpha".into(),
                root_dir: PathBuf::from("/p/alpha"),
            },
        ];

        let registry = PluginRegistry::from_descriptors(plugins);
        assert_eq!(registry.plugins()[0].name, "zeta");
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("missing").is_none());
    }
}
