//! Ordered structural layers: core, plugins, project, application, module.
//!
//! [`LayerCatalog`] is a read-only view combining the project layout with
//! the plugin registry. It hands the locator per-category base directories
//! before any dimension expansion. Plugin order is whatever the registry
//! supplied; the catalog never re-sorts it.

use std::path::{Path, PathBuf};

use crate::layout::ProjectLayout;
use crate::plugin::{PluginDescriptor, PluginRegistry};

/// Generator asset kind under `<data>/<generator>/<class>/<theme>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorAsset {
    Template,
    Skeleton,
}

impl GeneratorAsset {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Skeleton => "skeleton",
        }
    }
}

pub struct LayerCatalog {
    layout: ProjectLayout,
    registry: PluginRegistry,
}

impl LayerCatalog {
    pub fn new(layout: ProjectLayout, registry: PluginRegistry) -> Self {
        Self { layout, registry }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        self.registry.plugins()
    }

    /// `<base>/<modules_dir>/<module>` for an arbitrary layer root.
    fn module_dir_in(&self, base: &Path, module: &str) -> PathBuf {
        base.join(&self.layout.conventions().modules_dir).join(module)
    }

    /// Module directory inside the active application.
    pub fn app_module_dir(&self, module: &str) -> PathBuf {
        self.module_dir_in(&self.layout.app_dir(), module)
    }

    /// Module directories supplied by plugins, in registry order.
    pub fn plugin_module_dirs(&self, module: &str) -> Vec<PathBuf> {
        self.plugins()
            .iter()
            .map(|p| self.module_dir_in(&p.root_dir, module))
            .collect()
    }

    /// Module directory provided by the framework core.
    pub fn core_module_dir(&self, module: &str) -> PathBuf {
        self.module_dir_in(self.layout.core_dir(), module)
    }

    /// Compiled-template cache directory for a module, the last-resort
    /// template location.
    pub fn cache_template_dir(&self, module: &str) -> PathBuf {
        self.module_dir_in(&self.layout.cache_dir(), module)
            .join(&self.layout.conventions().template_dir)
    }

    /// `<base>/<lib_dir>` for an arbitrary layer root.
    fn lib_dir_in(&self, base: &Path) -> PathBuf {
        base.join(&self.layout.conventions().lib_dir)
    }

    pub fn app_lib_dir(&self) -> PathBuf {
        self.lib_dir_in(&self.layout.app_dir())
    }

    pub fn project_lib_dir(&self) -> PathBuf {
        self.lib_dir_in(self.layout.root_dir())
    }

    pub fn plugin_lib_dirs(&self) -> Vec<PathBuf> {
        self.plugins()
            .iter()
            .map(|p| self.lib_dir_in(&p.root_dir))
            .collect()
    }

    pub fn core_lib_dir(&self) -> PathBuf {
        self.lib_dir_in(self.layout.core_dir())
    }

    /// `<lib>/<helper_dir>` under an arbitrary layer root.
    pub fn helper_dir_in(&self, base: &Path) -> PathBuf {
        self.lib_dir_in(base)
            .join(&self.layout.conventions().helper_dir)
    }

    /// `<lib>/<model_dir>` under an arbitrary layer root.
    pub fn model_dir_in(&self, base: &Path) -> PathBuf {
        self.lib_dir_in(base)
            .join(&self.layout.conventions().model_dir)
    }

    /// `<base>/<data_dir>/<generator_dir>/<class>/<theme>/<asset>`.
    pub fn generator_dir_in(
        &self,
        base: &Path,
        class: &str,
        theme: &str,
        asset: GeneratorAsset,
    ) -> PathBuf {
        let conventions = self.layout.conventions();
        base.join(&conventions.data_dir)
            .join(&conventions.generator_dir)
            .join(class)
            .join(theme)
            .join(asset.dir_name())
    }
}
