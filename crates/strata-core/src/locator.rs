//! Per-category candidate path resolution.
//!
//! Each `resolve_*` method combines the layer catalog with the active
//! dimension cascade into an ordered candidate list, then drops entries
//! that do not exist on disk. Categories with pick-first-match semantics
//! (controllers, templates) order most-specific first; categories whose
//! consumers merge every match (config) order least-specific first.
//! Resolution is total: an empty list is a valid result, and it is the
//! caller's decision whether that is an error.

use std::path::{Path, PathBuf};

use crate::dimension::DimensionSpace;
use crate::error::{Result, StrataError};
use crate::filter;
use crate::layers::{GeneratorAsset, LayerCatalog};
use crate::layout::Manifest;
use crate::plugin::PluginRegistry;

/// Config file names that receive application-level dimension overrides.
const APP_CASCADE_NAMES: &[&str] = &[
    "app",
    "factories",
    "filters",
    "i18n",
    "logging",
    "settings",
    "databases",
    "routing",
];

/// Config file names that receive module-level dimension overrides.
const MODULE_CASCADE_NAMES: &[&str] = &["cache", "module", "security", "view"];

/// Config paths containing this substring also cascade at module level.
const VALIDATE_MARKER: &str = "validate";

pub struct ResourceLocator {
    catalog: LayerCatalog,
    dimensions: DimensionSpace,
}

impl ResourceLocator {
    pub fn new(catalog: LayerCatalog, dimensions: DimensionSpace) -> Self {
        Self {
            catalog,
            dimensions,
        }
    }

    /// Build a locator for a project root: loads `strata.toml`, discovers
    /// installed plugins, and bootstraps the dimension selection.
    pub fn from_project(root_dir: &Path) -> Result<Self> {
        if !root_dir.is_dir() {
            return Err(StrataError::ProjectRootNotFound {
                path: root_dir.to_path_buf(),
            });
        }

        let manifest = Manifest::load(root_dir)?;
        let layout = manifest.layout(root_dir);
        let registry = PluginRegistry::discover(&layout.plugins_dir())?;
        let dimensions = manifest.dimension_space()?;

        Ok(Self::new(LayerCatalog::new(layout, registry), dimensions))
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    pub fn dimensions(&self) -> &DimensionSpace {
        &self.dimensions
    }

    pub fn dimensions_mut(&mut self) -> &mut DimensionSpace {
        &mut self.dimensions
    }

    /// Controller script directories for a module, most specific first.
    pub fn resolve_controller_dirs(&self, module: &str) -> Vec<PathBuf> {
        let leaf = &self.catalog.layout().conventions().controller_dir;
        filter::filter_existing(self.module_dir_candidates(module, leaf))
    }

    /// Template directories for a module, most specific first, with the
    /// compiled-template cache directory as the last resort.
    pub fn resolve_template_dirs(&self, module: &str) -> Vec<PathBuf> {
        let leaf = &self.catalog.layout().conventions().template_dir;
        let mut candidates = self.module_dir_candidates(module, leaf);
        candidates.push(self.catalog.cache_template_dir(module));
        filter::filter_existing(candidates)
    }

    /// Config file candidates in ascending precedence order (consumers
    /// merge every match, later entries winning).
    pub fn resolve_config_paths(&self, config_path: &str) -> Vec<PathBuf> {
        filter::filter_existing(self.config_candidates(config_path))
    }

    /// Helper directories, optionally scoped to a module first.
    pub fn resolve_helper_dirs(&self, module: Option<&str>) -> Vec<PathBuf> {
        filter::filter_existing(self.helper_dir_candidates(module))
    }

    /// Generic library directories, the fallback search path for helpers.
    pub fn resolve_lib_dirs(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.catalog.app_lib_dir(), self.catalog.project_lib_dir()];
        candidates.extend(self.catalog.plugin_lib_dirs());
        candidates.push(self.catalog.core_lib_dir());
        filter::filter_existing(candidates)
    }

    /// Model directories: project, then plugins, then core.
    pub fn resolve_model_dirs(&self) -> Vec<PathBuf> {
        let layout = self.catalog.layout();
        let mut candidates = vec![self.catalog.model_dir_in(layout.root_dir())];
        for plugin in self.catalog.plugins() {
            candidates.push(self.catalog.model_dir_in(&plugin.root_dir));
        }
        candidates.push(self.catalog.model_dir_in(layout.core_dir()));
        filter::filter_existing(candidates)
    }

    /// Generator template directories for a class and theme.
    pub fn resolve_generator_template_dirs(&self, class: &str, theme: &str) -> Vec<PathBuf> {
        self.resolve_generator_dirs(class, theme, GeneratorAsset::Template)
    }

    /// Generator skeleton directories for a class and theme.
    pub fn resolve_generator_skeleton_dirs(&self, class: &str, theme: &str) -> Vec<PathBuf> {
        self.resolve_generator_dirs(class, theme, GeneratorAsset::Skeleton)
    }

    fn resolve_generator_dirs(
        &self,
        class: &str,
        theme: &str,
        asset: GeneratorAsset,
    ) -> Vec<PathBuf> {
        let layout = self.catalog.layout();
        let default_theme = &layout.conventions().default_theme;

        let mut candidates = vec![self
            .catalog
            .generator_dir_in(layout.root_dir(), class, theme, asset)];
        for plugin in self.catalog.plugins() {
            candidates.push(
                self.catalog
                    .generator_dir_in(&plugin.root_dir, class, theme, asset),
            );
        }
        candidates.push(self.catalog.generator_dir_in(
            layout.core_dir(),
            class,
            default_theme,
            asset,
        ));

        filter::filter_existing(candidates)
    }

    /// Shared pick-first-match layering for per-module directories:
    /// application module dir expanded by the dimension cascade, then
    /// undecorated, then one entry per plugin, then the core-provided
    /// module dir.
    fn module_dir_candidates(&self, module: &str, leaf: &str) -> Vec<PathBuf> {
        let app_dir = self.catalog.app_module_dir(module).join(leaf);

        let mut candidates: Vec<PathBuf> = self
            .dimensions
            .dimension_dirs()
            .iter()
            .map(|dim| app_dir.join(dim))
            .collect();
        candidates.push(app_dir);

        for dir in self.catalog.plugin_module_dirs(module) {
            candidates.push(dir.join(leaf));
        }
        candidates.push(self.catalog.core_module_dir(module).join(leaf));

        candidates
    }

    fn helper_dir_candidates(&self, module: Option<&str>) -> Vec<PathBuf> {
        let layout = self.catalog.layout();
        let mut candidates = Vec::new();

        if let Some(module) = module {
            candidates.push(self.catalog.helper_dir_in(&self.catalog.app_module_dir(module)));
            for dir in self.catalog.plugin_module_dirs(module) {
                candidates.push(self.catalog.helper_dir_in(&dir));
            }
        }

        candidates.push(self.catalog.helper_dir_in(&layout.app_dir()));
        candidates.push(self.catalog.helper_dir_in(layout.root_dir()));
        for plugin in self.catalog.plugins() {
            candidates.push(self.catalog.helper_dir_in(&plugin.root_dir));
        }
        candidates.push(self.catalog.helper_dir_in(layout.core_dir()));

        candidates
    }

    /// Ascending-precedence config candidates. `config_path` is relative;
    /// its "global" form is the bare file name under the conventional
    /// config directory of each layer.
    fn config_candidates(&self, config_path: &str) -> Vec<PathBuf> {
        let layout = self.catalog.layout();
        let conventions = layout.conventions();

        let rel = Path::new(config_path);
        let name = rel
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| config_path.to_string());
        let stem = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let global = Path::new(&conventions.config_dir).join(&name);

        let core = layout.core_dir();
        let root = layout.root_dir();
        let app = layout.app_dir();

        let mut candidates = vec![core.join(&global), core.join(rel)];
        for plugin in self.catalog.plugins() {
            candidates.push(plugin.root_dir.join(&global));
        }
        candidates.push(root.join(&global));
        candidates.push(root.join(rel));
        candidates.push(app.join(&global));
        for plugin in self.catalog.plugins() {
            candidates.push(plugin.root_dir.join(rel));
        }
        candidates.push(app.join(rel));

        // Dimension overrides are appended least specific first so that a
        // merging consumer lets the most specific file win.
        let dims = self.dimensions.dimension_dirs();
        if APP_CASCADE_NAMES.contains(&stem.as_str()) {
            for dim in dims.iter().rev() {
                candidates.push(app.join(&conventions.config_dir).join(dim).join(&name));
            }
        }
        if MODULE_CASCADE_NAMES.contains(&stem.as_str()) || config_path.contains(VALIDATE_MARKER) {
            let parent = rel.parent().unwrap_or_else(|| Path::new(""));
            for dim in dims.iter().rev() {
                candidates.push(app.join(parent).join(dim).join(&name));
            }
        }

        candidates
    }
}
