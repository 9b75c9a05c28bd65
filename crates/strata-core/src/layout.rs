//! Project manifest and directory-name conventions.
//!
//! The engine never consults process-wide state: every fixed root and
//! directory-name convention lives on an explicit [`ProjectLayout`] built
//! from the project manifest (`strata.toml`) at startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dimension::{DimensionAxis, DimensionSpace};
use crate::error::{Result, StrataError};

const MANIFEST_FILE: &str = "strata.toml";

/// Directory-name conventions shared by all layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conventions {
    /// Applications live under `<root>/<apps_dir>/<app>`.
    pub apps_dir: String,
    /// Modules live under `<layer>/<modules_dir>/<module>`.
    pub modules_dir: String,
    pub config_dir: String,
    /// Controller scripts, under a module dir.
    pub controller_dir: String,
    /// View templates, under a module dir.
    pub template_dir: String,
    pub lib_dir: String,
    /// Helpers, under a lib dir.
    pub helper_dir: String,
    /// Models, under a lib dir.
    pub model_dir: String,
    pub data_dir: String,
    /// Generator assets, under a data dir.
    pub generator_dir: String,
    pub plugins_dir: String,
    pub cache_dir: String,
    /// Generator theme used as the core-layer fallback.
    pub default_theme: String,
    /// Extension of helper script files.
    pub helper_extension: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            apps_dir: "apps".into(),
            modules_dir: "modules".into(),
            config_dir: "config".into(),
            controller_dir: "actions".into(),
            template_dir: "templates".into(),
            lib_dir: "lib".into(),
            helper_dir: "helper".into(),
            model_dir: "model".into(),
            data_dir: "data".into(),
            generator_dir: "generator".into(),
            plugins_dir: "plugins".into(),
            cache_dir: "cache".into(),
            default_theme: "default".into(),
            helper_extension: "rhai".into(),
        }
    }
}

impl Conventions {
    /// File name a helper called `name` is expected to use.
    pub fn helper_file_name(&self, name: &str) -> String {
        format!("{}_helper.{}", name, self.helper_extension)
    }
}

/// Fixed structural roots for one project plus the active application.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    core_dir: PathBuf,
    root_dir: PathBuf,
    app_name: String,
    conventions: Conventions,
}

impl ProjectLayout {
    pub fn new(core_dir: PathBuf, root_dir: PathBuf, app_name: impl Into<String>) -> Self {
        Self::with_conventions(core_dir, root_dir, app_name, Conventions::default())
    }

    pub fn with_conventions(
        core_dir: PathBuf,
        root_dir: PathBuf,
        app_name: impl Into<String>,
        conventions: Conventions,
    ) -> Self {
        Self {
            core_dir,
            root_dir,
            app_name: app_name.into(),
            conventions,
        }
    }

    /// Framework core defaults directory.
    pub fn core_dir(&self) -> &Path {
        &self.core_dir
    }

    /// Project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Active application directory, `<root>/<apps_dir>/<app>`.
    pub fn app_dir(&self) -> PathBuf {
        self.root_dir
            .join(&self.conventions.apps_dir)
            .join(&self.app_name)
    }

    /// Per-application cache directory, `<root>/<cache_dir>/<app>`.
    pub fn cache_dir(&self) -> PathBuf {
        self.root_dir
            .join(&self.conventions.cache_dir)
            .join(&self.app_name)
    }

    /// Plugin installation directory, `<root>/<plugins_dir>`.
    pub fn plugins_dir(&self) -> PathBuf {
        self.root_dir.join(&self.conventions.plugins_dir)
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }
}

/// Project manifest, `strata.toml` at the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub dimensions: DimensionsSection,
    #[serde(default)]
    pub conventions: Conventions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Framework core defaults directory, relative to the project root
    /// unless absolute.
    pub core_dir: PathBuf,
    /// Active application name.
    pub app: String,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            core_dir: PathBuf::from("vendor/strata"),
            app: "app".into(),
        }
    }
}

/// Declared axes and the bootstrap selection.
///
/// Axes are an array of tables so their declaration order survives the
/// TOML round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionsSection {
    #[serde(default)]
    pub axes: Vec<DimensionAxis>,
    /// Initial per-axis selection; axes not named here fall back to their
    /// first declared value.
    #[serde(default)]
    pub default: Vec<(String, String)>,
}

impl Manifest {
    /// Load the manifest from a project root. A missing file yields the
    /// defaults, matching an undimensioned single-app project.
    pub fn load(root_dir: &Path) -> Result<Self> {
        let path = root_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let manifest: Manifest =
            toml::from_str(&content).map_err(|e| StrataError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(manifest)
    }

    /// Manifest file path under a project root.
    pub fn path(root_dir: &Path) -> PathBuf {
        root_dir.join(MANIFEST_FILE)
    }

    /// Build the structural layout for `root_dir` from this manifest.
    pub fn layout(&self, root_dir: &Path) -> ProjectLayout {
        let core_dir = if self.project.core_dir.is_absolute() {
            self.project.core_dir.clone()
        } else {
            root_dir.join(&self.project.core_dir)
        };

        ProjectLayout::with_conventions(
            core_dir,
            root_dir.to_path_buf(),
            self.project.app.clone(),
            self.conventions.clone(),
        )
    }

    /// Build the dimension space declared by this manifest, applying the
    /// bootstrap selection on top of the per-axis defaults.
    pub fn dimension_space(&self) -> Result<DimensionSpace> {
        let mut space = DimensionSpace::new(self.dimensions.axes.clone());
        if !self.dimensions.default.is_empty() {
            let pairs: Vec<(&str, &str)> = self
                .dimensions
                .default
                .iter()
                .map(|(a, v)| (a.as_str(), v.as_str()))
                .collect();
            space.set_current_dimension(&pairs)?;
        }
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[project]
core_dir = "vendor/strata"
app = "frontend"

[dimensions]
default = [["channel", "web"], ["locale", "de"]]

[[dimensions.axes]]
name = "channel"
values = ["web", "mobile"]

[[dimensions.axes]]
name = "locale"
values = ["en", "de"]

[conventions]
controller_dir = "controllers"
"#;

    #[test]
    fn load_missing_manifest_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let manifest = Manifest::load(tmp.path()).unwrap();
        assert_eq!(manifest.project.app, "app");
        assert!(manifest.dimensions.axes.is_empty());
    }

    #[test]
    fn load_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::write(Manifest::path(tmp.path()), MANIFEST).unwrap();

        let manifest = Manifest::load(tmp.path()).unwrap();
        assert_eq!(manifest.project.app, "frontend");
        assert_eq!(manifest.dimensions.axes.len(), 2);
        assert_eq!(manifest.dimensions.axes[0].name, "channel");
        assert_eq!(manifest.conventions.controller_dir, "controllers");
        // untouched conventions keep their defaults
        assert_eq!(manifest.conventions.template_dir, "templates");
    }

    #[test]
    fn load_invalid_manifest_reports_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(Manifest::path(tmp.path()), "project = 3").unwrap();

        let err = Manifest::load(tmp.path()).unwrap_err();
        assert!(matches!(err, StrataError::ConfigParse { .. }));
    }

    #[test]
    fn layout_resolves_relative_core_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(Manifest::path(tmp.path()), MANIFEST).unwrap();

        let manifest = Manifest::load(tmp.path()).unwrap();
        let layout = manifest.layout(tmp.path());

        assert_eq!(layout.core_dir(), tmp.path().join("vendor/strata"));
        assert_eq!(layout.app_dir(), tmp.path().join("apps/frontend"));
        assert_eq!(layout.cache_dir(), tmp.path().join("cache/frontend"));
        assert_eq!(layout.plugins_dir(), tmp.path().join("plugins"));
    }

    #[test]
    fn dimension_space_applies_bootstrap_selection() {
        let tmp = TempDir::new().unwrap();
        fs::write(Manifest::path(tmp.path()), MANIFEST).unwrap();

        let manifest = Manifest::load(tmp.path()).unwrap();
        let space = manifest.dimension_space().unwrap();

        assert_eq!(space.current_dimension().get("locale"), Some("de"));
        assert_eq!(space.dimension_dirs(), ["web_de", "de", "web"]);
    }

    #[test]
    fn helper_file_name_uses_extension() {
        let conventions = Conventions::default();
        assert_eq!(conventions.helper_file_name("url"), "url_helper.rhai");
    }
}
