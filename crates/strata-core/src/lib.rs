//! Layered, dimension-aware resource resolution.
//!
//! Computes the deterministic, precedence-ordered list of filesystem
//! locations for a requested resource category (config, templates,
//! controllers, helpers, models, generator assets) across four structural
//! layers - framework core, installed plugins, project root, and the
//! active application/module - expanded by the active dimension cascade.

pub mod dimension;
pub mod error;
pub mod filter;
pub mod helper;
pub mod layers;
pub mod layout;
pub mod locator;
pub mod plugin;

pub use dimension::{ActiveDimension, DimensionAxis, DimensionSpace};
pub use error::{Result, StrataError};
pub use helper::HelperLoader;
pub use layers::{GeneratorAsset, LayerCatalog};
pub use layout::{Conventions, Manifest, ProjectLayout};
pub use locator::ResourceLocator;
pub use plugin::{PluginDescriptor, PluginManifest, PluginRegistry};
