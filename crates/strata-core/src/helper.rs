//! Helper lookup with per-instance memoization.
//!
//! Helpers resolve to a conventionally named file searched across the
//! helper directory layering, with the generic library directories as a
//! secondary search path. Successful lookups are remembered for the life
//! of the loader, so repeated requests for the same helper are no-ops.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Result, StrataError};
use crate::filter;
use crate::locator::ResourceLocator;

#[derive(Debug, Default)]
pub struct HelperLoader {
    loaded: HashMap<String, PathBuf>,
}

impl HelperLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Locate the helper file for `name`, trying module-scoped helper
    /// directories first and the generic library directories as a
    /// fallback. Fails with [`StrataError::ResourceNotFound`] listing
    /// every directory tried.
    pub fn load(
        &mut self,
        locator: &ResourceLocator,
        module: Option<&str>,
        name: &str,
    ) -> Result<PathBuf> {
        if let Some(path) = self.loaded.get(name) {
            return Ok(path.clone());
        }

        let file_name = locator
            .catalog()
            .layout()
            .conventions()
            .helper_file_name(name);

        let mut searched = Vec::new();
        let primary = locator.resolve_helper_dirs(module);
        let fallback = locator.resolve_lib_dirs();
        for dir in primary.into_iter().chain(fallback) {
            let candidate = dir.join(&file_name);
            if filter::exists_and_readable(&candidate) {
                self.loaded.insert(name.to_string(), candidate.clone());
                return Ok(candidate);
            }
            searched.push(dir);
        }

        Err(StrataError::ResourceNotFound {
            name: name.to_string(),
            searched,
        })
    }
}
