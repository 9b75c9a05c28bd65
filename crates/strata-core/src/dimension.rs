//! Dimension axes and the cascading directory-name generator.
//!
//! A dimension is a set of named, ordered axes (channel, brand, locale, ...)
//! each with a declared list of legal values. The active selection expands
//! into an ordered list of cascading override-directory names which the
//! locator appends to each structural layer.

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};

/// Separator placed between axis values when a combination becomes a
/// directory name.
const VALUE_SEPARATOR: &str = "_";

/// One declared variation axis. The value order is load-bearing: the first
/// value is the default selection for the axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionAxis {
    pub name: String,
    pub values: Vec<String>,
}

impl DimensionAxis {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Whether `value` is declared for this axis.
    pub fn declares(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// The active (axis, value) selection, ordered by axis declaration order.
///
/// May cover a subset of the declared axes. Only replaced wholesale, never
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveDimension {
    pairs: Vec<(String, String)>,
}

impl ActiveDimension {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Selected value for `axis`, if the axis is part of the selection.
    pub fn get(&self, axis: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(a, _)| a == axis)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn values(&self) -> Vec<&str> {
        self.pairs.iter().map(|(_, v)| v.as_str()).collect()
    }
}

/// Ordered run of axis values forming one cascade directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Combination<'a>(Vec<&'a str>);

impl Combination<'_> {
    /// The single place where axis values become a directory name.
    fn join(&self) -> String {
        self.0.join(VALUE_SEPARATOR)
    }
}

/// Declared axes plus the active selection.
///
/// The cascade directory list is computed lazily and cached; the cache is
/// dropped exactly once per [`set_current_dimension`] call.
///
/// [`set_current_dimension`]: DimensionSpace::set_current_dimension
#[derive(Debug)]
pub struct DimensionSpace {
    axes: Vec<DimensionAxis>,
    current: ActiveDimension,
    cascade: OnceCell<Vec<String>>,
}

impl DimensionSpace {
    /// Create a space with the first declared value of each axis selected,
    /// in declaration order. Axes declared with no values are left out of
    /// the selection.
    pub fn new(axes: Vec<DimensionAxis>) -> Self {
        let pairs = axes
            .iter()
            .filter_map(|axis| {
                axis.values
                    .first()
                    .map(|v| (axis.name.clone(), v.clone()))
            })
            .collect();

        Self {
            axes,
            current: ActiveDimension { pairs },
            cascade: OnceCell::new(),
        }
    }

    /// Create a space with an explicit initial selection.
    pub fn with_default(axes: Vec<DimensionAxis>, default: &[(&str, &str)]) -> Result<Self> {
        let mut space = Self::new(axes);
        space.set_current_dimension(default)?;
        Ok(space)
    }

    pub fn axes(&self) -> &[DimensionAxis] {
        &self.axes
    }

    /// True iff every pair of `dimension` names a declared axis and one of
    /// its declared values.
    pub fn is_available(&self, dimension: &[(&str, &str)]) -> bool {
        dimension.iter().all(|(axis, value)| {
            self.axes
                .iter()
                .any(|a| a.name == *axis && a.declares(value))
        })
    }

    /// Replace the active selection. Fails without touching the current
    /// selection if any pair is undeclared. Pairs are reordered into axis
    /// declaration order; a later pair for the same axis wins.
    pub fn set_current_dimension(&mut self, dimension: &[(&str, &str)]) -> Result<()> {
        for (axis, value) in dimension {
            let declared = self
                .axes
                .iter()
                .any(|a| a.name == *axis && a.declares(value));
            if !declared {
                return Err(StrataError::InvalidDimension {
                    axis: (*axis).to_string(),
                    value: (*value).to_string(),
                });
            }
        }

        let pairs = self
            .axes
            .iter()
            .filter_map(|a| {
                dimension
                    .iter()
                    .rfind(|(axis, _)| *axis == a.name)
                    .map(|(_, value)| (a.name.clone(), (*value).to_string()))
            })
            .collect();

        self.current = ActiveDimension { pairs };
        self.cascade = OnceCell::new();
        Ok(())
    }

    pub fn current_dimension(&self) -> &ActiveDimension {
        &self.current
    }

    /// Ordered, duplicate-free list of cascade directory names for the
    /// active selection, most specific first.
    pub fn dimension_dirs(&self) -> &[String] {
        self.cascade.get_or_init(|| cascade_dirs(&self.current))
    }
}

/// Expand an active selection `(k1,v1)..(kn,vn)` into cascade directory
/// names.
///
/// Builds every leading run of values (`v1..vn`, `v1..v(n-1)`, ...) minus
/// the single-value run, which would duplicate the standalone value for the
/// first axis, then appends each value standing alone in reverse axis
/// order, and finally drops duplicates keeping the first occurrence.
fn cascade_dirs(current: &ActiveDimension) -> Vec<String> {
    let values = current.values();
    let n = values.len();

    let mut combinations: Vec<Combination> = (0..n)
        .map(|i| Combination(values[..n - i].to_vec()))
        .collect();
    combinations.pop();

    let mut names: Vec<String> = combinations.iter().map(Combination::join).collect();
    names.extend(values.iter().rev().map(|v| (*v).to_string()));

    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_axes() -> Vec<DimensionAxis> {
        vec![
            DimensionAxis::new("channel", vec!["web".into(), "mobile".into()]),
            DimensionAxis::new("brand", vec!["acme".into(), "initech".into()]),
            DimensionAxis::new("locale", vec!["en".into(), "de".into()]),
        ]
    }

    #[test]
    fn empty_space_has_no_dirs() {
        let space = DimensionSpace::new(Vec::new());
        assert!(space.dimension_dirs().is_empty());
        assert!(space.current_dimension().is_empty());
    }

    #[test]
    fn single_axis_yields_single_dir() {
        let axes = vec![DimensionAxis::new("channel", vec!["web".into()])];
        let space = DimensionSpace::new(axes);
        assert_eq!(space.dimension_dirs(), ["web"]);
    }

    #[test]
    fn three_axis_cascade() {
        let space = DimensionSpace::new(three_axes());
        assert_eq!(
            space.dimension_dirs(),
            ["web_acme_en", "web_acme", "en", "acme", "web"]
        );
    }

    #[test]
    fn cascade_is_duplicate_free_and_bounded() {
        let space = DimensionSpace::new(three_axes());
        let dirs = space.dimension_dirs();
        let n = space.current_dimension().len();
        assert!(dirs.len() <= 2 * n - 1);
        for (i, dir) in dirs.iter().enumerate() {
            assert!(!dirs[i + 1..].contains(dir), "duplicate entry {dir}");
        }
    }

    #[test]
    fn duplicate_values_across_axes_collapse() {
        let axes = vec![
            DimensionAxis::new("channel", vec!["web".into()]),
            DimensionAxis::new("theme", vec!["web".into()]),
        ];
        let space = DimensionSpace::new(axes);
        // combinations = ["web_web"], roots reversed = ["web", "web"]
        assert_eq!(space.dimension_dirs(), ["web_web", "web"]);
    }

    #[test]
    fn default_selection_takes_first_values() {
        let space = DimensionSpace::new(three_axes());
        let current = space.current_dimension();
        assert_eq!(current.get("channel"), Some("web"));
        assert_eq!(current.get("brand"), Some("acme"));
        assert_eq!(current.get("locale"), Some("en"));
    }

    #[test]
    fn set_reorders_into_declaration_order() {
        let mut space = DimensionSpace::new(three_axes());
        space
            .set_current_dimension(&[("locale", "de"), ("channel", "mobile")])
            .unwrap();
        assert_eq!(
            space.current_dimension().pairs(),
            [
                ("channel".to_string(), "mobile".to_string()),
                ("locale".to_string(), "de".to_string()),
            ]
        );
        assert_eq!(space.dimension_dirs(), ["mobile_de", "de", "mobile"]);
    }

    #[test]
    fn invalid_value_is_rejected_without_mutation() {
        let mut space = DimensionSpace::new(three_axes());
        let before = space.current_dimension().clone();
        let dirs_before: Vec<String> = space.dimension_dirs().to_vec();

        let err = space
            .set_current_dimension(&[("channel", "desktop")])
            .unwrap_err();
        assert!(matches!(err, StrataError::InvalidDimension { .. }));

        assert_eq!(space.current_dimension(), &before);
        assert_eq!(space.dimension_dirs(), dirs_before.as_slice());
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let mut space = DimensionSpace::new(three_axes());
        let err = space
            .set_current_dimension(&[("region", "emea")])
            .unwrap_err();
        assert!(matches!(err, StrataError::InvalidDimension { .. }));
    }

    #[test]
    fn is_available_checks_pairs() {
        let space = DimensionSpace::new(three_axes());
        assert!(space.is_available(&[("channel", "mobile"), ("locale", "de")]));
        assert!(!space.is_available(&[("channel", "desktop")]));
        assert!(!space.is_available(&[("region", "emea")]));
        assert!(space.is_available(&[]));
    }

    #[test]
    fn cache_invalidated_on_set() {
        let mut space = DimensionSpace::new(three_axes());
        assert_eq!(space.dimension_dirs()[0], "web_acme_en");
        space
            .set_current_dimension(&[("channel", "mobile"), ("brand", "acme"), ("locale", "en")])
            .unwrap();
        assert_eq!(space.dimension_dirs()[0], "mobile_acme_en");
    }

    #[test]
    fn entries_reconstruct_selection_prefixes() {
        let space = DimensionSpace::new(three_axes());
        let values: Vec<&str> = space
            .current_dimension()
            .pairs()
            .iter()
            .map(|(_, v)| v.as_str())
            .collect();

        for entry in space.dimension_dirs() {
            let parts: Vec<&str> = entry.split('_').collect();
            let is_prefix = parts == values[..parts.len()];
            let is_standalone = parts.len() == 1 && values.contains(&parts[0]);
            assert!(is_prefix || is_standalone, "unexpected entry {entry}");
        }
    }
}
