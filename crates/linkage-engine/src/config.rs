use std::collections::{BTreeMap, BTreeSet};

use linkage_model::ColumnName;
use linkage_scorers::ScorerRegistry;

use crate::error::{ConfigError, Side};

const DEFAULT_THRESHOLD: f64 = 75.0;
const DEFAULT_CUTOFF: bool = false;

/// The six interdependent sub-maps that wire an X table to a Y table for
/// matching, plus the column-set snapshot they are validated against
/// (spec §3, §4.C).
///
/// Unlike the reference implementation's dict subclasses (each holding a
/// back-reference to a shared parent config), this is a single owning value
/// with inherent `&mut self` methods — no reference cycles (spec §9).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Configuration {
    x_cols: BTreeSet<ColumnName>,
    y_cols: BTreeSet<ColumnName>,

    columns_to_match: BTreeMap<ColumnName, Vec<ColumnName>>,
    columns_to_get: BTreeMap<ColumnName, ColumnName>,
    columns_to_group: BTreeMap<ColumnName, ColumnName>,
    scorers_by_column: BTreeMap<ColumnName, String>,
    thresholds_by_column: BTreeMap<ColumnName, f64>,
    cutoffs_by_column: BTreeMap<ColumnName, bool>,

    default_scorer: String,
    default_threshold: f64,
    default_cutoff: bool,
    allow_overwrite: bool,
}

impl Configuration {
    pub fn new(x_cols: BTreeSet<ColumnName>, y_cols: BTreeSet<ColumnName>) -> Self {
        Self {
            x_cols,
            y_cols,
            columns_to_match: BTreeMap::new(),
            columns_to_get: BTreeMap::new(),
            columns_to_group: BTreeMap::new(),
            scorers_by_column: BTreeMap::new(),
            thresholds_by_column: BTreeMap::new(),
            cutoffs_by_column: BTreeMap::new(),
            default_scorer: linkage_scorers::EXACT_MATCH.to_string(),
            default_threshold: DEFAULT_THRESHOLD,
            default_cutoff: DEFAULT_CUTOFF,
            allow_overwrite: false,
        }
    }

    pub fn x_cols(&self) -> &BTreeSet<ColumnName> {
        &self.x_cols
    }

    pub fn y_cols(&self) -> &BTreeSet<ColumnName> {
        &self.y_cols
    }

    pub fn allow_overwrite(&self) -> bool {
        self.allow_overwrite
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    /// Changes the threshold newly-attached `columns_to_match` entries pick
    /// up (spec §3 derived invariant); does not retroactively change
    /// already-attached entries.
    pub fn set_default_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&threshold) || threshold.is_nan() {
            return Err(ConfigError::InvalidValue {
                column: "<default>".to_string(),
                reason: "threshold must be a real number in [0, 100]".to_string(),
            });
        }
        self.default_threshold = threshold;
        Ok(())
    }

    pub fn default_cutoff(&self) -> bool {
        self.default_cutoff
    }

    pub fn set_default_cutoff(&mut self, cutoff: bool) {
        self.default_cutoff = cutoff;
    }

    pub fn set_allow_overwrite(&mut self, allow: bool) {
        self.allow_overwrite = allow;
    }

    /// Replaces the X column set. Resets all six sub-maps iff the new set
    /// differs from the current one (spec §3 Lifecycle, resolved Open
    /// Question: reset only when the column set actually changes).
    pub fn set_x_cols(&mut self, x_cols: BTreeSet<ColumnName>) {
        if x_cols != self.x_cols {
            self.x_cols = x_cols;
            self.reset();
        }
    }

    pub fn set_y_cols(&mut self, y_cols: BTreeSet<ColumnName>) {
        if y_cols != self.y_cols {
            self.y_cols = y_cols;
            self.reset();
        }
    }

    /// Clears all six sub-maps; the column-set snapshot is untouched.
    pub fn reset(&mut self) {
        self.columns_to_match.clear();
        self.columns_to_get.clear();
        self.columns_to_group.clear();
        self.scorers_by_column.clear();
        self.thresholds_by_column.clear();
        self.cutoffs_by_column.clear();
    }

    /// Seeds `columns_to_match` with the identity mapping for every column
    /// shared by both sides. Idempotent when `x_cols`/`y_cols` are
    /// unchanged (spec §8 invariant 11).
    pub fn populate(&mut self) -> Result<(), ConfigError> {
        let shared: Vec<ColumnName> = self.x_cols.intersection(&self.y_cols).cloned().collect();
        for col in shared {
            self.add_columns_to_match(&col, [col.clone()])?;
        }
        Ok(())
    }

    pub fn columns_to_match(&self) -> &BTreeMap<ColumnName, Vec<ColumnName>> {
        &self.columns_to_match
    }

    /// Appends each of `y_cols` that exists on the Y side and is not
    /// already associated with `x_col`, preserving order of first
    /// appearance. Auto-attaches default scorer/threshold/cutoff entries
    /// for `x_col` if absent (spec §3 derived invariant, §4.C).
    pub fn add_columns_to_match(
        &mut self,
        x_col: &ColumnName,
        y_cols: impl IntoIterator<Item = ColumnName>,
    ) -> Result<(), ConfigError> {
        if !self.x_cols.contains(x_col) {
            return Err(ConfigError::ColumnNotFound {
                column: x_col.to_string(),
                side: Side::X,
            });
        }
        let entry = self.columns_to_match.entry(x_col.clone()).or_default();
        for y_col in y_cols {
            if self.y_cols.contains(&y_col) && !entry.contains(&y_col) {
                entry.push(y_col);
            }
        }
        let default_scorer = self.default_scorer.clone();
        self.scorers_by_column
            .entry(x_col.clone())
            .or_insert(default_scorer);
        self.thresholds_by_column
            .entry(x_col.clone())
            .or_insert(self.default_threshold);
        self.cutoffs_by_column
            .entry(x_col.clone())
            .or_insert(self.default_cutoff);
        Ok(())
    }

    /// Removes `x_col` from `columns_to_match` and, with it, its scorer,
    /// threshold and cutoff entries (the auto-attachment is symmetric).
    pub fn remove_columns_to_match(&mut self, x_col: &ColumnName) {
        self.columns_to_match.remove(x_col);
        self.scorers_by_column.remove(x_col);
        self.thresholds_by_column.remove(x_col);
        self.cutoffs_by_column.remove(x_col);
    }

    pub fn columns_to_get(&self) -> &BTreeMap<ColumnName, ColumnName> {
        &self.columns_to_get
    }

    pub fn set_columns_to_get(
        &mut self,
        y_col: &ColumnName,
        destination: ColumnName,
    ) -> Result<(), ConfigError> {
        if !self.y_cols.contains(y_col) {
            return Err(ConfigError::ColumnNotFound {
                column: y_col.to_string(),
                side: Side::Y,
            });
        }
        if self.columns_to_get.values().any(|d| *d == destination) {
            return Err(ConfigError::XUniqueConstraint {
                destination: destination.to_string(),
            });
        }
        if !self.allow_overwrite && self.x_cols.contains(&destination) {
            return Err(ConfigError::OverwriteError {
                destination: destination.to_string(),
            });
        }
        self.columns_to_get.insert(y_col.clone(), destination);
        Ok(())
    }

    pub fn remove_columns_to_get(&mut self, y_col: &ColumnName) {
        self.columns_to_get.remove(y_col);
    }

    pub fn columns_to_group(&self) -> &BTreeMap<ColumnName, ColumnName> {
        &self.columns_to_group
    }

    pub fn set_columns_to_group(
        &mut self,
        y_col: &ColumnName,
        x_col: ColumnName,
    ) -> Result<(), ConfigError> {
        if !self.y_cols.contains(y_col) {
            return Err(ConfigError::ColumnNotFound {
                column: y_col.to_string(),
                side: Side::Y,
            });
        }
        if !self.x_cols.contains(&x_col) {
            return Err(ConfigError::ColumnNotFound {
                column: x_col.to_string(),
                side: Side::X,
            });
        }
        self.columns_to_group.insert(y_col.clone(), x_col);
        Ok(())
    }

    pub fn remove_columns_to_group(&mut self, y_col: &ColumnName) {
        self.columns_to_group.remove(y_col);
    }

    pub fn scorers_by_column(&self) -> &BTreeMap<ColumnName, String> {
        &self.scorers_by_column
    }

    pub fn set_scorer(
        &mut self,
        x_col: &ColumnName,
        name: &str,
        registry: &ScorerRegistry,
    ) -> Result<(), ConfigError> {
        if !self.x_cols.contains(x_col) {
            return Err(ConfigError::ColumnNotFound {
                column: x_col.to_string(),
                side: Side::X,
            });
        }
        if !registry.contains(name) {
            return Err(ConfigError::ScorerNotFound {
                name: name.to_string(),
            });
        }
        self.scorers_by_column
            .insert(x_col.clone(), name.to_string());
        Ok(())
    }

    pub fn remove_scorer(&mut self, x_col: &ColumnName) -> Result<(), ConfigError> {
        if self.columns_to_match.contains_key(x_col) {
            return Err(ConfigError::ColumnToMatchLock {
                column: x_col.to_string(),
            });
        }
        self.scorers_by_column.remove(x_col);
        Ok(())
    }

    pub fn thresholds_by_column(&self) -> &BTreeMap<ColumnName, f64> {
        &self.thresholds_by_column
    }

    pub fn set_threshold(&mut self, x_col: &ColumnName, threshold: f64) -> Result<(), ConfigError> {
        if !self.x_cols.contains(x_col) {
            return Err(ConfigError::ColumnNotFound {
                column: x_col.to_string(),
                side: Side::X,
            });
        }
        if !(0.0..=100.0).contains(&threshold) || threshold.is_nan() {
            return Err(ConfigError::InvalidValue {
                column: x_col.to_string(),
                reason: "threshold must be a real number in [0, 100]".to_string(),
            });
        }
        self.thresholds_by_column.insert(x_col.clone(), threshold);
        Ok(())
    }

    pub fn remove_threshold(&mut self, x_col: &ColumnName) -> Result<(), ConfigError> {
        if self.columns_to_match.contains_key(x_col) {
            return Err(ConfigError::ColumnToMatchLock {
                column: x_col.to_string(),
            });
        }
        self.thresholds_by_column.remove(x_col);
        Ok(())
    }

    pub fn cutoffs_by_column(&self) -> &BTreeMap<ColumnName, bool> {
        &self.cutoffs_by_column
    }

    pub fn set_cutoff(&mut self, x_col: &ColumnName, cutoff: bool) -> Result<(), ConfigError> {
        if !self.x_cols.contains(x_col) {
            return Err(ConfigError::ColumnNotFound {
                column: x_col.to_string(),
                side: Side::X,
            });
        }
        self.cutoffs_by_column.insert(x_col.clone(), cutoff);
        Ok(())
    }

    pub fn remove_cutoff(&mut self, x_col: &ColumnName) -> Result<(), ConfigError> {
        if self.columns_to_match.contains_key(x_col) {
            return Err(ConfigError::ColumnToMatchLock {
                column: x_col.to_string(),
            });
        }
        self.cutoffs_by_column.remove(x_col);
        Ok(())
    }

    pub fn default_scorer(&self) -> &str {
        &self.default_scorer
    }

    pub fn set_default_scorer(
        &mut self,
        name: &str,
        registry: &ScorerRegistry,
    ) -> Result<(), ConfigError> {
        if !registry.contains(name) {
            return Err(ConfigError::ScorerNotFound {
                name: name.to_string(),
            });
        }
        self.default_scorer = name.to_string();
        Ok(())
    }
}
