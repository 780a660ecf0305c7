use std::collections::{BTreeMap, BTreeSet};

use linkage_model::{ColumnName, RowId, Table, adjusted_uniqueness, cell};
use linkage_scorers::ScorerRegistry;

use crate::column_match::column_match;
use crate::config::Configuration;

/// One X row's candidate outcome: the tied top-scoring Y candidates and the
/// composite score a perfect-by-configuration match would have attained
/// (spec §4.E).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMatch {
    pub x_id: RowId,
    pub matches: Vec<(RowId, f64)>,
    pub optimal: f64,
}

/// Drives the column-level matcher across every configured X-column for
/// every X row, accumulating a uniqueness-weighted composite score per Y
/// candidate (spec §4.E).
///
/// `x_uniqueness` is computed once up front — `O(|X| · |cols(X)|)` — rather
/// than per row, since it depends only on `X` and not on the row being
/// matched.
pub fn records_match<'a>(
    x: &'a Table,
    y: &'a Table,
    config: &'a Configuration,
    registry: &'a ScorerRegistry,
) -> impl Iterator<Item = RecordMatch> + 'a {
    let x_uniqueness: BTreeMap<ColumnName, f64> = x
        .column_names()
        .into_iter()
        .map(|c| {
            let u = x.uniqueness(&c);
            (c, u)
        })
        .collect();

    x.rows().map(move |(x_id, x_row)| {
        let matchable: BTreeSet<ColumnName> = config
            .columns_to_match()
            .keys()
            .filter(|c| !cell(x_row, c).is_empty())
            .cloned()
            .collect();

        let weights = adjusted_uniqueness(&matchable, &x_uniqueness);

        let predicate: BTreeMap<ColumnName, String> = config
            .columns_to_group()
            .iter()
            .map(|(y_col, x_col)| (y_col.clone(), cell(x_row, x_col).to_string()))
            .collect();
        let y_subset = y.group_by(&predicate);

        let mut acc: BTreeMap<RowId, f64> = BTreeMap::new();
        for (x_col, y_cols) in config.columns_to_match() {
            let weight = weights.get(x_col).copied().unwrap_or(0.0);
            let scorer_name = config
                .scorers_by_column()
                .get(x_col)
                .map(String::as_str)
                .unwrap_or_else(|| config.default_scorer());
            let Some(scorer) = registry.get(scorer_name) else {
                continue;
            };
            let threshold = config
                .thresholds_by_column()
                .get(x_col)
                .copied()
                .unwrap_or(75.0);
            let cutoff = config
                .cutoffs_by_column()
                .get(x_col)
                .copied()
                .unwrap_or(false);

            for (y_id, score) in
                column_match(x_row, &y_subset, x_col, y_cols, scorer.as_ref(), threshold, cutoff)
            {
                *acc.entry(y_id).or_insert(0.0) += score * weight;
            }
        }

        let best = acc.values().copied().fold(0.0_f64, f64::max);
        let matches: Vec<(RowId, f64)> = acc
            .into_iter()
            .filter(|(_, score)| *score == best)
            .collect();

        let optimal: f64 = matchable
            .iter()
            .map(|c| {
                let threshold = config.thresholds_by_column().get(c).copied().unwrap_or(75.0);
                threshold * weights.get(c).copied().unwrap_or(0.0)
            })
            .sum();

        RecordMatch {
            x_id,
            matches,
            optimal,
        }
    })
}
