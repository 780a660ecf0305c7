use linkage_model::{ColumnName, Record, RowId, Table, cell};

/// For one X row and one X-column, scores every row of `y_table` against
/// `y_cols` and yields `(y_id, score)` subject to the cutoff/threshold
/// filter (spec §4.D).
///
/// The row score is the maximum scorer output over `y_cols` (0 if that list
/// is empty). Missing cells on either side are treated as empty strings,
/// never an error. Iteration follows `y_table`'s row-id order.
pub fn column_match<'a>(
    x_row: &'a Record,
    y_table: &'a Table,
    x_col: &'a ColumnName,
    y_cols: &'a [ColumnName],
    scorer: &'a (dyn Fn(&str, &str) -> f64 + Send + Sync),
    threshold: f64,
    cutoff: bool,
) -> impl Iterator<Item = (RowId, f64)> + 'a {
    let x_value = cell(x_row, x_col);
    y_table.rows().filter_map(move |(y_id, y_row)| {
        let score = y_cols
            .iter()
            .map(|yc| scorer(x_value, cell(y_row, yc)))
            .fold(0.0_f64, f64::max);
        let passes = if cutoff { score >= threshold } else { score > 0.0 };
        passes.then_some((y_id, score))
    })
}
