//! Literal walkthroughs for the two-pass matching algorithm, following the
//! scenarios S1-S6 from the matching engine's design document.

use linkage_engine::{AssemblerSettings, Configuration, MatchStatus, assemble};
use linkage_model::{ColumnName, Record, Table};
use linkage_scorers::ScorerRegistry;

fn col(name: &str) -> ColumnName {
    ColumnName::new(name).unwrap()
}

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|(k, v)| (col(k), v.to_string())).collect()
}

/// Configures `columns_to_match` for every name in `cols` with a uniform
/// threshold, `exact_match`, and `cutoff=false`.
fn configure(x: &Table, y: &Table, cols: &[&str], threshold: f64) -> Configuration {
    let mut config = Configuration::new(x.column_names(), y.column_names());
    for name in cols {
        config.add_columns_to_match(&col(name), [col(name)]).unwrap();
        config.set_threshold(&col(name), threshold).unwrap();
    }
    config
}

fn status_of(table: &Table, row: usize) -> String {
    table
        .get(linkage_model::RowId::new(row))
        .unwrap()
        .get(&col("match_status"))
        .cloned()
        .unwrap()
}

#[test]
fn s1_single_best_candidate_is_review_when_tied_with_optimal() {
    let x = Table::from_records(vec![record(&[("a", "12"), ("b", "34")])]);
    let y = Table::from_records(vec![
        record(&[("a", "12"), ("b", "34")]),
        record(&[("a", "12"), ("b", "35")]),
    ]);
    let config = configure(&x, &y, &["a", "b"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    assert_eq!(status_of(&result.table, 0), "REVIEW");
    assert_eq!(result.status_counts.get(&MatchStatus::Review), Some(&1));
}

#[test]
fn s2_two_tied_candidates_are_ambiguous() {
    let x = Table::from_records(vec![record(&[("a", "12"), ("b", "34")])]);
    let y = Table::from_records(vec![
        record(&[("a", "12"), ("b", "34")]),
        record(&[("a", "12"), ("b", "34")]),
    ]);
    let config = configure(&x, &y, &["a", "b"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    assert_eq!(status_of(&result.table, 0), "AMBIGUOUS");
}

#[test]
fn s3_two_x_rows_competing_for_one_y_row_become_duplicates() {
    let x = Table::from_records(vec![
        record(&[("a", "12"), ("b", "34")]),
        record(&[("a", "12"), ("b", "34")]),
    ]);
    let y = Table::from_records(vec![record(&[("a", "12"), ("b", "34")])]);
    let config = configure(&x, &y, &["a", "b"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    assert_eq!(status_of(&result.table, 0), "DUPLICATE");
    assert_eq!(status_of(&result.table, 1), "DUPLICATE");
}

#[test]
fn s4_a_row_below_required_threshold_never_enters_duplicate_resolution() {
    // Same shape as S3, but x1 disagrees with x0 on `b`, which drops its
    // composite score below `required_threshold` — it must never reach
    // Pass 2's reverse index, so it cannot turn x0 into a DUPLICATE.
    let x = Table::from_records(vec![
        record(&[("a", "12"), ("b", "34")]),
        record(&[("a", "12"), ("b", "99")]),
    ]);
    let y = Table::from_records(vec![record(&[("a", "12"), ("b", "34")])]);
    let config = configure(&x, &y, &["a", "b"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    let x0_status = status_of(&result.table, 0);
    assert!(
        x0_status == "MATCHED" || x0_status == "REVIEW",
        "expected x0 to pass as sole candidate, got {x0_status}"
    );
    assert_eq!(status_of(&result.table, 1), "UNMATCHED");
}

#[test]
fn s5_grouping_restricts_candidates_to_matching_predicate() {
    let x = Table::from_records(vec![record(&[("name", "A"), ("country", "US")])]);
    let y = Table::from_records(vec![
        record(&[("name", "A"), ("country", "UK")]),
        record(&[("name", "A"), ("country", "US")]),
    ]);
    let mut config = Configuration::new(x.column_names(), y.column_names());
    config.add_columns_to_match(&col("name"), [col("name")]).unwrap();
    config
        .set_columns_to_group(&col("country"), col("country"))
        .unwrap();
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    // Only y1 (country=US) is in the blocked subset, so it is the sole
    // candidate regardless of how `name` scores against y0.
    let ids = result
        .table
        .get(linkage_model::RowId::new(0))
        .unwrap()
        .get(&col("row(s)_matched"))
        .cloned()
        .unwrap();
    assert_eq!(ids, "1");
}

#[test]
fn s6_empty_x_cell_is_excluded_from_matchable_columns() {
    let x = Table::from_records(vec![record(&[("a", ""), ("b", "34")])]);
    let y = Table::from_records(vec![record(&[("a", "12"), ("b", "34")])]);
    let config = configure(&x, &y, &["a", "b"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let result = assemble(&x, &y, &config, &registry, &settings, None);
    assert_eq!(status_of(&result.table, 0), "REVIEW");
}

#[test]
fn progress_callback_runs_once_per_x_row_in_ascending_order() {
    let x = Table::from_records(vec![
        record(&[("a", "1")]),
        record(&[("a", "2")]),
        record(&[("a", "3")]),
    ]);
    let y = Table::from_records(vec![record(&[("a", "1")])]);
    let config = configure(&x, &y, &["a"], 100.0);
    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();

    let mut seen = Vec::new();
    let mut callback = |id: linkage_model::RowId| seen.push(id.index());
    assemble(&x, &y, &config, &registry, &settings, Some(&mut callback));
    assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn columns_to_get_copies_values_only_on_matched_or_review() {
    let x = Table::from_records(vec![
        record(&[("id", "1")]),
        record(&[("id", "nomatch")]),
    ]);
    let y = Table::from_records(vec![record(&[("id", "1"), ("email", "a@example.com")])]);

    let mut config = Configuration::new(x.column_names(), y.column_names());
    config.add_columns_to_match(&col("id"), [col("id")]).unwrap();
    config.set_threshold(&col("id"), 100.0).unwrap();
    config
        .set_columns_to_get(&col("email"), col("email"))
        .unwrap();

    let registry = ScorerRegistry::new();
    let settings = AssemblerSettings::default();
    let result = assemble(&x, &y, &config, &registry, &settings, None);

    let matched_row = result.table.get(linkage_model::RowId::new(0)).unwrap();
    assert_eq!(matched_row.get(&col("email")), Some(&"a@example.com".to_string()));

    let unmatched_row = result.table.get(linkage_model::RowId::new(1)).unwrap();
    assert_eq!(unmatched_row.get(&col("email")), Some(&String::new()));
    assert_eq!(status_of(&result.table, 1), "UNMATCHED");
}

