use std::collections::BTreeMap;

use linkage_model::{ColumnName, Record, RowId, Table, cell};
use linkage_scorers::ScorerRegistry;

use crate::config::Configuration;
use crate::record_match::records_match;
use crate::status::{MatchStatus, StatusLabels};

/// The reserved output columns written into every annotated X row (spec
/// §4.F, §6). Names are configurable; defaults match the reference
/// implementation's literal column names.
#[derive(Debug, Clone)]
pub struct ReservedColumns {
    pub match_status: ColumnName,
    pub matched_with_row: ColumnName,
    pub match_score: ColumnName,
}

impl Default for ReservedColumns {
    fn default() -> Self {
        Self {
            match_status: ColumnName::new("match_status").expect("literal is non-empty"),
            matched_with_row: ColumnName::new("row(s)_matched").expect("literal is non-empty"),
            match_score: ColumnName::new("match_score").expect("literal is non-empty"),
        }
    }
}

/// Settings held by the result assembler across a whole run (spec §4.F
/// "Held state"): the two thresholds and the reserved-column/status-label
/// naming.
#[derive(Debug, Clone)]
pub struct AssemblerSettings {
    pub required_threshold: f64,
    pub duplicate_threshold: f64,
    pub reserved_columns: ReservedColumns,
    pub status_labels: StatusLabels,
}

impl Default for AssemblerSettings {
    fn default() -> Self {
        Self {
            required_threshold: 75.0,
            duplicate_threshold: 0.0,
            reserved_columns: ReservedColumns::default(),
            status_labels: StatusLabels::default(),
        }
    }
}

/// The outcome of a full matching run: the annotated X table and a tally of
/// how many rows landed in each status.
#[derive(Debug, Clone)]
pub struct AssembledResult {
    pub table: Table,
    pub status_counts: BTreeMap<MatchStatus, usize>,
}

struct RowAnnotation {
    record: Record,
    status: MatchStatus,
}

fn render_matches(pairs: &[(RowId, f64)]) -> (String, String) {
    let ids = pairs
        .iter()
        .map(|(id, _)| id.index().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let scores = pairs
        .iter()
        .map(|(_, score)| score.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    (ids, scores)
}

fn null_columns_to_get(record: &mut Record, config: &Configuration) {
    for destination in config.columns_to_get().values() {
        record.insert(destination.clone(), String::new());
    }
}

fn copy_columns_to_get(record: &mut Record, config: &Configuration, y: &Table, y_id: RowId) {
    let Some(y_row) = y.get(y_id) else { return };
    for (y_col, destination) in config.columns_to_get() {
        record.insert(destination.clone(), cell(y_row, y_col).to_string());
    }
}

/// Runs the full two-pass matching algorithm (spec §4.F) and returns the
/// annotated X table plus a status histogram.
///
/// `progress`, when given, is invoked once per X row in ascending row-id
/// order as Pass 1 completes that row.
pub fn assemble(
    x: &Table,
    y: &Table,
    config: &Configuration,
    registry: &ScorerRegistry,
    settings: &AssemblerSettings,
    mut progress: Option<&mut dyn FnMut(RowId)>,
) -> AssembledResult {
    let mut rows: BTreeMap<RowId, RowAnnotation> = BTreeMap::new();
    let mut y_to_x: BTreeMap<RowId, Vec<(RowId, f64)>> = BTreeMap::new();

    for record_match in records_match(x, y, config, registry) {
        let x_id = record_match.x_id;
        let Some(x_row) = x.get(x_id) else { continue };

        let passed: Vec<(RowId, f64)> = record_match
            .matches
            .iter()
            .copied()
            .filter(|(_, score)| *score >= settings.required_threshold)
            .collect();

        let mut out = x_row.clone();
        let status = match passed.len() {
            0 => {
                null_columns_to_get(&mut out, config);
                MatchStatus::Unmatched
            }
            1 => {
                let (y_id, score) = passed[0];
                let status = if score <= record_match.optimal {
                    MatchStatus::Review
                } else {
                    MatchStatus::Matched
                };
                copy_columns_to_get(&mut out, config, y, y_id);
                y_to_x.entry(y_id).or_default().push((x_id, score));
                status
            }
            _ => {
                null_columns_to_get(&mut out, config);
                MatchStatus::Ambiguous
            }
        };

        let (ids_rendered, scores_rendered) = render_matches(&passed);
        out.insert(
            settings.reserved_columns.match_status.clone(),
            settings.status_labels.label(status).to_string(),
        );
        out.insert(settings.reserved_columns.matched_with_row.clone(), ids_rendered);
        out.insert(settings.reserved_columns.match_score.clone(), scores_rendered);

        rows.insert(x_id, RowAnnotation { record: out, status });

        if let Some(callback) = progress.as_deref_mut() {
            callback(x_id);
        }
    }

    // Pass 2: resolve Y-side duplicates.
    for x_matches in y_to_x.values() {
        if x_matches.len() <= 1 {
            continue;
        }
        let max_score = x_matches
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::MIN, f64::max);
        let min_score = x_matches
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::MAX, f64::min);
        let tops: Vec<RowId> = x_matches
            .iter()
            .filter(|(_, score)| *score == max_score)
            .map(|(x_id, _)| *x_id)
            .collect();

        if tops.len() > 1 || (max_score - min_score).abs() < settings.duplicate_threshold {
            for (x_id, _) in x_matches {
                if let Some(annotation) = rows.get_mut(x_id) {
                    annotation.status = MatchStatus::Duplicate;
                    annotation.record.insert(
                        settings.reserved_columns.match_status.clone(),
                        settings.status_labels.label(MatchStatus::Duplicate).to_string(),
                    );
                }
            }
        } else {
            for (x_id, _) in x_matches {
                if tops.contains(x_id) {
                    continue;
                }
                if let Some(annotation) = rows.get_mut(x_id) {
                    annotation.status = MatchStatus::Unmatched;
                    null_columns_to_get(&mut annotation.record, config);
                    annotation.record.insert(
                        settings.reserved_columns.match_status.clone(),
                        settings.status_labels.label(MatchStatus::Unmatched).to_string(),
                    );
                    annotation
                        .record
                        .insert(settings.reserved_columns.matched_with_row.clone(), String::new());
                    annotation
                        .record
                        .insert(settings.reserved_columns.match_score.clone(), String::new());
                }
            }
        }
    }

    let mut status_counts: BTreeMap<MatchStatus, usize> = BTreeMap::new();
    let mut table = Table::new();
    for (x_id, annotation) in rows {
        *status_counts.entry(annotation.status).or_insert(0) += 1;
        table.insert(x_id, annotation.record);
    }

    AssembledResult { table, status_counts }
}
