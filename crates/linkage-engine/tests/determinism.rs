//! Property: running the engine twice over identical inputs yields
//! identical output (spec §8 invariant 10).

use proptest::prelude::*;

use linkage_engine::{AssemblerSettings, Configuration, assemble};
use linkage_model::{ColumnName, Record, Table};
use linkage_scorers::ScorerRegistry;

fn col(name: &str) -> ColumnName {
    ColumnName::new(name).unwrap()
}

fn record(a: &str, b: &str) -> Record {
    [(col("a"), a.to_string()), (col("b"), b.to_string())]
        .into_iter()
        .collect()
}

fn build_table(rows: &[(String, String)]) -> Table {
    Table::from_records(rows.iter().map(|(a, b)| record(a, b)))
}

proptest! {
    #[test]
    fn repeated_runs_over_identical_tables_agree(
        x_rows in proptest::collection::vec(("[a-c]", "[a-c]"), 1..6),
        y_rows in proptest::collection::vec(("[a-c]", "[a-c]"), 1..6),
    ) {
        let x_rows: Vec<(String, String)> = x_rows
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        let y_rows: Vec<(String, String)> = y_rows
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();

        let x1 = build_table(&x_rows);
        let y1 = build_table(&y_rows);

        let mut config = Configuration::new(x1.column_names(), y1.column_names());
        config.add_columns_to_match(&col("a"), [col("a")]).unwrap();
        config.add_columns_to_match(&col("b"), [col("b")]).unwrap();

        let registry = ScorerRegistry::new();
        let settings = AssemblerSettings::default();

        let result1 = assemble(&x1, &y1, &config, &registry, &settings, None);
        let result2 = assemble(&x1, &y1, &config, &registry, &settings, None);

        prop_assert_eq!(result1.status_counts, result2.status_counts);
        for (id, record1) in result1.table.rows() {
            let record2 = result2.table.get(id).expect("same row ids on both sides");
            prop_assert_eq!(record1, record2);
        }
    }
}
