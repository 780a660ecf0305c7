#![deny(unsafe_code)]

pub mod ids;
pub mod table;

pub use crate::ids::{ColumnName, RowId};
pub use crate::table::{Record, Table, adjusted_uniqueness, cell};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid column name: {0:?}")]
    InvalidColumnName(String),
}
