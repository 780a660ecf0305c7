#![deny(unsafe_code)]

pub mod assembler;
pub mod column_match;
pub mod config;
pub mod error;
pub mod record_match;
pub mod status;

pub use crate::assembler::{AssembledResult, AssemblerSettings, ReservedColumns, assemble};
pub use crate::column_match::column_match;
pub use crate::config::Configuration;
pub use crate::error::{ConfigError, Side};
pub use crate::record_match::{RecordMatch, records_match};
pub use crate::status::{MatchStatus, StatusLabels};

pub use linkage_model::{ColumnName, Record, RowId, Table};
pub use linkage_scorers::ScorerRegistry;
