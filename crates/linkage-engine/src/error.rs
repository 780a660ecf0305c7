use std::fmt;

/// Which side of the match a [`ConfigError::ColumnNotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    Y,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::X => f.write_str("X"),
            Side::Y => f.write_str("Y"),
        }
    }
}

/// Configuration-time errors (spec §6, §7). Matching itself is infallible —
/// every error a caller can hit is raised at the moment a sub-map is
/// mutated, so a [`crate::Configuration`] is never left in an invalid state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("column {column:?} not found on the {side} side")]
    ColumnNotFound { column: String, side: Side },

    #[error("scorer not found: {name:?}")]
    ScorerNotFound { name: String },

    #[error("{destination:?} is already a columns_to_get destination")]
    XUniqueConstraint { destination: String },

    #[error("columns_to_get destination {destination:?} already exists in X and allow_overwrite is false")]
    OverwriteError { destination: String },

    #[error("column {column:?} cannot be removed while it is still in columns_to_match")]
    ColumnToMatchLock { column: String },

    #[error("invalid value for column {column:?}: {reason}")]
    InvalidValue { column: String, reason: String },
}
