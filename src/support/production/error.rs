use std::fmt;

use thiserror::Error;

use super::ProductionStep;

/// A production history column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Time,
    Np,
    Gp,
    Wp,
    Pressure,
    We,
}

impl Column {
    pub(super) const ALL: [Column; 6] = [
        Column::Time,
        Column::Np,
        Column::Gp,
        Column::Wp,
        Column::Pressure,
        Column::We,
    ];

    /// Columns that must not decrease over time.
    pub(super) const CUMULATIVE: [Column; 5] = [
        Column::Time,
        Column::Np,
        Column::Gp,
        Column::Wp,
        Column::We,
    ];

    pub(super) fn of(self, step: &ProductionStep) -> f64 {
        match self {
            Column::Time => step.time,
            Column::Np => step.np,
            Column::Gp => step.gp,
            Column::Wp => step.wp,
            Column::Pressure => step.pressure,
            Column::We => step.we,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::Time => "time",
            Column::Np => "Np",
            Column::Gp => "Gp",
            Column::Wp => "Wp",
            Column::Pressure => "pressure",
            Column::We => "We",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating production history.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductionError {
    #[error("production history is empty")]
    Empty,

    #[error("production column {column} has {found} values, expected {expected}")]
    LengthMismatch {
        column: Column,
        expected: usize,
        found: usize,
    },

    #[error("non-finite {column} at row {row}")]
    NonFinite { column: Column, row: usize },

    #[error("negative {column} ({value}) at row {row}")]
    Negative {
        column: Column,
        row: usize,
        value: f64,
    },

    /// A cumulative quantity or time went backwards.
    #[error("{column} decreases at row {row}")]
    Decreasing { column: Column, row: usize },
}
