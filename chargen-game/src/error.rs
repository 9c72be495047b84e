//! Error taxonomy shared by every layer of the generator.

use thiserror::Error;

/// Errors raised by the engine primitives, the allocation algorithms, and
/// rule-system resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChargenError {
    #[error("cannot choose from an empty sequence")]
    EmptySequence,
    #[error("cannot sample {requested} items from a sequence of {available}")]
    InsufficientSize { requested: usize, available: usize },
    #[error("no candidate is at or below {ceiling}")]
    ImpossibleChoice { ceiling: i64 },
    #[error("trait limit must be positive (got {limit})")]
    InvalidLimit { limit: u8 },
    #[error("range is empty (low {low} > high {high})")]
    InvalidRange { low: i64, high: i64 },
    #[error("{dots} dots do not fit in {slots} slots capped at {limit}")]
    BudgetExceedsCapacity { slots: usize, dots: u32, limit: u8 },
    #[error("{keys} keys cannot be split into {groups} equal groups")]
    InvalidGrouping { keys: usize, groups: usize },
    #[error("table {table} is malformed: {detail}")]
    MalformedTable { table: &'static str, detail: String },
    #[error("no rule system named {0:?}")]
    RuleSystemNotFound(String),
}

impl ChargenError {
    /// Whether the caller can recover by asking for something else.
    ///
    /// Only an unknown rule system qualifies; every other variant points at a
    /// malformed table or a programming error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RuleSystemNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ChargenError>;
