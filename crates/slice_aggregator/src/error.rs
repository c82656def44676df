use thiserror::Error;

/// Errors raised by aggregator operations.
///
/// Every operation validates its arguments before mutating anything, so a
/// returned error always leaves the aggregator unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AggregatorError {
    #[error("index {ix} is out of range")]
    IndexOutOfRange { ix: i64 },

    #[error("start {start} is out of range")]
    StartOutOfRange { start: i64 },

    #[error("stop {stop} is out of range")]
    StopOutOfRange { stop: i64 },

    /// A range increment was given `start > stop`.
    #[error("range start {start} is greater than stop {stop}")]
    ReversedRange { start: i64, stop: i64 },
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
