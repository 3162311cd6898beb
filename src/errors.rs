//! Submodule defining the errors used across the crate.

use alloc::string::String;

use crate::record::RecordError;

/// Errors that can occur while collecting records or laying out the chart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An input line is not a valid record.
    #[error("Malformed record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the input.
        line: usize,
        /// What is wrong with the line.
        #[source]
        source: RecordError,
    },

    /// A target does not carry exactly one value per label.
    #[error("Target `{target}` has {values} values for {labels} labels")]
    ValueCountMismatch {
        /// The offending target.
        target: String,
        /// Number of labels known to the layout.
        labels: usize,
        /// Number of values supplied for the target.
        values: usize,
    },

    /// The same target was added to a layout twice.
    #[error("Target `{0}` was already added to the chart")]
    DuplicateTarget(String),

    /// A target requested for layout has no collected series.
    #[error("No series collected for target `{0}`")]
    UnknownTarget(String),
}
