//! Errors of the report binary.

use std::path::PathBuf;

/// Anything that stops a report from being produced.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The benchmark log could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Collection or layout failed.
    #[error(transparent)]
    Chart(#[from] throughput_chart::Error),

    /// The chart could not be drawn or written.
    #[error("cannot draw {}: {message}", path.display())]
    Draw { path: PathBuf, message: String },

    /// The text rendering failed.
    #[error(transparent)]
    Format(#[from] std::fmt::Error),

    /// A `--log` directive is not a valid tracing filter.
    #[error("invalid log directive: {0}")]
    LogDirective(#[from] tracing_subscriber::filter::ParseError),
}
