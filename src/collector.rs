//! Grouping of benchmark records into chart categories and target series.

use alloc::string::String;
use alloc::vec::Vec;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::errors::Error;
use crate::layout::{GroupedBarLayout, LayoutConfig};
use crate::record::Record;

/// Insertion-ordered set of distinct labels.
pub type LabelRegistry = IndexSet<String, hashbrown::DefaultHashBuilder>;

/// Throughput values per target, targets in first-seen order.
pub type TargetSeries = IndexMap<String, Vec<i64>, hashbrown::DefaultHashBuilder>;

/// Result of a completed collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Distinct parameter-combination labels in first-seen order.
    pub labels: Vec<String>,
    /// Throughput values per target, in input order.
    pub series: TargetSeries,
}

impl Collection {
    /// Returns `true` if no record was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Lay out every collected target, in first-seen order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ValueCountMismatch`] when a target does not have
    /// exactly one value per label.
    pub fn layout(&self, config: LayoutConfig) -> Result<GroupedBarLayout, Error> {
        crate::layout::layout(
            &self.labels,
            &self.series,
            self.series.keys().map(String::as_str),
            config,
        )
    }
}

/// Incremental record collector.
///
/// Lines are fed one at a time with [`push_line`](Self::push_line); the
/// collector keeps track of the line number so that malformed input can be
/// reported precisely.
#[derive(Debug, Clone, Default)]
pub struct RecordCollector {
    labels: LabelRegistry,
    series: TargetSeries,
    lines: usize,
}

impl RecordCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one input line and add it to the collection.
    ///
    /// Every line must be a record; a blank line is malformed too.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the line is not a valid record.
    pub fn push_line(&mut self, line: &str) -> Result<(), Error> {
        self.lines += 1;
        let record = Record::parse(line).map_err(|source| Error::MalformedRecord {
            line: self.lines,
            source,
        })?;
        self.push_record(record);
        Ok(())
    }

    /// Add an already parsed record.
    pub fn push_record(&mut self, record: Record) {
        let label = record.label();
        trace!(id = %record.target, throughput = record.throughput, "record");

        if !self.series.contains_key(&record.target) {
            debug!(id = %record.target, "new target");
        }
        self.series
            .entry(record.target)
            .or_default()
            .push(record.throughput);

        self.labels.insert(label);
    }

    /// Labels seen so far.
    #[must_use]
    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    /// Series collected so far.
    #[must_use]
    pub fn series(&self) -> &TargetSeries {
        &self.series
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Consume the collector and return the collected labels and series.
    #[must_use]
    pub fn finish(self) -> Collection {
        debug!(
            labels = self.labels.len(),
            targets = self.series.len(),
            lines = self.lines,
            "collection finished"
        );
        Collection {
            labels: self.labels.into_iter().collect(),
            series: self.series,
        }
    }
}

/// Collect every line of `source` into labels and target series.
///
/// # Errors
///
/// Aborts on the first malformed line with [`Error::MalformedRecord`].
pub fn collect<I>(source: I) -> Result<Collection, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut collector = RecordCollector::new();
    for line in source {
        collector.push_line(line.as_ref())?;
    }
    Ok(collector.finish())
}
