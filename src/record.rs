//! Flat `key = value` record grammar.
//!
//! A benchmark run is printed as a single line of comma-separated fields:
//!
//! ```text
//! Id = tokio, Total = 100000, Payload size (bytes) = 100, Throughput (messages/sec) = 250000
//! ```
//!
//! Fields are separated by `", "`, key and value by a single `'='`, and both
//! sides are trimmed. Two keys are special: [`TARGET_KEY`] names the
//! implementation under test and [`THROUGHPUT_KEY`] carries the measured
//! value. Every other field is a benchmark parameter.

use alloc::string::String;

use indexmap::IndexMap;

/// Field holding the name of the benchmarked target.
pub const TARGET_KEY: &str = "Id";

/// Field holding the measured throughput.
pub const THROUGHPUT_KEY: &str = "Throughput (messages/sec)";

/// Separator between two fields of a record line.
pub const FIELD_SEPARATOR: &str = ", ";

/// Ordered field map using hashbrown's default hasher for `no_std` compatibility.
pub type Fields = IndexMap<String, String, hashbrown::DefaultHashBuilder>;

/// Errors raised while parsing a single record line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A field does not contain exactly one `'='`.
    #[error("Field `{0}` is not a `key = value` pair")]
    InvalidField(String),

    /// A required field is absent.
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    /// The throughput field is not a base-10 integer.
    #[error("Throughput `{0}` is not an integer")]
    InvalidThroughput(String),
}

/// Split a line into its fields, preserving their order.
///
/// A key repeated within the same line keeps the position of its first
/// occurrence and the value of its last one.
///
/// # Errors
///
/// Returns [`RecordError::InvalidField`] when a field has no `'='` or more
/// than one.
pub fn parse_fields(line: &str) -> Result<Fields, RecordError> {
    let mut fields = Fields::default();
    for token in line.split(FIELD_SEPARATOR) {
        let mut parts = token.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(RecordError::InvalidField(token.trim().into()));
        };
        fields.insert(key.trim().into(), value.trim().into());
    }
    Ok(fields)
}

/// One parsed benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Name of the benchmarked target (the `Id` field).
    pub target: String,
    /// Measured throughput in messages per second.
    pub throughput: i64,
    /// Remaining fields, in the order they appeared on the line.
    pub parameters: Fields,
}

impl Record {
    /// Parse a record from one input line.
    ///
    /// # Errors
    ///
    /// Fails when the line does not follow the field grammar, lacks one of
    /// the required fields, or carries a non-integer throughput.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut parameters = parse_fields(line)?;
        let target = parameters
            .shift_remove(TARGET_KEY)
            .ok_or(RecordError::MissingField(TARGET_KEY))?;
        let raw = parameters
            .shift_remove(THROUGHPUT_KEY)
            .ok_or(RecordError::MissingField(THROUGHPUT_KEY))?;
        let throughput = raw
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidThroughput(raw))?;

        Ok(Self {
            target,
            throughput,
            parameters,
        })
    }

    /// Render the parameters as a chart category label.
    ///
    /// Each parameter becomes `"key = value"`, one per line.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = String::new();
        for (i, (key, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                label.push('\n');
            }
            label.push_str(key);
            label.push_str(" = ");
            label.push_str(value);
        }
        label
    }
}
