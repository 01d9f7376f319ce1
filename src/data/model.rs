use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Record – one line of a log file
// ---------------------------------------------------------------------------

/// The values of a single log line, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Vec<f64>);

impl Record {
    pub fn new(values: Vec<f64>) -> Self {
        Record(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for Record {
    fn from(values: Vec<f64>) -> Self {
        Record(values)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Log – an ordered sequence of records
// ---------------------------------------------------------------------------

/// A parsed log file. Index position is the simulation step (or
/// step × particle for raw particle logs).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Log {
    records: Vec<Record>,
    /// File the log was read from, kept for diagnostics.
    source: Option<PathBuf>,
}

impl Log {
    pub fn new(records: Vec<Record>) -> Self {
        Log {
            records,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column count shared by every record (0 for an empty log).
    pub fn arity(&self) -> usize {
        self.records.first().map_or(0, Record::len)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl Index<usize> for Log {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Log {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Log {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Log::new(iter.into_iter().collect())
    }
}

impl From<Vec<Vec<f64>>> for Log {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        rows.into_iter().map(Record::from).collect()
    }
}
