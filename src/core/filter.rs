//! Per-sink record filters
//!
//! A filter is any value that can answer "should this record pass" for a
//! single record, independent of the sink's level threshold. Closures get a
//! blanket implementation, so `|r: &LogRecord| r.level == "TEMP"` works
//! directly.

use super::record::LogRecord;
use std::sync::Arc;

pub trait RecordFilter: Send + Sync {
    fn accept(&self, record: &LogRecord) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&LogRecord) -> bool + Send + Sync,
{
    fn accept(&self, record: &LogRecord) -> bool {
        self(record)
    }
}

/// Shared, cheaply cloneable filter handle as stored in sink records.
pub type SharedFilter = Arc<dyn RecordFilter>;

/// Filter that passes only records emitted at the named level.
pub struct LevelNameFilter {
    name: String,
}

impl LevelNameFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl RecordFilter for LevelNameFilter {
    fn accept(&self, record: &LogRecord) -> bool {
        record.level == self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_filter() {
        let filter: SharedFilter = Arc::new(|r: &LogRecord| r.rank >= 30);
        assert!(filter.accept(&LogRecord::new("WARNING", 30, "w")));
        assert!(!filter.accept(&LogRecord::new("DEBUG", 10, "d")));
    }

    #[test]
    fn test_level_name_filter() {
        let filter = LevelNameFilter::new("TEMP");
        assert!(filter.accept(&LogRecord::new("TEMP", 25, "t")));
        assert!(!filter.accept(&LogRecord::new("INFO", 20, "i")));
    }
}
