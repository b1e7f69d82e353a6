//! Default backend: console + rotating file sinks behind one dispatch loop

use super::console::ConsoleSink;
use super::file::FileSink;
use super::template::FormatTemplate;
use super::{LogBackend, SinkSpec};
use crate::core::error::{RegistryError, Result};
use crate::core::filter::SharedFilter;
use crate::core::record::LogRecord;
use crate::core::sink::{SinkId, SinkKind};

enum Writer {
    Console(ConsoleSink),
    File(FileSink),
}

impl Writer {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        match self {
            Writer::Console(sink) => sink.write(record),
            Writer::File(sink) => sink.write(record),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            Writer::Console(sink) => sink.flush(),
            Writer::File(sink) => sink.close(),
        }
    }
}

struct OpenSink {
    id: SinkId,
    threshold_rank: i32,
    filter: Option<SharedFilter>,
    writer: Writer,
}

/// The built-in transport. Sink ids are assigned from a monotonically
/// increasing counter and never reused within a backend instance.
pub struct StandardBackend {
    sinks: Vec<OpenSink>,
    next_id: SinkId,
}

impl StandardBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of currently open sinks.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for StandardBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBackend for StandardBackend {
    fn open(&mut self, spec: SinkSpec) -> Result<SinkId> {
        let template = FormatTemplate::parse(&spec.template);

        let writer = match spec.kind {
            SinkKind::Console => Writer::Console(ConsoleSink::new(template)),
            SinkKind::File => {
                let target = spec.target.ok_or(RegistryError::MissingTarget)?;
                Writer::File(FileSink::open(
                    target,
                    template,
                    spec.rotation.as_deref(),
                    spec.retention.as_deref(),
                    spec.compression.as_deref(),
                )?)
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        self.sinks.push(OpenSink {
            id,
            threshold_rank: spec.threshold_rank,
            filter: spec.filter,
            writer,
        });
        Ok(id)
    }

    fn close(&mut self, id: SinkId) -> Result<()> {
        let position = self
            .sinks
            .iter()
            .position(|sink| sink.id == id)
            .ok_or_else(|| RegistryError::unknown_sink(format!("#{id}")))?;
        let mut sink = self.sinks.remove(position);
        sink.writer.close()
    }

    fn dispatch(&mut self, record: &LogRecord, skip: Option<SinkId>) {
        for sink in &mut self.sinks {
            if Some(sink.id) == skip {
                continue;
            }
            if record.rank < sink.threshold_rank {
                continue;
            }
            if let Some(filter) = &sink.filter {
                if !filter.accept(record) {
                    continue;
                }
            }
            if let Err(e) = sink.writer.write(record) {
                eprintln!("[logdock] sink #{} write failed: {}", sink.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn file_spec(path: &std::path::Path, threshold_rank: i32) -> SinkSpec {
        SinkSpec {
            kind: SinkKind::File,
            target: Some(path.to_path_buf()),
            rotation: None,
            retention: None,
            compression: None,
            template: "{message}".to_string(),
            threshold_rank,
            filter: None,
        }
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let dir = TempDir::new().unwrap();
        let mut backend = StandardBackend::new();

        let a = backend.open(file_spec(&dir.path().join("a.log"), 20)).unwrap();
        let b = backend.open(file_spec(&dir.path().join("b.log"), 20)).unwrap();
        assert!(b > a);

        backend.close(a).unwrap();
        let c = backend.open(file_spec(&dir.path().join("c.log"), 20)).unwrap();
        assert!(c > b, "ids are never reused");
    }

    #[test]
    fn test_missing_target_rejected() {
        let mut backend = StandardBackend::new();
        let spec = SinkSpec {
            kind: SinkKind::File,
            target: None,
            rotation: None,
            retention: None,
            compression: None,
            template: "{message}".to_string(),
            threshold_rank: 20,
            filter: None,
        };
        assert!(matches!(backend.open(spec), Err(RegistryError::MissingTarget)));
    }

    #[test]
    fn test_dispatch_respects_threshold() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("threshold.log");
        let mut backend = StandardBackend::new();
        let id = backend.open(file_spec(&path, 30)).unwrap();

        backend.dispatch(&LogRecord::new("DEBUG", 10, "below"), None);
        backend.dispatch(&LogRecord::new("ERROR", 40, "above"), None);
        backend.close(id).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "above\n");
    }

    #[test]
    fn test_dispatch_respects_filter_and_skip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filtered.log");
        let mut backend = StandardBackend::new();

        let mut spec = file_spec(&path, 0);
        spec.filter = Some(Arc::new(|r: &LogRecord| r.level == "TEMP"));
        let id = backend.open(spec).unwrap();

        backend.dispatch(&LogRecord::new("INFO", 20, "filtered out"), None);
        backend.dispatch(&LogRecord::new("TEMP", 25, "passes"), None);
        backend.dispatch(&LogRecord::new("TEMP", 25, "skipped"), Some(id));
        backend.close(id).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "passes\n");
    }

    #[test]
    fn test_close_unknown_id() {
        let mut backend = StandardBackend::new();
        assert!(matches!(
            backend.close(99),
            Err(RegistryError::UnknownSink { .. })
        ));
    }
}
