//! Shared test support: an in-memory backend that records dispatched lines
//! per sink instead of writing them anywhere.

use logdock::core::SharedFilter;
use logdock::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;

/// Every line a [`RecordingBackend`] delivered, as `(sink id, "LEVEL|message")`.
pub type CaptureLog = Arc<Mutex<Vec<(SinkId, String)>>>;

struct RecordedSink {
    id: SinkId,
    threshold_rank: i32,
    filter: Option<SharedFilter>,
}

pub struct RecordingBackend {
    sinks: Vec<RecordedSink>,
    next_id: SinkId,
    log: CaptureLog,
}

impl RecordingBackend {
    pub fn new() -> (Self, CaptureLog) {
        let log: CaptureLog = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sinks: Vec::new(),
                next_id: 1,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl LogBackend for RecordingBackend {
    fn open(&mut self, spec: SinkSpec) -> Result<SinkId> {
        let id = self.next_id;
        self.next_id += 1;
        self.sinks.push(RecordedSink {
            id,
            threshold_rank: spec.threshold_rank,
            filter: spec.filter,
        });
        Ok(id)
    }

    fn close(&mut self, id: SinkId) -> Result<()> {
        let position = self
            .sinks
            .iter()
            .position(|sink| sink.id == id)
            .ok_or_else(|| RegistryError::unknown_sink(format!("#{id}")))?;
        self.sinks.remove(position);
        Ok(())
    }

    fn dispatch(&mut self, record: &LogRecord, skip: Option<SinkId>) {
        for sink in &self.sinks {
            if Some(sink.id) == skip || record.rank < sink.threshold_rank {
                continue;
            }
            if let Some(filter) = &sink.filter {
                if !filter.accept(record) {
                    continue;
                }
            }
            self.log
                .lock()
                .push((sink.id, format!("{}|{}", record.level, record.message)));
        }
    }
}

/// Lines delivered to one sink, stripped of the sink id.
#[allow(dead_code)]
pub fn lines_for(log: &CaptureLog, id: SinkId) -> Vec<String> {
    log.lock()
        .iter()
        .filter(|(sink_id, _)| *sink_id == id)
        .map(|(_, line)| line.clone())
        .collect()
}
