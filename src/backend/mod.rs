//! Backend collaborator: the transport that physically writes log records
//!
//! The core registry never formats bytes itself. It opens and closes sinks
//! through [`LogBackend`] and hands emitted records to [`LogBackend::dispatch`];
//! per-sink threshold and filter checks, formatting, rotation, retention, and
//! compression all live behind this trait. [`StandardBackend`] is the default
//! implementation (console + rotating files).

pub mod console;
pub mod file;
pub mod standard;
pub mod template;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use standard::StandardBackend;
pub use template::FormatTemplate;

use crate::core::error::Result;
use crate::core::filter::SharedFilter;
use crate::core::record::LogRecord;
use crate::core::sink::{SinkId, SinkKind};
use std::path::PathBuf;

/// Everything a backend needs to open one sink.
///
/// Policy strings (`rotation`, `retention`, `compression`) are opaque to the
/// core and interpreted entirely by the backend.
#[derive(Clone)]
pub struct SinkSpec {
    pub kind: SinkKind,
    /// Required for file sinks; the backend creates missing parent
    /// directories before opening.
    pub target: Option<PathBuf>,
    pub rotation: Option<String>,
    pub retention: Option<String>,
    pub compression: Option<String>,
    pub template: String,
    /// Records below this rank never reach the sink.
    pub threshold_rank: i32,
    pub filter: Option<SharedFilter>,
}

pub trait LogBackend: Send + Sync {
    /// Open a sink and return its identifier. Opening may block on
    /// filesystem latency; no timeout is imposed here.
    fn open(&mut self, spec: SinkSpec) -> Result<SinkId>;

    /// Close the identified sink, flushing buffered output.
    fn close(&mut self, id: SinkId) -> Result<()>;

    /// Route a record to every open sink whose threshold and filter admit
    /// it. `skip` excludes one sink, used when a newly attached sink must
    /// not receive its own announcement. Write failures are swallowed:
    /// dispatch is best-effort by contract.
    fn dispatch(&mut self, record: &LogRecord, skip: Option<SinkId>);
}
