//! Core registry types: levels, sinks, resolution, and the facade

pub mod error;
pub mod filter;
pub mod level;
pub mod logger;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod sink;

pub use error::{RegistryError, Result};
pub use filter::{LevelNameFilter, RecordFilter, SharedFilter};
pub use level::{LevelDefinition, LevelRegistry, BUILTIN_LEVELS};
pub use logger::{Logger, LoggerBuilder};
pub use record::LogRecord;
pub use registry::SinkTable;
pub use resolve::{resolve, resolve_with, DEBUG_ENV_VAR, LEVEL_ENV_VAR};
pub use sink::{
    SinkHandle, SinkId, SinkKind, SinkOptions, SinkRecord, SinkSelector, DEFAULT_FORMAT_TEMPLATE,
};
