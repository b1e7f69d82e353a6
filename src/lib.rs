//! # Logdock
//!
//! A dynamic logging facade with runtime-managed sinks, custom severity
//! levels, and per-sink filters.
//!
//! ## Features
//!
//! - **Runtime sinks**: attach and detach console or rotating-file sinks
//!   while the process runs, by friendly name or backend id
//! - **Custom levels**: declare named severity levels with a numeric rank
//!   and display styling, ordered alongside the built-ins
//! - **Environment-driven thresholds**: `LOG_LEVEL` and `DEBUG` override
//!   sink thresholds at attach time
//! - **Best effort**: logging failures are reported through the logger
//!   itself, never raised into the host process
//!
//! ## Example
//!
//! ```
//! use logdock::prelude::*;
//!
//! let logger = Logger::builder().default_level("DEBUG").build();
//! logger.declare_level("TEMP", 25, Some("<cyan>"));
//! logger.attach_sink("stdout", SinkOptions::new().name("stdout_main"));
//!
//! logger.emit("TEMP", "a model temp result");
//! logger.detach_sink("stdout_main");
//! ```

pub mod backend;
pub mod core;

pub mod prelude {
    pub use crate::backend::{LogBackend, SinkSpec, StandardBackend};
    pub use crate::core::{
        LevelDefinition, LevelNameFilter, LogRecord, Logger, LoggerBuilder, RecordFilter,
        RegistryError, Result, SinkHandle, SinkId, SinkKind, SinkOptions, SinkRecord,
        SinkSelector,
    };
}

pub use backend::{LogBackend, SinkSpec, StandardBackend};
pub use core::{
    LevelDefinition, LevelNameFilter, LogRecord, Logger, LoggerBuilder, RecordFilter,
    RegistryError, Result, SinkHandle, SinkId, SinkKind, SinkOptions, SinkRecord, SinkSelector,
};
