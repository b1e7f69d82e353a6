//! The logging facade
//!
//! A [`Logger`] owns the level registry, the sink registry, and the backend,
//! and is the single entry point callers use: declare levels, attach and
//! detach sinks, emit records. It is an explicit owned object rather than a
//! process-global singleton, so every test can construct its own instance.
//!
//! The facade never panics or returns an error from its soft API. Failed
//! declarations, attaches, and detaches are reported through the facade's
//! own emit path at ERROR severity; with no sink attached the diagnostic is
//! silently lost. Logging infrastructure failures must not crash the host
//! process.

use super::error::Result;
use super::level::{LevelDefinition, LevelRegistry};
use super::record::LogRecord;
use super::registry::SinkTable;
use super::resolve::{self, DEBUG_ENV_VAR, LEVEL_ENV_VAR};
use super::sink::{SinkHandle, SinkKind, SinkOptions, SinkRecord, SinkSelector};
use crate::backend::{LogBackend, StandardBackend};
use crate::core::error::RegistryError;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct Logger {
    levels: RwLock<LevelRegistry>,
    // Lock order: levels, then sinks, then backend. emit takes only the
    // levels read lock and the backend mutex, so it never contends with the
    // sink write lock; close and dispatch serialize on the backend mutex,
    // which is what keeps a concurrent detach from racing a dispatch into a
    // just-closed sink.
    sinks: RwLock<SinkTable>,
    backend: Mutex<Box<dyn LogBackend>>,
    default_level: String,
    env: EnvLookup,
}

impl Logger {
    /// A logger with the standard console/file backend, no sinks attached,
    /// and a default level of INFO.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The component default used when neither environment variable forces a
    /// level.
    #[must_use]
    pub fn default_level(&self) -> &str {
        &self.default_level
    }

    // ------------------------------------------------------------------
    // Levels
    // ------------------------------------------------------------------

    /// Declare a custom severity level, reporting failures through the
    /// registry's own sinks instead of raising.
    pub fn declare_level(&self, name: &str, rank: i32, style: Option<&str>) -> bool {
        match self.try_declare_level(name, rank, style) {
            Ok(()) => true,
            Err(e) => {
                self.self_log("ERROR", format!("failed to declare level {name}: {e}"));
                false
            }
        }
    }

    /// Declare a custom severity level.
    ///
    /// Fails with `DuplicateLevel` for any name already declared (built-ins
    /// included) and `InvalidRank` for ranks that cannot be ordered against
    /// the built-in ones. Successful declarations are announced at INFO
    /// through the already-attached sinks.
    pub fn try_declare_level(&self, name: &str, rank: i32, style: Option<&str>) -> Result<()> {
        self.levels.write().declare(name, rank, style)?;
        self.self_log("INFO", format!("declared custom level {name} (rank {rank})"));
        Ok(())
    }

    /// Look up a level definition by name.
    #[must_use]
    pub fn level(&self, name: &str) -> Option<LevelDefinition> {
        self.levels.read().get(name).cloned()
    }

    /// Number of declared levels, built-ins included.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.read().len()
    }

    // ------------------------------------------------------------------
    // Sinks
    // ------------------------------------------------------------------

    /// Attach a sink, reporting failures through the already-active sinks
    /// and returning `None` instead of raising.
    pub fn attach_sink(&self, kind: &str, options: SinkOptions) -> Option<SinkHandle> {
        match self.try_attach(kind, options) {
            Ok(handle) => Some(handle),
            Err(e) => {
                self.self_log("ERROR", format!("failed to attach sink: {e}"));
                None
            }
        }
    }

    /// Attach a sink of the given kind (`"stdout"`/`"console"` or `"file"`).
    ///
    /// The effective threshold comes from the environment-first resolver:
    /// `LOG_LEVEL` if set, else DEBUG when the `DEBUG` flag is truthy, else
    /// this logger's default. The level requested in `options` is never
    /// honored (see [`resolve::resolve`]).
    ///
    /// A successful file attach is announced at INFO through the sinks that
    /// were active before the call; the new sink does not see its own
    /// announcement, so the first sink attached is never self-announced.
    pub fn try_attach(&self, kind: &str, options: SinkOptions) -> Result<SinkHandle> {
        let kind = SinkKind::parse(kind).ok_or_else(|| RegistryError::unsupported_kind(kind))?;

        let resolved = resolve::resolve_with(
            options.level.as_deref(),
            LEVEL_ENV_VAR,
            DEBUG_ENV_VAR,
            &self.default_level,
            |key| (self.env)(key),
        );
        let threshold_rank = self
            .levels
            .read()
            .rank_of(&resolved)
            .ok_or_else(|| RegistryError::unknown_level(&resolved))?;
        // Fetched before the sink/backend locks so the announcement can be
        // built without touching the level registry again (lock order).
        let announce = self.levels.read().get("INFO").cloned();

        let target = options.output_target.clone();
        let mut sinks = self.sinks.write();
        let mut backend = self.backend.lock();
        let handle = sinks.attach(&mut **backend, kind, options, &resolved, threshold_rank)?;

        if kind == SinkKind::File {
            if let Some(info) = announce {
                let message = match &target {
                    Some(path) => format!(
                        "attached file sink '{}' at {}",
                        handle.name,
                        path.display()
                    ),
                    None => format!("attached file sink '{}'", handle.name),
                };
                let record =
                    LogRecord::new(info.name, info.rank, message).with_style(info.style);
                backend.dispatch(&record, Some(handle.id));
            }
        }

        Ok(handle)
    }

    /// Detach a sink by friendly name or backend id, reporting an unknown
    /// selector as a diagnostic rather than an error. Returns whether a sink
    /// was removed.
    pub fn detach_sink(&self, selector: impl Into<SinkSelector>) -> bool {
        let selector = selector.into();
        match self.try_detach(selector.clone()) {
            Ok(()) => true,
            Err(e) => {
                self.self_log("ERROR", format!("failed to detach sink '{selector}': {e}"));
                false
            }
        }
    }

    /// Detach a sink by friendly name or backend id.
    ///
    /// Both selector forms behave identically; an unmatched selector leaves
    /// the registry untouched and reports `UnknownSink`. On a match, the
    /// backend sink is closed and the record leaves both indices atomically.
    pub fn try_detach(&self, selector: impl Into<SinkSelector>) -> Result<()> {
        let selector = selector.into();
        {
            let mut sinks = self.sinks.write();
            let mut backend = self.backend.lock();
            sinks.detach(&mut **backend, &selector)?;
        }
        if let SinkSelector::Name(name) = &selector {
            self.self_log("INFO", format!("detached sink '{name}'"));
        }
        Ok(())
    }

    /// Snapshot of all attached sinks, in attach order.
    #[must_use]
    pub fn list_sinks(&self) -> Vec<SinkRecord> {
        self.sinks.read().list()
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Whether at least one sink is attached. With no sinks, every emit is
    /// a silent no-op; that is a legal state, not an error.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.sinks.read().is_empty()
    }

    // ------------------------------------------------------------------
    // Emit
    // ------------------------------------------------------------------

    /// Emit a record at the named level. Never fails: records at unknown
    /// levels, records below every sink's threshold, and records emitted
    /// with no sink attached are all dropped silently.
    pub fn emit(&self, level: &str, message: impl Into<String>) {
        let Some(def) = self.levels.read().get(level).cloned() else {
            return;
        };
        let record = LogRecord::new(def.name, def.rank, message.into()).with_style(def.style);
        self.backend.lock().dispatch(&record, None);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.emit("TRACE", message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.emit("DEBUG", message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.emit("INFO", message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.emit("WARNING", message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.emit("ERROR", message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.emit("CRITICAL", message);
    }

    /// Route a registry diagnostic through the normal emit path. With no
    /// sink attached the diagnostic is lost by design.
    fn self_log(&self, level: &str, message: String) {
        self.emit(level, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`Logger`].
///
/// # Example
/// ```
/// use logdock::prelude::*;
///
/// let logger = Logger::builder()
///     .default_level("DEBUG")
///     .build();
/// assert!(!logger.is_configured());
/// ```
pub struct LoggerBuilder {
    default_level: String,
    backend: Option<Box<dyn LogBackend>>,
    env: Option<EnvLookup>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_level: "INFO".to_string(),
            backend: None,
            env: None,
        }
    }

    /// Component default level, used when no environment override applies.
    #[must_use = "builder methods return a new value"]
    pub fn default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }

    /// Replace the standard backend, e.g. with a recording backend in tests.
    #[must_use = "builder methods return a new value"]
    pub fn backend(mut self, backend: impl LogBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    /// Replace the environment lookup used by threshold resolution.
    ///
    /// By default the process environment is consulted. Tests pass a fixed
    /// lookup (e.g. `|_| None`) so resolution does not depend on whatever
    /// `LOG_LEVEL` or `DEBUG` happen to be exported on the machine running
    /// them.
    #[must_use = "builder methods return a new value"]
    pub fn env_lookup<E>(mut self, env: E) -> Self
    where
        E: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Some(Arc::new(env));
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            levels: RwLock::new(LevelRegistry::new()),
            sinks: RwLock::new(SinkTable::new()),
            backend: Mutex::new(
                self.backend
                    .unwrap_or_else(|| Box::new(StandardBackend::new())),
            ),
            default_level: self.default_level,
            env: self
                .env
                .unwrap_or_else(|| Arc::new(|key: &str| std::env::var(key).ok())),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
