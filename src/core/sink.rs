//! Sink descriptions: kinds, attach options, registry records, handles

use super::filter::SharedFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Opaque identifier assigned by the backend when a sink is opened.
///
/// This is the registry's true primary key; friendly names are a secondary
/// index on top of it.
pub type SinkId = u64;

/// Default record format, loguru-style placeholders.
pub const DEFAULT_FORMAT_TEMPLATE: &str = "{time:YYYY-MM-DD HH:mm:ss} | {level: <10} | {message}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkKind {
    Console,
    File,
}

impl SinkKind {
    /// Parse a caller-supplied kind string. `"stdout"` is accepted as an
    /// alias for the console kind.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "stdout" | "console" => Some(SinkKind::Console),
            "file" => Some(SinkKind::File),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for attaching a sink.
///
/// # Example
///
/// ```
/// use logdock::core::sink::SinkOptions;
///
/// let options = SinkOptions::new()
///     .level("INFO")
///     .target("logs/system.log")
///     .rotation("500 MB")
///     .retention("10 days")
///     .compression("gz")
///     .name("system_file");
/// ```
#[derive(Default, Clone)]
pub struct SinkOptions {
    pub level: Option<String>,
    pub output_target: Option<PathBuf>,
    pub rotation: Option<String>,
    pub retention: Option<String>,
    pub compression: Option<String>,
    pub format_template: Option<String>,
    pub filter: Option<SharedFilter>,
    pub name: Option<String>,
}

impl SinkOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested level. Note that the threshold resolver gives environment
    /// overrides precedence over this value (see [`crate::core::resolve`]).
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Output path; required for file sinks.
    #[must_use]
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_target = Some(path.into());
        self
    }

    /// Rotation policy string, interpreted by the backend (e.g. "500 MB").
    #[must_use]
    pub fn rotation(mut self, policy: impl Into<String>) -> Self {
        self.rotation = Some(policy.into());
        self
    }

    /// Retention policy string, interpreted by the backend (e.g. "10 days").
    #[must_use]
    pub fn retention(mut self, policy: impl Into<String>) -> Self {
        self.retention = Some(policy.into());
        self
    }

    /// Compression format for rotated files, interpreted by the backend.
    #[must_use]
    pub fn compression(mut self, format: impl Into<String>) -> Self {
        self.compression = Some(format.into());
        self
    }

    /// Record format template; [`DEFAULT_FORMAT_TEMPLATE`] when omitted.
    #[must_use]
    pub fn format_template(mut self, template: impl Into<String>) -> Self {
        self.format_template = Some(template.into());
        self
    }

    /// Per-sink filter predicate, independent of the level threshold.
    #[must_use]
    pub fn filter(mut self, filter: impl super::filter::RecordFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Explicit friendly name; auto-generated from kind and backend id when
    /// omitted.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Debug for SinkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkOptions")
            .field("level", &self.level)
            .field("output_target", &self.output_target)
            .field("rotation", &self.rotation)
            .field("retention", &self.retention)
            .field("compression", &self.compression)
            .field("format_template", &self.format_template)
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .field("name", &self.name)
            .finish()
    }
}

/// Registry entry for one attached sink. Never mutated in place: detaching
/// and re-attaching is the only way to change a sink's configuration.
#[derive(Clone)]
pub struct SinkRecord {
    pub friendly_name: String,
    pub backend_id: SinkId,
    pub kind: SinkKind,
    /// Effective level name after resolution against the environment.
    pub resolved_level: String,
    /// Present only for file sinks.
    pub target_path: Option<PathBuf>,
    pub rotation: Option<String>,
    pub retention: Option<String>,
    pub compression: Option<String>,
    pub(crate) filter: Option<SharedFilter>,
}

impl SinkRecord {
    /// Whether a filter predicate is attached.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }
}

impl fmt::Debug for SinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRecord")
            .field("friendly_name", &self.friendly_name)
            .field("backend_id", &self.backend_id)
            .field("kind", &self.kind)
            .field("resolved_level", &self.resolved_level)
            .field("target_path", &self.target_path)
            .field("rotation", &self.rotation)
            .field("retention", &self.retention)
            .field("compression", &self.compression)
            .field("filter", &self.filter.as_ref().map(|_| "<filter>"))
            .finish()
    }
}

/// Returned by a successful attach; either field detaches the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkHandle {
    pub id: SinkId,
    pub name: String,
}

/// Selector accepted by detach: a friendly name or a backend id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkSelector {
    Name(String),
    Id(SinkId),
}

impl fmt::Display for SinkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkSelector::Name(name) => f.write_str(name),
            SinkSelector::Id(id) => write!(f, "#{id}"),
        }
    }
}

impl From<&str> for SinkSelector {
    fn from(name: &str) -> Self {
        SinkSelector::Name(name.to_string())
    }
}

impl From<String> for SinkSelector {
    fn from(name: String) -> Self {
        SinkSelector::Name(name)
    }
}

impl From<SinkId> for SinkSelector {
    fn from(id: SinkId) -> Self {
        SinkSelector::Id(id)
    }
}

impl From<&SinkHandle> for SinkSelector {
    fn from(handle: &SinkHandle) -> Self {
        SinkSelector::Id(handle.id)
    }
}
