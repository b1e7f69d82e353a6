//! Error types for the sink registry

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Level name already declared (built-in names are reserved)
    #[error("level '{name}' is already declared")]
    DuplicateLevel { name: String },

    /// Rank cannot be ordered against the reserved ranks
    #[error("invalid rank {rank} for level '{name}': ranks must be non-negative")]
    InvalidRank { name: String, rank: i32 },

    /// Threshold refers to a level the registry has never seen
    #[error("unknown level '{name}'")]
    UnknownLevel { name: String },

    /// File sink requested without an output path
    #[error("file sinks require an output target")]
    MissingTarget,

    /// Sink kind string did not parse
    #[error("unsupported sink kind: '{kind}'")]
    UnsupportedKind { kind: String },

    /// Explicit sink name collides with a live sink
    #[error("sink name '{name}' is already in use")]
    DuplicateName { name: String },

    /// Detach selector matched nothing
    #[error("no sink registered under '{key}'")]
    UnknownSink { key: String },

    /// Failure opening, writing, or closing a physical sink
    #[error("backend error while {operation}: {source}")]
    Backend {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Create a duplicate level error
    pub fn duplicate_level(name: impl Into<String>) -> Self {
        RegistryError::DuplicateLevel { name: name.into() }
    }

    /// Create an invalid rank error
    pub fn invalid_rank(name: impl Into<String>, rank: i32) -> Self {
        RegistryError::InvalidRank {
            name: name.into(),
            rank,
        }
    }

    /// Create an unknown level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        RegistryError::UnknownLevel { name: name.into() }
    }

    /// Create an unsupported kind error
    pub fn unsupported_kind(kind: impl Into<String>) -> Self {
        RegistryError::UnsupportedKind { kind: kind.into() }
    }

    /// Create a duplicate sink name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        RegistryError::DuplicateName { name: name.into() }
    }

    /// Create an unknown sink error
    pub fn unknown_sink(key: impl Into<String>) -> Self {
        RegistryError::UnknownSink { key: key.into() }
    }

    /// Wrap an IO failure with the operation that produced it
    pub fn backend(operation: impl Into<String>, source: std::io::Error) -> Self {
        RegistryError::Backend {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RegistryError::duplicate_level("TEMP");
        assert!(matches!(err, RegistryError::DuplicateLevel { .. }));

        let err = RegistryError::invalid_rank("TEMP", -3);
        assert!(matches!(err, RegistryError::InvalidRank { .. }));

        let err = RegistryError::unknown_sink("stdout_main");
        assert!(matches!(err, RegistryError::UnknownSink { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = RegistryError::duplicate_level("TEMP");
        assert_eq!(err.to_string(), "level 'TEMP' is already declared");

        let err = RegistryError::unsupported_kind("syslog");
        assert_eq!(err.to_string(), "unsupported sink kind: 'syslog'");

        let err = RegistryError::MissingTarget;
        assert_eq!(err.to_string(), "file sinks require an output target");
    }

    #[test]
    fn test_backend_error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RegistryError::backend("opening log file", io_err);

        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("access denied"));
    }
}
