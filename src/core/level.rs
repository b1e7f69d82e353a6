//! Severity level definitions and the level registry
//!
//! The registry is pre-seeded with the built-in levels and extended at runtime
//! via [`LevelRegistry::declare`]. Custom levels are process-lifetime
//! constants: there is no removal API by design.

use super::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Built-in levels seeded into every registry: name, rank, default style tag.
///
/// Ranks leave room between entries so custom levels can slot in anywhere
/// (e.g. a rank-25 level sorts between INFO and WARNING).
pub const BUILTIN_LEVELS: &[(&str, i32, &str)] = &[
    ("TRACE", 5, "<bright-black>"),
    ("DEBUG", 10, "<blue>"),
    ("INFO", 20, "<green>"),
    ("WARNING", 30, "<yellow>"),
    ("ERROR", 40, "<red>"),
    ("CRITICAL", 50, "<bright-red>"),
];

/// A named severity level with a numeric rank used for threshold filtering.
///
/// The `style` is an opaque display hint (e.g. `"<cyan>"`) passed through to
/// the backend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub rank: i32,
    pub style: Option<String>,
}

impl fmt::Display for LevelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.rank)
    }
}

/// Case-sensitive map of level name to definition.
///
/// Insertion order of custom declarations is preserved for introspection.
pub struct LevelRegistry {
    by_name: HashMap<String, LevelDefinition>,
    order: Vec<String>,
}

impl LevelRegistry {
    /// Create a registry holding only the built-in levels.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::new(),
            order: Vec::new(),
        };
        for &(name, rank, style) in BUILTIN_LEVELS {
            registry.insert(LevelDefinition {
                name: name.to_string(),
                rank,
                style: Some(style.to_string()),
            });
        }
        registry
    }

    fn insert(&mut self, def: LevelDefinition) {
        self.order.push(def.name.clone());
        self.by_name.insert(def.name.clone(), def);
    }

    /// Declare a custom level.
    ///
    /// Fails with [`RegistryError::DuplicateLevel`] if the name is taken
    /// (built-in names are reserved) and [`RegistryError::InvalidRank`] for
    /// ranks the backend cannot order against the reserved ones (negative
    /// ranks). On failure the registry is unchanged.
    pub fn declare(&mut self, name: &str, rank: i32, style: Option<&str>) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(RegistryError::duplicate_level(name));
        }
        if rank < 0 {
            return Err(RegistryError::invalid_rank(name, rank));
        }
        self.insert(LevelDefinition {
            name: name.to_string(),
            rank,
            style: style.map(str::to_string),
        });
        Ok(())
    }

    /// Look up a level by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.by_name.get(name)
    }

    /// Rank of a level, if declared.
    #[must_use]
    pub fn rank_of(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).map(|def| def.rank)
    }

    /// Number of declared levels, built-ins included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterate definitions in declaration order (built-ins first).
    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.order.iter().filter_map(|name| self.by_name.get(name))
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
