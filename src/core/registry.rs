//! Sink registry: both sink indices and the attach/detach bookkeeping
//!
//! The table never talks to the filesystem itself; opening and closing goes
//! through the backend passed into each call. Callers are expected to hold
//! one lock across a whole operation so the two indices can never be
//! observed half-updated.

use super::error::{RegistryError, Result};
use super::sink::{SinkHandle, SinkId, SinkKind, SinkOptions, SinkRecord, SinkSelector};
use crate::backend::{LogBackend, SinkSpec};
use std::collections::HashMap;

#[derive(Default)]
pub struct SinkTable {
    /// Insertion-ordered records; `backend_id` is the primary key.
    entries: Vec<SinkRecord>,
    /// Secondary index: friendly name to backend id.
    by_name: HashMap<String, SinkId>,
}

impl SinkTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a sink: validate options, open it through the backend, then
    /// commit the record to both indices. Nothing is committed on failure.
    ///
    /// `resolved_level` and `threshold_rank` are the output of threshold
    /// resolution, performed by the facade against its level registry.
    pub fn attach(
        &mut self,
        backend: &mut dyn LogBackend,
        kind: SinkKind,
        options: SinkOptions,
        resolved_level: &str,
        threshold_rank: i32,
    ) -> Result<SinkHandle> {
        if kind == SinkKind::File && options.output_target.is_none() {
            return Err(RegistryError::MissingTarget);
        }
        if let Some(name) = &options.name {
            if self.by_name.contains_key(name) {
                return Err(RegistryError::duplicate_name(name));
            }
        }

        let template = options
            .format_template
            .clone()
            .unwrap_or_else(|| super::sink::DEFAULT_FORMAT_TEMPLATE.to_string());
        let backend_id = backend.open(SinkSpec {
            kind,
            target: options.output_target.clone(),
            rotation: options.rotation.clone(),
            retention: options.retention.clone(),
            compression: options.compression.clone(),
            template,
            threshold_rank,
            filter: options.filter.clone(),
        })?;

        let friendly_name = match options.name {
            Some(name) => name,
            None => self.generate_name(kind, backend_id),
        };

        self.by_name.insert(friendly_name.clone(), backend_id);
        self.entries.push(SinkRecord {
            friendly_name: friendly_name.clone(),
            backend_id,
            kind,
            resolved_level: resolved_level.to_string(),
            target_path: options.output_target,
            rotation: options.rotation,
            retention: options.retention,
            compression: options.compression,
            filter: options.filter,
        });

        Ok(SinkHandle {
            id: backend_id,
            name: friendly_name,
        })
    }

    /// Detach the sink matched by `selector`. The record leaves both indices
    /// even when the backend close fails; the close error is still surfaced.
    pub fn detach(&mut self, backend: &mut dyn LogBackend, selector: &SinkSelector) -> Result<()> {
        let backend_id = match selector {
            SinkSelector::Name(name) => *self
                .by_name
                .get(name)
                .ok_or_else(|| RegistryError::unknown_sink(name.clone()))?,
            SinkSelector::Id(id) => {
                if !self.entries.iter().any(|record| record.backend_id == *id) {
                    return Err(RegistryError::unknown_sink(format!("#{id}")));
                }
                *id
            }
        };

        let close_result = backend.close(backend_id);

        self.entries.retain(|record| record.backend_id != backend_id);
        self.by_name.retain(|_, id| *id != backend_id);

        close_result
    }

    /// Snapshot of the registry in attach order.
    #[must_use]
    pub fn list(&self) -> Vec<SinkRecord> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&SinkRecord> {
        let id = *self.by_name.get(name)?;
        self.entries.iter().find(|record| record.backend_id == id)
    }

    /// Auto-generated names follow `{kind}_handler_{backend_id}`. Backend
    /// ids are unique, so a collision can only come from an earlier explicit
    /// name; a numeric suffix keeps the uniqueness invariant in that case.
    fn generate_name(&self, kind: SinkKind, backend_id: SinkId) -> String {
        let base = format!("{}_handler_{}", kind.as_str(), backend_id);
        if !self.by_name.contains_key(&base) {
            return base;
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{base}_{counter}");
            if !self.by_name.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}
