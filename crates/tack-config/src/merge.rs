//! Overlay merge semantics.
//!
//! - tables merge key by key
//! - collections union in first-seen order (or are replaced under
//!   [`MergeMode::Replace`])
//! - scalars are last-applied-wins
//!
//! Every value written is recorded in a [`Trace`] so later passes can tell
//! which overlay set what.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::key::ConfigKey;
use crate::overlay::{MergeMode, Overlay, Stage};

/// One write of one value at one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub overlay: String,
    pub stage: Stage,
    pub mode: MergeMode,
    pub value: Value,
}

/// Per-key history of assignments, in application order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    entries: IndexMap<ConfigKey, Vec<Assignment>>,
}

impl Trace {
    pub fn assignments(&self, key: &ConfigKey) -> &[Assignment] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Assignments at `key` or anywhere beneath it.
    pub fn assignments_under<'a>(
        &'a self,
        prefix: &'a ConfigKey,
    ) -> impl Iterator<Item = (&'a ConfigKey, &'a Assignment)> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.starts_with(prefix))
            .flat_map(|(key, assignments)| assignments.iter().map(move |a| (key, a)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, key: ConfigKey, assignment: Assignment) {
        self.entries.entry(key).or_default().push(assignment);
    }
}

/// Apply `overlay` onto `target`, recording every write.
pub fn apply_overlay(target: &mut Value, overlay: &Overlay, trace: &mut Trace) {
    let mut merger = Merger {
        overlay,
        trace,
        path: Vec::new(),
    };
    merger.merge(target, overlay.patch().as_value());
    tracing::debug!(
        overlay = overlay.name(),
        stage = ?overlay.stage(),
        mode = ?overlay.mode(),
        "applied overlay"
    );
}

/// Union `incoming` into `existing`: first-seen order, duplicates dropped.
pub fn union_into(existing: &mut Vec<Value>, incoming: &[Value]) {
    let mut merged: Vec<Value> = Vec::with_capacity(existing.len() + incoming.len());
    for item in existing.drain(..).chain(incoming.iter().cloned()) {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    *existing = merged;
}

struct Merger<'a> {
    overlay: &'a Overlay,
    trace: &'a mut Trace,
    path: Vec<String>,
}

impl Merger<'_> {
    fn merge(&mut self, target: &mut Value, update: &Value) {
        match update {
            Value::Object(update_map) => {
                if !target.is_object() {
                    *target = Value::Object(Map::new());
                    if update_map.is_empty() {
                        self.record(update);
                    }
                }
                if let Value::Object(target_map) = target {
                    for (key, value) in update_map {
                        self.path.push(key.clone());
                        let slot = target_map.entry(key.clone()).or_insert(Value::Null);
                        self.merge(slot, value);
                        self.path.pop();
                    }
                }
            }
            Value::Array(incoming) => {
                match target {
                    Value::Array(existing) if self.overlay.mode() == MergeMode::Merge => {
                        union_into(existing, incoming);
                    }
                    _ => {
                        let mut fresh = Vec::new();
                        union_into(&mut fresh, incoming);
                        *target = Value::Array(fresh);
                    }
                }
                self.record(update);
            }
            scalar => {
                *target = scalar.clone();
                self.record(update);
            }
        }
    }

    fn record(&mut self, value: &Value) {
        if self.path.is_empty() {
            return;
        }
        self.trace.record(
            ConfigKey::from_segments(&self.path),
            Assignment {
                overlay: self.overlay.name().to_string(),
                stage: self.overlay.stage(),
                mode: self.overlay.mode(),
                value: value.clone(),
            },
        );
    }
}
