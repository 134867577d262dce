//! Ephemeral in-memory table store.
//!
//! Backs the sandbox binding. Tables are plain lists of JSON records held
//! behind one lock; nothing survives the process. Reads use the same
//! strict equality semantics as production so a mini-app sees identical
//! filter behavior in both environments. Writes merge-or-append on the
//! `id` field with the coercive matching described at [`ids_match`].

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use cortado_sdk::Filter;

/// Seed data for a sandbox store, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct Seed(HashMap<String, Vec<Value>>);

impl Seed {
    /// Start an empty seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with fixture rows.
    pub fn table(mut self, name: impl Into<String>, rows: Vec<Value>) -> Self {
        self.0.insert(name.into(), rows);
        self
    }

    /// Whether the seed holds no tables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_tables(self) -> HashMap<String, Vec<Value>> {
        self.0
    }
}

impl From<HashMap<String, Vec<Value>>> for Seed {
    fn from(tables: HashMap<String, Vec<Value>>) -> Self {
        Self(tables)
    }
}

/// In-memory tables for one sandbox session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from seed data.
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            tables: RwLock::new(seed.into_tables()),
        }
    }

    /// Rows of `table` matching the filter, in insertion order. An unknown
    /// table reads as empty.
    pub fn select(&self, table: &str, filter: &Filter) -> Vec<Value> {
        self.tables
            .read()
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default()
    }

    /// Merge-or-append each record into `table`, creating the table if it
    /// does not exist.
    ///
    /// A record whose `id` coercively matches an existing row is shallow-
    /// merged into it: incoming fields overwrite, fields absent from the
    /// incoming record survive. Records with no match (or no `id` at all)
    /// are appended.
    pub fn merge(&self, table: &str, records: &[Value]) {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();

        for record in records {
            let position = record.get("id").and_then(|id| {
                rows.iter()
                    .position(|row| row.get("id").is_some_and(|other| ids_match(other, id)))
            });
            match position {
                Some(i) => shallow_merge(&mut rows[i], record),
                None => rows.push(record.clone()),
            }
        }
    }

    /// Full contents of a table (for inspection in tests and demos).
    pub fn snapshot(&self, table: &str) -> Vec<Value> {
        self.tables.read().get(table).cloned().unwrap_or_default()
    }

    /// Names of the tables currently present.
    pub fn tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Coercive id equality: equal JSON values match, and so do a number and a
/// numeric string with the same rendering (`1` matches `"1"`). Everything
/// else (booleans, objects, nulls) only matches itself exactly.
pub fn ids_match(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (scalar_repr(a), scalar_repr(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn scalar_repr(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn shallow_merge(row: &mut Value, incoming: &Value) {
    match (row.as_object_mut(), incoming.as_object()) {
        (Some(existing), Some(fields)) => {
            for (key, value) in fields {
                existing.insert(key.clone(), value.clone());
            }
        }
        // Non-object records replace wholesale.
        _ => *row = incoming.clone(),
    }
}
