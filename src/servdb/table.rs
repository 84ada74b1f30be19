//! In-memory table collaborator.
//!
//! The write path only needs two facts from the record model: whether it has
//! pending modifications and whether an attached flag disables the dataset.
//! [`RecordTable`] is the minimal production model behind that seam; richer
//! models (undo/redo, typed columns) can implement [`Table`] instead.

use std::collections::HashMap;

pub trait Table {
    /// Whether the table holds modifications that are not yet on disk.
    fn is_modified(&self) -> bool;

    /// Value of an attached boolean flag, e.g. "IsEnabled"; `None` when the
    /// flag was never set.
    fn attached_flag(&self, key: &str) -> Option<bool>;
}

/// One raw record: the key parsed out of the line plus the untouched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub raw: String,
}

/// Ordered record collection with duplicate detection.
#[derive(Debug, Default)]
pub struct RecordTable {
    records: Vec<Record>,
    keys: HashMap<String, usize>,
    modified: bool,
    attached: HashMap<String, bool>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns `false` if the key is already present (the
    /// record is not inserted and the caller should report it).
    pub fn insert(&mut self, record: Record) -> bool {
        if self.keys.contains_key(&record.key) {
            return false;
        }
        self.keys.insert(record.key.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.keys.get(key).map(|&i| &self.records[i])
    }

    pub fn set(&mut self, key: &str, raw: String) -> bool {
        match self.keys.get(key) {
            Some(&i) => {
                self.records[i].raw = raw;
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn set_attached_flag(&mut self, key: &str, value: bool) {
        self.attached.insert(key.to_string(), value);
    }

    /// Serialize the records back to file text, one raw line per record.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.raw);
            out.push('\n');
        }
        out
    }
}

impl Table for RecordTable {
    fn is_modified(&self) -> bool {
        self.modified
    }

    fn attached_flag(&self, key: &str) -> Option<bool> {
        self.attached.get(key).copied()
    }
}
