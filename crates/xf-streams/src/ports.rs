//! Insertion-ordered port map.
//!
//! Sums over ports do not depend on order, but reports and the "first
//! active port" of two-stream components do, so ports keep a stable,
//! contiguous index next to the name lookup.

use std::collections::HashMap;

use crate::stream::StreamRecord;

/// Name → stream record map with stable insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ports {
    /// Contiguous list of port names (index -> name).
    names: Vec<String>,

    /// Records, parallel to `names`.
    records: Vec<StreamRecord>,

    /// Reverse lookup: name -> index.
    name_to_idx: HashMap<String, usize>,
}

impl Ports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record attached to `name`.
    ///
    /// Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, record: StreamRecord) {
        let name = name.into();
        if let Some(&idx) = self.name_to_idx.get(&name) {
            self.records[idx] = record;
            return;
        }
        self.name_to_idx.insert(name.clone(), self.names.len());
        self.names.push(name);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StreamRecord> {
        self.name_to_idx.get(name).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_idx.contains_key(name)
    }

    /// Port at insertion position `idx`.
    pub fn get_index(&self, idx: usize) -> Option<(&str, &StreamRecord)> {
        let name = self.names.get(idx)?;
        Some((name.as_str(), &self.records[idx]))
    }

    /// First inserted port.
    pub fn first(&self) -> Option<(&str, &StreamRecord)> {
        self.get_index(0)
    }

    /// First inserted material stream, skipping power and heat connectors.
    pub fn first_material(&self) -> Option<(&str, &StreamRecord)> {
        self.iter().find(|(_, record)| record.kind.is_material())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StreamRecord)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.records.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &StreamRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<N: Into<String>> FromIterator<(N, StreamRecord)> for Ports {
    fn from_iter<I: IntoIterator<Item = (N, StreamRecord)>>(iter: I) -> Self {
        let mut ports = Ports::new();
        for (name, record) in iter {
            ports.insert(name, record);
        }
        ports
    }
}
