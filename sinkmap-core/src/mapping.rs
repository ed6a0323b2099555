//! Ordered column → field table

use crate::Identifier;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered, key-unique association of output columns to field references.
///
/// Iteration follows the order in which each column last received its value:
/// re-inserting an existing column replaces the field and moves the column to
/// the end. Insertion-ordered maps that keep a re-inserted key at its first
/// position order the same input differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(Identifier, Identifier)>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column → field pair, returning the field it replaced, if any.
    pub fn insert(&mut self, column: Identifier, field: Identifier) -> Option<Identifier> {
        let previous = self
            .entries
            .iter()
            .position(|(c, _)| *c == column)
            .map(|idx| self.entries.remove(idx).1);
        self.entries.push((column, field));
        previous
    }

    pub fn get(&self, column: &Identifier) -> Option<&Identifier> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| f)
    }

    pub fn contains_column(&self, column: &Identifier) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|(c, _)| c)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter().map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Identifier)> {
        self.entries.iter().map(|(c, f)| (c, f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColumnMapping {
    type Item = &'a (Identifier, Identifier);
    type IntoIter = std::slice::Iter<'a, (Identifier, Identifier)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(Identifier, Identifier)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (Identifier, Identifier)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (column, field) in iter {
            mapping.insert(column, field);
        }
        mapping
    }
}

// Serialized as a JSON object in iteration order.
impl Serialize for ColumnMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, field) in &self.entries {
            map.serialize_entry(column.as_internal(), field.as_internal())?;
        }
        map.end()
    }
}
