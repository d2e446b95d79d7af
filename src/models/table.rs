use serde::Serialize;

use crate::models::CollisionRecord;

/// An ordered, normalized collision table.
///
/// Column names are lowercased with the two source date/time columns collapsed
/// into a single `date/time` column. Row order is the source's physical order,
/// truncated at the requested row limit. Every record has both coordinates
/// present; the loader shares tables behind `Arc`, so a table is immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionTable {
    columns: Vec<String>,
    extra_columns: Vec<String>,
    records: Vec<CollisionRecord>,
}

impl CollisionTable {
    pub(crate) fn new(
        columns: Vec<String>,
        extra_columns: Vec<String>,
        records: Vec<CollisionRecord>,
    ) -> Self {
        Self {
            columns,
            extra_columns,
            records,
        }
    }

    /// Normalized column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Names of passthrough columns, aligned with each record's `extra` values.
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionRecord> {
        self.records.iter()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

impl<'a> IntoIterator for &'a CollisionTable {
    type Item = &'a CollisionRecord;
    type IntoIter = std::slice::Iter<'a, CollisionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
