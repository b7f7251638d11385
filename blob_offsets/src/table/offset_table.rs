use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::{Chunk, OffsetTableError, TensorOffsetEntry};
use crate::TensorName;

/// Immutable mapping from tensor names to their placement in a weight blob.
///
/// Lookups are exact string matches. Entries keep the order they were
/// inserted in, which is the order the exporter wrote them.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    model: Option<String>,
    entries: Vec<TensorOffsetEntry>,
    index: HashMap<String, usize>,
}

impl OffsetTable {
    pub fn builder() -> OffsetTableBuilder {
        OffsetTableBuilder::default()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.index.contains_key(name)
    }

    pub fn lookup(
        &self,
        name: &str,
    ) -> Result<&TensorOffsetEntry, OffsetTableError> {
        let entry = self
            .index
            .get(name)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| OffsetTableError::NotFound(name.to_string()))?;
        debug!(
            name,
            offset = entry.offset,
            chunk = %entry.chunk(),
            layer_norm_bias = entry.is_layer_norm_bias,
            "resolved tensor offset"
        );
        Ok(entry)
    }

    pub fn chunk_for(
        &self,
        entry: &TensorOffsetEntry,
    ) -> Chunk {
        entry.chunk()
    }

    pub fn requires_alternate_decoding(
        &self,
        entry: &TensorOffsetEntry,
    ) -> bool {
        entry.is_layer_norm_bias
    }

    pub fn entries(&self) -> impl Iterator<Item = &TensorOffsetEntry> {
        self.entries.iter()
    }

    pub fn entries_in(
        &self,
        chunk: Chunk,
    ) -> impl Iterator<Item = &TensorOffsetEntry> {
        self.entries.iter().filter(move |entry| entry.chunk() == chunk)
    }

    /// Distinct sub-network names present in the table, sorted.
    pub fn model_parts(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter_map(|entry| entry.name.parse::<TensorName>().ok())
            .map(|name| name.model_part)
            .collect()
    }
}

impl TryFrom<Vec<TensorOffsetEntry>> for OffsetTable {
    type Error = OffsetTableError;

    fn try_from(entries: Vec<TensorOffsetEntry>) -> Result<Self, Self::Error> {
        let mut builder = OffsetTableBuilder::default();
        for entry in entries {
            builder.insert(entry)?;
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Default)]
pub struct OffsetTableBuilder {
    model: Option<String>,
    entries: Vec<TensorOffsetEntry>,
    index: HashMap<String, usize>,
}

impl OffsetTableBuilder {
    pub fn with_model(
        mut self,
        model: impl Into<String>,
    ) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Adds an entry. A rejected entry leaves the builder unchanged.
    pub fn insert(
        &mut self,
        entry: TensorOffsetEntry,
    ) -> Result<&mut Self, OffsetTableError> {
        entry.name.parse::<TensorName>()?;
        if self.index.contains_key(&entry.name) {
            return Err(OffsetTableError::DuplicateKey(entry.name));
        }
        self.index.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> OffsetTable {
        OffsetTable {
            model: self.model,
            entries: self.entries,
            index: self.index,
        }
    }
}
