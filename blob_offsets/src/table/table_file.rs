use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{OffsetTable, OffsetTableBuilder, OffsetTableError, TensorOffsetEntry};

/// On-disk JSON form of an offset table, as written by the exporter.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TableFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub entries: Vec<TensorOffsetEntry>,
}

impl TryFrom<TableFile> for OffsetTable {
    type Error = OffsetTableError;

    fn try_from(file: TableFile) -> Result<Self, Self::Error> {
        let mut builder = match file.model {
            Some(model) => OffsetTableBuilder::default().with_model(model),
            None => OffsetTableBuilder::default(),
        };
        for entry in file.entries {
            builder.insert(entry)?;
        }
        Ok(builder.build())
    }
}

impl From<&OffsetTable> for TableFile {
    fn from(table: &OffsetTable) -> Self {
        Self {
            model: table.model().map(str::to_string),
            entries: table.entries().cloned().collect(),
        }
    }
}

impl OffsetTable {
    pub fn from_json_str(json: &str) -> Result<Self, OffsetTableError> {
        let file: TableFile = serde_json::from_str(json)?;
        OffsetTable::try_from(file)
    }

    pub fn from_json_reader<R: Read>(
        reader: R
    ) -> Result<Self, OffsetTableError> {
        let file: TableFile = serde_json::from_reader(reader)?;
        OffsetTable::try_from(file)
    }

    pub fn from_path(path: &Path) -> Result<Self, OffsetTableError> {
        let file = File::open(path)?;
        let table = Self::from_json_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            entries = table.len(),
            "loaded offset table"
        );
        Ok(table)
    }

    pub fn to_json_writer<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), OffsetTableError> {
        serde_json::to_writer_pretty(writer, &TableFile::from(self))?;
        Ok(())
    }

    pub fn to_path(
        &self,
        path: &Path,
    ) -> Result<(), OffsetTableError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_json_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
