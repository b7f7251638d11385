use std::{
    fs::File,
    io::BufReader,
    ops::Deref,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::{OffsetTable, blob::ChunkedBlob, builtin};

pub const TABLE_PATH_ENV: &str = "BLOB_OFFSETS_TABLE";

static ENV_TABLE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Table path set through `BLOB_OFFSETS_TABLE`, read once per process.
pub fn env_table_path() -> Option<&'static Path> {
    ENV_TABLE_PATH
        .get_or_init(|| {
            std::env::var_os(TABLE_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .as_deref()
}

fn default_strict_layout() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ResolverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_chunk: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_chunk: Option<PathBuf>,
    #[serde(default = "default_strict_layout")]
    pub strict_layout: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            table: None,
            first_chunk: None,
            other_chunk: None,
            strict_layout: default_strict_layout(),
        }
    }
}

pub enum ResolvedTable {
    Builtin(&'static OffsetTable),
    Loaded(OffsetTable),
}

impl Deref for ResolvedTable {
    type Target = OffsetTable;

    fn deref(&self) -> &OffsetTable {
        match self {
            ResolvedTable::Builtin(table) => *table,
            ResolvedTable::Loaded(table) => table,
        }
    }
}

impl ResolverConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Table path in effect: the environment wins over the config file.
    pub fn table_path(&self) -> Option<&Path> {
        env_table_path().or(self.table.as_deref())
    }

    pub fn load_table(&self) -> Result<ResolvedTable, ConfigError> {
        match self.table_path() {
            Some(path) => Ok(ResolvedTable::Loaded(OffsetTable::from_path(path)?)),
            None => Ok(ResolvedTable::Builtin(builtin::unet())),
        }
    }

    pub fn open_blob(&self) -> Result<ChunkedBlob, ConfigError> {
        let first = self
            .first_chunk
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("first_chunk".to_string()))?;
        Ok(ChunkedBlob::open(first, self.other_chunk.as_deref())?)
    }
}
