//! Byte layout of CoreML weight storage files (`weight.bin`).
//!
//! A file starts with a 64 byte storage header. Every tensor then gets a
//! 64 byte record followed by its payload, both aligned to 64 bytes. All
//! integers are little endian.

use crate::DataType;

pub const STORAGE_HEADER_SIZE: u64 = 64;
pub const RECORD_SIZE: u64 = 64;
pub const BLOB_ALIGNMENT: u64 = 64;
pub const BLOB_SENTINEL: u32 = 0xDEAD_BEEF;
pub const STORAGE_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageHeader {
    pub count: u32,
    pub version: u32,
}

impl StorageHeader {
    pub fn from_bytes(bytes: &[u8; STORAGE_HEADER_SIZE as usize]) -> Self {
        Self {
            count: read_u32(bytes, 0),
            version: read_u32(bytes, 4),
        }
    }

    pub fn to_bytes(&self) -> [u8; STORAGE_HEADER_SIZE as usize] {
        let mut bytes = [0u8; STORAGE_HEADER_SIZE as usize];
        bytes[0..4].copy_from_slice(&self.count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes
    }
}

/// Per-tensor record stored at the offset an entry points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobRecord {
    pub data_type: DataType,
    pub size_in_bytes: u64,
    /// Absolute position of the payload within the chunk.
    pub data_offset: u64,
}

/// A record as read from disk, before its fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawRecord {
    pub sentinel: u32,
    pub data_type_code: u32,
    pub size_in_bytes: u64,
    pub data_offset: u64,
}

impl RawRecord {
    pub fn from_bytes(bytes: &[u8; RECORD_SIZE as usize]) -> Self {
        Self {
            sentinel: read_u32(bytes, 0),
            data_type_code: read_u32(bytes, 4),
            size_in_bytes: read_u64(bytes, 8),
            data_offset: read_u64(bytes, 16),
        }
    }
}

impl BlobRecord {
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE as usize] {
        let mut bytes = [0u8; RECORD_SIZE as usize];
        bytes[0..4].copy_from_slice(&BLOB_SENTINEL.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.data_type.code().to_le_bytes());
        bytes[8..16].copy_from_slice(&self.size_in_bytes.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.data_offset.to_le_bytes());
        bytes
    }

    pub fn element_count(&self) -> u64 {
        self.size_in_bytes / self.data_type.size_in_bytes() as u64
    }
}

pub(crate) fn align_up(value: u64) -> u64 {
    value.div_ceil(BLOB_ALIGNMENT) * BLOB_ALIGNMENT
}

fn read_u32(
    bytes: &[u8],
    at: usize,
) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(word)
}

fn read_u64(
    bytes: &[u8],
    at: usize,
) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(word)
}
