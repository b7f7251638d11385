use std::{
    fs::File,
    os::unix::fs::FileExt,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{
    BlobError,
    format::{
        BLOB_SENTINEL, BlobRecord, RECORD_SIZE, RawRecord, STORAGE_HEADER_SIZE,
        STORAGE_VERSION, StorageHeader,
    },
};
use crate::{Chunk, DataType, TensorOffsetEntry};

/// One open `weight.bin` file.
#[derive(Debug)]
pub struct BlobChunk {
    path: PathBuf,
    file: File,
    len: u64,
    header: StorageHeader,
}

impl BlobChunk {
    pub fn open(
        path: &Path,
        chunk: Chunk,
    ) -> Result<Self, BlobError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len < STORAGE_HEADER_SIZE {
            return Err(BlobError::BadStorageHeader {
                chunk,
                reason: format!("file is only {len} bytes long"),
            });
        }
        let mut header_bytes = [0u8; STORAGE_HEADER_SIZE as usize];
        file.read_exact_at(&mut header_bytes, 0)?;
        let header = StorageHeader::from_bytes(&header_bytes);
        if header.version != STORAGE_VERSION {
            return Err(BlobError::BadStorageHeader {
                chunk,
                reason: format!(
                    "version {} is not supported, expected {STORAGE_VERSION}",
                    header.version
                ),
            });
        }
        info!(
            path = %path.display(),
            %chunk,
            len,
            tensors = header.count,
            "opened blob chunk"
        );
        Ok(Self {
            path: path.to_path_buf(),
            file,
            len,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn header(&self) -> StorageHeader {
        self.header
    }
}

/// The chunk files of one split weight blob.
///
/// Reads are positional, so a single instance can serve concurrent readers.
#[derive(Debug)]
pub struct ChunkedBlob {
    first: BlobChunk,
    other: Option<BlobChunk>,
}

impl ChunkedBlob {
    pub fn open(
        first: &Path,
        other: Option<&Path>,
    ) -> Result<Self, BlobError> {
        let first = BlobChunk::open(first, Chunk::First)?;
        let other = other
            .map(|path| BlobChunk::open(path, Chunk::Other))
            .transpose()?;
        Ok(Self {
            first,
            other,
        })
    }

    pub fn chunk(
        &self,
        chunk: Chunk,
    ) -> Option<&BlobChunk> {
        match chunk {
            Chunk::First => Some(&self.first),
            Chunk::Other => self.other.as_ref(),
        }
    }

    fn chunk_of(
        &self,
        entry: &TensorOffsetEntry,
    ) -> Result<&BlobChunk, BlobError> {
        let chunk = entry.chunk();
        self.chunk(chunk).ok_or_else(|| BlobError::MissingChunk {
            name: entry.name.clone(),
            chunk,
        })
    }

    /// Reads and checks the record an entry points to.
    ///
    /// The record must lie fully inside the entry's chunk, its payload must
    /// hold whole elements, start after the record and end inside the chunk.
    pub fn read_record(
        &self,
        entry: &TensorOffsetEntry,
    ) -> Result<BlobRecord, BlobError> {
        let blob_chunk = self.chunk_of(entry)?;
        let chunk = entry.chunk();
        let record_end = entry
            .offset
            .checked_add(RECORD_SIZE)
            .filter(|&end| end <= blob_chunk.len)
            .ok_or_else(|| BlobError::OffsetOutOfBounds {
                name: entry.name.clone(),
                chunk,
                offset: entry.offset,
                chunk_len: blob_chunk.len,
            })?;

        let mut record_bytes = [0u8; RECORD_SIZE as usize];
        blob_chunk.file.read_exact_at(&mut record_bytes, entry.offset)?;
        let raw = RawRecord::from_bytes(&record_bytes);

        if raw.sentinel != BLOB_SENTINEL {
            return Err(BlobError::BadSentinel {
                name: entry.name.clone(),
                offset: entry.offset,
                found: raw.sentinel,
            });
        }
        let data_type = DataType::try_from(raw.data_type_code).map_err(|_| {
            BlobError::UnknownDataType {
                name: entry.name.clone(),
                code: raw.data_type_code,
            }
        })?;
        if raw.size_in_bytes % data_type.size_in_bytes() as u64 != 0 {
            return Err(BlobError::PartialElement {
                name: entry.name.clone(),
                data_type,
                size: raw.size_in_bytes,
            });
        }
        let payload_fits = raw.data_offset >= record_end
            && raw
                .data_offset
                .checked_add(raw.size_in_bytes)
                .is_some_and(|end| end <= blob_chunk.len);
        if !payload_fits {
            return Err(BlobError::PayloadOutOfBounds {
                name: entry.name.clone(),
                chunk,
                data_offset: raw.data_offset,
                size: raw.size_in_bytes,
                chunk_len: blob_chunk.len,
            });
        }

        let record = BlobRecord {
            data_type,
            size_in_bytes: raw.size_in_bytes,
            data_offset: raw.data_offset,
        };
        debug!(
            name = entry.name.as_str(),
            %chunk,
            data_type = ?record.data_type,
            size = record.size_in_bytes,
            data_offset = record.data_offset,
            "read blob record"
        );
        Ok(record)
    }

    /// Reads the payload described by `record` into `buf`, which must be
    /// exactly the payload size.
    pub fn read_payload(
        &self,
        entry: &TensorOffsetEntry,
        record: &BlobRecord,
        buf: &mut [u8],
    ) -> Result<(), BlobError> {
        if buf.len() as u64 != record.size_in_bytes {
            return Err(BlobError::SizeMismatch {
                name: entry.name.clone(),
                expected_size: record.size_in_bytes as usize,
                actual_size: buf.len(),
            });
        }
        let blob_chunk = self.chunk_of(entry)?;
        blob_chunk.file.read_exact_at(buf, record.data_offset)?;
        Ok(())
    }
}
