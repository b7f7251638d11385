use thiserror::Error;

use crate::{Chunk, DataType, DecodeLayout, OffsetTableError};

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Failed to read blob chunk")]
    Io(#[from] std::io::Error),
    #[error("The {chunk} chunk has an invalid storage header: {reason}")]
    BadStorageHeader {
        chunk: Chunk,
        reason: String,
    },
    #[error(
        "Tensor \"{name}\" lives in the {chunk} chunk, which is not open."
    )]
    MissingChunk {
        name: String,
        chunk: Chunk,
    },
    #[error(
        "Record of \"{name}\" at offset {offset} runs past the end of the \
        {chunk} chunk ({chunk_len} bytes)."
    )]
    OffsetOutOfBounds {
        name: String,
        chunk: Chunk,
        offset: u64,
        chunk_len: u64,
    },
    #[error(
        "Record of \"{name}\" at offset {offset} has sentinel {found:#010x}."
    )]
    BadSentinel {
        name: String,
        offset: u64,
        found: u32,
    },
    #[error("Record of \"{name}\" declares unknown data type code {code}.")]
    UnknownDataType {
        name: String,
        code: u32,
    },
    #[error(
        "Record of \"{name}\" declares {size} bytes, not a whole number of \
        {data_type:?} elements."
    )]
    PartialElement {
        name: String,
        data_type: DataType,
        size: u64,
    },
    #[error(
        "Payload of \"{name}\" ({size} bytes at {data_offset}) does not fit \
        between its record and the end of the {chunk} chunk ({chunk_len} bytes)."
    )]
    PayloadOutOfBounds {
        name: String,
        chunk: Chunk,
        data_offset: u64,
        size: u64,
        chunk_len: u64,
    },
    #[error(
        "Tensor \"{name}\" uses the {layout:?} layout, which expects \
        {expected:?} data, but its record holds {found:?}."
    )]
    LayoutMismatch {
        name: String,
        layout: DecodeLayout,
        expected: DataType,
        found: DataType,
    },
    #[error(
        "Size mismatch for \"{name}\": expected {expected_size} bytes, got \
        {actual_size} bytes."
    )]
    SizeMismatch {
        name: String,
        expected_size: usize,
        actual_size: usize,
    },
}

#[derive(Debug, Error)]
pub enum BlobLoaderError {
    #[error(transparent)]
    Table(#[from] OffsetTableError),
    #[error(transparent)]
    Blob(#[from] BlobError),
}
