use std::{
    fs::File,
    io::{BufWriter, Seek, SeekFrom, Write},
    path::Path,
};

use thiserror::Error;
use tracing::info;

use super::format::{
    BlobRecord, RECORD_SIZE, STORAGE_HEADER_SIZE, STORAGE_VERSION,
    StorageHeader, align_up,
};
use crate::{DataType, TensorOffsetEntry};

#[derive(Debug, Error)]
pub enum BlobWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(
        "Invalid tensor data for \"{name}\": {len} bytes is not a whole \
        number of {data_type:?} elements"
    )]
    InvalidTensorData {
        name: String,
        data_type: DataType,
        len: usize,
    },
    #[error("Too many tensors for one chunk: {0}")]
    TooManyTensors(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct BlobTensorView<'a> {
    pub name: &'a str,
    pub data_type: DataType,
    pub data: &'a [u8],
    pub is_layer_norm_bias: bool,
}

/// Writes one chunk file and returns the table entries pointing into it.
///
/// Tensors are laid out in the given order, each record and payload on a
/// 64 byte boundary.
pub fn write_blob_chunk(
    path: &Path,
    tensors: &[BlobTensorView<'_>],
    is_first_chunk: bool,
) -> Result<Vec<TensorOffsetEntry>, BlobWriteError> {
    let count: u32 = tensors
        .len()
        .try_into()
        .map_err(|_| BlobWriteError::TooManyTensors(tensors.len()))?;

    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    w.write_all(
        &StorageHeader {
            count,
            version: STORAGE_VERSION,
        }
        .to_bytes(),
    )?;

    let mut entries = Vec::with_capacity(tensors.len());
    let mut position = STORAGE_HEADER_SIZE;
    for t in tensors {
        if t.data.len() % t.data_type.size_in_bytes() != 0 {
            return Err(BlobWriteError::InvalidTensorData {
                name: t.name.to_string(),
                data_type: t.data_type,
                len: t.data.len(),
            });
        }

        let record_offset = align_up(position);
        let record = BlobRecord {
            data_type: t.data_type,
            size_in_bytes: t.data.len() as u64,
            data_offset: record_offset + RECORD_SIZE,
        };
        w.seek(SeekFrom::Start(record_offset))?;
        w.write_all(&record.to_bytes())?;
        w.write_all(t.data)?;
        position = record.data_offset + record.size_in_bytes;

        entries.push(TensorOffsetEntry::new(
            t.name,
            record_offset,
            is_first_chunk,
            t.is_layer_norm_bias,
        ));
    }

    // Pad the tail so the file length stays aligned.
    let end = align_up(position);
    if end > position {
        w.seek(SeekFrom::Start(end - 1))?;
        w.write_all(&[0])?;
    }
    w.flush()?;
    info!(
        path = %path.display(),
        tensors = entries.len(),
        bytes = end,
        "wrote blob chunk"
    );
    Ok(entries)
}
