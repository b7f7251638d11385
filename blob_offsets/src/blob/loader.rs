use tracing::warn;

use super::{BlobError, BlobLoaderError, BlobRecord, ChunkedBlob, DecodedTensor, decode_payload};
use crate::{OffsetTable, TensorOffsetEntry};

/// Reads named tensors out of a chunked blob using an offset table.
pub struct BlobLoader<'table> {
    table: &'table OffsetTable,
    blob: ChunkedBlob,
    strict_layout: bool,
}

impl<'table> BlobLoader<'table> {
    pub fn new(
        table: &'table OffsetTable,
        blob: ChunkedBlob,
    ) -> Self {
        Self {
            table,
            blob,
            strict_layout: true,
        }
    }

    /// In lenient mode a record whose data type disagrees with the entry's
    /// layout is decoded as whatever the record declares.
    pub fn with_strict_layout(
        mut self,
        strict_layout: bool,
    ) -> Self {
        self.strict_layout = strict_layout;
        self
    }

    pub fn table(&self) -> &'table OffsetTable {
        self.table
    }

    pub fn blob(&self) -> &ChunkedBlob {
        &self.blob
    }

    pub fn record(
        &self,
        name: &str,
    ) -> Result<(&'table TensorOffsetEntry, BlobRecord), BlobLoaderError> {
        let entry = self.table.lookup(name)?;
        let record = self.checked_record(entry)?;
        Ok((entry, record))
    }

    pub(crate) fn checked_record(
        &self,
        entry: &TensorOffsetEntry,
    ) -> Result<BlobRecord, BlobError> {
        let record = self.blob.read_record(entry)?;
        let layout = entry.decode_layout();
        let expected = layout.expected_data_type();
        if record.data_type != expected {
            if self.strict_layout {
                return Err(BlobError::LayoutMismatch {
                    name: entry.name.clone(),
                    layout,
                    expected,
                    found: record.data_type,
                });
            }
            warn!(
                name = entry.name.as_str(),
                ?layout,
                expected = ?expected,
                found = ?record.data_type,
                "record data type disagrees with layout, decoding as recorded"
            );
        }
        Ok(record)
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Result<DecodedTensor, BlobLoaderError> {
        let (entry, record) = self.record(name)?;
        let mut buf = vec![0u8; record.size_in_bytes as usize];
        self.blob.read_payload(entry, &record, &mut buf)?;
        let values = decode_payload(record.data_type, &buf).ok_or_else(|| {
            BlobError::PartialElement {
                name: entry.name.clone(),
                data_type: record.data_type,
                size: record.size_in_bytes,
            }
        })?;
        Ok(DecodedTensor {
            name: entry.name.clone(),
            layout: entry.decode_layout(),
            data_type: record.data_type,
            record,
            values,
        })
    }

    /// Copies the undecoded payload of `name` into `buf`.
    pub fn read_raw(
        &self,
        name: &str,
        buf: &mut [u8],
    ) -> Result<BlobRecord, BlobLoaderError> {
        let (entry, record) = self.record(name)?;
        self.blob.read_payload(entry, &record, buf)?;
        Ok(record)
    }
}
