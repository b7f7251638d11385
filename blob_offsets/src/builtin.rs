//! Offset tables embedded at compile time.
//!
//! Each table is generated by the exporter that packed the matching weight
//! blob and is parsed once, on first access.

use std::sync::OnceLock;

use tracing::info;

use crate::OffsetTable;

const UNET_TABLE_JSON: &str = include_str!("../resources/unet_offsets.json");

static UNET_TABLE: OnceLock<OffsetTable> = OnceLock::new();

/// Offset table of the chunked Stable Diffusion UNet weight blob.
pub fn unet() -> &'static OffsetTable {
    UNET_TABLE.get_or_init(|| {
        let table = OffsetTable::from_json_str(UNET_TABLE_JSON)
            .unwrap_or_else(|error| {
                panic!("Embedded UNet offset table is corrupt: {error}")
            });
        info!(entries = table.len(), "initialized embedded unet offset table");
        table
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chunk, OffsetTableError};

    #[test]
    fn test_documented_entries() {
        let table = unet();
        assert_eq!(table.model(), Some("unet"));
        assert_eq!(
            table.lookup("__unet__[t-0-0]").unwrap().as_tuple(),
            (512, true, false)
        );
        assert_eq!(
            table.lookup("__unet__[t-157-1]").unwrap().as_tuple(),
            (569_017_856, true, true)
        );
        assert_eq!(
            table.lookup("__unet__[t-406-0]").unwrap().as_tuple(),
            (831_641_344, false, false)
        );
    }

    #[test]
    fn test_missing_entry() {
        assert!(matches!(
            unet().lookup("__unet__[t-999-0]"),
            Err(OffsetTableError::NotFound(_))
        ));
    }

    #[test]
    fn test_same_instance_across_threads() {
        let local = unet() as *const OffsetTable as usize;
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let table = unet();
                    let entry = table.lookup("__unet__[t-406-0]").unwrap();
                    assert_eq!(table.chunk_for(entry), Chunk::Other);
                    table as *const OffsetTable as usize
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), local);
        }
    }
}
