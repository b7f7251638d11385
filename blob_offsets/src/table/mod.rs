mod entry;
mod error;
mod offset_table;
mod table_file;

pub use entry::{Chunk, DecodeLayout, TensorOffsetEntry};
pub use error::OffsetTableError;
pub use offset_table::{OffsetTable, OffsetTableBuilder};
pub use table_file::TableFile;
