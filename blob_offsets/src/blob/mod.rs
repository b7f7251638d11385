mod chunked_blob;
mod decode;
mod error;
mod format;
mod loader;
mod validation;
mod writer;

pub use chunked_blob::{BlobChunk, ChunkedBlob};
pub use decode::{DecodedTensor, decode_payload};
pub use error::{BlobError, BlobLoaderError};
pub use format::{
    BLOB_ALIGNMENT, BLOB_SENTINEL, BlobRecord, RECORD_SIZE, STORAGE_HEADER_SIZE,
    STORAGE_VERSION, StorageHeader,
};
pub use loader::BlobLoader;
pub use validation::{ValidationFailure, ValidationReport, validate, validate_with_progress};
pub use writer::{BlobTensorView, BlobWriteError, write_blob_chunk};
