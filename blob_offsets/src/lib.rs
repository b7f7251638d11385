#[cfg(test)]
#[macro_use]
extern crate is_close;

pub mod blob;
pub mod builtin;
pub mod config;

pub mod data_type;
pub use data_type::DataType;

pub mod table;
pub use table::{
    Chunk, DecodeLayout, OffsetTable, OffsetTableBuilder, OffsetTableError,
    TensorOffsetEntry,
};

pub mod tensor_name;
pub use tensor_name::{TensorName, TensorNameError};
