use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DataType;

/// Which blob chunk a tensor lives in.
///
/// Weight blobs larger than the platform file size ceiling are split. An
/// entry's offset is relative to the start of its own chunk, so offsets from
/// different chunks are never comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chunk {
    First,
    Other,
}

impl Chunk {
    pub fn from_is_first(is_first_chunk: bool) -> Self {
        if is_first_chunk {
            Chunk::First
        } else {
            Chunk::Other
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Chunk::First)
    }
}

impl fmt::Display for Chunk {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Chunk::First => write!(f, "first"),
            Chunk::Other => write!(f, "other"),
        }
    }
}

/// Numeric layout of the bytes an entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeLayout {
    /// Ordinary weight tensor, half precision.
    Standard,
    /// Normalization-layer bias vector, kept at single precision.
    LayerNormBias,
}

impl DecodeLayout {
    pub fn expected_data_type(&self) -> DataType {
        match self {
            DecodeLayout::Standard => DataType::F16,
            DecodeLayout::LayerNormBias => DataType::F32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorOffsetEntry {
    pub name: String,
    pub offset: u64,
    pub is_first_chunk: bool,
    pub is_layer_norm_bias: bool,
}

impl TensorOffsetEntry {
    pub fn new(
        name: impl Into<String>,
        offset: u64,
        is_first_chunk: bool,
        is_layer_norm_bias: bool,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            is_first_chunk,
            is_layer_norm_bias,
        }
    }

    pub fn chunk(&self) -> Chunk {
        Chunk::from_is_first(self.is_first_chunk)
    }

    pub fn decode_layout(&self) -> DecodeLayout {
        if self.is_layer_norm_bias {
            DecodeLayout::LayerNormBias
        } else {
            DecodeLayout::Standard
        }
    }

    /// `(offset, is_first_chunk, is_layer_norm_bias)`, the shape blob
    /// loaders consume.
    pub fn as_tuple(&self) -> (u64, bool, bool) {
        (self.offset, self.is_first_chunk, self.is_layer_norm_bias)
    }
}
