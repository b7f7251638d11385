use half::{bf16, f16};

use super::BlobRecord;
use crate::{DataType, DecodeLayout};

/// Payload of one tensor widened to `f32`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTensor {
    pub name: String,
    pub layout: DecodeLayout,
    pub data_type: DataType,
    /// Record the payload was read through.
    pub record: BlobRecord,
    pub values: Vec<f32>,
}

impl DecodedTensor {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Widens little endian payload bytes of `data_type` to `f32`.
///
/// Returns `None` when the byte count is not a whole number of elements.
pub fn decode_payload(
    data_type: DataType,
    bytes: &[u8],
) -> Option<Vec<f32>> {
    let element_size = data_type.size_in_bytes();
    if bytes.len() % element_size != 0 {
        return None;
    }
    let elements = bytes.chunks_exact(element_size);
    let values = match data_type {
        DataType::F16 => elements
            .map(|e| f16::from_le_bytes([e[0], e[1]]).to_f32())
            .collect(),
        DataType::BF16 => elements
            .map(|e| bf16::from_le_bytes([e[0], e[1]]).to_f32())
            .collect(),
        DataType::F32 => elements
            .map(|e| f32::from_le_bytes([e[0], e[1], e[2], e[3]]))
            .collect(),
        DataType::U8 => elements.map(|e| e[0] as f32).collect(),
        DataType::I8 => elements.map(|e| e[0] as i8 as f32).collect(),
        DataType::I16 => {
            elements.map(|e| i16::from_le_bytes([e[0], e[1]]) as f32).collect()
        },
        DataType::U16 => {
            elements.map(|e| u16::from_le_bytes([e[0], e[1]]) as f32).collect()
        },
    };
    Some(values)
}
