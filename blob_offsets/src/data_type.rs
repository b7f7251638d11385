use thiserror::Error;

/// Element types a blob record can declare, keyed by the numeric codes the
/// CoreML weight storage format writes into each record.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum DataType {
    // Floating point
    F16,
    F32,
    BF16,
    // Normal integers
    U8,
    I8,
    I16,
    U16,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown blob data type code {0}.")]
pub struct UnknownDataTypeCode(pub u32);

impl DataType {
    pub fn size_in_bits(&self) -> usize {
        match self {
            DataType::F16 => 16,
            DataType::F32 => 32,
            DataType::BF16 => 16,
            DataType::U8 => 8,
            DataType::I8 => 8,
            DataType::I16 => 16,
            DataType::U16 => 16,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        (self.size_in_bits() + 7) / 8
    }

    pub fn code(&self) -> u32 {
        match self {
            DataType::F16 => 1,
            DataType::F32 => 2,
            DataType::U8 => 3,
            DataType::I8 => 4,
            DataType::BF16 => 5,
            DataType::I16 => 6,
            DataType::U16 => 7,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::F16 | DataType::F32 | DataType::BF16)
    }
}

impl TryFrom<u32> for DataType {
    type Error = UnknownDataTypeCode;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(DataType::F16),
            2 => Ok(DataType::F32),
            3 => Ok(DataType::U8),
            4 => Ok(DataType::I8),
            5 => Ok(DataType::BF16),
            6 => Ok(DataType::I16),
            7 => Ok(DataType::U16),
            _ => Err(UnknownDataTypeCode(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for dtype in [
            DataType::F16,
            DataType::F32,
            DataType::BF16,
            DataType::U8,
            DataType::I8,
            DataType::I16,
            DataType::U16,
        ] {
            assert_eq!(DataType::try_from(dtype.code()), Ok(dtype));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(DataType::try_from(0), Err(UnknownDataTypeCode(0)));
        assert_eq!(DataType::try_from(42), Err(UnknownDataTypeCode(42)));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(DataType::F16.size_in_bytes(), 2);
        assert_eq!(DataType::F32.size_in_bytes(), 4);
        assert_eq!(DataType::I8.size_in_bytes(), 1);
    }
}
