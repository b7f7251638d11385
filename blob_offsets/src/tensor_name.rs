use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TensorNameError {
    #[error("\"{0}\" does not match \"__<model-part>__[t-<layer>-<sub>]\".")]
    InvalidFormat(String),
    #[error("Index \"{index}\" in \"{name}\" does not fit in 32 bits.")]
    IndexOverflow {
        name: String,
        index: String,
    },
}

/// Parsed form of a table key such as `__unet__[t-157-1]`.
///
/// The layer and sub indices enumerate ordered positions in the parameter
/// list of the named sub-network. Formatting a parsed name yields the exact
/// key it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorName {
    pub model_part: String,
    pub layer_index: u32,
    pub sub_index: u32,
}

static TENSOR_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn tensor_name_regex() -> &'static Regex {
    TENSOR_NAME_REGEX.get_or_init(|| {
        Regex::new(
            r"^__([A-Za-z0-9](?:[A-Za-z0-9_]*[A-Za-z0-9])?)__\[t-(0|[1-9][0-9]*)-(0|[1-9][0-9]*)\]$",
        )
        .expect("tensor name pattern must compile")
    })
}

impl TensorName {
    pub fn new(
        model_part: impl Into<String>,
        layer_index: u32,
        sub_index: u32,
    ) -> Self {
        Self {
            model_part: model_part.into(),
            layer_index,
            sub_index,
        }
    }

    pub fn is_valid(name: &str) -> bool {
        name.parse::<TensorName>().is_ok()
    }
}

impl FromStr for TensorName {
    type Err = TensorNameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let captures = tensor_name_regex()
            .captures(name)
            .ok_or_else(|| TensorNameError::InvalidFormat(name.to_string()))?;
        let parse_index = |group: usize| {
            let index = &captures[group];
            index.parse::<u32>().map_err(|_| TensorNameError::IndexOverflow {
                name: name.to_string(),
                index: index.to_string(),
            })
        };
        Ok(Self {
            model_part: captures[1].to_string(),
            layer_index: parse_index(2)?,
            sub_index: parse_index(3)?,
        })
    }
}

impl fmt::Display for TensorName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "__{}__[t-{}-{}]",
            self.model_part, self.layer_index, self.sub_index
        )
    }
}
