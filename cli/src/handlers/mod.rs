mod export;
mod inspect;
mod list;
mod lookup;
mod validate;

use std::path::{Path, PathBuf};

use blob_offsets::{
    OffsetTable, OffsetTableError,
    blob::{BlobLoaderError, ChunkedBlob},
    config::{ConfigError, ResolvedTable, ResolverConfig},
};
use clap::Args;
use console::Style;
pub use export::handle_export;
pub use inspect::handle_inspect;
pub use list::handle_list;
pub use lookup::handle_lookup;
use thiserror::Error;
use tracing::debug;
pub use validate::handle_validate;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] OffsetTableError),
    #[error(transparent)]
    Loader(#[from] BlobLoaderError),
    #[error("Failed to write output")]
    Io(#[from] std::io::Error),
    #[error("{failures} of {checked} entries do not match the blob")]
    ValidationFailed {
        failures: usize,
        checked: usize,
    },
}

#[derive(Args)]
pub struct TableArgs {
    /// Offset table JSON; the embedded UNet table when omitted
    #[arg(long)]
    pub table: Option<PathBuf>,
}

#[derive(Args)]
pub struct BlobArgs {
    /// First chunk weight.bin
    #[arg(long)]
    pub first: Option<PathBuf>,
    /// Later chunk weight.bin
    #[arg(long)]
    pub other: Option<PathBuf>,
    /// Decode records whose data type disagrees with the entry layout
    #[arg(long)]
    pub lenient: bool,
}

/// Config file values overridden by command line flags.
fn resolve_config(
    config_path: Option<&Path>,
    blob: Option<&BlobArgs>,
) -> Result<ResolverConfig, CliError> {
    let mut config = match config_path {
        Some(path) => ResolverConfig::from_path(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(blob) = blob {
        if blob.first.is_some() {
            config.first_chunk = blob.first.clone();
        }
        if blob.other.is_some() {
            config.other_chunk = blob.other.clone();
        }
        if blob.lenient {
            config.strict_layout = false;
        }
    }
    debug!(
        table = ?config.table_path(),
        first_chunk = ?config.first_chunk,
        other_chunk = ?config.other_chunk,
        strict_layout = config.strict_layout,
        "resolved cli config"
    );
    Ok(config)
}

fn load_table(
    config: &ResolverConfig,
    args: &TableArgs,
) -> Result<ResolvedTable, CliError> {
    match &args.table {
        Some(path) => Ok(ResolvedTable::Loaded(OffsetTable::from_path(path)?)),
        None => Ok(config.load_table()?),
    }
}

fn open_blob(config: &ResolverConfig) -> Result<ChunkedBlob, CliError> {
    Ok(config.open_blob()?)
}

fn label_style() -> Style {
    Style::new().bold()
}
