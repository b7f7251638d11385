mod handlers;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::Style;
use handlers::{
    BlobArgs, TableArgs, handle_export, handle_inspect, handle_list,
    handle_lookup, handle_validate,
};
use logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "blob_offsets_cli",
    version,
    about = "Resolve named tensors to offsets in chunked CoreML weight blobs"
)]
struct Cli {
    /// Resolver config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entry of one tensor
    Lookup {
        name: String,
        #[command(flatten)]
        table: TableArgs,
    },
    /// List table entries
    List {
        #[command(flatten)]
        table: TableArgs,
        /// Only entries in this chunk
        #[arg(long, value_enum)]
        chunk: Option<ChunkArg>,
        /// Only layer norm bias entries
        #[arg(long)]
        layer_norm_bias: bool,
    },
    /// Read a tensor's record and first values from the blob
    Inspect {
        name: String,
        #[command(flatten)]
        table: TableArgs,
        #[command(flatten)]
        blob: BlobArgs,
        /// Number of decoded values to print
        #[arg(long, default_value_t = 8)]
        count: usize,
    },
    /// Check every table entry against the blob
    Validate {
        #[command(flatten)]
        table: TableArgs,
        #[command(flatten)]
        blob: BlobArgs,
    },
    /// Write the table as JSON
    Export {
        #[command(flatten)]
        table: TableArgs,
        /// Output file, stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChunkArg {
    First,
    Other,
}

impl From<ChunkArg> for blob_offsets::Chunk {
    fn from(chunk: ChunkArg) -> Self {
        match chunk {
            ChunkArg::First => blob_offsets::Chunk::First,
            ChunkArg::Other => blob_offsets::Chunk::Other,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Lookup {
            name,
            table,
        } => handle_lookup(config, &table, &name),
        Commands::List {
            table,
            chunk,
            layer_norm_bias,
        } => handle_list(config, &table, chunk.map(Into::into), layer_norm_bias),
        Commands::Inspect {
            name,
            table,
            blob,
            count,
        } => handle_inspect(config, &table, &blob, &name, count),
        Commands::Validate {
            table,
            blob,
        } => handle_validate(config, &table, &blob),
        Commands::Export {
            table,
            output,
        } => handle_export(config, &table, output.as_deref()),
    };

    if let Err(error) = result {
        let style_error = Style::new().red().bold();
        eprintln!("{} {error}", style_error.apply_to("error:"));
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
