use std::path::Path;

use blob_offsets::{Chunk, TensorOffsetEntry};
use console::Style;

use super::{CliError, TableArgs, load_table, resolve_config};

pub fn handle_list(
    config_path: Option<&Path>,
    table_args: &TableArgs,
    chunk: Option<Chunk>,
    layer_norm_bias_only: bool,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, None)?;
    let table = load_table(&config, table_args)?;

    let style_bias = Style::new().yellow();
    let mut shown = 0usize;
    for entry in table.entries() {
        if chunk.is_some_and(|chunk| entry.chunk() != chunk) {
            continue;
        }
        if layer_norm_bias_only && !entry.is_layer_norm_bias {
            continue;
        }
        println!("{}", format_row(entry, &style_bias));
        shown += 1;
    }

    let style_summary = Style::new().dim();
    println!(
        "{}",
        style_summary.apply_to(format!("{shown} of {} entries", table.len()))
    );
    Ok(())
}

/// Pads the name before styling so escape codes do not eat into the column.
fn format_row(
    entry: &TensorOffsetEntry,
    style_bias: &Style,
) -> String {
    let name = format!("{:<32}", entry.name);
    let name = if entry.is_layer_norm_bias {
        style_bias.apply_to(name).to_string()
    } else {
        name
    };
    format!("{} {:>14} {}", name, entry.offset, entry.chunk())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_rows_keep_columns() {
        let style_bias = Style::new().yellow().force_styling(true);
        let plain = format_row(
            &TensorOffsetEntry::new("__unet__[t-0-0]", 512, true, false),
            &style_bias,
        );
        let bias = format_row(
            &TensorOffsetEntry::new("__unet__[t-157-1]", 569_017_856, true, true),
            &style_bias,
        );

        assert_ne!(bias, console::strip_ansi_codes(&bias));
        let bias = console::strip_ansi_codes(&bias);
        assert_eq!(plain.find("512"), Some(33 + 14 - 3));
        assert_eq!(bias.find("569017856"), Some(33 + 14 - 9));
        assert_eq!(plain.len(), bias.len());
    }
}
