use std::path::Path;

use super::{CliError, TableArgs, label_style, load_table, resolve_config};

pub fn handle_lookup(
    config_path: Option<&Path>,
    table_args: &TableArgs,
    name: &str,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, None)?;
    let table = load_table(&config, table_args)?;
    let entry = table.lookup(name)?;

    let label = label_style();
    println!("{} {}", label.apply_to("name:"), entry.name);
    println!("{} {}", label.apply_to("offset:"), entry.offset);
    println!("{} {}", label.apply_to("chunk:"), table.chunk_for(entry));
    println!(
        "{} {}",
        label.apply_to("layer norm bias:"),
        table.requires_alternate_decoding(entry)
    );
    Ok(())
}
