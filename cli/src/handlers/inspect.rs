use std::path::Path;

use blob_offsets::blob::BlobLoader;

use super::{
    BlobArgs, CliError, TableArgs, label_style, load_table, open_blob,
    resolve_config,
};

pub fn handle_inspect(
    config_path: Option<&Path>,
    table_args: &TableArgs,
    blob_args: &BlobArgs,
    name: &str,
    count: usize,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, Some(blob_args))?;
    let table = load_table(&config, table_args)?;
    let loader = BlobLoader::new(&table, open_blob(&config)?)
        .with_strict_layout(config.strict_layout);

    let entry = table.lookup(name)?;
    let tensor = loader.get(name)?;
    let record = tensor.record;

    let label = label_style();
    println!("{} {}", label.apply_to("name:"), entry.name);
    println!(
        "{} {} ({} chunk)",
        label.apply_to("record offset:"),
        entry.offset,
        entry.chunk()
    );
    println!("{} {:?}", label.apply_to("layout:"), tensor.layout);
    println!("{} {:?}", label.apply_to("data type:"), record.data_type);
    println!(
        "{} {} bytes at {}",
        label.apply_to("payload:"),
        record.size_in_bytes,
        record.data_offset
    );
    println!("{} {}", label.apply_to("elements:"), tensor.len());
    let head: Vec<String> = tensor
        .values
        .iter()
        .take(count)
        .map(|value| format!("{value:.6}"))
        .collect();
    println!("{} [{}]", label.apply_to("values:"), head.join(", "));
    Ok(())
}
