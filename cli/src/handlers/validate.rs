use std::path::Path;

use blob_offsets::blob::{BlobLoader, validate_with_progress};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use super::{
    BlobArgs, CliError, TableArgs, load_table, open_blob, resolve_config,
};

pub fn handle_validate(
    config_path: Option<&Path>,
    table_args: &TableArgs,
    blob_args: &BlobArgs,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, Some(blob_args))?;
    let table = load_table(&config, table_args)?;
    let loader = BlobLoader::new(&table, open_blob(&config)?)
        .with_strict_layout(config.strict_layout);

    let progress_bar = ProgressBar::new(table.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let report = validate_with_progress(&loader, |entry| {
        progress_bar.set_message(entry.name.clone());
        progress_bar.inc(1);
    });
    progress_bar.finish_and_clear();

    let style_error = Style::new().red();
    for failure in &report.failures {
        println!(
            "{} {}",
            style_error.apply_to(&failure.name),
            failure.error
        );
    }

    if report.is_ok() {
        let style_ok = Style::new().green().bold();
        println!(
            "{}",
            style_ok.apply_to(format!("{} entries match the blob", report.checked))
        );
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            failures: report.failures.len(),
            checked: report.checked,
        })
    }
}
