use std::{io::Write, path::Path};

use super::{CliError, TableArgs, load_table, resolve_config};

pub fn handle_export(
    config_path: Option<&Path>,
    table_args: &TableArgs,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let config = resolve_config(config_path, None)?;
    let table = load_table(&config, table_args)?;
    match output {
        Some(path) => table.to_path(path)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            table.to_json_writer(&mut stdout)?;
            writeln!(stdout)?;
        },
    }
    Ok(())
}
