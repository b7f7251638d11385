use std::io::Write;

use blob_offsets::{
    Chunk, OffsetTable, OffsetTableError, TensorName, builtin,
    config::{ResolverConfig, env_table_path},
};

#[test]
fn test_unet_documented_lookups() {
    let table = builtin::unet();

    let first = table.lookup("__unet__[t-0-0]").unwrap();
    assert_eq!(first.offset, 512);
    assert!(first.is_first_chunk);
    assert!(!first.is_layer_norm_bias);

    let bias = table.lookup("__unet__[t-157-1]").unwrap();
    assert_eq!(bias.as_tuple(), (569_017_856, true, true));
    assert!(table.requires_alternate_decoding(bias));

    let late = table.lookup("__unet__[t-406-0]").unwrap();
    assert_eq!(late.as_tuple(), (831_641_344, false, false));
    assert_eq!(table.chunk_for(late), Chunk::Other);

    assert!(matches!(
        table.lookup("__unet__[t-999-0]"),
        Err(OffsetTableError::NotFound(name)) if name == "__unet__[t-999-0]"
    ));
}

#[test]
fn test_unet_keys_are_canonical() {
    for entry in builtin::unet().entries() {
        let name: TensorName = entry.name.parse().unwrap();
        assert_eq!(name.model_part, "unet");
        assert_eq!(name.to_string(), entry.name);
    }
}

#[test]
fn test_config_loads_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("text_encoder.json");
    let mut file = std::fs::File::create(&table_path).unwrap();
    write!(
        file,
        r#"{{ "model": "text_encoder", "entries": [
            {{ "name": "__text_encoder__[t-0-0]", "offset": 64, "is_first_chunk": true, "is_layer_norm_bias": false }}
        ] }}"#
    )
    .unwrap();
    drop(file);

    let config_path = dir.path().join("resolver.json");
    std::fs::write(
        &config_path,
        format!(r#"{{ "table": {:?} }}"#, table_path.to_str().unwrap()),
    )
    .unwrap();

    let config = ResolverConfig::from_path(&config_path).unwrap();
    assert_eq!(config.table.as_deref(), Some(table_path.as_path()));
    if let Some(env_path) = env_table_path() {
        assert_eq!(config.table_path(), Some(env_path));
        return;
    }
    let table = config.load_table().unwrap();
    assert_eq!(table.model(), Some("text_encoder"));
    assert_eq!(table.lookup("__text_encoder__[t-0-0]").unwrap().offset, 64);
    assert!(table.lookup("__unet__[t-0-0]").is_err());
}

#[test]
fn test_config_defaults_to_embedded_table() {
    let config = ResolverConfig::default();
    if let Some(env_path) = env_table_path() {
        assert_eq!(config.table_path(), Some(env_path));
        return;
    }
    let table = config.load_table().unwrap();
    assert_eq!(table.len(), builtin::unet().len());
    assert!(table.contains("__unet__[t-157-1]"));
}

#[test]
fn test_exported_table_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unet.json");
    builtin::unet().to_path(&path).unwrap();

    let reloaded = OffsetTable::from_path(&path).unwrap();
    assert_eq!(reloaded.model(), Some("unet"));
    assert!(reloaded.entries().eq(builtin::unet().entries()));
}
