mod common;

use std::{fs::OpenOptions, os::unix::fs::FileExt};

use blob_offsets::{
    DataType, OffsetTable, TensorOffsetEntry,
    blob::{
        BlobError, BlobLoader, BlobLoaderError, ChunkedBlob, validate,
        validate_with_progress,
    },
};
use common::{BlobFixture, CONV_WEIGHT, LATE_WEIGHT, NORM_BIAS};

#[test]
fn test_matching_pair_validates() {
    let fixture = BlobFixture::new();
    let table = fixture.table();
    let blob =
        ChunkedBlob::open(&fixture.first_path, Some(&fixture.other_path)).unwrap();
    let loader = BlobLoader::new(&table, blob);

    let mut visited = Vec::new();
    let report =
        validate_with_progress(&loader, |entry| visited.push(entry.name.clone()));
    assert!(report.is_ok(), "unexpected failures: {:?}", report.failures);
    assert_eq!(report.checked, 3);
    assert_eq!(visited, vec![CONV_WEIGHT, NORM_BIAS, LATE_WEIGHT]);
}

#[test]
fn test_every_broken_entry_is_reported() {
    let fixture = BlobFixture::new();
    let mut entries = fixture.entries.clone();
    entries.push(TensorOffsetEntry::new("__unet__[t-3-0]", 1 << 40, true, false));
    entries.push(TensorOffsetEntry::new("__unet__[t-3-1]", 100, true, false));
    let table = OffsetTable::try_from(entries).unwrap();

    // Without the other chunk the late weight cannot be checked either.
    let blob = ChunkedBlob::open(&fixture.first_path, None).unwrap();
    let loader = BlobLoader::new(&table, blob);
    let report = validate(&loader);

    assert!(!report.is_ok());
    assert_eq!(report.checked, 5);
    let failed: Vec<&str> =
        report.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec![LATE_WEIGHT, "__unet__[t-3-0]", "__unet__[t-3-1]"]);
    assert!(matches!(report.failures[0].error, BlobError::MissingChunk { .. }));
    assert!(matches!(
        report.failures[1].error,
        BlobError::OffsetOutOfBounds { .. }
    ));
    assert!(matches!(report.failures[2].error, BlobError::BadSentinel { .. }));
}

#[test]
fn test_partial_element_payload_fails_validation_and_load() {
    let fixture = BlobFixture::new();
    let table = fixture.table();
    let bias_offset = table.lookup(NORM_BIAS).unwrap().offset;

    // 10 bytes of f32 data leaves half an element at the end.
    let file = OpenOptions::new()
        .write(true)
        .open(&fixture.first_path)
        .unwrap();
    file.write_all_at(&10u64.to_le_bytes(), bias_offset + 8).unwrap();
    drop(file);

    let blob =
        ChunkedBlob::open(&fixture.first_path, Some(&fixture.other_path)).unwrap();
    let loader = BlobLoader::new(&table, blob);

    let report = validate(&loader);
    assert_eq!(report.checked, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, NORM_BIAS);
    assert!(matches!(
        report.failures[0].error,
        BlobError::PartialElement {
            data_type: DataType::F32,
            size: 10,
            ..
        }
    ));

    assert!(matches!(
        loader.get(NORM_BIAS),
        Err(BlobLoaderError::Blob(BlobError::PartialElement { size: 10, .. }))
    ));
    let mut buf = vec![0u8; 10];
    assert!(matches!(
        loader.read_raw(NORM_BIAS, &mut buf),
        Err(BlobLoaderError::Blob(BlobError::PartialElement { .. }))
    ));
    assert!(loader.get(CONV_WEIGHT).is_ok());
}
