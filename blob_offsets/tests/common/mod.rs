#![allow(dead_code)]
use std::path::PathBuf;

use blob_offsets::{
    DataType, OffsetTable, TensorOffsetEntry,
    blob::{BlobTensorView, write_blob_chunk},
};
use half::f16;
use tempfile::TempDir;

pub const CONV_WEIGHT: &str = "__unet__[t-0-0]";
pub const NORM_BIAS: &str = "__unet__[t-1-1]";
pub const LATE_WEIGHT: &str = "__unet__[t-2-0]";

pub fn conv_weight_values() -> Vec<f32> {
    vec![0.5, -0.25, 1.0, -0.01819, 3.0, 0.0]
}

pub fn norm_bias_values() -> Vec<f32> {
    vec![1e-3, -2.5, 7.0]
}

pub fn late_weight_values() -> Vec<f32> {
    (0..40).map(|i| i as f32 * 0.125).collect()
}

fn f16_bytes(values: &[f32]) -> Vec<u8> {
    let halves: Vec<f16> = values.iter().copied().map(f16::from_f32).collect();
    bytemuck::cast_slice::<f16, u8>(&halves).to_vec()
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice::<f32, u8>(values).to_vec()
}

/// Two chunk files on disk plus the table describing them.
pub struct BlobFixture {
    pub dir: TempDir,
    pub first_path: PathBuf,
    pub other_path: PathBuf,
    pub entries: Vec<TensorOffsetEntry>,
}

impl BlobFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let first_path = dir.path().join("UnetChunk1.weight.bin");
        let other_path = dir.path().join("UnetChunk2.weight.bin");

        let conv = f16_bytes(&conv_weight_values());
        let bias = f32_bytes(&norm_bias_values());
        let late = f16_bytes(&late_weight_values());

        let mut entries = write_blob_chunk(
            &first_path,
            &[
                BlobTensorView {
                    name: CONV_WEIGHT,
                    data_type: DataType::F16,
                    data: &conv,
                    is_layer_norm_bias: false,
                },
                BlobTensorView {
                    name: NORM_BIAS,
                    data_type: DataType::F32,
                    data: &bias,
                    is_layer_norm_bias: true,
                },
            ],
            true,
        )
        .expect("write first chunk");
        entries.extend(
            write_blob_chunk(
                &other_path,
                &[BlobTensorView {
                    name: LATE_WEIGHT,
                    data_type: DataType::F16,
                    data: &late,
                    is_layer_norm_bias: false,
                }],
                false,
            )
            .expect("write other chunk"),
        );

        Self {
            dir,
            first_path,
            other_path,
            entries,
        }
    }

    pub fn table(&self) -> OffsetTable {
        OffsetTable::try_from(self.entries.clone()).expect("build table")
    }
}
