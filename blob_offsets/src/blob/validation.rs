use tracing::{info, warn};

use super::{BlobError, BlobLoader};
use crate::TensorOffsetEntry;

#[derive(Debug)]
pub struct ValidationFailure {
    pub name: String,
    pub error: BlobError,
}

/// Outcome of checking every table entry against the blob.
///
/// Any failure means the table and blob do not belong together.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub checked: usize,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn validate(loader: &BlobLoader<'_>) -> ValidationReport {
    validate_with_progress(loader, |_| {})
}

pub fn validate_with_progress<F>(
    loader: &BlobLoader<'_>,
    mut on_entry: F,
) -> ValidationReport
where
    F: FnMut(&TensorOffsetEntry),
{
    let mut report = ValidationReport::default();
    for entry in loader.table().entries() {
        if let Err(error) = loader.checked_record(entry) {
            warn!(name = entry.name.as_str(), %error, "entry failed validation");
            report.failures.push(ValidationFailure {
                name: entry.name.clone(),
                error,
            });
        }
        report.checked += 1;
        on_entry(entry);
    }
    info!(
        checked = report.checked,
        failures = report.failures.len(),
        "validated offset table against blob"
    );
    report
}
