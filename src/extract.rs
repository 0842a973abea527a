//! Payslip extraction from a master document.
//!
//! A master PDF holds every employee's payslip for one pay period. Extraction
//! scans the pages in order, keeps those whose extracted text contains the
//! employee number as a substring, and writes them to a new per-employee PDF.
//!
//! Substring semantics are inherited behavior: an employee number that is a
//! prefix of another ("123" vs "1234") matches both pages. Callers relying on
//! exact-field matching must not — the page text is unstructured.
//!
//! The output filename doubles as a cache key: if it already exists the
//! rewrite is skipped and the existing path returned, with no verification
//! that the cached file still matches a possibly-changed master.

use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The master document could not be parsed or a page's text could not
    /// be decoded. Distinct from the not-found outcome.
    #[error("failed to read master document: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to write extracted payslip: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the pages mentioning `employee_number` from the master document
/// into `<output_dir>/employee_{employee_number}_{pay_date_label}.pdf`.
///
/// Returns `Ok(None)` when the master document does not exist or no page
/// matches; `Err` only for parse or write failures.
pub fn extract_payslip(
    employee_number: &str,
    master_path: &Path,
    pay_date_label: &str,
    output_dir: &Path,
) -> Result<Option<PathBuf>, ExtractError> {
    if !master_path.exists() {
        return Ok(None);
    }

    let mut doc = Document::load(master_path)?;
    let pages = doc.get_pages();

    let mut matched: Vec<u32> = Vec::new();
    let mut unmatched: Vec<u32> = Vec::new();
    for (&page_number, _) in &pages {
        let text = doc.extract_text(&[page_number])?;
        if text.contains(employee_number) {
            debug!(employee_number, page_number, master = %master_path.display(), "page matched");
            matched.push(page_number);
        } else {
            unmatched.push(page_number);
        }
    }

    if matched.is_empty() {
        return Ok(None);
    }

    let output_path = output_dir.join(format!("employee_{employee_number}_{pay_date_label}.pdf"));
    if output_path.exists() {
        // Already extracted for this period; filename is the cache key.
        debug!(output = %output_path.display(), "extraction skipped, output exists");
        return Ok(Some(output_path));
    }

    // Deleting the non-matching pages keeps the matching ones in their
    // original order.
    doc.delete_pages(&unmatched);
    doc.prune_objects();
    doc.renumber_objects();
    doc.compress();
    doc.save(&output_path)?;

    info!(
        employee_number,
        pages = matched.len(),
        output = %output_path.display(),
        "payslip extracted"
    );
    Ok(Some(output_path))
}
