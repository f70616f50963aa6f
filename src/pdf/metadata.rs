//! Page count queries on written PDFs

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
///
/// This trusts the root of the page tree rather than walking it, which is
/// what viewers report for files we produced ourselves.
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| Error::General("No Pages reference in catalog".to_string()))?;

    let count = doc
        .get_dictionary(pages_id)?
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| Error::General("No integer Count in Pages".to_string()))?;

    usize::try_from(count).map_err(|_| Error::General(format!("Invalid page count: {count}")))
}

/// Count the number of pages in a PDF file
///
/// The merge itself never calls this. It is the check callers use to
/// confirm what a finished run wrote, e.g. against
/// [`MergeReport::output_path`](crate::MergeReport::output_path).
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    count_pages_from_catalog(&doc)
}
