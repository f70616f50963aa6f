//! The three form values that drive a merge

use crate::error::{Error, Result};

const PDF_EXTENSION: &str = ".pdf";

/// Raw values entered in the merge form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Folder holding the PDF files to merge
    pub input_folder: String,
    /// Folder the merged PDF is written to, created if missing
    pub output_folder: String,
    /// Output file name, with or without the `.pdf` extension
    pub output_file_name: String,
}

impl MergeRequest {
    pub fn new(
        input_folder: impl Into<String>,
        output_folder: impl Into<String>,
        output_file_name: impl Into<String>,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
            output_file_name: output_file_name.into(),
        }
    }
}

/// Whether a file name carries the PDF extension, in any letter case
pub fn has_pdf_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}

/// Trim the output file name and make sure it ends in `.pdf`
///
/// `"report"` and `"report.pdf"` both normalize to `"report.pdf"`; an
/// existing extension keeps its letter case. A name that is only the
/// extension is rejected.
pub fn normalize_output_file_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingFileName);
    }
    if trimmed.contains(['/', std::path::MAIN_SEPARATOR]) {
        return Err(Error::FileNameHasSeparator(trimmed.to_string()));
    }

    let mut name = trimmed.to_string();
    if !has_pdf_extension(&name) {
        name.push_str(PDF_EXTENSION);
    }
    if name.eq_ignore_ascii_case(PDF_EXTENSION) {
        return Err(Error::BareExtension);
    }

    Ok(name)
}
