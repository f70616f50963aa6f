//! Form validation and discovery of the PDF files to merge

use std::fs;
use std::path::{Path, PathBuf};
use glob::{MatchOptions, Pattern};
use crate::error::{Error, Result};
use crate::request::{normalize_output_file_name, MergeRequest};

/// A PDF file found in the input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub absolute_path: PathBuf,
    /// File name without its folder, used for ordering
    pub base_name: String,
}

/// Validated folders and output file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Absolute input folder
    pub input_folder: PathBuf,
    /// Absolute output folder, guaranteed to exist
    pub output_folder: PathBuf,
    /// Normalized output file name, always ending in `.pdf`
    pub file_name: String,
    /// `output_folder` joined with `file_name`
    pub output_path: PathBuf,
}

/// Everything the merge step needs: where to write and what to read
#[derive(Debug, Clone)]
pub struct Resolution {
    pub target: ResolvedTarget,
    /// Files to merge, sorted by name
    pub candidates: Vec<CandidateFile>,
    /// Entries left out because they are the output file itself
    pub skipped: Vec<PathBuf>,
}

/// Validate the request and list the files to merge
///
/// An input folder without PDF files is not an error; the returned
/// resolution simply has no candidates.
pub fn resolve(request: &MergeRequest) -> Result<Resolution> {
    let target = validate(request)?;
    enumerate(target)
}

/// Check the three form values in order, creating the output folder if needed
///
/// The first failing check is returned; later fields are not looked at.
pub fn validate(request: &MergeRequest) -> Result<ResolvedTarget> {
    let input = request.input_folder.trim();
    if input.is_empty() {
        return Err(Error::MissingInputFolder);
    }
    let input_folder = PathBuf::from(input);
    if !input_folder.is_dir() {
        return Err(Error::InputFolderNotFound(input_folder));
    }

    let output = request.output_folder.trim();
    if output.is_empty() {
        return Err(Error::MissingOutputFolder);
    }
    let output_folder = PathBuf::from(output);
    fs::create_dir_all(&output_folder).map_err(|source| Error::CreateOutputFolder {
        path: output_folder.clone(),
        source,
    })?;
    if !output_folder.is_dir() {
        return Err(Error::OutputFolderInvalid(output_folder));
    }

    let file_name = normalize_output_file_name(&request.output_file_name)?;

    let input_folder = std::path::absolute(&input_folder)?;
    let output_folder = std::path::absolute(&output_folder)?;
    let output_path = output_folder.join(&file_name);

    Ok(ResolvedTarget {
        input_folder,
        output_folder,
        file_name,
        output_path,
    })
}

/// List the `.pdf` files directly inside the input folder
///
/// The extension match is case-insensitive. The output file is left out
/// even when it sits in the input folder. Candidates are sorted by name
/// using plain byte order, so upper-case names sort before lower-case ones.
pub fn enumerate(target: ResolvedTarget) -> Result<Resolution> {
    let read_error = |source| Error::ReadInputFolder {
        path: target.input_folder.clone(),
        source,
    };

    // Only file names are matched; the folder path never goes through glob
    let pdf_names = Pattern::new("*.pdf")
        .map_err(|e| Error::General(format!("Invalid glob pattern: {e}")))?;
    let mut options = MatchOptions::new();
    options.case_sensitive = false;

    let output_key = comparison_key(&target.output_path);
    let mut candidates = Vec::new();
    let mut skipped = Vec::new();

    for entry in fs::read_dir(&target.input_folder).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let base_name = entry.file_name().to_string_lossy().into_owned();
        if !pdf_names.matches_with(&base_name, options) {
            continue;
        }

        let path = entry.path();
        if comparison_key(&path) == output_key {
            log::info!("Skipping existing output file {}", path.display());
            skipped.push(path);
            continue;
        }
        if !path.is_file() {
            continue;
        }

        candidates.push(CandidateFile {
            absolute_path: path,
            base_name,
        });
    }

    candidates.sort_by(|a, b| a.base_name.cmp(&b.base_name));
    log::info!(
        "Found {} PDF files in {}",
        candidates.len(),
        target.input_folder.display()
    );

    Ok(Resolution {
        target,
        candidates,
        skipped,
    })
}

/// Lower-cased, symlink-resolved form of a path for self-merge detection
///
/// Files that do not exist yet (the output, usually) are resolved through
/// their parent folder.
fn comparison_key(path: &Path) -> String {
    let resolved = fs::canonicalize(path).unwrap_or_else(|_| {
        match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => fs::canonicalize(parent)
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        }
    });
    resolved.to_string_lossy().to_lowercase()
}
