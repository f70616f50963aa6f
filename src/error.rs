//! Error types for the folder merge library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the folder merge library
///
/// The messages are shown to the user as-is, so they are written as
/// complete sentences rather than terse diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    /// Input folder field left empty
    #[error("Please enter a path to the folder with PDF files.")]
    MissingInputFolder,

    /// Input folder does not exist or is not a directory
    #[error("Input folder '{}' not found or is not a valid folder.", .0.display())]
    InputFolderNotFound(PathBuf),

    /// Output folder field left empty
    #[error("Please enter a path to the folder where you want to save the merged PDF.")]
    MissingOutputFolder,

    /// Output folder could not be created
    #[error("Cannot create output folder '{}'. Error: {source}", .path.display())]
    CreateOutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output path exists but is not a directory
    #[error("Output path '{}' is not a valid folder.", .0.display())]
    OutputFolderInvalid(PathBuf),

    /// Output file name field left empty
    #[error("Please enter a name for the output PDF file.")]
    MissingFileName,

    /// Output file name has no base name
    #[error("Output filename cannot be just '.pdf'.")]
    BareExtension,

    /// Output file name points into another folder
    #[error("Output filename '{0}' must not contain folder separators.")]
    FileNameHasSeparator(String),

    /// Listing the input folder failed
    #[error("Error while reading input folder '{}': {source}", .path.display())]
    ReadInputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate file could not be loaded as a PDF
    #[error("{source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// A candidate document is encrypted
    #[error("document is encrypted")]
    Encrypted,

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_sentences() {
        let err = Error::InputFolderNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(
            err.to_string(),
            "Input folder '/no/such/dir' not found or is not a valid folder."
        );
        assert!(Error::BareExtension.to_string().contains("'.pdf'"));
    }

    #[test]
    fn test_read_folder_error_keeps_cause() {
        let err = Error::ReadInputFolder {
            path: PathBuf::from("in"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("denied"));
    }
}
