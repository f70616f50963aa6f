//! PDF Folder Merge Library
//!
//! Merges every PDF file found directly inside a folder into a single
//! document, ordered by file name. This library provides functionality to:
//! - Validate the input folder, output folder and output file name
//! - Find the PDF files to merge, leaving out the output file itself
//! - Append them into one document, skipping files that cannot be read
//! - Describe the whole run in a human-readable report
//!
//! # Example
//!
//! ```no_run
//! use pdf_folder_merge::{merge_folder, MergeRequest};
//!
//! let request = MergeRequest::new("lectures", "lectures", "all-lectures");
//! let report = merge_folder(&request);
//!
//! println!("{report}");
//! ```

pub mod error;
pub mod executor;
pub mod pdf;
pub mod report;
pub mod request;
pub mod resolver;
pub mod workflow;

// Re-export commonly used items
pub use error::{Error, Result};
pub use executor::execute;
pub use report::{MergeReport, MergeStage};
pub use request::{normalize_output_file_name, MergeRequest};
pub use resolver::{resolve, CandidateFile, Resolution};
pub use workflow::merge_folder;
