//! PDF manipulation module

pub mod merge;
pub mod metadata;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use merge::MergeWriter;
pub use metadata::count_pages;
