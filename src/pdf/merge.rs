//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::path::Path;
use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic Parent chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// Accumulates pages from several PDF documents and writes them out as one
///
/// Objects are renumbered as each document is appended so ids never collide.
/// Based on the lopdf merge example:
/// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
///
/// The writer owns every object it has collected. Those buffers are released
/// when the writer is closed or dropped.
///
/// # Example
///
/// ```no_run
/// use pdf_folder_merge::pdf::MergeWriter;
/// use std::path::Path;
///
/// let mut writer = MergeWriter::new();
/// writer.append(Path::new("1. first.pdf")).expect("Failed to append");
/// writer.append(Path::new("2. second.pdf")).expect("Failed to append");
/// writer.write_to(Path::new("merged.pdf")).expect("Failed to write");
/// writer.close();
/// ```
#[derive(Debug)]
pub struct MergeWriter {
    objects: BTreeMap<ObjectId, Object>,
    page_ids: Vec<ObjectId>,
    max_id: u32,
    documents: usize,
}

impl Default for MergeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            page_ids: Vec::new(),
            max_id: 1,
            documents: 0,
        }
    }

    /// Load the PDF at `path` and append all of its pages
    ///
    /// Returns the number of pages appended. On error the writer is left
    /// exactly as it was.
    pub fn append(&mut self, path: &Path) -> Result<usize> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

        self.append_document(doc)
    }

    /// Append all pages of an already loaded document
    ///
    /// Encrypted documents are refused; the writer only ever holds plain
    /// objects.
    pub fn append_document(&mut self, mut doc: Document) -> Result<usize> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(self.max_id);
        self.max_id = doc.max_id + 1;

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        for &page_id in &pages {
            inherit_page_attributes(&mut doc, page_id);
        }

        // The source catalog and page tree are replaced by ours on write
        self.objects.extend(
            doc.objects
                .into_iter()
                .filter(|(_, object)| !is_tree_node(object)),
        );
        self.page_ids.extend(&pages);
        self.documents += 1;

        Ok(pages.len())
    }

    /// Number of pages collected so far
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Number of documents appended so far
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Write every collected page to `output_path`, replacing any existing file
    ///
    /// The collected objects move into the written document, so the writer
    /// is empty afterwards.
    pub fn write_to(&mut self, output_path: &Path) -> Result<()> {
        if self.page_ids.is_empty() {
            return Err(Error::General("No pages to write".to_string()));
        }

        let mut merged_doc = Document::with_version("1.5");
        merged_doc.objects = std::mem::take(&mut self.objects);

        // New ids must land above every object we just moved in
        merged_doc.max_id = self.max_id - 1;

        let page_ids = std::mem::take(&mut self.page_ids);
        let pages_id = merged_doc.new_object_id();

        let kids: Vec<Object> = page_ids
            .iter()
            .map(|&id| Object::Reference(id))
            .collect();

        let mut pages_object = Dictionary::new();
        pages_object.set("Type", Object::Name(b"Pages".to_vec()));
        pages_object.set("Count", Object::Integer(page_ids.len() as i64));
        pages_object.set("Kids", Object::Array(kids));

        let catalog_id = merged_doc.new_object_id();
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));

        merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
        merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
        merged_doc.trailer.set("Root", Object::Reference(catalog_id));

        for &page_id in &page_ids {
            if let Ok(Object::Dictionary(dict)) = merged_doc.get_object_mut(page_id) {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }

        merged_doc.compress();
        merged_doc.save(output_path)?;

        Ok(())
    }

    /// Release everything the writer holds
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for MergeWriter {
    fn drop(&mut self) {
        log::debug!(
            "Releasing merge writer ({} documents, {} pending pages)",
            self.documents,
            self.page_ids.len()
        );
    }
}

/// Whether an object is a Catalog or a page tree node
fn is_tree_node(object: &Object) -> bool {
    match object {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type"),
            Ok(Object::Name(name)) if name == b"Catalog" || name == b"Pages"
        ),
        _ => false,
    }
}

/// Copy attributes a page inherits from its page tree onto the page itself
///
/// Pages are re-parented under a flat tree when written, so anything they
/// picked up from intermediate nodes would otherwise be lost.
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) {
    let mut inherited: Vec<(&[u8], Object)> = Vec::new();

    {
        let Ok(page) = doc.get_dictionary(page_id) else {
            return;
        };

        let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(parent_id) = parent {
            if missing.is_empty() || depth >= MAX_TREE_DEPTH {
                break;
            }
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }
    }

    if inherited.is_empty() {
        return;
    }
    if let Ok(page) = doc.get_dictionary_mut(page_id) {
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{build_pdf, mark_encrypted, page_labels, write_pdf};
    use lopdf::dictionary;
    use tempfile::TempDir;

    #[test]
    fn test_new_writer_is_empty() {
        let writer = MergeWriter::new();
        assert_eq!(writer.page_count(), 0);
        assert_eq!(writer.document_count(), 0);
    }

    #[test]
    fn test_append_counts_pages() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let first = write_pdf(temp_dir.path(), "first.pdf", 2);
        let second = write_pdf(temp_dir.path(), "second.pdf", 3);

        let mut writer = MergeWriter::new();
        assert_eq!(writer.append(&first).unwrap(), 2);
        assert_eq!(writer.append(&second).unwrap(), 3);
        assert_eq!(writer.page_count(), 5);
        assert_eq!(writer.document_count(), 2);
    }

    #[test]
    fn test_append_garbage_leaves_writer_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let good = write_pdf(temp_dir.path(), "good.pdf", 1);
        let bad = temp_dir.path().join("bad.pdf");
        std::fs::write(&bad, b"this is not a pdf").unwrap();

        let mut writer = MergeWriter::new();
        writer.append(&good).unwrap();
        let result = writer.append(&bad);

        assert!(matches!(result, Err(Error::Load { .. })));
        assert_eq!(writer.page_count(), 1);
        assert_eq!(writer.document_count(), 1);
    }

    #[test]
    fn test_append_missing_file() {
        let mut writer = MergeWriter::new();
        let result = writer.append(Path::new("nonexistent.pdf"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_write_keeps_page_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output = temp_dir.path().join("out.pdf");

        let mut writer = MergeWriter::new();
        writer.append_document(build_pdf("a", 2)).unwrap();
        writer.append_document(build_pdf("b", 1)).unwrap();
        writer.write_to(&output).unwrap();
        writer.close();

        assert_eq!(page_labels(&output), vec!["a-1", "a-2", "b-1"]);
    }

    #[test]
    fn test_write_empty_writer_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output = temp_dir.path().join("out.pdf");

        let mut writer = MergeWriter::new();
        assert!(writer.write_to(&output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_inherited_media_box_survives_merge() {
        // Page tree where the MediaBox lives on the Pages node only
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Label" => Object::string_literal("x-1"),
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
                "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(200), Object::Integer(300)],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output = temp_dir.path().join("out.pdf");
        let mut writer = MergeWriter::new();
        writer.append_document(doc).unwrap();
        writer.write_to(&output).unwrap();

        let merged = Document::load(&output).unwrap();
        let (_, merged_page) = merged.get_pages().into_iter().next().unwrap();
        let page = merged.get_dictionary(merged_page).unwrap();
        let media_box = page.get(b"MediaBox").and_then(Object::as_array).unwrap();
        assert_eq!(media_box.len(), 4);
        assert_eq!(media_box[3], Object::Integer(300));
    }

    #[test]
    fn test_tree_nodes_are_dropped_from_sources() {
        let mut writer = MergeWriter::new();
        writer.append_document(build_pdf("a", 1)).unwrap();
        assert!(!writer.objects.values().any(is_tree_node));
    }

    #[test]
    fn test_encrypted_document_is_refused() {
        let mut writer = MergeWriter::new();
        writer.append_document(build_pdf("a", 1)).unwrap();

        let result = writer.append_document(mark_encrypted(build_pdf("locked", 2)));

        assert!(matches!(result, Err(Error::Encrypted)));
        assert_eq!(writer.page_count(), 1);
        assert_eq!(writer.document_count(), 1);
    }
}
