//! Helpers for building small tagged PDFs in unit tests

use std::path::{Path, PathBuf};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a document with `pages` pages, each labelled `{tag}-{n}`
pub(crate) fn build_pdf(tag: &str, pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 1..=pages {
        let content = Stream::new(dictionary! {}, format!("% {tag}-{n}\n").into_bytes());
        let content_id = doc.add_object(content);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(595), Object::Integer(842)],
            "Contents" => content_id,
            "Label" => Object::string_literal(format!("{tag}-{n}")),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Attach a Standard security handler entry to the trailer
///
/// The page content stays readable; only the trailer claims encryption,
/// which is what lopdf checks.
pub(crate) fn mark_encrypted(mut doc: Document) -> Document {
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "O" => Object::string_literal(vec![0x4f_u8; 32]),
        "U" => Object::string_literal(vec![0x55_u8; 32]),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(vec![0x01_u8; 16]),
            Object::string_literal(vec![0x01_u8; 16]),
        ]),
    );
    doc
}

/// Write a tagged PDF named `name` into `dir`, tagged with the file stem
pub(crate) fn write_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let path = dir.join(name);
    let tag = Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name);
    build_pdf(tag, pages).save(&path).expect("Failed to write test PDF");
    path
}

/// Page labels of a PDF in page order
pub(crate) fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_dictionary(page_id).expect("page dictionary");
            let label = page
                .get(b"Label")
                .and_then(Object::as_str)
                .expect("page label");
            String::from_utf8_lossy(label).into_owned()
        })
        .collect()
}

/// Write a PDF named `name` into `dir` whose trailer marks it as encrypted
pub(crate) fn write_encrypted_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let path = dir.join(name);
    mark_encrypted(build_pdf("locked", pages))
        .save(&path)
        .expect("Failed to write test PDF");
    path
}
