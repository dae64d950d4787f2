//! Metadata stripping: rewrite one PDF with an empty metadata record.
//!
//! ## Why an *explicit* empty Info dictionary?
//!
//! Merely deleting the trailer's `Info` key is not enough: some PDF
//! writers resurrect document properties from leftover objects or derive
//! them from source pages on the next rewrite. Attaching a fresh,
//! zero-entry Info dictionary — and deleting the old one — guarantees no
//! author/title/producer/timestamp/custom field survives, matching the
//! behaviour of rebuilding the document page by page with empty metadata.
//!
//! ## What counts as metadata here
//!
//! Three document-level carriers are removed: the trailer `Info`
//! dictionary (replaced by an empty one), the catalog `/Metadata` XMP
//! stream, and `/PieceInfo` application data. Page content streams are
//! never touched, so page count and visible content are preserved.

use crate::error::FileError;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;
use tracing::{debug, trace};

/// Replace a loaded document's metadata record with the empty mapping.
///
/// Leaves the page tree untouched. Infallible: a document with no Info,
/// no catalog, or inline (non-reference) metadata objects is handled the
/// same way.
pub fn strip_document(doc: &mut Document) {
    // Delete the previous Info object so its contents cannot be reached
    // through the cross-reference table of the rewritten file.
    if let Ok(old_info) = doc.trailer.get(b"Info") {
        if let Ok(old_id) = old_info.as_reference() {
            doc.objects.remove(&old_id);
            trace!("Removed previous Info object {:?}", old_id);
        }
    }

    // Explicitly attach an empty metadata record.
    let info_id = doc.add_object(Object::Dictionary(Dictionary::new()));
    doc.trailer.set("Info", Object::Reference(info_id));

    // The XMP metadata stream and PieceInfo hang off the catalog; a
    // rebuilt document carries neither, so neither do we.
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(|root| root.as_reference())
        .ok();
    if let Some(root_id) = root_id {
        let xmp_id = doc
            .get_object(root_id)
            .and_then(|obj| obj.as_dict())
            .and_then(|catalog| catalog.get(b"Metadata"))
            .and_then(|meta| meta.as_reference())
            .ok();

        if let Ok(catalog) = doc
            .get_object_mut(root_id)
            .and_then(|obj| obj.as_dict_mut())
        {
            catalog.remove(b"Metadata");
            catalog.remove(b"PieceInfo");
        }
        if let Some(xmp_id) = xmp_id {
            doc.objects.remove(&xmp_id);
        }
    }
}

/// Strip one PDF file and write the result to `output_path`.
///
/// The write is atomic: the document is serialized to
/// `<output_path>.tmp` and renamed into place, so a failure mid-write
/// never leaves a half-written file at the output path.
///
/// # Errors
/// [`FileError`] when the input cannot be read, is not a PDF, fails to
/// parse, or the output cannot be written.
pub fn scrub_file(input_path: &Path, output_path: &Path) -> Result<(), FileError> {
    debug!(
        "Stripping {} -> {}",
        input_path.display(),
        output_path.display()
    );

    let bytes = std::fs::read(input_path).map_err(|e| FileError::ReadFailed {
        path: input_path.to_path_buf(),
        source: e,
    })?;

    let stripped = scrub_named_bytes(&bytes, input_path)?;

    let tmp_path = output_path.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, &stripped).map_err(|e| FileError::WriteFailed {
        path: output_path.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, output_path).map_err(|e| FileError::WriteFailed {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Strip a PDF held in memory, returning the rewritten bytes.
///
/// This is the recommended API when PDF data comes from a database or
/// network stream rather than a file on disk; lopdf parses buffers
/// directly, so nothing touches the filesystem.
pub fn scrub_bytes(bytes: &[u8]) -> Result<Vec<u8>, FileError> {
    scrub_named_bytes(bytes, Path::new("<in-memory>"))
}

/// Shared implementation: magic check, parse, strip, serialize.
///
/// `origin` is only used to label errors with the file they came from.
fn scrub_named_bytes(bytes: &[u8], origin: &Path) -> Result<Vec<u8>, FileError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(FileError::NotAPdf {
            path: origin.to_path_buf(),
            magic,
        });
    }

    let mut doc = Document::load_mem(bytes).map_err(|e| FileError::ParseFailed {
        path: origin.to_path_buf(),
        detail: e.to_string(),
    })?;

    strip_document(&mut doc);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| FileError::SerializeFailed {
            path: origin.to_path_buf(),
            detail: e.to_string(),
        })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Stream, StringFormat};

    /// Build a small real PDF with `num_pages` pages and the given Info
    /// entries, entirely in memory.
    fn build_test_pdf(num_pages: u32, info_entries: &[(&str, &str)]) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for i in 0..num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("Page {}", i + 1).into_bytes(),
                            StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
            ]);
            page_ids.push(doc.add_object(page));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        if !info_entries.is_empty() {
            let mut info = Dictionary::new();
            for (key, value) in info_entries {
                info.set(
                    key.as_bytes().to_vec(),
                    Object::String(value.as_bytes().to_vec(), StringFormat::Literal),
                );
            }
            let info_id = doc.add_object(Object::Dictionary(info));
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn info_entry_count(bytes: &[u8]) -> usize {
        let doc = Document::load_mem(bytes).unwrap();
        let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        doc.get_dictionary(info_ref).unwrap().len()
    }

    #[test]
    fn scrub_bytes_empties_metadata_and_keeps_pages() {
        let pdf = build_test_pdf(3, &[("Title", "X"), ("Author", "Someone")]);
        let stripped = scrub_bytes(&pdf).unwrap();

        let doc = Document::load_mem(&stripped).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert_eq!(info_entry_count(&stripped), 0);
    }

    #[test]
    fn stripped_output_has_explicit_info_dictionary() {
        let pdf = build_test_pdf(1, &[("Producer", "TestWriter 9.0")]);
        let stripped = scrub_bytes(&pdf).unwrap();

        // Not merely absent: the trailer must reference a real, empty dict.
        let doc = Document::load_mem(&stripped).unwrap();
        let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        assert!(doc.get_dictionary(info_ref).unwrap().is_empty());
    }

    #[test]
    fn already_empty_metadata_stays_empty() {
        let pdf = build_test_pdf(2, &[]);
        let stripped = scrub_bytes(&pdf).unwrap();
        assert_eq!(info_entry_count(&stripped), 0);

        let doc = Document::load_mem(&stripped).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn scrubbing_twice_is_idempotent() {
        let pdf = build_test_pdf(2, &[("Title", "X")]);
        let once = scrub_bytes(&pdf).unwrap();
        let twice = scrub_bytes(&once).unwrap();

        let doc = Document::load_mem(&twice).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert_eq!(info_entry_count(&twice), 0);
    }

    #[test]
    fn strips_catalog_xmp_stream() {
        let pdf = build_test_pdf(1, &[("Title", "X")]);
        let mut doc = Document::load_mem(&pdf).unwrap();

        // Graft an XMP metadata stream onto the catalog.
        let xmp = Stream::new(Dictionary::new(), b"<x:xmpmeta/>".to_vec());
        let xmp_id = doc.add_object(xmp);
        let root_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        doc.get_object_mut(root_id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Metadata", Object::Reference(xmp_id));
        let mut with_xmp = Vec::new();
        doc.save_to(&mut with_xmp).unwrap();

        let stripped = scrub_bytes(&with_xmp).unwrap();
        let out = Document::load_mem(&stripped).unwrap();
        let catalog = out.catalog().unwrap();
        assert!(catalog.get(b"Metadata").is_err());
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = scrub_bytes(b"<html>not a pdf</html>").unwrap_err();
        assert!(matches!(err, FileError::NotAPdf { .. }));
    }

    #[test]
    fn rejects_corrupt_pdf() {
        // Valid magic, garbage body.
        let err = scrub_bytes(b"%PDF-1.7\nthis is not a pdf body").unwrap_err();
        assert!(matches!(err, FileError::ParseFailed { .. }));
    }

    #[test]
    fn scrub_file_is_atomic_no_tmp_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        std::fs::write(&input, build_test_pdf(1, &[("Title", "X")])).unwrap();

        scrub_file(&input, &output).unwrap();

        assert!(output.exists());
        assert!(!output.with_extension("pdf.tmp").exists());
    }
}
