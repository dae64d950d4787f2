//! Metadata inspection: read a PDF's metadata record without writing anything.
//!
//! Used by the CLI `--inspect-only` flag and by tests verifying the
//! stripper's postcondition. Resolves the trailer's `Info` entry whether
//! it is a reference or an inline dictionary, and follows references when
//! stringifying values, since real-world writers produce both shapes.

use crate::error::FileError;
use crate::output::DocumentMetadata;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Read document metadata from a PDF file.
///
/// # Errors
/// [`FileError`] when the file cannot be read or parsed.
pub fn inspect(path: &Path) -> Result<DocumentMetadata, FileError> {
    let bytes = std::fs::read(path).map_err(|e| FileError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let doc = Document::load_mem(&bytes).map_err(|e| FileError::ParseFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    Ok(read_metadata(&doc))
}

/// Extract the metadata record of an already-loaded document.
pub fn read_metadata(doc: &Document) -> DocumentMetadata {
    let mut meta = DocumentMetadata {
        page_count: doc.get_pages().len(),
        pdf_version: doc.version.clone(),
        is_encrypted: doc.is_encrypted(),
        ..Default::default()
    };

    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| deref_dictionary(doc, obj));
    let Some(info) = info else {
        return meta;
    };

    for (key, value) in info.iter() {
        let Some(value) = object_to_string(doc, value) else {
            continue;
        };
        match key.as_slice() {
            b"Title" => meta.title = Some(value),
            b"Author" => meta.author = Some(value),
            b"Subject" => meta.subject = Some(value),
            b"Keywords" => meta.keywords = Some(value),
            b"Creator" => meta.creator = Some(value),
            b"Producer" => meta.producer = Some(value),
            b"CreationDate" => meta.creation_date = Some(value),
            b"ModDate" => meta.modification_date = Some(value),
            other => {
                meta.custom
                    .insert(String::from_utf8_lossy(other).into_owned(), value);
            }
        }
    }

    meta
}

fn deref_dictionary<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn object_to_string(doc: &Document, obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).trim().to_string()),
        Object::Name(name) => Some(String::from_utf8_lossy(name).trim().to_string()),
        Object::Reference(id) => doc
            .get_object(*id)
            .ok()
            .and_then(|inner| object_to_string(doc, inner)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    fn doc_with_info(entries: &[(&str, &str)]) -> Document {
        let mut doc = Document::with_version("1.5");
        let mut info = Dictionary::new();
        for (key, value) in entries {
            info.set(
                key.as_bytes().to_vec(),
                Object::String((*value).as_bytes().to_vec(), StringFormat::Literal),
            );
        }
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
        doc
    }

    #[test]
    fn reads_standard_and_custom_fields() {
        let doc = doc_with_info(&[
            ("Title", "Sonata No. 2"),
            ("Author", "A. Composer"),
            ("Producer", "TestWriter"),
            ("Department", "Strings"),
        ]);
        let meta = read_metadata(&doc);

        assert_eq!(meta.title.as_deref(), Some("Sonata No. 2"));
        assert_eq!(meta.author.as_deref(), Some("A. Composer"));
        assert_eq!(meta.producer.as_deref(), Some("TestWriter"));
        assert_eq!(meta.custom.get("Department").map(String::as_str), Some("Strings"));
        assert!(!meta.is_empty());
    }

    #[test]
    fn document_without_info_is_empty() {
        let doc = Document::with_version("1.7");
        let meta = read_metadata(&doc);
        assert!(meta.is_empty());
        assert_eq!(meta.pdf_version, "1.7");
        assert_eq!(meta.page_count, 0);
    }

    #[test]
    fn inline_info_dictionary_is_read() {
        let mut doc = Document::with_version("1.4");
        let mut info = Dictionary::new();
        info.set(
            "Title",
            Object::String(b"Inline".to_vec(), StringFormat::Literal),
        );
        doc.trailer.set("Info", Object::Dictionary(info));

        let meta = read_metadata(&doc);
        assert_eq!(meta.title.as_deref(), Some("Inline"));
    }

    #[test]
    fn string_values_behind_references_are_followed() {
        let mut doc = Document::with_version("1.6");
        let title_id = doc.add_object(Object::String(
            b"Indirect title".to_vec(),
            StringFormat::Literal,
        ));
        let mut info = Dictionary::new();
        info.set("Title", Object::Reference(title_id));
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));

        let meta = read_metadata(&doc);
        assert_eq!(meta.title.as_deref(), Some("Indirect title"));
    }

    #[test]
    fn inspect_missing_file_fails() {
        let err = inspect(Path::new("/no/such/file.pdf")).unwrap_err();
        assert!(matches!(err, FileError::ReadFailed { .. }));
    }
}
