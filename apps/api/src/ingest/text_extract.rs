//! Plain-text extraction from staged documents.
//!
//! CPU-bound; callers run it inside `tokio::task::spawn_blocking`.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::analysis::{ExtractionError, RawDocument};

/// Extracts text and page count based on the file extension.
///
/// `.pdf` and `.docx` are parsed and `.txt` is read as-is. Other formats yield
/// an empty document rather than an error.
pub fn extract_document(path: &Path) -> Result<RawDocument, ExtractionError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => extract_pdf(path),
        "docx" => extract_docx(path),
        "txt" => Ok(RawDocument::new(std::fs::read_to_string(path)?, 1)),
        _ => {
            warn!("Unsupported file extension: .{extension}");
            Ok(RawDocument::default())
        }
    }
}

fn extract_pdf(path: &Path) -> Result<RawDocument, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    let page_count = pdf_page_count(&bytes);
    debug!(chars = text.len(), page_count, "PDF text extracted from {}", path.display());
    Ok(RawDocument::new(text, page_count))
}

fn pdf_page_count(bytes: &[u8]) -> u32 {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => u32::try_from(doc.get_pages().len()).unwrap_or(u32::MAX),
        Err(e) => {
            warn!("Could not count PDF pages: {e}");
            0
        }
    }
}

const DOCX_BODY: &str = "word/document.xml";
const DOCX_APP_PROPERTIES: &str = "docProps/app.xml";

/// Reads paragraph text from the main document part, one line per paragraph.
fn extract_docx(path: &Path) -> Result<RawDocument, ExtractionError> {
    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let body = read_entry(&mut archive, DOCX_BODY)?
        .ok_or_else(|| ExtractionError::Docx(format!("{DOCX_BODY} missing")))?;
    let text = docx_text(&body)?;

    // Word records the page count on save; generated files often omit it.
    let page_count = read_entry(&mut archive, DOCX_APP_PROPERTIES)?
        .map(|xml| docx_page_count(&xml))
        .unwrap_or(0);

    debug!(chars = text.len(), page_count, "DOCX text extracted from {}", path.display());
    Ok(RawDocument::new(text, page_count))
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ExtractionError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ExtractionError::Docx(e.to_string())),
    };
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

fn docx_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event().map_err(|e| ExtractionError::Docx(e.to_string()))? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" | b"w:br" | b"w:cr" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                let unescaped = t.unescape().map_err(|e| ExtractionError::Docx(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn docx_page_count(xml: &str) -> u32 {
    let mut reader = Reader::from_str(xml);
    let mut in_pages = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => in_pages = e.name().as_ref() == b"Pages",
            Ok(Event::Text(t)) if in_pages => {
                return t
                    .unescape()
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
            }
            Ok(Event::End(_)) => in_pages = false,
            Ok(Event::Eof) | Err(_) => return 0,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn staged(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_plain_text_is_read_verbatim() {
        let file = staged(".TXT", b"Jane Doe\njane@doe.dev\n");
        let document = extract_document(file.path()).unwrap();
        assert_eq!(document.text, "Jane Doe\njane@doe.dev\n");
        assert_eq!(document.page_count, 1);
    }

    fn docx(entries: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut writer = zip::ZipWriter::new(file.as_file_mut());
        for (name, contents) in entries {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        file
    }

    fn document_xml(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{paragraphs}</w:body></w:document>"#
        )
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let body = document_xml(
            "<w:p><w:r><w:t>John </w:t></w:r><w:r><w:t>Smith</w:t></w:r></w:p>\
             <w:p><w:r><w:t>john@x.com</w:t></w:r></w:p>\
             <w:p/>\
             <w:p><w:r><w:t>Python</w:t><w:tab/><w:t>R&amp;D</w:t></w:r></w:p>",
        );
        let file = docx(&[
            ("word/document.xml", body.as_str()),
            ("docProps/app.xml", "<Properties><Pages>2</Pages></Properties>"),
        ]);

        let document = extract_document(file.path()).unwrap();
        assert_eq!(document.text, "John Smith\njohn@x.com\n\nPython\tR&D\n");
        assert_eq!(document.page_count, 2);
    }

    #[test]
    fn test_docx_without_app_properties_has_unknown_page_count() {
        let body = document_xml("<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>");
        let file = docx(&[("word/document.xml", body.as_str())]);

        let document = extract_document(file.path()).unwrap();
        assert_eq!(document.text, "Jane Doe\n");
        assert_eq!(document.page_count, 0);
    }

    #[test]
    fn test_docx_missing_body_is_an_error() {
        let file = docx(&[("docProps/app.xml", "<Properties/>")]);
        let err = extract_document(file.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let file = staged(".docx", b"PK not a zip");
        assert!(matches!(
            extract_document(file.path()).unwrap_err(),
            ExtractionError::Docx(_)
        ));
    }

    #[test]
    fn test_unsupported_extension_yields_empty_document() {
        let file = staged(".png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(extract_document(file.path()).unwrap(), RawDocument::default());
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let file = staged(".pdf", b"definitely not a pdf");
        assert!(extract_document(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = extract_document(Path::new("/nonexistent/cv.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
