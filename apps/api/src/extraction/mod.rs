//! Text extraction — PDF and DOCX documents to plain text.
//!
//! Uploaded bytes are staged in a `NamedTempFile` that lives only for the
//! duration of one extraction; the file is removed when the handle drops,
//! whether extraction succeeded or not.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Extracts plain text from a document on disk. Blocking.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Supported document formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )),
        }
    }
}

/// Default extractor: `pdf-extract` for PDFs, the `word/document.xml` part for DOCX.
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        match DocumentKind::from_path(path)? {
            DocumentKind::Pdf => {
                pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
            }
            DocumentKind::Docx => extract_docx(path),
        }
    }
}

fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(e.to_string()))?
        .read_to_string(&mut xml)?;

    Ok(docx_xml_to_text(&xml))
}

/// One line per `<w:p>` paragraph, built from its `<w:t>` runs. Empty
/// paragraphs, including self-closing `<w:p/>`, become blank lines.
fn docx_xml_to_text(xml: &str) -> String {
    static TEXT_RUN: OnceLock<Regex> = OnceLock::new();
    static EMPTY_PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    let text_run = TEXT_RUN
        .get_or_init(|| Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("valid regex"));
    let empty_paragraph = EMPTY_PARAGRAPH
        .get_or_init(|| Regex::new(r"<w:p(?:\s[^>]*)?/>").expect("valid regex"));

    let xml = empty_paragraph.replace_all(xml, "</w:p>");
    let mut paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(|paragraph| {
            text_run
                .captures_iter(paragraph)
                .map(|c| unescape_xml(&c[1]))
                .collect::<String>()
        })
        .collect();
    // Everything after the last paragraph close is the section/body trailer
    paragraphs.pop();

    paragraphs.join("\n")
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// A document to extract: text supplied directly, or an uploaded file.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Text(String),
    Upload { filename: String, bytes: Bytes },
}

/// Writes `bytes` to a temp file that keeps the upload's extension.
pub fn stage_upload(filename: &str, bytes: &[u8]) -> Result<tempfile::NamedTempFile, ExtractionError> {
    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile()?;
    staged.write_all(bytes)?;
    staged.flush()?;
    Ok(staged)
}

/// Stages an upload, extracts it, and releases the staged file on every path.
pub fn extract_upload(
    extractor: &dyn TextExtractor,
    filename: &str,
    bytes: &[u8],
) -> Result<String, ExtractionError> {
    let staged = stage_upload(filename, bytes)?;
    debug!("Staged '{}' at {}", filename, staged.path().display());
    extractor.extract(staged.path())
}

/// Resolves a source to text, running file extraction on the blocking pool.
pub async fn extract_source(
    extractor: Arc<dyn TextExtractor>,
    source: DocumentSource,
) -> Result<String, ExtractionError> {
    match source {
        DocumentSource::Text(text) => Ok(text),
        DocumentSource::Upload { filename, bytes } => {
            tokio::task::spawn_blocking(move || {
                extract_upload(extractor.as_ref(), &filename, &bytes)
            })
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::testing::Utf8TextExtractor;

    /// Remembers the staged path so tests can check it was cleaned up.
    struct RecordingExtractor {
        seen: Mutex<Option<PathBuf>>,
        fail: bool,
    }

    impl TextExtractor for RecordingExtractor {
        fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            *self.seen.lock().unwrap() = Some(path.to_path_buf());
            assert!(path.exists());
            if self.fail {
                Err(ExtractionError::Pdf("corrupt".to_string()))
            } else {
                Ok(std::fs::read_to_string(path)?)
            }
        }
    }

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_document_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("cv.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("/tmp/jd.docx")).unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        for name in ["notes.txt", "resume.doc", "no_extension"] {
            let err = DocumentKind::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, ExtractionError::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn test_docx_xml_to_text_joins_runs_per_paragraph() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t xml:space="preserve">Rust &amp; Go</w:t></w:r></w:p>
            <w:p><w:r><w:tab/><w:t>Kafka</w:t></w:r></w:p>
            <w:sectPr/></w:body></w:document>"#;
        assert_eq!(docx_xml_to_text(xml), "Senior Rust & Go\nKafka");
    }

    #[test]
    fn test_docx_self_closing_paragraphs_are_blank_lines() {
        let xml = r#"<w:document><w:body>
            <w:p><w:pPr/><w:r><w:t>Summary</w:t></w:r></w:p>
            <w:p/>
            <w:p w:rsidR="00A1"/>
            <w:p><w:r><w:t>Rust</w:t></w:r></w:p>
            <w:sectPr/></w:body></w:document>"#;
        assert_eq!(docx_xml_to_text(xml), "Summary\n\n\nRust");
    }

    #[test]
    fn test_extract_docx_file() {
        let bytes = build_docx(
            "<w:document><w:body><w:p><w:r><w:t>Python and SQL</w:t></w:r></w:p></w:body></w:document>",
        );
        let text = extract_upload(&DocumentTextExtractor, "resume.docx", &bytes).unwrap();
        assert_eq!(text, "Python and SQL");
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("other.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.finish().unwrap();
        }
        let err = extract_upload(&DocumentTextExtractor, "cv.docx", buffer.get_ref()).unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_unsupported_upload_is_rejected() {
        let err = extract_upload(&DocumentTextExtractor, "cv.rtf", b"{\\rtf1}").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_staged_file_keeps_extension() {
        let staged = stage_upload("Jane Doe CV.PDF", b"%PDF").unwrap();
        assert_eq!(
            staged.path().extension().and_then(|e| e.to_str()),
            Some("PDF")
        );
    }

    #[test]
    fn test_staged_file_removed_after_success() {
        let extractor = RecordingExtractor {
            seen: Mutex::new(None),
            fail: false,
        };
        let text = extract_upload(&extractor, "cv.pdf", b"hello").unwrap();
        assert_eq!(text, "hello");
        let path = extractor.seen.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_staged_file_removed_after_failure() {
        let extractor = RecordingExtractor {
            seen: Mutex::new(None),
            fail: true,
        };
        assert!(extract_upload(&extractor, "cv.pdf", b"hello").is_err());
        let path = extractor.seen.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_extract_source_text_passes_through() {
        let text = extract_source(
            Arc::new(Utf8TextExtractor),
            DocumentSource::Text("plain".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(text, "plain");
    }

    #[tokio::test]
    async fn test_extract_source_upload_runs_extractor() {
        let text = extract_source(
            Arc::new(Utf8TextExtractor),
            DocumentSource::Upload {
                filename: "cv.docx".to_string(),
                bytes: Bytes::from_static(b"Rust engineer"),
            },
        )
        .await
        .unwrap();
        assert_eq!(text, "Rust engineer");
    }
}
