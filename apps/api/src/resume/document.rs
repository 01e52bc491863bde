//! Text extraction — turns an uploaded PDF or DOCX résumé into plain text.

use bytes::Bytes;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::debug;

/// The two résumé formats the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl DocumentFormat {
    /// Resolves the declared format from the upload's file name, falling back to its content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        let from_name = file_name
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| match ext.to_ascii_lowercase().as_str() {
                "pdf" => Some(Self::Pdf),
                "docx" => Some(Self::Docx),
                _ => None,
            });

        from_name.or_else(|| match content_type? {
            "application/pdf" => Some(Self::Pdf),
            DOCX_CONTENT_TYPE => Some(Self::Docx),
            _ => None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// An uploaded résumé held in memory for the duration of one extraction call.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: Bytes,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(content: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF document: {0}")]
    Pdf(String),

    #[error("could not read DOCX document: {0}")]
    Docx(String),

    #[error("document extraction aborted: {0}")]
    Aborted(String),
}

/// Extracts the plain text of a document, dispatching on its declared format.
///
/// CPU-bound; callers on the async runtime run this inside `spawn_blocking`.
pub fn extract_text(document: &Document) -> Result<String, ExtractionError> {
    let text = match document.format {
        DocumentFormat::Pdf => extract_pdf(&document.content)?,
        DocumentFormat::Docx => extract_docx(&document.content)?,
    };
    debug!(
        "Extracted {} chars from {} document",
        text.len(),
        document.format.as_str()
    );
    Ok(text)
}

fn extract_pdf(content: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(content)
        .map_err(|e| ExtractionError::Pdf(format!("{e:?}")))?;
    Ok(pages.join("\n"))
}

fn extract_docx(content: &[u8]) -> Result<String, ExtractionError> {
    let docx =
        docx_rs::read_docx(content).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Paragraph → Run → Text. Runs belong to the same sentence, so they join without a separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
