use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF.
///
/// Extraction is CPU-bound and runs on the blocking pool. A PDF with no text
/// layer (e.g. a scanned document) yields an empty string, not an error.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Document(format!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::Document(format!("Could not process PDF: {e}")))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        warn!("No text extracted from PDF (possibly a scanned document)");
    }
    Ok(text)
}
