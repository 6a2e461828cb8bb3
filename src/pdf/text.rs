use anyhow::{anyhow, Context, Result};
use std::panic::{catch_unwind, UnwindSafe};
use std::path::Path;

/// Extract the text layer of every page, in page order.
///
/// pdf-extract panics instead of returning an error on some fonts and
/// encodings it does not support. Such a panic comes back as an `Err` here,
/// so heading detection degrades to the whole-document fallback.
pub fn extract_page_texts(pdf_bytes: &[u8], path: &Path) -> Result<Vec<String>> {
    contain_panic(|| pdf_extract::extract_text_from_mem_by_pages(pdf_bytes).map_err(Into::into))
        .with_context(|| format!("Failed to extract text from PDF: {}", path.display()))
}

fn contain_panic<T>(extract: impl FnOnce() -> Result<T> + UnwindSafe) -> Result<T> {
    catch_unwind(extract).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown cause".to_string());
        Err(anyhow!("text extraction panicked: {}", message))
    })
}

/// The first `limit` non-blank lines of a page, trimmed.
pub fn leading_lines(page_text: &str, limit: usize) -> impl Iterator<Item = &str> {
    page_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
}
