use crate::error::{Result, SplitError};
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The loaded source PDF. Owned for the whole run and dropped at the end,
/// including on error paths.
pub struct SourceDocument {
    pub doc: Document,
    pub path: PathBuf,
    bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(SplitError::InputNotFound(path));
        }

        let bytes = std::fs::read(&path).map_err(|source| SplitError::Read {
            path: path.clone(),
            source,
        })?;
        let doc = Document::load_mem(&bytes).map_err(|source| SplitError::Load {
            path: path.clone(),
            source,
        })?;

        let source = SourceDocument { doc, path, bytes };
        if source.page_count() == 0 {
            return Err(SplitError::EmptyDocument(source.path));
        }

        debug!(
            "Opened {} ({} pages, {} bytes)",
            source.path.display(),
            source.page_count(),
            source.bytes.len()
        );
        Ok(source)
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Raw file contents, for text extraction.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Map from page object to 0-based page index.
    pub fn page_index(&self) -> HashMap<ObjectId, u32> {
        self.doc
            .get_pages()
            .into_iter()
            .map(|(num, id)| (id, num - 1))
            .collect()
    }

    /// Copy the inclusive 0-based page span `[start, end]` into a new document.
    ///
    /// The copy carries no outline, since the source bookmarks would point at
    /// deleted pages.
    pub fn extract_range(&self, start: u32, end: u32) -> Result<Document> {
        let total = self.page_count();
        if start > end || end >= total {
            return Err(SplitError::InvalidMarkers {
                reason: format!(
                    "page span {}-{} is outside the document (1-{})",
                    start + 1,
                    end + 1,
                    total
                ),
            });
        }

        let mut new_doc = self.doc.clone();

        // lopdf numbers pages from 1
        let to_delete: Vec<u32> = (1..=total)
            .filter(|num| *num <= start || *num > end + 1)
            .collect();
        if !to_delete.is_empty() {
            new_doc.delete_pages(&to_delete);
        }

        let root = new_doc.trailer.get(b"Root").and_then(Object::as_reference);
        if let Ok(catalog) = root.and_then(|id| new_doc.get_dictionary_mut(id)) {
            catalog.remove(b"Outlines");
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }

    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path).map_err(|source| SplitError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
