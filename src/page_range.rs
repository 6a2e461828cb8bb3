use crate::error::{Result, SplitError};

/// A detected chapter start. Pages are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMarker {
    pub title: String,
    pub start_page: u32,
}

impl ChapterMarker {
    pub fn new(title: impl Into<String>, start_page: u32) -> Self {
        ChapterMarker {
            title: title.into(),
            start_page,
        }
    }
}

/// Inclusive, 0-based span of pages that becomes one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub title: String,
    pub start_page: u32,
    pub end_page: u32,
}

impl PageRange {
    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }

    /// 1-based `first-last` label for console output.
    pub fn display_pages(&self) -> String {
        format!("{}-{}", self.start_page + 1, self.end_page + 1)
    }
}

/// Turn ordered markers into ranges covering `[0, total_pages)`.
///
/// Each range runs from its marker to the page before the next marker; the
/// last one runs to the end of the document. With no markers the whole
/// document becomes one range named `default_title`. Markers must start at
/// page 0 and be strictly increasing.
pub fn compute_ranges(
    markers: &[ChapterMarker],
    total_pages: u32,
    default_title: &str,
) -> Result<Vec<PageRange>> {
    if total_pages == 0 {
        return Err(SplitError::InvalidMarkers {
            reason: "document has no pages".to_string(),
        });
    }

    if markers.is_empty() {
        return Ok(vec![PageRange {
            title: default_title.to_string(),
            start_page: 0,
            end_page: total_pages - 1,
        }]);
    }

    if markers[0].start_page != 0 {
        return Err(SplitError::InvalidMarkers {
            reason: format!(
                "first chapter starts on page {}, leaving earlier pages uncovered",
                markers[0].start_page + 1
            ),
        });
    }

    for pair in markers.windows(2) {
        if pair[1].start_page <= pair[0].start_page {
            return Err(SplitError::InvalidMarkers {
                reason: format!(
                    "'{}' (page {}) does not start after '{}' (page {})",
                    pair[1].title,
                    pair[1].start_page + 1,
                    pair[0].title,
                    pair[0].start_page + 1
                ),
            });
        }
    }

    if let Some(last) = markers.last() {
        if last.start_page >= total_pages {
            return Err(SplitError::InvalidMarkers {
                reason: format!(
                    "'{}' starts on page {} of a {}-page document",
                    last.title,
                    last.start_page + 1,
                    total_pages
                ),
            });
        }
    }

    let ranges = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end_page = markers
                .get(i + 1)
                .map(|next| next.start_page - 1)
                .unwrap_or(total_pages - 1);
            PageRange {
                title: marker.title.clone(),
                start_page: marker.start_page,
                end_page,
            }
        })
        .collect();

    Ok(ranges)
}
