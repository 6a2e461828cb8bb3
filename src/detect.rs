//! Chapter boundary detection.
//!
//! Bookmarks win when the document has usable ones. Otherwise the text layer
//! is scanned for "Chapter N" style headings near the top of each page. When
//! neither produces a marker the caller treats the document as one section.

use crate::error::Result;
use crate::page_range::ChapterMarker;
use crate::pdf::outline::{read_outline, OutlineEntry};
use crate::pdf::text::{extract_page_texts, leading_lines};
use crate::pdf::SourceDocument;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};

pub const DEFAULT_HEADING_PATTERN: &str = r"^chapter\s+([0-9]+|[ivxlcdm]+)\b";

/// Headings are only looked for among the first few lines of a page.
const HEADING_SCAN_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Outline,
    Headings,
    Fallback,
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DetectionSource::Outline => "outline",
            DetectionSource::Headings => "headings",
            DetectionSource::Fallback => "whole document",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Only outline levels below this are used (1 = top level only).
    pub max_depth: Option<u32>,
    pub heading_pattern: Regex,
}

impl DetectOptions {
    pub fn new(max_depth: Option<u32>, heading_pattern: Option<&str>) -> Result<Self> {
        let heading_pattern = RegexBuilder::new(heading_pattern.unwrap_or(DEFAULT_HEADING_PATTERN))
            .case_insensitive(true)
            .build()?;
        Ok(DetectOptions {
            max_depth,
            heading_pattern,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Detection {
    pub source: DetectionSource,
    /// Normalized: strictly increasing, first one on page 0. Empty for
    /// [`DetectionSource::Fallback`].
    pub markers: Vec<ChapterMarker>,
}

pub fn detect_chapters(source: &SourceDocument, options: &DetectOptions) -> Detection {
    let total_pages = source.page_count();

    let outline = read_outline(&source.doc, &source.page_index());
    debug!("Outline has {} entries", outline.len());
    let markers = normalize_markers(markers_from_outline(&outline, options.max_depth), total_pages);
    if !markers.is_empty() {
        info!("Found {} chapter(s) in the outline", markers.len());
        return Detection {
            source: DetectionSource::Outline,
            markers,
        };
    }

    if outline.is_empty() {
        info!("No outline found, looking for chapter headings in the page text");
    } else {
        info!("Outline has no usable entries, looking for chapter headings in the page text");
    }

    match extract_page_texts(source.bytes(), &source.path) {
        Ok(pages) => {
            let markers = normalize_markers(
                scan_headings(&pages, &options.heading_pattern),
                total_pages,
            );
            if !markers.is_empty() {
                info!("Found {} chapter heading(s)", markers.len());
                return Detection {
                    source: DetectionSource::Headings,
                    markers,
                };
            }
        }
        Err(e) => warn!("{:#}", e),
    }

    info!("No chapter markers found, keeping the document as a single section");
    Detection {
        source: DetectionSource::Fallback,
        markers: Vec::new(),
    }
}

fn markers_from_outline(entries: &[OutlineEntry], max_depth: Option<u32>) -> Vec<ChapterMarker> {
    entries
        .iter()
        .filter(|entry| max_depth.map_or(true, |depth| entry.level < depth))
        .filter_map(|entry| match entry.page {
            Some(page) => {
                debug!("Found section: {} on page {}", entry.title, page + 1);
                Some(ChapterMarker::new(entry.title.clone(), page))
            }
            None => {
                debug!("Skipping '{}': destination is not a page", entry.title);
                None
            }
        })
        .collect()
}

/// Match each page's leading lines against `pattern`; at most one marker per
/// page. A heading line that is nothing but the match ("CHAPTER 4") takes the
/// following line as its subtitle.
pub fn scan_headings(pages: &[String], pattern: &Regex) -> Vec<ChapterMarker> {
    let mut markers = Vec::new();

    for (index, text) in pages.iter().enumerate() {
        let lines: Vec<&str> = leading_lines(text, HEADING_SCAN_LINES).collect();
        let Some(pos) = lines.iter().position(|line| pattern.is_match(line)) else {
            continue;
        };

        let heading = lines[pos];
        let bare = pattern
            .find(heading)
            .is_some_and(|m| m.as_str().trim() == heading);
        let title = match lines.get(pos + 1) {
            Some(next) if bare && !pattern.is_match(next) => format!("{} {}", heading, next),
            _ => heading.to_string(),
        };

        debug!("Found heading: {} on page {}", title, index + 1);
        markers.push(ChapterMarker::new(title, index as u32));
    }

    markers
}

/// Bring raw markers into the shape range computation expects.
///
/// Markers past the last page are dropped; the rest are stable-sorted by
/// page, so markers sharing a page keep their outline order and only the
/// first of them survives. Pages before the first marker are folded into it.
pub fn normalize_markers(mut markers: Vec<ChapterMarker>, total_pages: u32) -> Vec<ChapterMarker> {
    markers.retain(|marker| {
        let keep = marker.start_page < total_pages;
        if !keep {
            debug!(
                "Dropping '{}': page {} is past the end of the document",
                marker.title,
                marker.start_page + 1
            );
        }
        keep
    });

    markers.sort_by_key(|marker| marker.start_page);

    let mut normalized: Vec<ChapterMarker> = Vec::with_capacity(markers.len());
    for marker in markers {
        match normalized.last() {
            Some(prev) if prev.start_page == marker.start_page => {
                debug!(
                    "Merging '{}' into '{}' (both start on page {})",
                    marker.title,
                    prev.title,
                    marker.start_page + 1
                );
            }
            _ => normalized.push(marker),
        }
    }

    if let Some(first) = normalized.first_mut() {
        if first.start_page > 0 {
            debug!("Folding pages 1-{} into '{}'", first.start_page, first.title);
            first.start_page = 0;
        }
    }

    normalized
}
