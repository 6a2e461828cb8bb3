use crate::config::SplitConfig;
use crate::detect::{detect_chapters, DetectionSource};
use crate::error::Result;
use crate::naming::output_file_name;
use crate::page_range::{compute_ranges, PageRange};
use crate::pdf::SourceDocument;
use serde::Serialize;

/// Where the boundaries came from and the ranges they produce.
#[derive(Debug, Clone)]
pub struct ChapterPlan {
    pub source: DetectionSource,
    pub total_pages: u32,
    pub ranges: Vec<PageRange>,
}

pub fn build_plan(doc: &SourceDocument, config: &SplitConfig) -> Result<ChapterPlan> {
    let detection = detect_chapters(doc, &config.detect);
    let total_pages = doc.page_count();
    let ranges = compute_ranges(&detection.markers, total_pages, &config.default_title())?;

    Ok(ChapterPlan {
        source: detection.source,
        total_pages,
        ranges,
    })
}

pub fn run(config: &SplitConfig, json: bool) -> anyhow::Result<()> {
    let doc = SourceDocument::open(&config.input)?;
    let plan = build_plan(&doc, config)?;

    if json {
        let report = PlanReport::new(config, &plan);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", config.input.display());
    println!("Pages: {}", plan.total_pages);
    println!("Chapters from: {}", plan.source);
    println!();

    let total = plan.ranges.len();
    for (i, range) in plan.ranges.iter().enumerate() {
        println!(
            "{:>3}  pages {:<9}  {}",
            i + 1,
            range.display_pages(),
            output_file_name(i + 1, total, &range.title)
        );
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct PlanReport {
    input: String,
    total_pages: u32,
    source: DetectionSource,
    ranges: Vec<PlannedRange>,
}

/// Page numbers here are 1-based, as a reader would count them.
#[derive(Debug, Serialize)]
struct PlannedRange {
    title: String,
    first_page: u32,
    last_page: u32,
    file_name: String,
}

impl PlanReport {
    fn new(config: &SplitConfig, plan: &ChapterPlan) -> Self {
        let total = plan.ranges.len();
        PlanReport {
            input: config.input.display().to_string(),
            total_pages: plan.total_pages,
            source: plan.source,
            ranges: plan
                .ranges
                .iter()
                .enumerate()
                .map(|(i, range)| PlannedRange {
                    title: range.title.clone(),
                    first_page: range.start_page + 1,
                    last_page: range.end_page + 1,
                    file_name: output_file_name(i + 1, total, &range.title),
                })
                .collect(),
        }
    }
}
