use crate::commands::plan::build_plan;
use crate::config::SplitConfig;
use crate::detect::DetectionSource;
use crate::error::{Result, SplitError};
use crate::naming::output_file_name;
use crate::page_range::PageRange;
use crate::pdf::SourceDocument;
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Debug)]
pub struct WrittenChapter {
    pub path: PathBuf,
    pub range: PageRange,
}

#[derive(Debug)]
pub struct FailedChapter {
    pub path: PathBuf,
    pub range: PageRange,
    pub error: SplitError,
}

#[derive(Debug)]
pub struct SplitReport {
    pub source: DetectionSource,
    pub written: Vec<WrittenChapter>,
    pub failed: Vec<FailedChapter>,
}

/// Write one PDF per detected chapter into the output directory.
///
/// Input problems abort before anything is written. A chapter that cannot be
/// written is recorded in the report and the remaining chapters still go out.
pub fn split(config: &SplitConfig) -> Result<SplitReport> {
    let doc = SourceDocument::open(&config.input)?;
    let plan = build_plan(&doc, config)?;
    debug!(
        "Planned {} section(s) over {} pages from {}",
        plan.ranges.len(),
        plan.total_pages,
        plan.source
    );

    std::fs::create_dir_all(&config.output_dir).map_err(|source| SplitError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let total = plan.ranges.len();
    let mut report = SplitReport {
        source: plan.source,
        written: Vec::new(),
        failed: Vec::new(),
    };

    for (i, range) in plan.ranges.into_iter().enumerate() {
        let path = config
            .output_dir
            .join(output_file_name(i + 1, total, &range.title));

        let result = doc
            .extract_range(range.start_page, range.end_page)
            .and_then(|mut chapter| SourceDocument::save(&mut chapter, &path));

        match result {
            Ok(()) => {
                debug!("Wrote {} page(s) to {}", range.page_count(), path.display());
                report.written.push(WrittenChapter { path, range });
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => report.failed.push(FailedChapter {
                path,
                range,
                error: e,
            }),
        }
    }

    Ok(report)
}

pub fn run(config: &SplitConfig) -> anyhow::Result<()> {
    let report = split(config)?;

    for chapter in &report.written {
        println!(
            "Created: {} (Pages {})",
            chapter.path.display(),
            chapter.range.display_pages()
        );
    }
    for failure in &report.failed {
        error!(
            "Section '{}' (pages {}) was not written to {}: {}",
            failure.range.title,
            failure.range.display_pages(),
            failure.path.display(),
            failure.error
        );
    }

    if !report.failed.is_empty() {
        anyhow::bail!(
            "{} of {} section(s) could not be written",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    info!(
        "Successfully split PDF into {} section(s) in: {} (boundaries from {})",
        report.written.len(),
        config.output_dir.display(),
        report.source
    );

    Ok(())
}
