use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfchapters")]
#[command(about = "Split a PDF into one file per chapter, using its bookmarks or chapter headings")]
#[command(version)]
pub struct Cli {
    /// Print detailed progress (outline entries, merged bookmarks, skipped pages)
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one PDF per detected chapter
    Split {
        /// PDF file to split (".pdf" is appended when missing)
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[command(flatten)]
        detect: DetectArgs,
    },

    /// Show the detected chapters and page ranges without writing anything
    Plan {
        /// PDF file to inspect
        input: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        detect: DetectArgs,
    },
}

#[derive(Args)]
pub struct DetectArgs {
    /// Only use bookmarks this many levels deep (1 = top-level chapters)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_depth: Option<u32>,

    /// Case-insensitive regex for heading lines, used when the PDF has no bookmarks
    #[arg(long, value_name = "REGEX")]
    pub heading_pattern: Option<String>,
}
