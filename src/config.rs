use crate::detect::DetectOptions;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything a split run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub detect: DetectOptions,
}

impl SplitConfig {
    pub fn new(input: &Path, output_dir: &Path, detect: DetectOptions) -> Self {
        SplitConfig {
            input: normalize_input_path(input),
            output_dir: normalize_path(output_dir),
            detect,
        }
    }

    /// Title used when no chapters are detected.
    pub fn default_title(&self) -> String {
        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.trim().is_empty())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Normalize the path and add a `.pdf` extension when it is missing.
pub fn normalize_input_path(path: &Path) -> PathBuf {
    let path = normalize_path(path);
    let has_pdf_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if has_pdf_ext {
        return path;
    }

    let mut name = OsString::from(path);
    name.push(".pdf");
    PathBuf::from(name)
}

fn normalize_path(path: &Path) -> PathBuf {
    let normalized: PathBuf = path.components().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
