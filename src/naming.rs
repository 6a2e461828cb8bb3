const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const MAX_TITLE_CHARS: usize = 50;

/// Make a chapter title safe to use as a file name on any platform.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c) && !c.is_control())
        .collect();
    let truncated: String = cleaned.trim().chars().take(MAX_TITLE_CHARS).collect();
    let name = truncated.trim_end().trim_end_matches('.');

    if name.is_empty() {
        "section".to_string()
    } else {
        name.to_string()
    }
}

/// `NN_<title>.pdf`, with the 1-based ordinal padded so that names sort in
/// chapter order.
pub fn output_file_name(ordinal: usize, total: usize, title: &str) -> String {
    let width = total.to_string().len().max(2);
    format!(
        "{:0width$}_{}.pdf",
        ordinal,
        sanitize_title(title),
        width = width
    )
}
