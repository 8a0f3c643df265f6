use crate::config::NotesConfig;

/// Extract the general notes section(s) from concatenated OCR text.
pub fn extract_general_notes(text: &str, config: &NotesConfig) -> String {
    extract_section(text, &config.title_markers, &config.terminator_markers)
}

/// Slice every titled section out of `text`.
///
/// Each line containing a title marker (case-insensitive) starts a slice at
/// the beginning of that line. The slice ends right before the first
/// terminator marker (case-sensitive) found after the line start, or at end
/// of text. Slices are joined with `\n` in discovery order; overlapping
/// slices are kept as is.
pub fn extract_section(text: &str, title_markers: &[String], terminators: &[String]) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let titles: Vec<String> = lowered(title_markers);

    let mut slices = Vec::new();
    let mut line_start = 0;

    for line in lower.split_inclusive('\n') {
        if titles.iter().any(|t| line.contains(t.as_str())) {
            let end = terminators
                .iter()
                .filter(|t| !t.is_empty())
                .filter_map(|t| text[line_start..].find(t.as_str()))
                .min()
                .map(|offset| line_start + offset)
                .unwrap_or(text.len());
            tracing::debug!(start = line_start, end, "section slice");
            slices.push(&text[line_start..end]);
        }
        line_start += line.len();
    }

    slices.join("\n")
}

fn lowered(markers: &[String]) -> Vec<String> {
    markers
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| m.to_ascii_lowercase())
        .collect()
}
