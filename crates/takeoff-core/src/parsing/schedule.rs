use crate::config::ScheduleConfig;
use crate::model::{LightingSchedule, ScheduleRow};
use regex::{Regex, RegexBuilder};

/// Parse the lighting fixture schedule out of concatenated OCR text.
///
/// The header line starts at the first case-insensitive match of any header
/// marker and runs to end of line. Every later line with at least as many
/// delimited tokens as there are columns becomes a row; surplus tokens are
/// ignored and short lines are skipped. Rows without a type mark are dropped.
///
/// Returns an empty schedule when no header is found.
pub fn extract_lighting_schedule(text: &str, config: &ScheduleConfig) -> LightingSchedule {
    let Some(pattern) = header_pattern(&config.header_markers) else {
        return Vec::new();
    };

    let Some(header) = pattern.find(text) else {
        tracing::debug!("no schedule header found");
        return Vec::new();
    };

    let columns = header_columns(header.as_str(), config);
    if columns.is_empty() {
        return Vec::new();
    }
    tracing::debug!(?columns, "schedule header");

    let mut schedule = Vec::new();
    for line in text[header.end()..].lines() {
        match parse_row(line, &columns, config.delimiter) {
            Some(row) if has_type_mark(&row, &config.type_mark_column) => schedule.push(row),
            Some(_) => tracing::trace!(line, "row without type mark skipped"),
            None => {}
        }
    }

    tracing::debug!(rows = schedule.len(), "parsed lighting schedule");
    schedule
}

/// Build a case-insensitive regex matching any marker through end of line.
fn header_pattern(markers: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = markers
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }

    let source = format!("(?:{})[^\n]*", alternatives.join("|"));
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, "invalid schedule header pattern");
            None
        }
    }
}

/// Split the header line into column names.
///
/// A column spelled like one of the header markers (any case) is renamed to
/// the canonical type-mark column so OCR misreadings key rows consistently.
fn header_columns(header_line: &str, config: &ScheduleConfig) -> Vec<String> {
    split_tokens(header_line, config.delimiter)
        .into_iter()
        .map(|token| {
            let is_marker = config
                .header_markers
                .iter()
                .any(|m| m.trim().eq_ignore_ascii_case(token));
            if is_marker {
                config.type_mark_column.clone()
            } else {
                token.to_string()
            }
        })
        .collect()
}

fn parse_row(line: &str, columns: &[String], delimiter: char) -> Option<ScheduleRow> {
    let tokens = split_tokens(line, delimiter);
    if tokens.len() < columns.len() {
        return None;
    }

    Some(
        columns
            .iter()
            .zip(tokens)
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect(),
    )
}

/// Split on `delimiter`, trim every token and drop empty ones.
fn split_tokens(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn has_type_mark(row: &ScheduleRow, type_mark_column: &str) -> bool {
    row.get(type_mark_column)
        .is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> LightingSchedule {
        extract_lighting_schedule(text, &ScheduleConfig::default())
    }

    fn row(pairs: &[(&str, &str)]) -> ScheduleRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_emergency_row() {
        let text = "TYPE MARK, DESCRIPTION\nAE, 2' x 4' recessed led luminaire emergency driver\n";
        assert_eq!(
            parse(text),
            vec![row(&[
                ("TYPE MARK", "AE"),
                ("DESCRIPTION", "2' x 4' recessed led luminaire emergency driver"),
            ])]
        );
    }

    #[test]
    fn test_no_header_returns_empty() {
        assert!(parse("LIGHTING FIXTURE SCHEDULE\nA, troffer\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_ocr_misread_header_is_canonicalized() {
        let text = "type marr, DESCRIPTION, VOLTS\nB, downlight, 120\n";
        assert_eq!(
            parse(text),
            vec![row(&[
                ("TYPE MARK", "B"),
                ("DESCRIPTION", "downlight"),
                ("VOLTS", "120"),
            ])]
        );
    }

    #[test]
    fn test_header_starts_mid_line() {
        let text = "LIGHTING SCHEDULE TYPE MARK, DESCRIPTION\nA, troffer\n";
        let schedule = parse(text);
        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule[0].keys().collect::<Vec<_>>(),
            vec!["TYPE MARK", "DESCRIPTION"]
        );
    }

    #[test]
    fn test_extra_tokens_ignored_short_rows_skipped() {
        let text = "TYPE MARK, DESCRIPTION, LAMP\n\
                    A, troffer, LED, 277V, noise\n\
                    B, downlight\n\
                    , , \n\
                    C, strip, LED\n";
        let schedule = parse(text);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0]["TYPE MARK"], "A");
        assert_eq!(schedule[0]["LAMP"], "LED");
        assert_eq!(schedule[1]["TYPE MARK"], "C");
    }

    #[test]
    fn test_empty_cells_shift_tokens() {
        // Empty cells are dropped before zipping, so later values shift left.
        let text = "TYPE MARK, DESCRIPTION, LAMP\nA, , troffer, LED\n";
        let schedule = parse(text);
        assert_eq!(schedule[0]["DESCRIPTION"], "troffer");
        assert_eq!(schedule[0]["LAMP"], "LED");
    }

    #[test]
    fn test_every_row_has_all_columns() {
        let text = "TYPE MARK, DESCRIPTION, MOUNTING, VOLTS\n\
                    A, troffer, recessed, 277\n\
                    AE, troffer emergency, recessed, 277, extra\n\
                    W, wallpack, wall, 277\n";
        let schedule = parse(text);
        assert_eq!(schedule.len(), 3);
        for r in &schedule {
            assert_eq!(r.len(), 4);
            assert!(!r["TYPE MARK"].is_empty());
        }
    }

    #[test]
    fn test_duplicate_type_marks_kept_in_order() {
        let text = "TYPE MARK, DESCRIPTION\nA, one\nB, two\nA, three\n";
        let marks: Vec<_> = parse(text)
            .iter()
            .map(|r| r["TYPE MARK"].clone())
            .collect();
        assert_eq!(marks, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "notes\nTYPE MARK, DESCRIPTION\nAE, 2' x 4' recessed\nW, wallpack\n";
        assert_eq!(parse(text), parse(text));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = ScheduleConfig {
            delimiter: '|',
            ..ScheduleConfig::default()
        };
        let schedule = extract_lighting_schedule("TYPE MARK | DESCRIPTION\nW | wallpack\n", &config);
        assert_eq!(schedule, vec![row(&[("TYPE MARK", "W"), ("DESCRIPTION", "wallpack")])]);
    }
}
