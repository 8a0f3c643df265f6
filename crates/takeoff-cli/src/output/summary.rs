use std::fmt::Write;
use takeoff_core::model::Report;

pub fn print(report: &Report) {
    print!("{}", format_report(report));
}

pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let counts = report.emergency_count();

    let _ = writeln!(out, "=== {} ===\n", report.file_name);

    let _ = writeln!(out, "Emergency lighting (from schedule)");
    let _ = writeln!(out, "  Total:                      {}", counts.total_emergency_lights);
    let _ = writeln!(
        out,
        "  2x4 recessed LED luminaire: {}",
        counts.recessed_2x4_led_luminaire
    );
    let _ = writeln!(out, "  Wallpack with photocell:    {}", counts.wallpack_with_photocell);
    if !counts.other_emergency_fixtures.is_empty() {
        let _ = writeln!(
            out,
            "  Other emergency fixtures:   {}",
            counts.other_emergency_fixtures.join(", ")
        );
    }
    out.push('\n');

    let detections = report.detections();
    if detections.is_empty() {
        let _ = writeln!(out, "Detected markers on layouts: none\n");
    } else {
        let _ = writeln!(
            out,
            "Detected markers on layouts: {} on {} page(s)",
            detections.total_markers(),
            detections.len()
        );
        for (page, markers) in detections.iter() {
            let _ = writeln!(out, "  page {:<4} {}", page, markers.len());
        }
        out.push('\n');
    }

    let schedule = report.lighting_schedule();
    if schedule.is_empty() {
        let _ = writeln!(out, "Lighting schedule: not found");
    } else {
        let _ = writeln!(out, "Lighting schedule: {} row(s)", schedule.len());
        for row in schedule {
            let cells: Vec<&str> = row.values().map(String::as_str).collect();
            let _ = writeln!(out, "  {}", cells.join(" | "));
        }
    }

    let notes = report.general_notes();
    if !notes.is_empty() {
        let _ = writeln!(out, "\nGeneral notes: {} line(s)", notes.lines().count());
    }

    out
}
