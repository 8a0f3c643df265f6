use crate::config::{ClassifierConfig, ScheduleConfig};
use crate::model::{EmergencyCount, ScheduleRow};

/// Count emergency fixtures in a lighting schedule.
///
/// Two independent rules run per row, in document order:
/// 1. A type mark ending with the emergency suffix counts toward the total,
///    and toward the 2x4 recessed category when its description contains the
///    recessed phrase. Otherwise the mark goes to `other_emergency_fixtures`.
/// 2. A type mark equal to the wall-pack mark counts toward the wall-pack
///    category and the total.
///
/// A mark matching both rules is counted twice.
pub fn count_emergency_fixtures(
    schedule: &[ScheduleRow],
    columns: &ScheduleConfig,
    rules: &ClassifierConfig,
) -> EmergencyCount {
    let recessed_phrase = rules.recessed_phrase.to_lowercase();
    let mut counts = EmergencyCount::default();

    for row in schedule {
        let type_mark = row
            .get(&columns.type_mark_column)
            .map(|s| s.trim())
            .unwrap_or("");
        if type_mark.is_empty() {
            continue;
        }
        let description = row
            .get(&columns.description_column)
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        if type_mark.ends_with(rules.emergency_suffix.as_str()) {
            counts.total_emergency_lights += 1;
            if description.contains(&recessed_phrase) {
                counts.recessed_2x4_led_luminaire += 1;
            } else {
                counts.other_emergency_fixtures.push(type_mark.to_string());
            }
        }

        if type_mark == rules.wallpack_mark {
            counts.wallpack_with_photocell += 1;
            counts.total_emergency_lights += 1;
        }
    }

    tracing::debug!(
        total = counts.total_emergency_lights,
        recessed = counts.recessed_2x4_led_luminaire,
        wallpack = counts.wallpack_with_photocell,
        other = counts.other_emergency_fixtures.len(),
        "classified schedule"
    );
    counts
}
