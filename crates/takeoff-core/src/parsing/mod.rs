pub mod notes;
pub mod schedule;

pub use notes::{extract_general_notes, extract_section};
pub use schedule::extract_lighting_schedule;
