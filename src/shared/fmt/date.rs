//! Date formatting for history rows.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Timezone a calendar date is taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    /// The host's local timezone.
    #[default]
    Local,
    Utc,
}

/// Short numeric date in `month/day/year` order without zero padding
/// (`2024-03-05` → `3/5/2024`).
pub fn display_date(timestamp: &DateTime<Utc>, zone: DateZone) -> String {
    match zone {
        DateZone::Utc => timestamp.format(DATE_FORMAT).to_string(),
        DateZone::Local => timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string(),
    }
}
