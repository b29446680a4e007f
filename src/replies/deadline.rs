use crate::feeds::WidgetData;
use chrono::{DateTime, FixedOffset, TimeDelta};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Time left until the carbon deadline, e.g. `"...:\n5 years, 42 days, 03:04:05"`.
///
/// Years are 365-day blocks; leap days are not accounted for.
pub fn deadline(data: &WidgetData, now: DateTime<FixedOffset>) -> String {
    let remaining = floor_seconds(data.deadline - now);

    let days = remaining.div_euclid(SECONDS_PER_DAY);
    let seconds_of_day = remaining.rem_euclid(SECONDS_PER_DAY);

    format!(
        "{}:\n{} years, {} days, {}",
        data.carbon.description,
        days.div_euclid(365),
        days.rem_euclid(365),
        format_time_of_day(seconds_of_day)
    )
}

/// Whole seconds, rounded toward negative infinity.
fn floor_seconds(delta: TimeDelta) -> i64 {
    let secs = delta.num_seconds();
    if delta < TimeDelta::seconds(secs) {
        secs - 1
    } else {
        secs
    }
}

fn format_time_of_day(total_secs: i64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
