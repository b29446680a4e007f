use crate::feeds::{Metric, WidgetData};

const KM2_PER_UNIT: i64 = 1_000_000;

pub fn green_climate_fund(data: &WidgetData) -> String {
    format!("{}:\n${} billion", data.gcf.description, data.gcf.initial)
}

/// Indigenous-protected land in km², from millions of km² upstream.
pub fn indigenous_land(data: &WidgetData) -> String {
    let km2 = whole_units(&data.indie).saturating_mul(KM2_PER_UNIT);
    format!(
        "{}:\n{} km^2",
        without_last_char(&data.indie.description),
        group_thousands(km2)
    )
}

pub fn renewables(data: &WidgetData) -> String {
    format!(
        "{}:\n{}%",
        without_last_char(&data.renewables.description),
        data.renewables.initial
    )
}

// Upstream descriptions for these modules end in a period.
fn without_last_char(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The metric's value truncated toward zero.
fn whole_units(metric: &Metric) -> i64 {
    metric
        .initial
        .as_i64()
        .unwrap_or_else(|| metric.initial.as_f64().unwrap_or_default().trunc() as i64)
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}
