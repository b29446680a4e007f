pub mod climate_clock;

use crate::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Number;

/// One snapshot of the Climate Clock widget payload.
///
/// Built only through [`parse_widget_data`], so every section is present and typed.
#[derive(Debug, Clone)]
pub struct WidgetData {
    pub carbon: CarbonDeadline,
    pub renewables: Metric,
    pub newsfeed: Newsfeed,
    pub gcf: Metric,
    pub indie: Metric,
    pub deadline: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarbonDeadline {
    pub description: String,
    pub timestamp: String,
}

/// A module whose value is a single number (`initial`).
#[derive(Debug, Clone, Deserialize)]
pub struct Metric {
    pub description: String,
    pub initial: Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Newsfeed {
    pub newsfeed: Vec<NewsItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub headline: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    modules: Modules,
}

#[derive(Debug, Deserialize)]
struct Modules {
    carbon_deadline_1: CarbonDeadline,
    renewables_1: Metric,
    newsfeed_1: Newsfeed,
    green_climate_fund_1: Metric,
    indigenous_land_1: Metric,
}

/// Parse a `/v1/clock` response body into a [`WidgetData`].
pub fn parse_widget_data(body: &str) -> Result<WidgetData, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    let modules = envelope.data.modules;
    let deadline = parse_deadline(&modules.carbon_deadline_1.timestamp)?;

    Ok(WidgetData {
        carbon: modules.carbon_deadline_1,
        renewables: modules.renewables_1,
        newsfeed: modules.newsfeed_1,
        gcf: modules.green_climate_fund_1,
        indie: modules.indigenous_land_1,
        deadline,
    })
}

/// Offset-less ISO timestamps are read as UTC.
fn parse_deadline(timestamp: &str) -> Result<DateTime<FixedOffset>, FetchError> {
    if let Ok(deadline) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(deadline);
    }

    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|_| FetchError::InvalidDeadline(timestamp.to_string()))
}

impl WidgetData {
    /// The current instant in the deadline's own offset.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(self.deadline.offset())
    }
}

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self) -> Result<WidgetData, FetchError>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_widget_data() {
        let data = parse_widget_data(fixtures::CLOCK_BODY).unwrap();
        assert_eq!(data.newsfeed.newsfeed.len(), 7);
        assert_eq!(data.newsfeed.newsfeed[0].source, "Reuters");
        assert_eq!(data.gcf.initial.to_string(), "10.3");
        assert_eq!(data.indie.description, "Land protected by indigenous people.");
        assert_eq!(data.deadline.year(), 2029);
        assert_eq!(data.deadline.second(), 3);
    }

    #[test]
    fn test_parse_missing_module_fails() {
        let body = fixtures::CLOCK_BODY.replace("indigenous_land_1", "indigenous_land_2");
        assert!(matches!(
            parse_widget_data(&body),
            Err(FetchError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_parse_mistyped_field_fails() {
        let body = fixtures::CLOCK_BODY.replace("\"initial\": 10.3", "\"initial\": \"10.3\"");
        assert!(parse_widget_data(&body).is_err());
    }

    #[test]
    fn test_parse_not_json_fails() {
        assert!(parse_widget_data("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_parse_bad_timestamp_fails() {
        let body = fixtures::CLOCK_BODY.replace("2029-07-22T16:00:03+00:00", "soon");
        assert!(matches!(
            parse_widget_data(&body),
            Err(FetchError::InvalidDeadline(ts)) if ts == "soon"
        ));
    }

    #[test]
    fn test_parse_deadline_with_offset() {
        let deadline = parse_deadline("2029-07-22T18:00:00+02:00").unwrap();
        assert_eq!(deadline.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(deadline.hour(), 18);
    }

    #[test]
    fn test_parse_deadline_without_offset_is_utc() {
        let deadline = parse_deadline("2029-07-22T16:00:00").unwrap();
        assert_eq!(deadline.offset().local_minus_utc(), 0);
        assert_eq!(deadline.hour(), 16);
    }

    #[test]
    fn test_now_uses_deadline_offset() {
        let mut data = fixtures::widget_data();
        data.deadline = parse_deadline("2029-07-22T18:00:00+02:00").unwrap();
        assert_eq!(data.now().offset().local_minus_utc(), 2 * 3600);
    }
}
