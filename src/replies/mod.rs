//! Reply text for each `!climateclock` command.
//!
//! The section formatters are pure functions of a [`WidgetData`] snapshot.
//! [`render`] is the only place that fetches, and it fetches exactly once.

mod deadline;
mod metrics;
mod news;

pub use deadline::deadline;
pub use metrics::{green_climate_fund, indigenous_land, renewables};
pub use news::{newsfeed, DEFAULT_MAX_NEWS};

use crate::commands::ReplyKind;
use crate::feeds::{FeedFetcher, WidgetData};
use chrono::{DateTime, FixedOffset};

/// Every section against the same snapshot, news last.
pub fn all(data: &WidgetData, now: DateTime<FixedOffset>, max_news: usize) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}\n\nNews:\n\n{}",
        deadline(data, now),
        renewables(data),
        green_climate_fund(data),
        indigenous_land(data),
        newsfeed(data, max_news)
    )
}

pub fn format(kind: ReplyKind, data: &WidgetData, now: DateTime<FixedOffset>, max_news: usize) -> String {
    match kind {
        ReplyKind::All => all(data, now, max_news),
        ReplyKind::Feed => newsfeed(data, max_news),
        ReplyKind::Deadline => deadline(data, now),
        ReplyKind::Gcf => green_climate_fund(data),
        ReplyKind::Indie => indigenous_land(data),
        ReplyKind::Renewables => renewables(data),
    }
}

/// Fetch a fresh snapshot and format the reply for `kind`.
///
/// Returns `None` when the fetch fails; the fetcher has already logged why.
pub async fn render<F>(kind: ReplyKind, fetcher: &F, max_news: usize) -> Option<String>
where
    F: FeedFetcher + ?Sized,
{
    let data = fetcher.fetch().await.ok()?;
    Some(format(kind, &data, data.now(), max_news))
}
