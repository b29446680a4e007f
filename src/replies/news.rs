use crate::feeds::WidgetData;

pub const DEFAULT_MAX_NEWS: usize = 5;

/// The first `max_news` headlines as markdown links, in feed order.
pub fn newsfeed(data: &WidgetData, max_news: usize) -> String {
    data.newsfeed
        .newsfeed
        .iter()
        .take(max_news)
        .map(|news| format!("{}: [{}]({})", news.source, news.headline, news.link))
        .collect::<Vec<_>>()
        .join("\n\n")
}
