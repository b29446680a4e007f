use super::{parse_widget_data, FeedFetcher, WidgetData};
use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::error;

const CLIMATE_CLOCK_URL: &str = "https://api.climateclock.world/v1/clock?device=widget";

pub struct ClimateClockFetcher {
    url: String,
    client: reqwest::Client,
}

impl ClimateClockFetcher {
    pub fn new() -> Self {
        Self::with_url(CLIMATE_CLOCK_URL)
    }

    /// Point the fetcher at another `/v1/clock` endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            url: url.into(),
            client,
        }
    }
}

impl Default for ClimateClockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for ClimateClockFetcher {
    async fn fetch(&self) -> Result<WidgetData, FetchError> {
        let response = match self.client.get(&self.url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, "get_widget_data: request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(status = status.as_u16(), "get_widget_data: bad status code");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_widget_data(&body).inspect_err(|e| {
            error!(error = %e, body = %body, "get_widget_data: invalid json");
        })
    }
}
