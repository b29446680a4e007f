//! A small Reddit client: password-grant OAuth, a polled comment stream over a
//! set of subreddits, and comment replies.

use crate::bot::Platform;
use crate::config::RedditConfig;
use crate::error::RedditError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

const AUTH_BASE: &str = "https://www.reddit.com";
const API_BASE: &str = "https://oauth.reddit.com";

/// Comments requested per poll; Reddit's maximum for a listing.
const LISTING_LIMIT: &str = "100";
/// How many fullnames are remembered to filter out repeats across polls.
const SEEN_CAPACITY: usize = 301;
/// Refresh the token this long before Reddit says it expires.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

const MIN_POLL_DELAY: Duration = Duration::from_secs(1);
const MAX_POLL_DELAY: Duration = Duration::from_secs(16);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    /// `t1_` prefixed id, used as the reply target.
    #[serde(rename = "name")]
    pub fullname: String,
    pub body: String,
    pub permalink: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl From<&RedditConfig> for Credentials {
    fn from(config: &RedditConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth: String,
    pub api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: AUTH_BASE.to_string(),
            api: API_BASE.to_string(),
        }
    }
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Comment,
}

#[derive(Debug, Deserialize)]
struct CommentResponse {
    json: CommentResponseBody,
}

#[derive(Debug, Deserialize)]
struct CommentResponseBody {
    #[serde(default)]
    errors: Vec<Vec<serde_json::Value>>,
}

pub struct RedditClient {
    client: reqwest::Client,
    credentials: Credentials,
    endpoints: Endpoints,
    subreddits: String,
    token: Option<AccessToken>,
    stream: CommentStream,
}

impl RedditClient {
    /// Authenticate against reddit.com and return a client ready to stream.
    pub async fn connect(
        credentials: Credentials,
        user_agent: &str,
        subreddits: &[String],
    ) -> Result<Self, RedditError> {
        Self::connect_with(credentials, user_agent, subreddits, Endpoints::default()).await
    }

    pub async fn connect_with(
        credentials: Credentials,
        user_agent: &str,
        subreddits: &[String],
        endpoints: Endpoints,
    ) -> Result<Self, RedditError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(user_agent)
            .build()?;

        let mut reddit = Self {
            client,
            credentials,
            endpoints,
            subreddits: join_subreddits(subreddits),
            token: None,
            stream: CommentStream::new(MIN_POLL_DELAY, MAX_POLL_DELAY),
        };
        reddit.authenticate().await?;

        Ok(reddit)
    }

    /// Bounds for the delay between polls that find nothing new.
    pub fn with_poll_delay(mut self, min: Duration, max: Duration) -> Self {
        self.stream = CommentStream::new(min, max);
        self
    }

    async fn authenticate(&mut self) -> Result<(), RedditError> {
        let url = format!("{}/api/v1/access_token", self.endpoints.auth);
        let credentials = &self.credentials;

        let response = self
            .client
            .post(&url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RedditError::Auth("invalid client id or secret".to_string()));
        }
        if !status.is_success() {
            return Err(RedditError::Status(status.as_u16()));
        }

        // Bad user credentials still come back as 200 with an `error` field.
        let token: TokenResponse = response.json().await?;
        let value = match (token.access_token, token.error) {
            (Some(value), _) => value,
            (None, Some(error)) => return Err(RedditError::Auth(error)),
            (None, None) => return Err(RedditError::Auth("no access token".to_string())),
        };
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));

        debug!(expires_in = lifetime.as_secs(), "reddit: authenticated");
        self.token = Some(AccessToken {
            value,
            expires_at: Instant::now() + lifetime,
        });

        Ok(())
    }

    async fn access_token(&mut self) -> Result<String, RedditError> {
        let fresh = self
            .token
            .as_ref()
            .is_some_and(|t| t.expires_at.saturating_duration_since(Instant::now()) > TOKEN_MARGIN);
        if !fresh {
            self.authenticate().await?;
        }

        self.token
            .as_ref()
            .map(|t| t.value.clone())
            .ok_or_else(|| RedditError::Auth("no access token".to_string()))
    }

    /// Fetch the newest comments and feed them to the stream.
    async fn poll(&mut self) -> Result<bool, RedditError> {
        let token = self.access_token().await?;
        let url = format!("{}/r/{}/comments", self.endpoints.api, self.subreddits);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", LISTING_LIMIT), ("raw_json", "1")])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.token = None;
        }
        if !status.is_success() {
            return Err(RedditError::Status(status.as_u16()));
        }

        let listing: Listing = response.json().await?;
        let comments = listing.data.children.into_iter().map(|thing| thing.data);
        Ok(self.stream.ingest(comments))
    }
}

#[async_trait]
impl Platform for RedditClient {
    /// Block until a comment posted after the stream started arrives.
    async fn next_comment(&mut self) -> Result<Comment, RedditError> {
        loop {
            if let Some(comment) = self.stream.pending.pop_front() {
                return Ok(comment);
            }

            if self.stream.started {
                tokio::time::sleep(self.stream.delay).await;
            }
            self.stream.started = true;

            match self.poll().await {
                Ok(true) => self.stream.reset_delay(),
                Ok(false) => self.stream.back_off(),
                Err(e) => {
                    self.stream.back_off();
                    return Err(e);
                }
            }
        }
    }

    async fn reply(&mut self, comment: &Comment, text: &str) -> Result<(), RedditError> {
        let token = self.access_token().await?;
        let url = format!("{}/api/comment", self.endpoints.api);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .form(&[
                ("api_type", "json"),
                ("thing_id", comment.fullname.as_str()),
                ("text", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.token = None;
        }
        if !status.is_success() {
            return Err(RedditError::Status(status.as_u16()));
        }

        let body: CommentResponse = response.json().await?;
        match body.json.errors.first() {
            Some(error) => Err(RedditError::Api(describe_api_error(error))),
            None => Ok(()),
        }
    }
}

/// `["RATELIMIT", "you are doing that too much", "ratelimit"]` -> `RATELIMIT: you are doing that too much`
fn describe_api_error(error: &[serde_json::Value]) -> String {
    error
        .iter()
        .take(2)
        .filter_map(|part| part.as_str())
        .collect::<Vec<_>>()
        .join(": ")
}

fn join_subreddits(subreddits: &[String]) -> String {
    subreddits
        .iter()
        .map(|s| s.trim().trim_start_matches("r/"))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("+")
}

/// Turns repeated newest-first listings into an ordered stream of unseen comments.
struct CommentStream {
    pending: VecDeque<Comment>,
    seen: SeenSet,
    /// Comments from the first listing predate the stream and are only marked seen.
    skip_existing: bool,
    started: bool,
    delay: Duration,
    min_delay: Duration,
    max_delay: Duration,
}

impl CommentStream {
    fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            seen: SeenSet::new(SEEN_CAPACITY),
            skip_existing: true,
            started: false,
            delay: min_delay,
            min_delay,
            max_delay,
        }
    }

    /// Returns whether the listing held anything not seen before.
    fn ingest(&mut self, newest_first: impl DoubleEndedIterator<Item = Comment>) -> bool {
        let mut found = false;
        for comment in newest_first.rev() {
            if !self.seen.insert(&comment.fullname) {
                continue;
            }
            found = true;
            if !self.skip_existing {
                self.pending.push_back(comment);
            }
        }
        self.skip_existing = false;
        found
    }

    fn reset_delay(&mut self) {
        self.delay = self.min_delay;
    }

    fn back_off(&mut self) {
        self.delay = (self.delay * 2).min(self.max_delay);
    }
}

struct SeenSet {
    order: VecDeque<String>,
    members: HashSet<String>,
    capacity: usize,
}

impl SeenSet {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false if `key` was already present.
    fn insert(&mut self, key: &str) -> bool {
        if self.members.contains(key) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        self.order.push_back(key.to_string());
        self.members.insert(key.to_string());
        true
    }
}
