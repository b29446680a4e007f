use crate::commands::ReplyKind;
use crate::error::RedditError;
use crate::feeds::FeedFetcher;
use crate::markdown;
use crate::reddit::Comment;
use crate::replies;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Where comments come from and replies go.
#[async_trait]
pub trait Platform: Send {
    async fn next_comment(&mut self) -> Result<Comment, RedditError>;
    async fn reply(&mut self, comment: &Comment, text: &str) -> Result<(), RedditError>;
}

pub struct Bot<P, F> {
    platform: P,
    fetcher: F,
    max_news: usize,
}

impl<P, F> Bot<P, F>
where
    P: Platform,
    F: FeedFetcher,
{
    pub fn new(platform: P, fetcher: F, max_news: usize) -> Self {
        Self {
            platform,
            fetcher,
            max_news,
        }
    }

    /// Answer comments one at a time, forever.
    pub async fn run(mut self) {
        loop {
            match self.platform.next_comment().await {
                Ok(comment) => {
                    self.handle_comment(&comment).await;
                }
                Err(e) => warn!(error = %e, "main: comment stream error"),
            }
        }
    }

    /// Reply to `comment` if it holds a command. Returns the kind answered.
    pub async fn handle_comment(&mut self, comment: &Comment) -> Option<ReplyKind> {
        debug!(permalink = %comment.permalink, "main: received comment");
        let body = markdown::unmark(&comment.body);
        let kind = ReplyKind::from_command(&body)?;

        let reply = replies::render(kind, &self.fetcher, self.max_news).await?;
        if reply.is_empty() {
            return None;
        }

        if let Err(e) = self.platform.reply(comment, &reply).await {
            error!(error = %e, permalink = %comment.permalink, "main: reply failed");
            return None;
        }

        debug!("main: parsed command, replied");
        info!("main: {}: {}", kind, comment.permalink);
        Some(kind)
    }
}
