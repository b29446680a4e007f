use crate::replies::DEFAULT_MAX_NEWS;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "climateclock-bot";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub application: Application,
    pub reddit: RedditConfig,
    #[serde(default)]
    pub replies: RepliesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub name: String,
    pub version: String,
    pub author: Author,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub username: String,
    pub reddit_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    /// Boards to watch, without the `r/` prefix.
    pub subreddits: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepliesConfig {
    #[serde(default = "default_max_news")]
    pub max_news: usize,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            max_news: default_max_news(),
        }
    }
}

fn default_max_news() -> usize {
    DEFAULT_MAX_NEWS
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Parse only; call [`Config::validate`] once overrides are applied.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// `./config.toml` if present, otherwise the per-user config directory.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .unwrap_or(local)
    }

    pub fn validate(&self) -> Result<()> {
        let reddit = &self.reddit;
        if reddit.subreddits.iter().all(|s| s.trim().is_empty()) {
            bail!("reddit.subreddits must name at least one subreddit");
        }
        for (field, value) in [
            ("client_id", &reddit.client_id),
            ("client_secret", &reddit.client_secret),
            ("username", &reddit.username),
            ("password", &reddit.password),
        ] {
            if value.is_empty() {
                bail!("reddit.{field} must not be empty");
            }
        }
        Ok(())
    }

    /// User agent in the format Reddit asks script apps to use.
    pub fn user_agent(&self) -> String {
        let app = &self.application;
        format!(
            "script:{}:u/{}:v{} (by {} {})",
            app.name, self.reddit.username, app.version, app.author.username, app.author.reddit_handle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[application]
name = "climateclock-bot"
version = "1.2.0"

[application.author]
username = "alice"
reddit_handle = "u/alice"

[reddit]
client_id = "id"
client_secret = "secret"
username = "climateclockbot"
password = "hunter2"
subreddits = ["climate", "environment"]
"#;

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.name, "climateclock-bot");
        assert_eq!(config.reddit.subreddits, vec!["climate", "environment"]);
        assert_eq!(config.replies.max_news, 5);
    }

    #[test]
    fn test_replies_section_overrides_max_news() {
        let contents = format!("{SAMPLE}\n[replies]\nmax_news = 3\n");
        let config = Config::from_toml(&contents).unwrap();
        assert_eq!(config.replies.max_news, 3);
    }

    #[test]
    fn test_user_agent() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(
            config.user_agent(),
            "script:climateclock-bot:u/climateclockbot:v1.2.0 (by alice u/alice)"
        );
    }

    #[test]
    fn test_missing_section_fails() {
        let contents = SAMPLE.replace("[reddit]", "[praw]");
        assert!(Config::from_toml(&contents).is_err());
    }

    #[test]
    fn test_empty_subreddits_fails() {
        let contents = SAMPLE.replace(r#"["climate", "environment"]"#, "[]");
        let err = Config::from_toml(&contents).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains("subreddits"));
    }

    #[test]
    fn test_empty_password_fails() {
        let contents = SAMPLE.replace(r#"password = "hunter2""#, r#"password = """#);
        let err = Config::from_toml(&contents).unwrap().validate().unwrap_err();
        assert!(err.to_string().contains("reddit.password"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.reddit.username, "climateclockbot");
    }

    #[test]
    fn test_from_missing_file_names_path() {
        let err = Config::from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
