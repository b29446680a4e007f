use anyhow::{Context, Result};
use clap::Parser;
use climateclock_bot::bot::Bot;
use climateclock_bot::config::Config;
use climateclock_bot::feeds::climate_clock::ClimateClockFetcher;
use climateclock_bot::logging::{self, DEFAULT_LOG_FILE};
use climateclock_bot::reddit::{Credentials, RedditClient};
use std::path::PathBuf;

/// Reddit bot that answers !climateclock commands
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file, truncated on start
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Reddit app secret (overrides config file)
    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Reddit account password (overrides config file)
    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = logging::file_subscriber(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    let _log_guard = tracing::subscriber::set_default(subscriber);

    println!("Loading config...");
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::from_file(&config_path)?;
    if let Some(client_secret) = args.client_secret {
        config.reddit.client_secret = client_secret;
    }
    if let Some(password) = args.password {
        config.reddit.password = password;
    }
    config.validate()?;

    println!("Creating reddit client...");
    let reddit = RedditClient::connect(
        Credentials::from(&config.reddit),
        &config.user_agent(),
        &config.reddit.subreddits,
    )
    .await
    .context("failed to connect to reddit")?;

    println!("Listening for comments...");
    Bot::new(reddit, ClimateClockFetcher::new(), config.replies.max_news)
        .run()
        .await;

    Ok(())
}
