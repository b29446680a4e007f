pub mod bot;
pub mod commands;
pub mod config;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod markdown;
pub mod reddit;
pub mod replies;
