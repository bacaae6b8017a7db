use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: Option<String>,
    pub database_path: PathBuf,
    pub log_level: String,
    pub poll_timeout_secs: u64,
    pub delete_page_size: usize,
    pub view_page_size: usize,
    pub recent_quiz_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let bot_token = std::env::var("BOT_TOKEN").ok().filter(|t| !t.is_empty());

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            bot_token,
            database_path,
            log_level,
            poll_timeout_secs: env_parse("POLL_TIMEOUT_SECS", 30),
            delete_page_size: env_parse("DELETE_PAGE_SIZE", 5).max(1),
            view_page_size: env_parse("VIEW_PAGE_SIZE", 10).max(1),
            recent_quiz_limit: env_parse("RECENT_QUIZ_LIMIT", 30).max(1),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-bot")
        .join("vocab.db")
}
