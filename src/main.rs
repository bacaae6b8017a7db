use vocab_bot::chat::Dispatcher;
use vocab_bot::config::Config;
use vocab_bot::db::Database;
use vocab_bot::logging;
use vocab_bot::sessions::SessionMap;
use vocab_bot::telegram::{self, TelegramClient};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let Some(token) = config.bot_token.clone() else {
        tracing::error!("BOT_TOKEN is not set");
        std::process::exit(1);
    };

    let db = match Database::open(&config.database_path).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!(
                error = %err,
                path = %config.database_path.display(),
                "failed to open database"
            );
            std::process::exit(1);
        }
    };

    let client = match TelegramClient::new(&token, config.poll_timeout_secs) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "failed to build API client");
            std::process::exit(1);
        }
    };

    let dispatcher = Dispatcher::new(db, SessionMap::new(), &config);

    tracing::info!("vocab-bot started");
    tokio::select! {
        _ = telegram::run(&client, &dispatcher, config.poll_timeout_secs) => {}
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }
    tracing::info!("vocab-bot stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
