use std::sync::Arc;
use std::time::Duration;

use foliowatch::api::router::create_router;
use foliowatch::config::AppConfig;
use foliowatch::icodrops::PortfolioClient;
use foliowatch::metrics::init_metrics;
use foliowatch::services::watcher::{self, Watcher};
use foliowatch::telegram::TelegramClient;
use foliowatch::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = init_metrics();

    let http = reqwest::Client::new();
    let portfolio_client = PortfolioClient::new(http.clone(), config.portfolio_api_url.clone());
    let telegram = Arc::new(TelegramClient::new(http, config.telegram_bot_token.clone()));

    // --- Watcher actor: sole owner of the previous-snapshot baseline ---
    let (watcher_handle, command_rx) = watcher::command_channel();
    let poll_interval = Duration::from_secs(config.poll_interval_secs);

    let watcher = Watcher::new(portfolio_client, telegram.as_ref().clone());
    tokio::spawn(async move {
        watcher.run(command_rx, poll_interval).await;
    });

    // --- Telegram webhook registration ---
    if let Some(public_url) = &config.webhook_public_url {
        let url = format!(
            "{}{}",
            public_url.trim_end_matches('/'),
            config.webhook_path()
        );
        telegram.set_webhook(&url).await?;
        tracing::info!("Telegram webhook registered");
    } else {
        tracing::warn!("WEBHOOK_PUBLIC_URL not set — skipping Telegram webhook registration");
    }

    let state = AppState {
        config,
        watcher: watcher_handle,
        telegram,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
