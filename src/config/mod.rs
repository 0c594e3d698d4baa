use std::env;

const DEFAULT_API_URL: &str =
    "https://api2.icodrops.com/portfolio/api/portfolioGroup/individualShare/main-jni9xrqfbu";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Telegram
    pub telegram_bot_token: String,
    pub webhook_public_url: Option<String>,

    // Portfolio source
    pub portfolio_api_url: String,
    pub poll_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8443".into())
                .parse()?,

            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN must be set"))?,
            webhook_public_url: env::var("WEBHOOK_PUBLIC_URL").ok(),

            portfolio_api_url: env::var("PORTFOLIO_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.into()),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .unwrap_or(120),
        })
    }

    /// Local webhook path. Contains the bot token so the handler can reject
    /// posts that don't come from Telegram.
    pub fn webhook_path(&self) -> String {
        format!("/webhook/{}", self.telegram_bot_token)
    }
}
