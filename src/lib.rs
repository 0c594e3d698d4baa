pub mod analysis;
pub mod api;
pub mod config;
pub mod errors;
pub mod icodrops;
pub mod metrics;
pub mod models;
pub mod services;
pub mod telegram;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::services::watcher::WatcherHandle;
use crate::telegram::client::TelegramClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub watcher: WatcherHandle,
    pub telegram: Arc<TelegramClient>,
    pub metrics_handle: PrometheusHandle,
}
