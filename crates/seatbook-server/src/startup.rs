//! Server startup utilities.

use seatbook_config::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set and the config has none.
pub const DEFAULT_LOG_FILTER: &str = "info,seatbook=debug,tower_http=debug";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `observability.log_level`. The output format is
/// `json` or human-readable depending on `observability.log_format`.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.observability.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    if config.observability.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____            __  __                __
  / ___/___  ____ _/ /_/ /_  ____  ____  / /__
  \__ \/ _ \/ __ `/ __/ __ \/ __ \/ __ \/ //_/
 ___/ /  __/ /_/ / /_/ /_/ / /_/ / /_/ / ,<
/____/\___/\__,_/\__/_.___/\____/\____/_/|_|
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let port = config.server.port;
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    http://{}/api/v1", config.server.addr());
    info!("Health:      http://{}:{}/health", config.server.host, port);
    info!("Readiness:   http://{}:{}/ready", config.server.host, port);
    info!("{}", separator);
}
