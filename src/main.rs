//! Booking Engine HTTP server.
//!
//! Reads `BOOKING_ENGINE_CONFIG` (config directory), `BOOKING_ENGINE_ADDR`
//! (listen address) and `BOOKING_ENGINE_LOG_FORMAT` from the environment or
//! a `.env` file.

use std::env;

use booking_engine::api::{AppState, create_router};
use booking_engine::config::ConfigLoader;
use booking_engine::logging::{LogFormat, init_tracing};
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let log_format =
        LogFormat::from_env_value(env::var("BOOKING_ENGINE_LOG_FORMAT").ok().as_deref());
    init_tracing(log_format);

    let config_dir =
        env::var("BOOKING_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("BOOKING_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        engine = %config.engine().name,
        version = %config.engine().version,
        businesses = config.config().businesses().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Booking engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
