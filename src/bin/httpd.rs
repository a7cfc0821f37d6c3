use std::sync::Arc;

use tracing::{error, info, warn};

use android_devices_mcp::app::adb::exec::SystemExecution;
use android_devices_mcp::app::adb::locator::adb_program;
use android_devices_mcp::app::config::{load_config, AppConfig};
use android_devices_mcp::app::http::{router, HttpState};
use android_devices_mcp::app::logging::init_logging;

#[tokio::main]
async fn main() {
    init_logging();

    let config = load_config().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to load config; using defaults");
        AppConfig::default()
    });
    let state = Arc::new(HttpState {
        execution: Arc::new(SystemExecution),
        adb_program: adb_program(&config.adb),
    });
    let app = router(state);

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "HTTP server listening");
    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "HTTP server terminated");
        std::process::exit(1);
    }
}
