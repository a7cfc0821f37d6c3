use std::io::{self, BufRead, Write};

use tracing::{error, info, warn};

use android_devices_mcp::app::adb::exec::SystemExecution;
use android_devices_mcp::app::adb::locator::adb_program;
use android_devices_mcp::app::config::{load_config, AppConfig};
use android_devices_mcp::app::logging::init_logging;
use android_devices_mcp::app::mcp;

fn main() {
    init_logging();

    let config = load_config().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to load config; using defaults");
        AppConfig::default()
    });
    let program = adb_program(&config.adb);
    let execution = SystemExecution;

    info!(adb = %program, "MCP server reading JSON-RPC from stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(error = %err, "Failed to read from stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<mcp::JsonRpcRequest>(&line) {
            Ok(request) => mcp::handle_request(&execution, &program, request),
            Err(_) => mcp::parse_error_response(),
        };

        if let Err(err) = write_response(&mut stdout, &response) {
            error!(error = %err, "Failed to write response; shutting down");
            break;
        }
    }
}

fn write_response(out: &mut impl Write, response: &mcp::JsonRpcResponse) -> io::Result<()> {
    let payload = serde_json::to_string(response)?;
    writeln!(out, "{payload}")?;
    out.flush()
}
