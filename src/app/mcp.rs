use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::app::adb::devices::list_devices;
use crate::app::adb::exec::Execution;
use crate::app::adb::screenshot::capture_screenshot;
use crate::app::error::AppError;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "android-devices-mcp-server";

pub const TOOL_GET_DEVICES: &str = "get_android_devices";
pub const TOOL_GET_SCREEN: &str = "get_android_screen";

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolCallParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl JsonRpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }
}

/// Response for a line that did not parse as a request. Sent with a null id
/// since none could be read.
pub fn parse_error_response() -> JsonRpcResponse {
    JsonRpcResponse::error(Value::Null, PARSE_ERROR, "Parse error", None)
}

/// Dispatches one request. Each request gets a fresh trace id carried in
/// logs and error payloads.
pub fn handle_request(
    execution: &dyn Execution,
    program: &str,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    let trace_id = Uuid::new_v4().to_string();
    match request.method.as_str() {
        "initialize" => handle_initialize(request.id),
        "tools/list" => handle_tools_list(request.id),
        "tools/call" => handle_tools_call(execution, program, request, &trace_id),
        _ => JsonRpcResponse::error(request.id, METHOD_NOT_FOUND, "Method not found", None),
    }
}

fn handle_initialize(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::result(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": true }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Value) -> JsonRpcResponse {
    JsonRpcResponse::result(
        id,
        json!({
            "tools": [
                {
                    "name": TOOL_GET_DEVICES,
                    "description": "Get a list of connected Android devices and emulators",
                    "inputSchema": {
                        "type": "object",
                        "properties": {}
                    }
                },
                {
                    "name": TOOL_GET_SCREEN,
                    "description": "Capture a screenshot from an Android device",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "device": {
                                "type": "string",
                                "description": "Device name/serial (e.g., 'emulator-5554'). If not provided, uses the first available device."
                            }
                        }
                    }
                }
            ]
        }),
    )
}

fn handle_tools_call(
    execution: &dyn Execution,
    program: &str,
    request: JsonRpcRequest,
    trace_id: &str,
) -> JsonRpcResponse {
    let params: ToolCallParams = match request.params {
        Some(value) => match serde_json::from_value(value) {
            Ok(params) => params,
            Err(_) => {
                return JsonRpcResponse::error(request.id, INVALID_PARAMS, "Invalid params", None)
            }
        },
        None => ToolCallParams::default(),
    };

    match params.name.as_str() {
        TOOL_GET_DEVICES => handle_get_devices(execution, program, request.id, trace_id),
        TOOL_GET_SCREEN => handle_get_screen(execution, program, request.id, &params, trace_id),
        other => JsonRpcResponse::error(
            request.id,
            INVALID_PARAMS,
            format!("Unknown tool: {other}"),
            None,
        ),
    }
}

fn handle_get_devices(
    execution: &dyn Execution,
    program: &str,
    id: Value,
    trace_id: &str,
) -> JsonRpcResponse {
    let devices = match list_devices(execution, program, trace_id) {
        Ok(devices) => devices,
        Err(err) => return internal_error(id, err),
    };
    let devices_json = match serde_json::to_string(&devices) {
        Ok(text) => text,
        Err(err) => {
            return internal_error(id, AppError::system(format!("Failed to serialize devices: {err}"), trace_id))
        }
    };
    JsonRpcResponse::result(
        id,
        json!({
            "content": [
                { "type": "text", "text": devices_json }
            ],
            "isError": false
        }),
    )
}

fn handle_get_screen(
    execution: &dyn Execution,
    program: &str,
    id: Value,
    params: &ToolCallParams,
    trace_id: &str,
) -> JsonRpcResponse {
    let mut serial = params
        .arguments
        .as_ref()
        .and_then(|args| args.get("device"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // No device requested: default to the first enumerated one.
    if serial.is_empty() {
        match list_devices(execution, program, trace_id) {
            Ok(devices) => match devices.first() {
                Some(first) => serial = first.device.clone(),
                None => {
                    return internal_error(
                        id,
                        AppError::capture_failed("No Android devices found", trace_id),
                    )
                }
            },
            Err(err) => return internal_error(id, err),
        }
    }

    match capture_screenshot(execution, program, &serial, trace_id) {
        Ok(data) => JsonRpcResponse::result(
            id,
            json!({
                "content": [
                    { "type": "image", "data": data, "mimeType": "image/png" }
                ],
                "isError": false
            }),
        ),
        Err(err) => internal_error(id, err),
    }
}

fn internal_error(id: Value, err: AppError) -> JsonRpcResponse {
    warn!(trace_id = %err.trace_id, code = %err.code, error = %err.error, "Tool call failed");
    let data = serde_json::to_value(&err).ok();
    JsonRpcResponse::error(id, INTERNAL_ERROR, "Internal error", data)
}
