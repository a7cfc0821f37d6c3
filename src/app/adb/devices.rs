use std::path::Path;

use tracing::warn;

use crate::app::adb::exec::Execution;
use crate::app::adb::parse::parse_device_lines;
use crate::app::adb::props::{self, read_property};
use crate::app::adb::runner::run_adb;
use crate::app::error::AppError;
use crate::app::models::Device;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDetails {
    pub name: String,
    pub android_version: String,
    pub sdk_level: String,
    pub model: String,
    pub arch: String,
}

/// Resolves the getprop-backed fields for one device, sequentially.
///
/// The emulator flag gates the name derivation, so its failure aborts the
/// whole resolution. The avd-name query is only an enhancement with a
/// brand/model fallback behind it and its failure is logged and swallowed.
/// Everything after the name has no fallback; the first failure aborts the
/// remaining queries.
pub fn resolve_details(
    execution: &dyn Execution,
    program: &Path,
    serial: &str,
    trace_id: &str,
) -> Result<DeviceDetails, AppError> {
    let qemu = read_property(execution, program, serial, props::PROP_QEMU, trace_id)?;
    let is_emulator = qemu == "1";

    let mut name = String::new();
    if is_emulator {
        match read_property(execution, program, serial, props::PROP_AVD_NAME, trace_id) {
            Ok(avd_name) => name = avd_name.replace('_', " "),
            Err(err) => warn!(
                trace_id = %trace_id,
                serial = %serial,
                error = %err,
                "Failed to read avd name; falling back to brand/model"
            ),
        }
    }

    if name.is_empty() {
        let brand = read_property(execution, program, serial, props::PROP_BRAND, trace_id)?;
        let model = read_property(execution, program, serial, props::PROP_MODEL, trace_id)?;
        name = format!("{brand} {model}");
    }

    let android_version =
        read_property(execution, program, serial, props::PROP_ANDROID_VERSION, trace_id)?;
    let sdk_level = read_property(execution, program, serial, props::PROP_SDK_LEVEL, trace_id)?;
    let model = read_property(execution, program, serial, props::PROP_MODEL, trace_id)?;
    let arch = read_property(execution, program, serial, props::PROP_CPU_ABI, trace_id)?;

    Ok(DeviceDetails {
        name,
        android_version,
        sdk_level,
        model,
        arch,
    })
}

/// Enumerates attached devices, rebuilding the list from scratch on every
/// call. A per-device detail failure degrades that entry to serial plus run
/// status; it never drops the device or fails the enumeration.
pub fn list_devices(
    execution: &dyn Execution,
    program_name: &str,
    trace_id: &str,
) -> Result<Vec<Device>, AppError> {
    let program = execution.locate(program_name).map_err(|err| {
        AppError::adb_not_found(format!("adb command not found: {err}"), trace_id)
    })?;

    let args = vec!["devices".to_string(), "-l".to_string()];
    let output = run_adb(execution, &program, &args, trace_id)?;

    let mut devices = Vec::new();
    for (serial, state) in parse_device_lines(&output.combined_text()) {
        let mut device = Device {
            device: serial.clone(),
            run_status: state,
            ..Device::default()
        };
        match resolve_details(execution, &program, &serial, trace_id) {
            Ok(details) => {
                device.name = details.name;
                device.android_version = details.android_version;
                device.sdk_level = details.sdk_level;
                device.model = details.model;
                device.arch = details.arch;
            }
            Err(err) => warn!(
                trace_id = %trace_id,
                serial = %serial,
                error = %err,
                "Failed to resolve device details"
            ),
        }
        devices.push(device);
    }

    Ok(devices)
}
