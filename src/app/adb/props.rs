use std::path::Path;

use crate::app::adb::exec::Execution;
use crate::app::adb::runner::run_adb;
use crate::app::error::AppError;

/// Reads "1" on emulators.
pub const PROP_QEMU: &str = "ro.kernel.qemu";
pub const PROP_AVD_NAME: &str = "ro.boot.qemu.avd_name";
pub const PROP_BRAND: &str = "ro.product.brand";
pub const PROP_MODEL: &str = "ro.product.model";
pub const PROP_ANDROID_VERSION: &str = "ro.build.version.release";
pub const PROP_SDK_LEVEL: &str = "ro.build.version.sdk";
pub const PROP_CPU_ABI: &str = "ro.product.cpu.abi";

/// One `getprop` query against one device, trimmed. Failures carry the
/// property key for diagnostics.
pub fn read_property(
    execution: &dyn Execution,
    program: &Path,
    serial: &str,
    key: &str,
    trace_id: &str,
) -> Result<String, AppError> {
    let args = vec![
        "-s".to_string(),
        serial.to_string(),
        "shell".to_string(),
        "getprop".to_string(),
        key.to_string(),
    ];
    let output = run_adb(execution, program, &args, trace_id)
        .map_err(|err| AppError::property_query(format!("getprop {key}: {}", err.error), trace_id))?;
    Ok(output.combined_text().trim().to_string())
}
