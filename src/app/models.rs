use serde::{Deserialize, Serialize};

/// One discovered device or emulator. `device` and `run_status` always come
/// from the `adb devices -l` listing; the remaining fields are best-effort
/// getprop results and stay empty when a query fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub device: String,
    pub model: String,
    pub arch: String,
    pub android_version: String,
    pub sdk_level: String,
    pub run_status: String,
}
