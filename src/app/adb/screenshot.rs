use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::app::adb::exec::Execution;
use crate::app::adb::runner::run_adb;
use crate::app::error::AppError;

/// Streams a screenshot straight off the device (`exec-out`, no on-device
/// temp file) and returns the PNG bytes as standard base64, untransformed.
/// The serial is not validated up front; a bad one surfaces as an adb
/// failure.
pub fn capture_screenshot(
    execution: &dyn Execution,
    program_name: &str,
    serial: &str,
    trace_id: &str,
) -> Result<String, AppError> {
    let program = execution.locate(program_name).map_err(|err| {
        AppError::adb_not_found(format!("adb command not found: {err}"), trace_id)
    })?;

    let args = vec![
        "-s".to_string(),
        serial.to_string(),
        "exec-out".to_string(),
        "screencap".to_string(),
        "-p".to_string(),
    ];
    let output = run_adb(execution, &program, &args, trace_id).map_err(|err| {
        AppError::capture_failed(
            format!("Failed to capture screenshot from device {serial}: {}", err.error),
            trace_id,
        )
    })?;

    if output.stdout.is_empty() {
        return Err(AppError::capture_failed(
            format!("Screenshot from device {serial} produced no data"),
            trace_id,
        ));
    }

    Ok(STANDARD.encode(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adb::exec::testing::FakeExecution;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x01\xff\xfe binary payload";

    #[test]
    fn encoded_output_round_trips_byte_for_byte() {
        let execution = FakeExecution::new();
        execution.stub("-s emulator-5554 exec-out screencap -p", PNG_BYTES);

        let encoded =
            capture_screenshot(&execution, "adb", "emulator-5554", "trace-1").expect("capture");

        assert_eq!(STANDARD.decode(encoded).expect("decode"), PNG_BYTES);
    }

    #[test]
    fn empty_output_is_a_capture_failure() {
        let execution = FakeExecution::new();
        execution.stub("-s emulator-5554 exec-out screencap -p", b"");

        let err = capture_screenshot(&execution, "adb", "emulator-5554", "trace-2")
            .expect_err("failure");

        assert_eq!(err.code, "ERR_CAPTURE_FAILED");
        assert!(err.error.contains("no data"));
    }

    #[test]
    fn adb_failure_reports_the_device() {
        let execution = FakeExecution::new();
        execution.stub_failure(
            "-s bogus exec-out screencap -p",
            "error: device 'bogus' not found",
        );

        let err = capture_screenshot(&execution, "adb", "bogus", "trace-3").expect_err("failure");

        assert_eq!(err.code, "ERR_CAPTURE_FAILED");
        assert!(err.error.contains("bogus"));
        assert!(err.error.contains("not found"));
    }

    #[test]
    fn unresolvable_adb_fails_before_any_command_runs() {
        let execution = FakeExecution::unresolvable("cannot find binary path");

        let err = capture_screenshot(&execution, "adb", "emulator-5554", "trace-4")
            .expect_err("failure");

        assert_eq!(err.code, "ERR_ADB_NOT_FOUND");
        assert_eq!(execution.call_count(), 0);
    }
}
