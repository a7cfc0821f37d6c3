use std::path::Path;

use crate::app::adb::exec::{CommandOutput, Execution};
use crate::app::error::AppError;

/// Runs adb to completion through the injected execution strategy. Blocking,
/// no timeout: a hung adb hangs the request, matching the rest of the
/// pipeline.
pub fn run_adb(
    execution: &dyn Execution,
    program: &Path,
    args: &[String],
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let output = execution.run(program, args).map_err(|err| {
        AppError::execution_failed(
            format!("Failed to run {}: {err}", program.display()),
            trace_id,
        )
    })?;

    if output.exit_code != Some(0) {
        let status = match output.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "signal".to_string(),
        };
        return Err(AppError::execution_failed(
            format!(
                "adb {} failed with {status}, output: {}",
                args.join(" "),
                output.combined_text().trim()
            ),
            trace_id,
        ));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adb::exec::testing::FakeExecution;

    #[test]
    fn passes_captured_bytes_through_on_success() {
        let execution = FakeExecution::new();
        execution.stub("devices -l", b"List of devices attached\n");

        let output = run_adb(
            &execution,
            Path::new("adb"),
            &["devices".to_string(), "-l".to_string()],
            "trace-1",
        )
        .expect("success");

        assert_eq!(output.stdout, b"List of devices attached\n");
        assert_eq!(output.exit_code, Some(0));
    }

    #[test]
    fn nonzero_exit_reports_output() {
        let execution = FakeExecution::new();
        execution.stub_failure("devices -l", "error: cannot connect to daemon");

        let err = run_adb(
            &execution,
            Path::new("adb"),
            &["devices".to_string(), "-l".to_string()],
            "trace-2",
        )
        .expect_err("failure");

        assert_eq!(err.code, "ERR_EXEC_FAILED");
        assert!(err.error.contains("exit code 1"));
        assert!(err.error.contains("cannot connect to daemon"));
        assert_eq!(err.trace_id, "trace-2");
    }
}
