use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one child process run to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Text view over both streams, for callers that parse line output.
    pub fn combined_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

/// Process-execution seam. Production code uses [`SystemExecution`]; tests
/// substitute a scripted implementation instead of mutating process-wide
/// state.
pub trait Execution: Send + Sync {
    /// Resolve a program name or path against the search path.
    fn locate(&self, program: &str) -> Result<PathBuf, String>;

    /// Run the program synchronously to completion, capturing both streams.
    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;
}

#[derive(Debug, Default)]
pub struct SystemExecution;

impl Execution for SystemExecution {
    fn locate(&self, program: &str) -> Result<PathBuf, String> {
        which::which(program).map_err(|err| err.to_string())
    }

    fn run(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted [`Execution`] keyed by the space-joined argument vector.
    /// Unscripted invocations fail with exit code 1 so a test that forgets a
    /// stub surfaces the offending command in the error message.
    pub struct FakeExecution {
        locate_error: Option<String>,
        outputs: Mutex<HashMap<String, CommandOutput>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeExecution {
        pub fn new() -> Self {
            Self {
                locate_error: None,
                outputs: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn unresolvable(message: &str) -> Self {
            Self {
                locate_error: Some(message.to_string()),
                outputs: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn stub(&self, args: &str, stdout: &[u8]) {
            self.outputs.lock().expect("outputs").insert(
                args.to_string(),
                CommandOutput {
                    stdout: stdout.to_vec(),
                    stderr: Vec::new(),
                    exit_code: Some(0),
                },
            );
        }

        pub fn stub_failure(&self, args: &str, stderr: &str) {
            self.outputs.lock().expect("outputs").insert(
                args.to_string(),
                CommandOutput {
                    stdout: Vec::new(),
                    stderr: stderr.as_bytes().to_vec(),
                    exit_code: Some(1),
                },
            );
        }

        pub fn stub_getprop(&self, serial: &str, key: &str, value: &str) {
            self.stub(
                &format!("-s {serial} shell getprop {key}"),
                format!("{value}\n").as_bytes(),
            );
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls").clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().expect("calls").len()
        }
    }

    impl Execution for FakeExecution {
        fn locate(&self, program: &str) -> Result<PathBuf, String> {
            match &self.locate_error {
                Some(message) => Err(message.clone()),
                None => Ok(PathBuf::from(program)),
            }
        }

        fn run(&self, _program: &Path, args: &[String]) -> io::Result<CommandOutput> {
            let key = args.join(" ");
            self.calls.lock().expect("calls").push(key.clone());
            match self.outputs.lock().expect("outputs").get(&key) {
                Some(output) => Ok(output.clone()),
                None => Ok(CommandOutput {
                    stdout: Vec::new(),
                    stderr: format!("unexpected command: {key}").into_bytes(),
                    exit_code: Some(1),
                }),
            }
        }
    }
}
