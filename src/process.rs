//! External process execution with interrupt support

use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::{GbrowseError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Shared flag tripped by an interrupt signal
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Trip this token on SIGINT. May only be called once per process.
    pub fn install_interrupt_handler(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || token.cancel())
            .map_err(|e| GbrowseError::config(format!("cannot install interrupt handler: {}", e)))
    }
}

/// Runs external programs and returns their trimmed standard output
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    cancel: CancelToken,
}

impl CommandRunner {
    pub fn new(cancel: CancelToken) -> Self {
        CommandRunner { cancel }
    }

    /// Run `program` with `args` and wait for it.
    ///
    /// # Returns
    /// * `Ok(String)` - stdout with surrounding whitespace removed
    /// * `Err(Execution)` - spawn failure or non-zero exit, with stderr attached
    /// * `Err(Cancelled)` - the token was tripped; the child has been killed
    pub fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> Result<String> {
        let command_line = command_line(program, args);
        if self.cancel.is_cancelled() {
            return Err(GbrowseError::Cancelled);
        }

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                debug!(command = %command_line, error = %e, "failed to spawn");
                GbrowseError::execution(&command_line, e.to_string())
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if self.cancel.is_cancelled() {
                        let _ = child.kill();
                        let _ = child.wait();
                        debug!(command = %command_line, "killed on interrupt");
                        return Err(GbrowseError::Cancelled);
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(GbrowseError::execution(&command_line, e.to_string())),
            }
        };

        let stdout = String::from_utf8_lossy(&stdout.join().unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).into_owned();

        if !status.success() {
            let detail = match status.code() {
                Some(code) => format!("exit status {}: {}", code, stderr.trim()),
                None => format!("terminated by signal: {}", stderr.trim()),
            };
            debug!(command = %command_line, detail = %detail, "command failed");
            return Err(GbrowseError::execution(command_line, detail));
        }

        let result = stdout.trim().to_string();
        debug!(command = %command_line, result = %result, "command finished");
        Ok(result)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn command_line<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(
        args.iter()
            .map(|arg| arg.as_ref().to_string_lossy().into_owned()),
    );
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line("git", &["rev-parse", "@"]),
            "git rev-parse @".to_string()
        );
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_missing_program_is_execution_error() {
        let runner = CommandRunner::default();
        let err = runner
            .run("gbrowse-definitely-not-a-program", &["x"])
            .unwrap_err();
        assert!(matches!(err, GbrowseError::Execution { .. }));
        assert!(err.to_string().contains("gbrowse-definitely-not-a-program x"));
    }

    #[test]
    fn test_cancelled_before_spawn() {
        let token = CancelToken::new();
        token.cancel();
        let runner = CommandRunner::new(token);
        let err = runner.run("echo", &["hi"]).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[cfg(unix)]
    #[test]
    fn test_trims_output() {
        let runner = CommandRunner::default();
        assert_eq!(runner.run("echo", &["  master"]).unwrap(), "master");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_captures_stderr() {
        let runner = CommandRunner::default();
        let err = runner
            .run("sh", &["-c", "echo broken >&2; exit 3"])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exit status 3"), "got: {}", msg);
        assert!(msg.contains("broken"), "got: {}", msg);
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupt_kills_running_child() {
        let token = CancelToken::new();
        let runner = CommandRunner::new(token.clone());
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            token.cancel();
        });

        let started = std::time::Instant::now();
        let err = runner.run("sleep", &["10"]).unwrap_err();
        canceller.join().unwrap();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
