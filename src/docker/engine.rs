use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};

use super::types::CommandOutput;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Verify that the runtime daemon is reachable.
pub fn ensure_available(bin: &str) -> Result<()> {
    let status = Command::new(bin)
        .args(["version", "--format", "{{.Server.Version}}"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to invoke `{bin}` — is it installed and on PATH?"))?;

    if !status.success() {
        bail!("{bin} daemon is not running (exit {status})");
    }
    Ok(())
}

/// Run `bin args...` to completion and capture both streams.
///
/// The child is killed once `timeout` elapses; the returned output then has
/// `timed_out` set and no exit code. Only a failure to spawn is an `Err`.
pub fn execute(bin: &str, args: &[String], timeout: Duration) -> Result<CommandOutput> {
    let rendered = render_command(bin, args);
    tracing::debug!(command = %rendered, "executing");

    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn `{rendered}`"))?;

    let stdout = child.stdout.take().context("stdout was not piped")?;
    let stderr = child.stderr.take().context("stderr was not piped")?;

    let stdout_handle = drain("stdout", stdout);
    let stderr_handle = drain("stderr", stderr);

    // --- poll loop ---------------------------------------------------------
    let start = Instant::now();
    let mut timed_out = false;

    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(command = %rendered, "failed to poll child: {e}");
                let _ = child.kill();
                let _ = child.wait();
                break None;
            }
        }

        if start.elapsed() > timeout {
            timed_out = true;
            let _ = child.kill();
            let _ = child.wait();
            break None;
        }

        std::thread::sleep(POLL_INTERVAL);
    };

    // --- finalize ----------------------------------------------------------
    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();

    let output = CommandOutput {
        exit_code: exit_status.and_then(|s| s.code()),
        stdout: stdout.trim().to_string(),
        stderr,
        timed_out,
    };

    if timed_out {
        tracing::error!(command = %rendered, ?timeout, "command timed out");
    } else if !output.success() {
        tracing::error!(
            command = %rendered,
            exit_code = ?output.exit_code,
            stderr = %output.stderr.trim(),
            "error running command"
        );
    }

    Ok(output)
}

/// Shell-style rendering of a command line for logs.
pub fn render_command(bin: &str, args: &[String]) -> String {
    let mut words = Vec::with_capacity(args.len() + 1);
    words.push(bin);
    words.extend(args.iter().map(String::as_str));
    shell_words::join(words)
}

/// Read `pipe` to EOF. Invalid UTF-8 is replaced rather than ending the
/// read, so the child never sees a closed pipe.
fn drain<R: Read + Send + 'static>(stream: &'static str, pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = String::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&line);
                    let text = text.strip_suffix('\n').unwrap_or(&*text);
                    tracing::debug!(stream, "{text}");
                    buf.push_str(text);
                    buf.push('\n');
                }
                Err(_) => break,
            }
        }
        buf
    })
}
