use crate::ports::outbound::CommandOutput;
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// Exit code reported for commands that never produced a status
pub const NO_EXIT_CODE: i32 = -1;

/// Runs `program` with `args`, capturing both streams, bounded by `timeout`
///
/// Both pipes are drained on background threads while waiting, so a large
/// output cannot block the child. The deadline covers the whole call: a
/// backgrounded grandchild that keeps a pipe open past it counts as a
/// timeout too. On unix the child leads its own process group and the
/// whole group is killed when the deadline passes.
///
/// `label` is the command text used in errors.
pub fn run_process(
    program: &str,
    args: &[&str],
    label: &str,
    timeout: Duration,
) -> Result<CommandOutput> {
    let deadline = Instant::now() + timeout;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command.spawn().map_err(|e| AuditError::RemoteExecution {
        command: label.to_string(),
        exit_code: NO_EXIT_CODE,
        stderr: format!("failed to launch {}: {}", program, e),
    })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            terminate(&mut child);
            return Err(timed_out(label, timeout));
        }
        Err(e) => {
            terminate(&mut child);
            return Err(AuditError::RemoteExecution {
                command: label.to_string(),
                exit_code: NO_EXIT_CODE,
                stderr: format!("failed to wait for process: {}", e),
            }
            .into());
        }
    };

    let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline)) else {
        kill_group(child.id());
        return Err(timed_out(label, timeout));
    };

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code: status.code().unwrap_or(NO_EXIT_CODE),
    })
}

fn timed_out(label: &str, timeout: Duration) -> anyhow::Error {
    tracing::warn!(command = %label, ?timeout, "command timed out");
    AuditError::RemoteExecution {
        command: label.to_string(),
        exit_code: NO_EXIT_CODE,
        stderr: format!("timed out after {}s", timeout.as_secs_f64()),
    }
    .into()
}

fn terminate(child: &mut Child) {
    kill_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_group(leader: u32) {
    let Ok(pgid) = libc::pid_t::try_from(leader) else {
        return;
    };
    // SAFETY: kill(2) takes plain integers; a negative pid targets the group.
    unsafe {
        libc::kill(-pgid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_group(_leader: u32) {}

fn drain<R: Read + Send + 'static>(mut stream: R) -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = stream.read_to_end(&mut buffer);
        let _ = sender.send(String::from_utf8_lossy(&buffer).into_owned());
    });
    receiver
}

/// Waits for a drained stream until `deadline`; `None` when it is still open
fn collect(receiver: Option<Receiver<String>>, deadline: Instant) -> Option<String> {
    let Some(receiver) = receiver else {
        return Some(String::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    receiver.recv_timeout(remaining).ok()
}
