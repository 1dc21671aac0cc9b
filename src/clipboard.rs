//! System clipboard integration.
//!
//! Pipes text into the platform clipboard tool so the summary can be pasted
//! anywhere.  Failure never disturbs application state; callers surface it
//! as a status message at most.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard tool could be spawned on this platform.
    #[error("no clipboard tool available")]
    Unavailable,
    /// A tool was spawned but did not accept the text.
    #[error("clipboard tool failed")]
    CommandFailed,
}

/// Copy `text` into the system clipboard.
pub fn copy_text(text: &str) -> Result<(), ClipboardError> {
    #[cfg(target_os = "macos")]
    {
        return run_clip_command("pbcopy", &[], text);
    }

    #[cfg(target_os = "windows")]
    {
        return run_clip_command("cmd", &["/C", "clip"], text);
    }

    #[cfg(target_os = "linux")]
    {
        if run_clip_command("wl-copy", &[], text).is_ok() {
            return Ok(());
        }
        return run_clip_command("xclip", &["-selection", "clipboard"], text);
    }

    #[allow(unreachable_code)]
    Err(ClipboardError::Unavailable)
}

fn run_clip_command(cmd: &str, args: &[&str], input: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| ClipboardError::Unavailable)?;

    if let Some(stdin) = child.stdin.as_mut() {
        if stdin.write_all(input.as_bytes()).is_err() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ClipboardError::CommandFailed);
        }
    }

    match child.wait() {
        Ok(status) if status.success() => Ok(()),
        _ => Err(ClipboardError::CommandFailed),
    }
}
