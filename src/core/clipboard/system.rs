//! Clipboard backed by the platform's clipboard command.

use super::Clipboard;
use crate::error::ClipboardError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// A clipboard command and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClipboardCommand {
    program: &'static str,
    args: &'static [&'static str],
}

/// Clipboard that pipes text into `pbcopy`, `clip`, `wl-copy`, `xclip` or `xsel`
pub struct SystemClipboard {
    candidates: Vec<ClipboardCommand>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        Self {
            candidates: candidates_for(std::env::consts::OS, wayland),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

fn candidates_for(os: &str, wayland: bool) -> Vec<ClipboardCommand> {
    match os {
        "macos" => vec![ClipboardCommand {
            program: "pbcopy",
            args: &[],
        }],
        "windows" => vec![ClipboardCommand {
            program: "clip",
            args: &[],
        }],
        _ => {
            let mut commands = Vec::new();
            if wayland {
                commands.push(ClipboardCommand {
                    program: "wl-copy",
                    args: &[],
                });
            }
            commands.push(ClipboardCommand {
                program: "xclip",
                args: &["-selection", "clipboard"],
            });
            commands.push(ClipboardCommand {
                program: "xsel",
                args: &["--clipboard", "--input"],
            });
            commands
        }
    }
}

fn run(command: &ClipboardCommand, text: &str) -> Result<(), ClipboardError> {
    let mut child = Command::new(command.program)
        .args(command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipboardError::Unavailable(command.program.to_string()),
            ErrorKind::PermissionDenied => ClipboardError::PermissionDenied,
            _ => ClipboardError::WriteFailed {
                command: command.program.to_string(),
                reason: e.to_string(),
            },
        })?;

    let written = match child.stdin.take() {
        // Dropping stdin closes the pipe so the tool sees end of input
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        // Reap the child before reporting
        let _ = child.kill();
        let _ = child.wait();
        return Err(ClipboardError::WriteFailed {
            command: command.program.to_string(),
            reason: e.to_string(),
        });
    }

    let status = child.wait().map_err(|e| ClipboardError::WriteFailed {
        command: command.program.to_string(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::WriteFailed {
            command: command.program.to_string(),
            reason: format!("exited with {}", status),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = ClipboardError::Unavailable("no clipboard command".to_string());

        for command in &self.candidates {
            match run(command, text) {
                Ok(()) => {
                    tracing::debug!(program = command.program, "Copied to clipboard");
                    return Ok(());
                }
                // Try the next tool only when this one is missing
                Err(ClipboardError::Unavailable(program)) => {
                    last_error = ClipboardError::Unavailable(program);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_uses_pbcopy() {
        let commands = candidates_for("macos", false);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program, "pbcopy");
    }

    #[test]
    fn wayland_prefers_wl_copy() {
        let programs: Vec<_> = candidates_for("linux", true)
            .iter()
            .map(|c| c.program)
            .collect();
        assert_eq!(programs, ["wl-copy", "xclip", "xsel"]);
    }

    #[test]
    fn x11_skips_wl_copy() {
        let programs: Vec<_> = candidates_for("linux", false)
            .iter()
            .map(|c| c.program)
            .collect();
        assert_eq!(programs, ["xclip", "xsel"]);
    }

    #[cfg(unix)]
    #[test]
    fn tool_that_ignores_input_is_reaped() {
        // `true` exits without reading, so a large write hits a closed pipe
        let command = ClipboardCommand {
            program: "true",
            args: &[],
        };

        let result = run(&command, &"x".repeat(1 << 20));

        match result {
            Ok(()) => {}
            Err(ClipboardError::WriteFailed { command, .. }) => assert_eq!(command, "true"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_reports_exit_status() {
        let command = ClipboardCommand {
            program: "false",
            args: &[],
        };

        assert!(matches!(
            run(&command, "hello"),
            Err(ClipboardError::WriteFailed { .. })
        ));
    }

    #[test]
    fn missing_tools_report_unavailable() {
        let clipboard = SystemClipboard {
            candidates: vec![ClipboardCommand {
                program: "quote-moment-no-such-clipboard-tool",
                args: &[],
            }],
        };

        assert!(matches!(
            clipboard.write_text("hello"),
            Err(ClipboardError::Unavailable(_))
        ));
    }
}
