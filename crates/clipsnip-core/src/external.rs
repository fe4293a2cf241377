use crate::error::{Result, SnippetError};
use std::path::Path;
use tokio::process::Command;

/// Source of captured text.
#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    async fn read(&self) -> Result<String>;
}

/// Something that can open a store file for manual editing.
#[async_trait::async_trait]
pub trait Editor: Send + Sync {
    async fn open(&self, path: &Path) -> Result<()>;
}

/// Program plus leading arguments, e.g. `["xclip", "-o"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a `["program", "arg", ...]` list. `None` when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    fn failure(&self, reason: impl Into<String>) -> SnippetError {
        SnippetError::ExternalCommand {
            program: self.program.clone(),
            reason: reason.into(),
        }
    }
}

/// Reads the clipboard by running a platform tool and taking its stdout.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    command: ExternalCommand,
}

impl CommandClipboard {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl Clipboard for CommandClipboard {
    async fn read(&self) -> Result<String> {
        let output = self
            .command
            .command()
            .output()
            .await
            .map_err(|e| self.command.failure(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            tracing::error!(program = %self.command.program, %stderr, "Clipboard command failed");
            return Err(self.command.failure(format!("exited with {}", output.status)));
        }
        if !stderr.trim().is_empty() {
            tracing::warn!(program = %self.command.program, %stderr, "Clipboard command wrote to stderr");
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let text = text.trim_end_matches(['\r', '\n']);
        if text.trim().is_empty() {
            return Err(SnippetError::CaptureEmpty);
        }
        Ok(text.to_string())
    }
}

/// Opens a path with an editor program; the path is the last argument.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: ExternalCommand,
}

impl CommandEditor {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl Editor for CommandEditor {
    async fn open(&self, path: &Path) -> Result<()> {
        let status = self
            .command
            .command()
            .arg(path)
            .status()
            .await
            .map_err(|e| self.command.failure(e.to_string()))?;

        if !status.success() {
            return Err(self.command.failure(format!("exited with {}", status)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_argv() {
        let cmd = ExternalCommand::from_argv(&argv(&["xclip", "-o"])).unwrap();
        assert_eq!(cmd.program(), "xclip");
        assert_eq!(cmd.args(), ["-o"]);
        assert!(ExternalCommand::from_argv(&[]).is_none());
    }

    #[tokio::test]
    async fn test_missing_program_is_external_error() {
        let clipboard = CommandClipboard::new(ExternalCommand::new(
            "clipsnip-definitely-not-installed",
            Vec::new(),
        ));
        let err = clipboard.read().await.unwrap_err();
        assert!(matches!(err, SnippetError::ExternalCommand { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clipboard_trims_trailing_newlines() {
        let clipboard = CommandClipboard::new(ExternalCommand::new(
            "printf",
            argv(&["  indented\\nsecond\\n\\n"]),
        ));
        assert_eq!(clipboard.read().await.unwrap(), "  indented\nsecond");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clipboard_stderr_with_success_keeps_stdout() {
        let clipboard = CommandClipboard::new(ExternalCommand::new(
            "sh",
            argv(&["-c", "echo text; echo noise >&2"]),
        ));
        assert_eq!(clipboard.read().await.unwrap(), "text");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clipboard_empty_output() {
        let clipboard = CommandClipboard::new(ExternalCommand::new("true", Vec::new()));
        assert!(matches!(
            clipboard.read().await.unwrap_err(),
            SnippetError::CaptureEmpty
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_editor_nonzero_exit() {
        let editor = CommandEditor::new(ExternalCommand::new("false", Vec::new()));
        let err = editor.open(Path::new("/tmp/x.json")).await.unwrap_err();
        assert!(matches!(err, SnippetError::ExternalCommand { .. }));
    }
}
