//! Resolves everything platform-dependent once at startup so the rest of the
//! crate never looks at the OS.

use crate::config::Settings;
use crate::error::{Result, SnippetError};
use crate::external::ExternalCommand;
use crate::store_dir::StoreDir;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
    Other(&'static str),
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            other => Platform::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other(name) => *name,
        }
    }

    fn clipboard_argv(&self) -> Option<&'static [&'static str]> {
        match self {
            Platform::MacOs => Some(&["pbpaste"]),
            Platform::Windows => Some(&["powershell", "Get-Clipboard"]),
            Platform::Linux => Some(&["xclip", "-o"]),
            Platform::Other(_) => None,
        }
    }

    /// Location of the editor's user config, relative to the home directory.
    fn config_segments(&self) -> Option<&'static [&'static str]> {
        match self {
            Platform::MacOs => Some(&["Library", "Application Support"]),
            Platform::Windows => Some(&["AppData", "Roaming"]),
            Platform::Linux => Some(&[".config"]),
            Platform::Other(_) => None,
        }
    }
}

const SNIPPETS_SEGMENTS: [&str; 3] = ["Code", "User", "snippets"];
const DEFAULT_EDITOR: &str = "code";

/// The resolved configuration handed to every command.
#[derive(Debug, Clone)]
pub struct Environment {
    pub stores: StoreDir,
    pub clipboard: ExternalCommand,
    pub editor: ExternalCommand,
}

impl Environment {
    /// Combine settings with the platform defaults. Explicit settings always
    /// win; a platform without defaults needs both the snippets root and the
    /// clipboard command configured.
    pub fn resolve(settings: &Settings, platform: Platform, home: Option<&Path>) -> Result<Self> {
        let unsupported = || SnippetError::UnsupportedPlatform(platform.as_str().to_string());

        let root = match &settings.snippets_dir {
            Some(dir) => dir.clone(),
            None => {
                let segments = platform.config_segments().ok_or_else(unsupported)?;
                let home = home.ok_or_else(unsupported)?;
                let mut root = home.to_path_buf();
                root.extend(segments);
                root.extend(SNIPPETS_SEGMENTS);
                root
            }
        };

        let clipboard = match settings
            .clipboard
            .command
            .as_deref()
            .and_then(ExternalCommand::from_argv)
        {
            Some(cmd) => cmd,
            None => {
                let argv = platform.clipboard_argv().ok_or_else(unsupported)?;
                static_command(argv)
            }
        };

        let editor = settings
            .editor
            .command
            .as_deref()
            .and_then(ExternalCommand::from_argv)
            .unwrap_or_else(|| ExternalCommand::new(DEFAULT_EDITOR, Vec::new()));

        tracing::debug!(
            platform = platform.as_str(),
            root = %root.display(),
            clipboard = clipboard.program(),
            clipboard_args = ?clipboard.args(),
            editor = editor.program(),
            editor_args = ?editor.args(),
            "Resolved environment"
        );

        Ok(Self {
            stores: StoreDir::new(root, settings.extension.clone()),
            clipboard,
            editor,
        })
    }
}

fn static_command(argv: &[&str]) -> ExternalCommand {
    let args = argv[1..].iter().map(|s| s.to_string()).collect();
    ExternalCommand::new(argv[0], args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linux_defaults() {
        let env = Environment::resolve(
            &Settings::default(),
            Platform::Linux,
            Some(Path::new("/home/u")),
        )
        .unwrap();
        assert_eq!(
            env.stores.root(),
            Path::new("/home/u/.config/Code/User/snippets")
        );
        assert_eq!(env.clipboard.program(), "xclip");
        assert_eq!(env.clipboard.args(), ["-o"]);
        assert_eq!(env.editor.program(), "code");
    }

    #[test]
    fn test_macos_root() {
        let env =
            Environment::resolve(&Settings::default(), Platform::MacOs, Some(Path::new("/Users/u")))
                .unwrap();
        assert_eq!(
            env.stores.root(),
            Path::new("/Users/u/Library/Application Support/Code/User/snippets")
        );
        assert_eq!(env.clipboard.program(), "pbpaste");
    }

    #[test]
    fn test_windows_clipboard() {
        let env =
            Environment::resolve(&Settings::default(), Platform::Windows, Some(Path::new("/h")))
                .unwrap();
        assert_eq!(env.clipboard.program(), "powershell");
        assert_eq!(env.clipboard.args(), ["Get-Clipboard"]);
    }

    #[test]
    fn test_settings_override() {
        let mut settings = Settings::default();
        settings.snippets_dir = Some("/snips".into());
        settings.clipboard.command = Some(vec!["wl-paste".into(), "-n".into()]);
        settings.editor.command = Some(vec!["nvim".into()]);
        let env = Environment::resolve(&settings, Platform::Other("plan9"), None).unwrap();
        assert_eq!(env.stores.root(), Path::new("/snips"));
        assert_eq!(env.clipboard.program(), "wl-paste");
        assert_eq!(env.editor.program(), "nvim");
    }

    #[test]
    fn test_unknown_platform_without_settings() {
        let err = Environment::resolve(&Settings::default(), Platform::Other("plan9"), Some(Path::new("/h")))
            .unwrap_err();
        assert!(matches!(err, SnippetError::UnsupportedPlatform(p) if p == "plan9"));
    }

    #[test]
    fn test_empty_clipboard_override_falls_back() {
        let mut settings = Settings::default();
        settings.clipboard.command = Some(Vec::new());
        let env = Environment::resolve(&settings, Platform::Linux, Some(Path::new("/h"))).unwrap();
        assert_eq!(env.clipboard.program(), "xclip");
    }
}
