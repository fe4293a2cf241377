use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the platform's snippets root.
    #[serde(default)]
    pub snippets_dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub clipboard: ClipboardSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snippets_dir: None,
            extension: default_extension(),
            clipboard: ClipboardSettings::default(),
            editor: EditorSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardSettings {
    /// Program and arguments whose stdout is the clipboard text.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Program and arguments; the store path is appended.
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

fn default_extension() -> String {
    "json".into()
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    #[cfg(test)]
    pub(crate) fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
