use crate::comments::strip_comments;
use crate::error::{Result, SnippetError};
use crate::snippet::{merge, SnippetStore};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The directory holding one snippet file per language.
#[derive(Debug, Clone)]
pub struct StoreDir {
    root: PathBuf,
    extension: String,
}

impl StoreDir {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the store for `language`.
    pub fn path_for(&self, language: &str) -> Result<PathBuf> {
        validate_language(language)?;
        Ok(self.root.join(format!("{}.{}", language, self.extension)))
    }

    /// Read and decode the store for `language`.
    pub async fn load(&self, language: &str) -> Result<SnippetStore> {
        let path = self.path_for(language)?;
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SnippetError::FileNotFound { path });
            }
            Err(e) => return Err(SnippetError::io(&path, e)),
        };
        let store = decode(&path, &raw)?;
        tracing::debug!(path = %path.display(), entries = store.len(), "Loaded snippet store");
        Ok(store)
    }

    /// Like [`StoreDir::load`], but a missing file yields an empty store.
    pub async fn load_or_default(&self, language: &str) -> Result<SnippetStore> {
        match self.load(language).await {
            Err(SnippetError::FileNotFound { path }) => {
                tracing::info!(path = %path.display(), "Starting a new snippet store");
                Ok(SnippetStore::new())
            }
            other => other,
        }
    }

    /// Overwrite the store for `language` with `store`.
    /// The store is fully encoded before anything touches the disk, then
    /// written with tmp+rename. An existing store is replaced where it
    /// really lives (through symlinks) and keeps its permissions.
    pub async fn save(&self, language: &str, store: &SnippetStore) -> Result<PathBuf> {
        let path = self.path_for(language)?;
        let content = encode(store)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| SnippetError::io(&self.root, e))?;

        let target = match fs::canonicalize(&path).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => path.clone(),
            Err(e) => return Err(SnippetError::io(&path, e)),
        };
        let permissions = match fs::metadata(&target).await {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(SnippetError::io(&target, e)),
        };

        let tmp = tmp_path(&target);
        fs::write(&tmp, &content)
            .await
            .map_err(|e| SnippetError::io(&tmp, e))?;
        let chmod = match permissions {
            Some(permissions) => fs::set_permissions(&tmp, permissions).await,
            None => Ok(()),
        };
        if let Err(e) = chmod {
            let _ = fs::remove_file(&tmp).await;
            return Err(SnippetError::io(&tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(SnippetError::io(&target, e));
        }

        tracing::debug!(
            path = %path.display(),
            target = %target.display(),
            entries = store.len(),
            "Saved snippet store"
        );
        Ok(path)
    }

    /// Merge the `from` store into the `to` store, `from` winning on
    /// collisions. Both are read before anything is written, and only `to`
    /// is written.
    pub async fn move_entries(&self, from: &str, to: &str) -> Result<MoveSummary> {
        let source = self.load(from).await?;
        let destination = self.load(to).await?;

        let moved = source.len();
        let replaced = source.names().filter(|n| destination.contains(n)).count();
        let merged = merge(destination, source);
        let path = self.save(to, &merged).await?;

        Ok(MoveSummary {
            moved,
            replaced,
            total: merged.len(),
            path,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSummary {
    /// Entries read from the source store.
    pub moved: usize,
    /// Destination entries overwritten by a source entry of the same name.
    pub replaced: usize,
    /// Entries in the destination after the move.
    pub total: usize,
    pub path: PathBuf,
}

/// Hidden sibling of `target` used for the write before the rename.
fn tmp_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp", name))
}

/// Decode a store after dropping a leading BOM and its `\t//` comments.
pub fn decode(path: &Path, raw: &str) -> Result<SnippetStore> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    serde_json::from_str(&strip_comments(raw)).map_err(|source| SnippetError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a store as tab-indented JSON with a trailing newline.
pub fn encode(store: &SnippetStore) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut ser).map_err(SnippetError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

fn validate_language(language: &str) -> Result<()> {
    let invalid = language.trim().is_empty()
        || language == "."
        || language.contains("..")
        || language.contains(['/', '\\', '\0']);
    if invalid {
        return Err(SnippetError::InvalidLanguage(language.to_string()));
    }
    Ok(())
}
