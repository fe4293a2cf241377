//! The `add`, `move` and `open` pipelines. Each one validates its inputs,
//! reads what it needs, and writes at most one store as its final step.

use crate::entry::{self, NewEntry};
use crate::error::{Result, SnippetError};
use crate::external::{Clipboard, Editor};
use crate::snippet::merge;
use crate::store_dir::{MoveSummary, StoreDir};
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub name: String,
    pub path: PathBuf,
    /// An entry with the same name existed and was overwritten.
    pub replaced: bool,
}

/// Capture the clipboard and store it as a new entry in `entry.language`.
/// With `create`, a missing store is started from scratch instead of
/// failing.
pub async fn add(
    stores: &StoreDir,
    clipboard: &dyn Clipboard,
    entry: NewEntry,
    create: bool,
) -> Result<AddOutcome> {
    stores.path_for(&entry.language)?;

    let captured = clipboard.read().await?;
    let built = entry::build(entry, &captured)?;

    let existing = if create {
        stores.load_or_default(&built.language).await?
    } else {
        stores.load(&built.language).await?
    };
    let replaced = existing.contains(&built.name);
    if replaced {
        tracing::warn!(name = %built.name, language = %built.language, "Overwriting existing snippet");
    }

    let merged = merge(existing, built.store);
    let path = stores.save(&built.language, &merged).await?;
    tracing::info!(name = %built.name, path = %path.display(), "Snippet added");

    Ok(AddOutcome {
        name: built.name,
        path,
        replaced,
    })
}

/// Merge every entry of `from` into `to`. `from` is left untouched.
pub async fn move_snippets(stores: &StoreDir, from: &str, to: &str) -> Result<MoveSummary> {
    let summary = stores.move_entries(from, to).await?;
    tracing::info!(
        from,
        to,
        moved = summary.moved,
        replaced = summary.replaced,
        total = summary.total,
        "Snippets moved"
    );
    Ok(summary)
}

/// Open the store for `language` in the editor.
pub async fn open(stores: &StoreDir, editor: &dyn Editor, language: &str) -> Result<PathBuf> {
    let path = stores.path_for(language)?;
    let exists = fs::try_exists(&path)
        .await
        .map_err(|e| SnippetError::io(&path, e))?;
    if !exists {
        return Err(SnippetError::FileNotFound { path });
    }

    editor.open(&path).await?;
    tracing::info!(path = %path.display(), "Opened snippet store");
    Ok(path)
}
