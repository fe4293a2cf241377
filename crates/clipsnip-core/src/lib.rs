pub mod commands;
pub mod comments;
pub mod config;
pub mod entry;
pub mod environment;
pub mod error;
pub mod external;
pub mod logging;
pub mod snippet;
pub mod store_dir;

pub use config::Settings;
pub use environment::{Environment, Platform};
pub use error::{Result, SnippetError};
pub use external::{Clipboard, CommandClipboard, CommandEditor, Editor, ExternalCommand};
pub use snippet::{merge, SnippetDefinition, SnippetStore};
pub use store_dir::{MoveSummary, StoreDir};
