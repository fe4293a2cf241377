use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clipsnip_core::commands;
use clipsnip_core::config::Settings;
use clipsnip_core::entry::NewEntry;
use clipsnip_core::logging::{init_logging, FILE_ONLY};
use clipsnip_core::{CommandClipboard, CommandEditor, Environment, Platform, SnippetError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "clipsnip",
    version,
    about = "Save clipboard text as editor snippets",
    disable_version_flag = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Directory for settings.json and logs
    #[arg(long, global = true, env = "CLIPSNIP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Snippets directory (overrides settings and platform default)
    #[arg(long, global = true, env = "CLIPSNIP_SNIPPETS_DIR")]
    snippets_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Store the clipboard contents as a snippet
    Add {
        /// Language of the snippet file (e.g. python, javascript)
        #[arg(short, long)]
        language: String,
        /// Trigger text for the snippet
        #[arg(short, long)]
        prefix: String,
        /// Snippet name (defaults to the current date and time)
        #[arg(short, long)]
        title: Option<String>,
        /// Snippet description (defaults to the current date and time)
        #[arg(short, long)]
        description: Option<String>,
        /// Create the snippet file if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Merge every snippet of one language file into another
    Move {
        /// Language file to copy snippets from (left unchanged)
        #[arg(short, long)]
        from: String,
        /// Language file to merge snippets into
        #[arg(short, long)]
        to: String,
    },
    /// Open a language's snippet file in the editor
    Open {
        /// Language of the snippet file
        #[arg(short, long)]
        language: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::Move { .. } => "move",
            Commands::Open { .. } => "open",
        }
    }
}

fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("clipsnip"))
            .unwrap_or_else(|| PathBuf::from(".clipsnip"))
    })
}

fn settings_path(cli: &Cli) -> PathBuf {
    data_dir(cli).join("settings.json")
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(&data_dir(&cli).join("logs")) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e:#}");
            None
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&cli, e),
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let env = environment(cli)?;

    match &cli.command {
        Commands::Add {
            language,
            prefix,
            title,
            description,
            create,
        } => {
            let entry = NewEntry {
                language: language.clone(),
                prefix: require(prefix, "--prefix")?,
                title: title.clone(),
                description: description.clone(),
            };
            cmd_add(&env, entry, *create).await
        }
        Commands::Move { from, to } => cmd_move(&env, from, to).await,
        Commands::Open { language } => cmd_open(&env, language).await,
    }
}

fn environment(cli: &Cli) -> anyhow::Result<Environment> {
    let mut settings = Settings::load_or_default(&settings_path(cli))?;
    if let Some(dir) = &cli.snippets_dir {
        settings.snippets_dir = Some(dir.clone());
    }
    let home = dirs::home_dir();
    Ok(Environment::resolve(
        &settings,
        Platform::current(),
        home.as_deref(),
    )?)
}

fn require(value: &str, flag: &str) -> Result<String, SnippetError> {
    if value.trim().is_empty() {
        return Err(SnippetError::MissingArgument(flag.to_string()));
    }
    Ok(value.to_string())
}

async fn cmd_add(env: &Environment, entry: NewEntry, create: bool) -> anyhow::Result<()> {
    let clipboard = CommandClipboard::new(env.clipboard.clone());
    let language = entry.language.clone();
    let outcome = commands::add(&env.stores, &clipboard, entry, create).await?;

    if outcome.replaced {
        println!("Replaced snippet \"{}\" in {}", outcome.name, language);
    } else {
        println!("Added snippet \"{}\" to {}", outcome.name, language);
    }
    println!("  {}", outcome.path.display());
    Ok(())
}

async fn cmd_move(env: &Environment, from: &str, to: &str) -> anyhow::Result<()> {
    let summary = commands::move_snippets(&env.stores, from, to).await?;
    println!(
        "Moved {} snippet(s) from {} to {} ({} replaced, {} total)",
        summary.moved, from, to, summary.replaced, summary.total
    );
    println!("  {}", summary.path.display());
    Ok(())
}

async fn cmd_open(env: &Environment, language: &str) -> anyhow::Result<()> {
    let editor = CommandEditor::new(env.editor.clone());
    let path = commands::open(&env.stores, &editor, language).await?;
    println!("Opened {}", path.display());
    Ok(())
}

/// Log the failure to the log file, print it with the subcommand's help,
/// and return the exit status.
fn report(cli: &Cli, e: anyhow::Error) -> ExitCode {
    let name = cli.command.name();
    tracing::error!(target: FILE_ONLY, command = name, error = %e, "Command failed");
    eprintln!("error: {e:#}");
    eprintln!();

    let mut cmd = Cli::command();
    if let Some(sub) = cmd.find_subcommand_mut(name) {
        let _ = sub.print_help();
    }

    ExitCode::from(exit_status(&e))
}

/// 2 for usage errors, 1 for everything else.
fn exit_status(e: &anyhow::Error) -> u8 {
    let usage = e
        .downcast_ref::<SnippetError>()
        .is_some_and(SnippetError::is_usage);
    if usage {
        2
    } else {
        1
    }
}
