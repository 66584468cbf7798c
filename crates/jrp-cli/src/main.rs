//! jrp CLI - random Japanese phrase generator

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use jrp_core::models::GenerateMode;
use jrp_core::{download, version, wordnet, Config, Database, Error, HistoryService};

mod pretty;
mod prompt;

use pretty::Format;

#[derive(Debug, Parser)]
#[command(
    name = "jrp",
    author,
    version,
    about = "Random Japanese phrase generator",
    propagate_version = true
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate random phrases and save them to history
    #[command(visible_aliases = ["gen", "g"])]
    Generate(GenerateArgs),

    /// Inspect and manage saved phrases
    #[command(visible_aliases = ["hist", "h"])]
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Mark histories as favorites
    Favorite {
        /// History ids
        ids: Vec<String>,

        /// Favorite every history
        #[arg(short, long)]
        all: bool,
    },

    /// Clear the favorite mark from histories
    Unfavorite {
        /// History ids
        ids: Vec<String>,

        /// Unfavorite every favorited history
        #[arg(short, long)]
        all: bool,
    },

    /// Download the Japanese WordNet database
    #[command(visible_aliases = ["dl", "d"])]
    Download,

    /// Print the version
    Version,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    /// Show saved histories
    #[command(visible_aliases = ["sh", "s"])]
    Show(ShowArgs),

    /// Search histories by keyword
    #[command(visible_aliases = ["se", "S"])]
    Search(SearchArgs),

    /// Remove histories by id
    #[command(visible_aliases = ["rm", "r"])]
    Remove(RemoveArgs),

    /// Remove every history
    #[command(visible_aliases = ["cl", "c"])]
    Clear(ClearArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// How many phrases to generate; the larger of this and -n wins
    #[arg(value_name = "NUMBER")]
    count: Option<String>,

    /// Number of phrases to generate
    #[arg(short, long, default_value_t = 10)]
    number: i64,

    /// Fix the left half of every phrase
    #[arg(short, long)]
    prefix: Option<String>,

    /// Fix the right half of every phrase
    #[arg(short, long)]
    suffix: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(Debug, clap::Args)]
struct ShowArgs {
    /// How many histories to show; the larger of this and -n wins
    #[arg(value_name = "NUMBER")]
    count: Option<String>,

    /// Number of histories to show
    #[arg(short, long, default_value_t = 10)]
    number: i64,

    /// Show every history instead of the newest ones
    #[arg(short, long)]
    all: bool,

    /// Only favorited histories
    #[arg(short = 'F', long)]
    favorited: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
    /// Keywords matched as substrings of the phrase
    keywords: Vec<String>,

    /// Require every keyword to match instead of any
    #[arg(short = 'A', long)]
    and: bool,

    /// Number of histories to show
    #[arg(short, long, default_value_t = 10)]
    number: i64,

    /// Search every history instead of the newest ones
    #[arg(short, long)]
    all: bool,

    /// Only favorited histories
    #[arg(short = 'F', long)]
    favorited: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(Debug, clap::Args)]
struct RemoveArgs {
    /// History ids to remove
    ids: Vec<String>,

    /// Remove favorited histories too
    #[arg(short, long)]
    force: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    no_confirm: bool,
}

#[derive(Debug, clap::Args)]
struct ClearArgs {
    /// Remove favorited histories too and reset id numbering
    #[arg(short, long)]
    force: bool,

    /// Skip the confirmation prompt
    #[arg(long)]
    no_confirm: bool,
}

/// Outcomes that decide rendering and the exit code. Core errors carry
/// their own category; the other variants originate in the CLI itself.
#[derive(Debug)]
enum AppError {
    Core(Error),
    InvalidInteger(String),
    BothHalvesPinned,
    Cancelled,
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Core(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Core(Error::Io(err))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => render_failure(&err),
    }
}

/// NothingToDo, a missing WordNet file and a declined prompt are ordinary
/// outcomes: yellow message, zero exit. Everything else is red, non-zero.
fn render_failure(err: &AppError) -> ExitCode {
    match err {
        AppError::Core(Error::NothingToDo(message)) => {
            pretty::notice(message);
            ExitCode::SUCCESS
        }
        AppError::Core(Error::WordnetMissing(path)) => {
            pretty::notice(&format!(
                "WordNet database not found at {}. Run `jrp download` first.",
                path.display()
            ));
            ExitCode::SUCCESS
        }
        AppError::Cancelled => {
            pretty::notice("Cancelled.");
            ExitCode::SUCCESS
        }
        AppError::InvalidInteger(value) => {
            pretty::failure(&format!("ID/number must be an integer: {value}"));
            ExitCode::FAILURE
        }
        AppError::BothHalvesPinned => {
            pretty::failure("Cannot fix both a prefix and a suffix; pick one.");
            ExitCode::FAILURE
        }
        AppError::Core(err) => {
            pretty::failure(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);
    let config = Config::ensure_at(&config_path)?;

    match cli.command {
        Command::Generate(args) => cmd_generate(&open_service(&config).await?, &config, args).await,
        Command::History { command } => {
            let service = open_service(&config).await?;
            match command {
                HistoryCommand::Show(args) => cmd_show(&service, args).await,
                HistoryCommand::Search(args) => cmd_search(&service, args).await,
                HistoryCommand::Remove(args) => cmd_remove(&service, args).await,
                HistoryCommand::Clear(args) => cmd_clear(&service, args).await,
            }
        }
        Command::Favorite { ids, all } => cmd_favorite(&open_service(&config).await?, &ids, all).await,
        Command::Unfavorite { ids, all } => {
            cmd_unfavorite(&open_service(&config).await?, &ids, all).await
        }
        Command::Download => cmd_download(&config).await,
        Command::Version => {
            cmd_version();
            Ok(())
        }
        Command::Completion { shell } => {
            cmd_completion(shell);
            Ok(())
        }
    }
}

async fn open_service(config: &Config) -> Result<HistoryService, AppError> {
    let db = Database::open(&config.database).await?;
    Ok(HistoryService::new(db))
}

async fn cmd_generate(
    service: &HistoryService,
    config: &Config,
    args: GenerateArgs,
) -> Result<(), AppError> {
    let count = effective_count(args.count.as_deref(), args.number)?;
    let mode = match (args.prefix, args.suffix) {
        (Some(_), Some(_)) => return Err(AppError::BothHalvesPinned),
        (Some(prefix), None) => GenerateMode::Prefix(prefix),
        (None, Some(suffix)) => GenerateMode::Suffix(suffix),
        (None, None) => GenerateMode::Random,
    };

    let words = wordnet::load_words(&config.wordnet_db_path()).await?;
    let drafts = service.generate(&words, &mode, usize::try_from(count.max(0)).unwrap_or(0));
    if drafts.is_empty() {
        // Rejection sampling came up empty; nothing to save, nothing to say.
        return Ok(());
    }

    let saved = service.save(drafts).await?;
    pretty::print_histories(&saved, args.format);
    Ok(())
}

async fn cmd_show(service: &HistoryService, args: ShowArgs) -> Result<(), AppError> {
    let n = effective_count(args.count.as_deref(), args.number)?;
    let rows = service.list(args.all, args.favorited, n).await?;
    pretty::print_histories(&rows, args.format);
    Ok(())
}

async fn cmd_search(service: &HistoryService, args: SearchArgs) -> Result<(), AppError> {
    let rows = service
        .search(&args.keywords, args.and, args.all, args.favorited, args.number)
        .await?;
    pretty::print_histories(&rows, args.format);
    Ok(())
}

async fn cmd_remove(service: &HistoryService, args: RemoveArgs) -> Result<(), AppError> {
    let ids = parse_ids(&args.ids)?;
    if !args.no_confirm {
        let message = format!("Remove {} histories?", ids.len());
        if !prompt::confirm(&message)? {
            return Err(AppError::Cancelled);
        }
    }

    let removed = service.remove(&ids, false, args.force).await?;
    println!("Removed {removed} histories.");
    Ok(())
}

async fn cmd_clear(service: &HistoryService, args: ClearArgs) -> Result<(), AppError> {
    if !args.no_confirm {
        let message = if args.force {
            "Remove ALL histories, including favorites?"
        } else {
            "Remove all histories except favorites?"
        };
        if !prompt::confirm(message)? {
            return Err(AppError::Cancelled);
        }
    }

    let removed = service.remove(&[], true, args.force).await?;
    println!("Removed {removed} histories.");
    Ok(())
}

async fn cmd_favorite(service: &HistoryService, ids: &[String], all: bool) -> Result<(), AppError> {
    let ids = parse_ids(ids)?;
    let updated = service.favorite(&ids, all).await?;
    println!("Favorited {updated} histories.");
    Ok(())
}

async fn cmd_unfavorite(
    service: &HistoryService,
    ids: &[String],
    all: bool,
) -> Result<(), AppError> {
    let ids = parse_ids(ids)?;
    let updated = service.unfavorite(&ids, all).await?;
    println!("Unfavorited {updated} histories.");
    Ok(())
}

async fn cmd_download(config: &Config) -> Result<(), AppError> {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message("Downloading the Japanese WordNet database...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = download::download(&config.wordnet_dir).await;
    spinner.finish_and_clear();

    let path = result?;
    println!("Downloaded WordNet database to {}", path.display());
    Ok(())
}

fn cmd_version() {
    let resolved = version::resolve(
        option_env!("JRP_VERSION"),
        option_env!("CARGO_PKG_VERSION"),
    );
    println!("jrp version {resolved}");
}

fn cmd_completion(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "jrp", &mut std::io::stdout());
}

/// Parse user-supplied ids, rejecting non-integers with a distinct error.
fn parse_ids(raw: &[String]) -> Result<Vec<i64>, AppError> {
    raw.iter()
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| AppError::InvalidInteger(value.clone()))
        })
        .collect()
}

/// Combine the optional positional count with the `-n` flag; the larger of
/// the two wins when both are present.
fn effective_count(positional: Option<&str>, number: i64) -> Result<i64, AppError> {
    match positional {
        Some(raw) => {
            let parsed = raw
                .parse::<i64>()
                .map_err(|_| AppError::InvalidInteger(raw.to_string()))?;
            Ok(parsed.max(number))
        }
        None => Ok(number),
    }
}
