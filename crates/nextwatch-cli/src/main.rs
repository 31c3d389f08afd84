use clap::{ArgAction, Parser, Subcommand};
use commands::clear::ClearTargets;
use commands::watchlist::FilterArg;
use commands::{chat, clear, config, explain, home, recommend, search, show, watchlist};
use nextwatch_config::{Config, PathManager};
use nextwatch_core::ActiveView;
use std::path::PathBuf;

mod app;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "nextwatch")]
#[command(about = "NextWatch - find your next show and keep track of what you want to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Without a command the last opened view is shown again
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles by name
    Search {
        /// At least three characters
        query: String,
    },
    /// Show details for a title and similar shows
    Show {
        /// External id, e.g. tt10850932
        id: String,

        /// Skip the similar shows lookup
        #[arg(long, action = ArgAction::SetTrue)]
        no_similar: bool,
    },
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// AI recommendations based on your watchlist
    #[command(long_about = "Ask the language model for titles similar to the ones you rated highly (4 stars or more), or to your whole watchlist when nothing is rated. Results are cached until --refresh, a rating change, or a new API key.")]
    Recommend {
        /// Discard cached recommendations and ask again
        #[arg(long, action = ArgAction::SetTrue)]
        refresh: bool,
    },
    /// Explain the plot of a title
    Explain {
        id: String,

        /// Full plot including the ending (asks for confirmation)
        #[arg(long, action = ArgAction::SetTrue)]
        spoilers: bool,
    },
    /// Chat about a title
    Chat {
        id: String,

        /// Message to send; without one the conversation so far is shown
        message: Vec<String>,

        /// Delete the conversation for this title
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "message")]
        clear: bool,
    },
    /// Titles similar to the given one
    Similar {
        id: String,

        #[arg(long, action = ArgAction::SetTrue)]
        refresh: bool,
    },
    /// Trending titles and curated collections
    Home {
        #[arg(long, action = ArgAction::SetTrue)]
        refresh: bool,
    },
    /// Recently viewed titles
    Recent,
    /// Configure API keys and preferences
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    #[command(long_about = "Clear stored data. Use --chat for conversations, --watchlist for the watchlist and ratings, --recommendations for cached recommendations, --cache for cached home and similar-title lists, or --all to remove everything including your API key.")]
    Clear {
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        chat: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        recommendations: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List entries grouped by year
    List {
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,
    },
    /// Add a title by external id
    Add { id: String },
    /// Remove a title
    Remove { id: String },
    /// Rate a title from 0 (unrated) to 5
    Rate {
        id: String,

        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        rating: u8,
    },
    /// Remove every title
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store your Gemini API key after validating it
    Gemini {
        /// Prompted for when omitted
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Set the OMDb API key in the config file
    Omdb {
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Toggle dark table colours
    DarkMode {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Write a config file with all defaults
    Init,
}

async fn run(cli: Cli, app: app::App) -> color_eyre::Result<()> {
    let app = &app;
    let command = match cli.command {
        Some(command) => command,
        None => match app.store.active_view() {
            ActiveView::Home => Commands::Home { refresh: false },
            ActiveView::Watchlist => Commands::Watchlist { cmd: None },
            ActiveView::Recommendations => Commands::Recommend { refresh: false },
            ActiveView::Recent => Commands::Recent,
        },
    };

    match command {
        Commands::Search { query } => search::run_search(app, &query).await,
        Commands::Show { id, no_similar } => show::run_show(app, &id, !no_similar).await,
        Commands::Watchlist { cmd } => match cmd.unwrap_or(WatchlistCommands::List { filter: FilterArg::All }) {
            WatchlistCommands::List { filter } => watchlist::run_list(app, filter),
            WatchlistCommands::Add { id } => watchlist::run_add(app, &id).await,
            WatchlistCommands::Remove { id } => watchlist::run_remove(app, &id),
            WatchlistCommands::Rate { id, rating } => watchlist::run_rate(app, &id, rating),
            WatchlistCommands::Clear => watchlist::run_clear(app),
        },
        Commands::Recommend { refresh } => recommend::run_recommend(app, refresh).await,
        Commands::Explain { id, spoilers } => explain::run_explain(app, &id, spoilers).await,
        Commands::Chat { id, message, clear } => chat::run_chat(app, &id, &message, clear).await,
        Commands::Similar { id, refresh } => show::run_similar(app, &id, refresh).await,
        Commands::Home { refresh } => home::run_home(app, refresh).await,
        Commands::Recent => home::run_recent(app),
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
            ConfigCommands::Show { full } => config::show_config(app, full),
            ConfigCommands::Gemini { api_key } => config::configure_gemini(app, api_key).await,
            ConfigCommands::Omdb { api_key } => config::configure_omdb(app, api_key),
            ConfigCommands::DarkMode { enabled } => config::set_dark_mode(app, enabled),
            ConfigCommands::Init => config::init_config(app),
        },
        Commands::Clear {
            all,
            chat,
            watchlist,
            recommendations,
            cache,
        } => clear::run_clear(
            app,
            ClearTargets {
                all,
                chat,
                watchlist,
                recommendations,
                cache,
            },
        ),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let app = app::App::new(paths, config, output, cli.yes)?;

    run(cli, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rate_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["nextwatch", "watchlist", "rate", "tt1", "6"]).is_err());
        assert!(Cli::try_parse_from(["nextwatch", "watchlist", "rate", "tt1", "5"]).is_ok());
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["nextwatch", "--yes"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.yes);
    }

    #[test]
    fn test_chat_collects_message_words() {
        let cli = Cli::try_parse_from(["nextwatch", "chat", "tt1", "who", "is", "the", "lead?"]).unwrap();
        match cli.command {
            Some(Commands::Chat { message, clear, .. }) => {
                assert_eq!(message.join(" "), "who is the lead?");
                assert!(!clear);
            }
            _ => panic!("expected chat command"),
        }
    }
}
