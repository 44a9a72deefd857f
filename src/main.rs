//! perks-cli - Fast benefits catalog search CLI

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use perks_cli::catalog::{CatalogSource, HttpCatalog, SampleCatalog};
use perks_cli::commands::{
    CategoriesCommand, FilterAction, FilterCommand, ListCommand, ListOverrides, ShowCommand,
};
use perks_cli::config::{Config, OutputFormat};
use perks_cli::engine::SortBy;
use perks_cli::state::FilterState;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "perks-cli",
    version,
    about = "Fast benefits catalog search CLI",
    long_about = "Browse a catalog of benefits: filter, sort, and paginate discount records from a backend service or the built-in sample data."
)]
struct Cli {
    /// Backend API base URL
    #[arg(long, global = true, env = "PERKS_API_URL")]
    api_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the session file holding the filter state
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    /// Use the built-in sample catalog instead of the backend
    #[arg(long, global = true)]
    sample: bool,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List benefits matching the applied filters
    #[command(alias = "ls")]
    List {
        /// Live search query; applies immediately and persists in the session
        query: Option<String>,

        /// Filter by category (this run only)
        #[arg(long)]
        category: Option<String>,

        /// Filter by valid days, comma-separated (this run only)
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<String>>,

        /// Exclude expired benefits (this run only)
        #[arg(long)]
        only_active: bool,

        /// Minimum discount percentage (this run only)
        #[arg(long)]
        min_discount: Option<u32>,

        /// Sort order (this run only)
        #[arg(long)]
        sort: Option<SortBy>,

        /// Return exactly this page instead of accumulating
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Maximum number of results to accumulate
        #[arg(long)]
        max: Option<usize>,
    },

    /// Look up a benefit by id
    #[command(alias = "get")]
    Show {
        /// Benefit id
        id: String,
    },

    /// List the category vocabulary
    Categories,

    /// Edit, apply, or clear the persistent filter state
    #[command(alias = "f")]
    Filter {
        #[command(subcommand)]
        action: FilterSubcommand,
    },
}

#[derive(Subcommand)]
enum FilterSubcommand {
    /// Set a draft filter field (category, search, days, only-active, min-discount, sort)
    Set {
        /// Field name
        field: String,
        /// New value; use "none" to clear
        value: String,
    },

    /// Toggle one day in the draft day selection
    ToggleDay {
        /// Weekday token, e.g. Lun or Mon
        day: String,
    },

    /// Apply the draft filters
    Apply,

    /// Clear draft and applied filters
    Clear,

    /// Discard unsaved draft edits
    Reset,

    /// Show draft and applied filters
    Show,
}

fn make_source(config: &Config) -> Result<Box<dyn CatalogSource>> {
    if config.sample {
        Ok(Box::new(SampleCatalog::new(config.sample_size, Utc::now(), config.sample_seed)))
    } else {
        Ok(Box::new(HttpCatalog::new(config)?))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.sample {
        config.sample = true;
    }

    // Filter state persists between invocations
    let session_path = cli.session.clone().or_else(Config::default_session_path);
    let mut state = match &session_path {
        Some(path) => FilterState::load(path)?,
        None => FilterState::new(),
    };

    match cli.command {
        Commands::List {
            query,
            category,
            days,
            only_active,
            min_discount,
            sort,
            page,
            limit,
            max,
        } => {
            let overrides = ListOverrides {
                category,
                days,
                only_active,
                min_discount,
                sort_by: sort,
                page,
                limit,
                max_results: max,
            };

            let source = make_source(&config)?;
            let cmd = ListCommand::new(config);
            let output =
                cmd.execute(source.as_ref(), &mut state, query.as_deref(), &overrides).await?;
            println!("{}", output);

            // A live query mutated the applied search
            if query.is_some() {
                if let Some(path) = &session_path {
                    state.save(path)?;
                }
            }
        }

        Commands::Show { id } => {
            let source = make_source(&config)?;
            let cmd = ShowCommand::new(config);
            let output = cmd.execute(source.as_ref(), &id).await?;
            println!("{}", output);
        }

        Commands::Categories => {
            let source = make_source(&config)?;
            let cmd = CategoriesCommand::new(config);
            let output = cmd.execute(source.as_ref()).await?;
            println!("{}", output);
        }

        Commands::Filter { action } => {
            let action = match action {
                FilterSubcommand::Set { field, value } => FilterAction::Set { field, value },
                FilterSubcommand::ToggleDay { day } => FilterAction::ToggleDay { day },
                FilterSubcommand::Apply => FilterAction::Apply,
                FilterSubcommand::Clear => FilterAction::Clear,
                FilterSubcommand::Reset => FilterAction::Reset,
                FilterSubcommand::Show => FilterAction::Show,
            };

            let output = FilterCommand::execute(&mut state, action)?;
            println!("{}", output);

            if let Some(path) = &session_path {
                state.save(path)?;
            }
        }
    }

    Ok(())
}
