use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use crate::config::{AppConfig, ConfigStore};
use crate::dashboard::{Dashboard, DashboardView, Tab};
use crate::djs::DjDraft;
use crate::events::EventDraft;
use crate::logo::{self, LogoInputMode};
use crate::models::{Dj, Event, SortDirection};
use crate::store::{RecordStore, SqliteStore};

/// Keep a log of the DJs you've seen and the events you've been to.
#[derive(Parser, Debug)]
#[command(name = "set-log", version, about, long_about = None)]
pub struct Cli {
    /// Database file (defaults to the configured path)
    #[arg(long, global = true, env = "SET_LOG_DB")]
    db: Option<PathBuf>,

    /// Config file (defaults to config.json in the data directory)
    #[arg(long, global = true, env = "SET_LOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record or list DJs
    Dj {
        #[command(subcommand)]
        action: DjAction,
    },
    /// Record or list events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Show the configured default tab
    Dashboard(ListArgs),
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum DjAction {
    /// Add a DJ
    Add {
        #[arg(long, default_value = "")]
        name: String,
        /// Date seen, YYYY-MM-DD
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, conflicts_with = "logo_file")]
        logo_url: Option<String>,
        /// Image file embedded as a data URI
        #[arg(long)]
        logo_file: Option<PathBuf>,
    },
    /// List DJs, latest first unless --sort says otherwise
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
enum EventAction {
    /// Add an event
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        venue: String,
        /// Event date, YYYY-MM-DD
        #[arg(long, default_value = "")]
        date: String,
    },
    /// List events, latest first unless --sort says otherwise
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        default_sort: Option<SortArg>,
        #[arg(long)]
        default_tab: Option<TabArg>,
        #[arg(long)]
        database_path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive search term
    #[arg(short, long, default_value = "")]
    query: String,
    #[arg(long)]
    sort: Option<SortArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => SortDirection::Ascending,
            SortArg::Desc => SortDirection::Descending,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TabArg {
    Djs,
    Events,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Djs => Tab::Djs,
            TabArg::Events => Tab::Events,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(execute(cli))
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "set_log_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn execute(cli: Cli) -> Result<()> {
    let Cli {
        db,
        config,
        command,
    } = cli;
    let config_store = match &config {
        Some(path) => ConfigStore::load_from(path),
        None => ConfigStore::load(),
    };
    let config = config_store.read();

    match command {
        Command::Config { action } => return run_config(&config_store, action),
        Command::Dj { action } => {
            let mut dashboard = open_dashboard(db, &config)?;
            match action {
                DjAction::Add {
                    name,
                    date,
                    logo_url,
                    logo_file,
                } => add_dj(&mut dashboard, name, date, logo_url, logo_file).await,
                DjAction::List(args) => {
                    dashboard.select_tab(Tab::Djs);
                    print_view(&mut dashboard, args);
                }
            }
        }
        Command::Event { action } => {
            let mut dashboard = open_dashboard(db, &config)?;
            match action {
                EventAction::Add { name, venue, date } => {
                    match dashboard
                        .events_mut()
                        .create_from(EventDraft { name, venue, date })
                    {
                        Some(event) => println!("{}", format_event(event)),
                        None => warn!("an event needs --name, --venue and --date; nothing saved"),
                    }
                }
                EventAction::List(args) => {
                    dashboard.select_tab(Tab::Events);
                    print_view(&mut dashboard, args);
                }
            }
        }
        Command::Dashboard(args) => {
            let mut dashboard = open_dashboard(db, &config)?;
            print_view(&mut dashboard, args);
        }
    }

    Ok(())
}

fn open_dashboard(db: Option<PathBuf>, config: &AppConfig) -> Result<Dashboard> {
    let db_path = db.unwrap_or_else(|| config.database_path());
    let backend = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    info!("using database {}", db_path.display());
    Ok(Dashboard::with_config(
        RecordStore::new(Arc::new(backend)),
        config,
    ))
}

async fn add_dj(
    dashboard: &mut Dashboard,
    name: String,
    date: String,
    logo_url: Option<String>,
    logo_file: Option<PathBuf>,
) {
    let djs = dashboard.djs_mut();
    *djs.draft_mut() = DjDraft {
        name,
        date,
        ..DjDraft::default()
    };
    if let Some(url) = logo_url {
        if djs.logo_input_mode() != LogoInputMode::Url {
            djs.toggle_logo_input();
        }
        djs.set_logo_url(url);
    }
    if let Some(path) = logo_file {
        let ticket = djs.begin_logo_read();
        let result = logo::read_logo_file(&path).await;
        djs.finish_logo_read(ticket, result);
    }
    match djs.create() {
        Some(dj) => println!("{}", format_dj(dj)),
        None => warn!("a DJ needs both --name and --date; nothing saved"),
    }
}

fn run_config(store: &ConfigStore, action: ConfigAction) -> Result<()> {
    let config = match action {
        ConfigAction::Show => store.read(),
        ConfigAction::Set {
            default_sort,
            default_tab,
            database_path,
        } => store
            .update(|config| {
                if let Some(sort) = default_sort {
                    config.default_sort = sort.into();
                }
                if let Some(tab) = default_tab {
                    config.default_tab = tab.into();
                }
                if database_path.is_some() {
                    config.database_path = database_path;
                }
            })
            .with_context(|| format!("failed to write {}", store.path().display()))?,
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn print_view(dashboard: &mut Dashboard, args: ListArgs) {
    dashboard.set_query(args.query);
    if let Some(sort) = args.sort {
        if SortDirection::from(sort) != dashboard.sort() {
            dashboard.toggle_sort();
        }
    }

    let rows = dashboard.view();
    info!(
        "{} {:?} matching {:?}, {}",
        rows.len(),
        dashboard.active_tab(),
        dashboard.query(),
        dashboard.sort().label()
    );
    match rows {
        DashboardView::Djs(rows) => rows.into_iter().for_each(|dj| println!("{}", format_dj(dj))),
        DashboardView::Events(rows) => rows
            .into_iter()
            .for_each(|event| println!("{}", format_event(event))),
    }
}

fn format_dj(dj: &Dj) -> String {
    let logo = match dj.logo.as_deref() {
        Some(_) if dj.has_embedded_logo() => "  [embedded logo]".to_string(),
        Some(url) => format!("  [{url}]"),
        None => String::new(),
    };
    format!("{}  {}{logo}", dj.date, dj.name)
}

fn format_event(event: &Event) -> String {
    format!("{}  {} @ {}", event.date, event.name, event.venue)
}
