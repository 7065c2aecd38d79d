use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use pc_profile_core::{ProfileCardConfig, ProfileCardController, SessionState};
use pc_security::SecurityManager;
use pc_storage::{KvBackend, RocksDbBackend};
use pc_types::{CurrentProfile, DEFAULT_STATUS};
use serde_json::{Value, json};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "profile-host")]
#[command(about = "Manage locally stored profile cards", long_about = None)]
struct Cli {
    /// RocksDB directory holding the profile data.
    #[arg(long, env = "PROFILE_CARD_DB_PATH", default_value = "./data/profile-card")]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current profile.
    Show,
    List,
    Search {
        query: String,
    },
    Leaderboard {
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Display a stored profile without changing its search count.
    Select {
        handle: String,
    },
    /// Create or edit a profile and make it current.
    Update {
        handle: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        avatar_url: String,
        #[arg(long, default_value = DEFAULT_STATUS)]
        status: String,
    },
    /// Print the contact link for the current profile.
    Contact,
    /// Remove every stored profile key.
    Reset,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let backend = RocksDbBackend::open_default(&cli.db)
        .with_context(|| format!("failed to open profile database at {}", cli.db))?;
    info!("profile-host using {}", cli.db);

    let security = SecurityManager::new();
    let mut session = SessionState::default();
    let mut controller = ProfileCardController::new(backend, ProfileCardConfig::from_env());
    controller.boot(&mut session, &security);

    let output = execute(cli.command, &mut controller)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn execute<B: KvBackend>(command: Command, controller: &mut ProfileCardController<B>) -> anyhow::Result<Value> {
    let output = match command {
        Command::Show => serde_json::to_value(controller.current())?,
        Command::List => serde_json::to_value(controller.store().list())?,
        Command::Search { query } => serde_json::to_value(controller.search(&query))?,
        Command::Leaderboard { limit } => {
            let limit = limit.unwrap_or(controller.config().leaderboard_size);
            serde_json::to_value(controller.store().leaderboard(limit))?
        }
        Command::Select { handle } => {
            let record = controller
                .store()
                .find_by_handle(&handle)
                .ok_or_else(|| anyhow!("profile not found: {handle}"))?;
            serde_json::to_value(controller.on_select(&record.displayable()))?
        }
        Command::Update {
            handle,
            name,
            title,
            avatar_url,
            status,
        } => {
            if handle.trim().is_empty() {
                return Err(anyhow!("handle cannot be empty"));
            }
            let record = controller.on_update(&CurrentProfile {
                name,
                title,
                handle,
                status,
                avatar_url,
            });
            serde_json::to_value(record)?
        }
        Command::Contact => json!({ "url": controller.contact_url() }),
        Command::Reset => {
            controller.reset_all();
            json!({ "reset": true })
        }
    };

    Ok(output)
}
