//! CLI command definitions and dispatch.

pub mod event;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use eventhub_core::config::AppConfig;
use eventhub_core::error::AppError;
use eventhub_database::{DatabasePool, StoreHandles};
use eventhub_service::EventService;

use crate::output::OutputFormat;

/// EventHub administration tool
#[derive(Debug, Parser)]
#[command(name = "eventhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Load the sample event catalogue
    Seed(seed::SeedArgs),
    /// Event management
    Event(event::EventArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db).await,
            Commands::Seed(args) => seed::execute(args, &db, self.format).await,
            Commands::Event(args) => event::execute(args, &db, self.format).await,
        };

        db.close().await;
        result
    }
}

/// Helper: event service over the PostgreSQL store
pub fn event_service(db: &DatabasePool) -> EventService {
    let stores = StoreHandles::postgres(db);
    EventService::new(Arc::clone(&stores.events))
}
