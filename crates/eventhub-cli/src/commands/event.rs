//! Event management CLI commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use eventhub_core::error::AppError;
use eventhub_core::types::EventId;
use eventhub_database::DatabasePool;
use eventhub_entity::NewEvent;

use crate::output::{self, OutputFormat};

/// Arguments for event commands
#[derive(Debug, Args)]
pub struct EventArgs {
    /// Event subcommand
    #[command(subcommand)]
    pub command: EventCommand,
}

/// Event subcommands
#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Create a new event with every seat available
    Create {
        /// Event name
        #[arg(short, long)]
        name: String,
        /// Organizer
        #[arg(short, long)]
        organizer: String,
        /// Venue
        #[arg(short, long)]
        location: String,
        /// Start time (RFC 3339)
        #[arg(long)]
        starts_at: DateTime<Utc>,
        /// Total seats
        #[arg(long)]
        capacity: i32,
        /// Category
        #[arg(long)]
        category: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// Show an event and its seat counts
    Show {
        /// Event ID
        id: String,
    },
}

/// Execute event commands
pub async fn execute(
    args: &EventArgs,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = super::event_service(db);

    match &args.command {
        EventCommand::Create {
            name,
            organizer,
            location,
            starts_at,
            capacity,
            category,
            description,
            tags,
        } => {
            let event = service
                .create(NewEvent {
                    name: name.clone(),
                    organizer: organizer.clone(),
                    location: location.clone(),
                    starts_at: *starts_at,
                    description: description.clone(),
                    capacity: *capacity,
                    category: category.clone(),
                    tags: tags.clone(),
                })
                .await?;
            output::print_success(&format!("Event '{}' created.", event.name));
            output::print_event(&event, format);
        }
        EventCommand::Show { id } => {
            let event_id = id
                .parse::<EventId>()
                .map_err(|_| AppError::validation(format!("Invalid event id: {id}")))?;
            let event = service.get(event_id).await?;
            output::print_event(&event, format);
        }
    }
    Ok(())
}
