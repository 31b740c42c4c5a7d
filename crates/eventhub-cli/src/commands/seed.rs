//! Sample catalogue seeding.

use clap::Args;

use eventhub_core::error::AppError;
use eventhub_database::DatabasePool;

use crate::output::{self, EventRow, OutputFormat};

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Delete every event and registration before seeding
    #[arg(long)]
    pub reset: bool,

    /// Skip the confirmation prompt for --reset
    #[arg(long)]
    pub force: bool,
}

/// Execute the seed command
pub async fn execute(
    args: &SeedArgs,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    if args.reset && !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("This will DELETE all events and registrations. Continue?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = super::event_service(db).seed(args.reset).await?;

    let rows: Vec<EventRow> = report.created.iter().map(EventRow::from).collect();
    output::print_list(&rows, format);
    for name in &report.skipped {
        output::print_warning(&format!("'{name}' already exists, skipped"));
    }
    output::print_success(&format!(
        "Seeded {} events ({} skipped).",
        report.created.len(),
        report.skipped.len()
    ));
    Ok(())
}
