//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use eventhub_entity::Event;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One event as a table row.
#[derive(Debug, Serialize, Tabled)]
pub struct EventRow {
    /// Event ID
    pub id: String,
    /// Name
    pub name: String,
    /// Category
    pub category: String,
    /// Start time
    pub starts_at: String,
    /// Seats left of capacity
    pub seats: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            name: event.name.clone(),
            category: event.category.clone(),
            starts_at: event.starts_at.format("%Y-%m-%d %H:%M").to_string(),
            seats: format!("{}/{}", event.available_seats, event.capacity),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print a single event in the selected format
pub fn print_event(event: &Event, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_kv("ID", &event.id.to_string());
            print_kv("Name", &event.name);
            print_kv("Organizer", &event.organizer);
            print_kv("Location", &event.location);
            print_kv("Starts at", &event.starts_at.to_rfc3339());
            print_kv("Category", &event.category);
            print_kv("Tags", &event.tags.join(", "));
            print_kv("Capacity", &event.capacity.to_string());
            print_kv("Available seats", &event.available_seats.to_string());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(event).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
