//! Built-in sample catalogue used by `eventhub-cli seed`.

use chrono::{DateTime, Utc};

use eventhub_core::error::AppError;
use eventhub_core::result::AppResult;
use eventhub_entity::NewEvent;

struct Sample {
    name: &'static str,
    organizer: &'static str,
    location: &'static str,
    starts_at: &'static str,
    description: &'static str,
    capacity: i32,
    category: &'static str,
    tags: &'static [&'static str],
}

const SAMPLES: [Sample; 6] = [
    Sample {
        name: "Tech Conference 2026",
        organizer: "Bellcorp Tech",
        location: "San Francisco, CA",
        starts_at: "2026-05-15T09:00:00Z",
        description: "A deep dive into the latest in AI and Web3 technologies.",
        capacity: 500,
        category: "Technology",
        tags: &["AI", "Web3", "Blockchain"],
    },
    Sample {
        name: "Music Festival Echo",
        organizer: "Echo Events",
        location: "Austin, TX",
        starts_at: "2026-06-20T14:00:00Z",
        description: "A weekend of live music, food trucks, and art installations.",
        capacity: 1000,
        category: "Music",
        tags: &["Live Music", "Festival", "Art"],
    },
    Sample {
        name: "Startup Pitch Night",
        organizer: "Innovation Hub",
        location: "New York, NY",
        starts_at: "2026-04-10T18:00:00Z",
        description: "Founders pitch their next big ideas to a panel of investors.",
        capacity: 100,
        category: "Business",
        tags: &["Startup", "Pitch", "Networking"],
    },
    Sample {
        name: "Health & Wellness Expo",
        organizer: "Green Life",
        location: "Chicago, IL",
        starts_at: "2026-07-05T10:00:00Z",
        description: "Workshops, yoga sessions, and healthy cooking demonstrations.",
        capacity: 300,
        category: "Health",
        tags: &["Yoga", "Wellness", "Health"],
    },
    Sample {
        name: "Web Dev Workshop",
        organizer: "Code Masters",
        location: "Seattle, WA",
        starts_at: "2026-03-22T13:00:00Z",
        description: "Hands-on workshop building a full-stack React application.",
        capacity: 50,
        category: "Workshop",
        tags: &["React", "NodeJS", "Fullstack"],
    },
    Sample {
        name: "Retro Game Night",
        organizer: "Classic Arcade",
        location: "Portland, OR",
        starts_at: "2026-02-28T19:00:00Z",
        description: "Play your favorite classic games on original hardware.",
        capacity: 40,
        category: "Entertainment",
        tags: &["Gaming", "Retro", "Arcade"],
    },
];

/// The sample events, each with every seat available.
pub fn sample_events() -> AppResult<Vec<NewEvent>> {
    SAMPLES
        .iter()
        .map(|s| {
            let starts_at = s.starts_at.parse::<DateTime<Utc>>().map_err(|e| {
                AppError::internal(format!("Bad start time for sample '{}': {e}", s.name))
            })?;
            Ok(NewEvent {
                name: s.name.to_string(),
                organizer: s.organizer.to_string(),
                location: s.location.to_string(),
                starts_at,
                description: s.description.to_string(),
                capacity: s.capacity,
                category: s.category.to_string(),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
            })
        })
        .collect()
}
