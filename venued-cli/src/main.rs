mod commands;
mod render;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use venued_core::reconcile::SyncRequest;
use venued_core::venue::Venue;
use venued_core::venued::Venued;

#[derive(Parser)]
#[command(name = "venued")]
#[command(about = "Manage venue bookings and sync them to external calendars")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SyncActionArg {
    Create,
    Update,
    Delete,
}

impl From<SyncActionArg> for SyncRequest {
    fn from(arg: SyncActionArg) -> Self {
        match arg {
            SyncActionArg::Create => SyncRequest::Create,
            SyncActionArg::Update => SyncRequest::Update,
            SyncActionArg::Delete => SyncRequest::Delete,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show which events occupy a calendar date
    Day {
        /// Date to resolve (YYYY-MM-DD)
        date: String,

        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,
    },
    /// List upcoming events day by day
    Events {
        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,

        /// Show events from this date (YYYY-MM-DD), default today
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Create a new event (prompts for anything omitted)
    New {
        title: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Last day for multi-day bookings (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Event type tag (e.g. "wedding")
        #[arg(long = "type")]
        event_type: Option<String>,

        /// Venue to create the event in (by slug)
        #[arg(short, long)]
        venue: Option<String>,
    },
    /// Sync one event to the external calendar
    Sync {
        event_id: String,

        /// Desired action; create is downgraded to update for events that
        /// are already linked
        #[arg(short, long, value_enum, default_value = "update")]
        action: SyncActionArg,

        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,
    },
    /// Sync every event from a date onwards
    Push {
        /// First date to include (YYYY-MM-DD), default today
        #[arg(long)]
        from: Option<String>,

        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,
    },
    /// Remove external calendar entries from a date onwards
    Prune {
        /// First date to include (YYYY-MM-DD), default today
        #[arg(long)]
        from: Option<String>,

        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an event (removes the external calendar entry first)
    Delete {
        event_id: String,

        /// Only operate on this venue (by slug)
        #[arg(short, long)]
        venue: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Day { date, venue } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            let date = commands::parse_date(&date)?;
            commands::day::run(venues, date)
        }
        Commands::Events { venue, from, to } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            commands::events::run(venues, from.as_deref(), to.as_deref())
        }
        Commands::New {
            title,
            date,
            end_date,
            time,
            event_type,
            venue,
        } => {
            require_venues()?;
            let venues = resolve_venues(None)?;
            commands::new::run(title, date, end_date, time, event_type, venue, venues).await
        }
        Commands::Sync {
            event_id,
            action,
            venue,
        } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            commands::sync::run(venues, &event_id, action.into()).await
        }
        Commands::Push { from, venue } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            commands::push::run(venues, from.as_deref()).await
        }
        Commands::Prune { from, venue, yes } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            commands::prune::run(venues, from.as_deref(), yes).await
        }
        Commands::Delete { event_id, venue } => {
            require_venues()?;
            let venues = resolve_venues(venue.as_deref())?;
            commands::delete::run(venues, &event_id).await
        }
    }
}

fn require_venues() -> Result<()> {
    let venued = Venued::load()?;

    if venued.venues().is_empty() {
        anyhow::bail!(
            "No venues found in {}.\n\n\
            Create one by making a subdirectory with a .venued/ marker:\n  \
            mkdir -p {}/my-venue/.venued",
            venued.display_path().display(),
            venued.display_path().display()
        );
    }

    Ok(())
}

fn resolve_venues(venue_filter: Option<&str>) -> Result<Vec<Venue>> {
    let venued = Venued::load()?;
    let all_venues = venued.venues();

    match venue_filter {
        Some(slug) => match all_venues.into_iter().find(|v| v.slug == slug) {
            Some(venue) => Ok(vec![venue]),
            None => {
                let available: Vec<_> = venued.venues().iter().map(|v| v.slug.clone()).collect();
                anyhow::bail!(
                    "Venue '{}' not found. Available: {}",
                    slug,
                    available.join(", ")
                );
            }
        },
        None => Ok(all_venues),
    }
}
