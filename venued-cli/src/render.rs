//! TUI rendering traits for venued types.
//!
//! Extension traits that add colored terminal rendering to venued-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use venued_core::placement::{DayPlacement, DayPosition};
use venued_core::reconcile::{BatchReport, SkipReason, SyncAction, SyncFailure, SyncOutcome};
use venued_core::venue::Venue;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Venue {
    fn render(&self) -> String {
        format!("🏛  {}", self.slug)
    }
}

impl Render for DayPosition {
    fn render(&self) -> String {
        let symbol = match self {
            DayPosition::Single => "•",
            DayPosition::Start => "┌",
            DayPosition::Middle => "│",
            DayPosition::End => "└",
        };
        symbol.to_string()
    }
}

impl Render for DayPlacement<'_> {
    fn render(&self) -> String {
        let event = self.event;

        let mut line = format!("{} {}", self.position.render(), event.title);

        if let Some(event_type) = &event.event_type {
            line.push_str(&format!(" {}", format!("[{}]", event_type).dimmed()));
        }

        if self.total_days > 1 {
            line.push_str(&format!(
                " {}",
                format!("(day {}/{})", self.day_index + 1, self.total_days).dimmed()
            ));
        }

        if let Some(time) = event.start_time {
            line.push_str(&format!(" {}", time.format("%H:%M").dimmed()));
        }

        line
    }
}

impl Render for SyncOutcome {
    fn render(&self) -> String {
        match self {
            SyncOutcome::Synced {
                action,
                external_id,
            } => {
                let (symbol, verb) = match action {
                    SyncAction::Created => ("+".green().to_string(), "created"),
                    SyncAction::Updated => ("~".yellow().to_string(), "updated"),
                    SyncAction::Deleted => ("-".red().to_string(), "deleted"),
                };
                match external_id {
                    Some(id) => format!("{} {} {}", symbol, verb, id.dimmed()),
                    None => format!("{} {}", symbol, verb),
                }
            }
            SyncOutcome::Skipped(reason) => {
                let text = match reason {
                    SkipReason::NoIntegration => "skipped: no integration".to_string(),
                    SkipReason::NoExternalId => "skipped: never synced".to_string(),
                    SkipReason::MissingData { missing } => {
                        format!("skipped: missing {}", missing.join(", "))
                    }
                };
                text.dimmed().to_string()
            }
            SyncOutcome::Failed(failure) => {
                let text = match failure {
                    SyncFailure::Sync { message } => format!("failed: {}", message),
                    SyncFailure::Persistence {
                        pending_external_id,
                        message,
                    } => match pending_external_id {
                        Some(id) => format!(
                            "failed: created externally as {} but not saved locally ({})",
                            id, message
                        ),
                        None => format!(
                            "failed: deleted externally but linkage not cleared ({})",
                            message
                        ),
                    },
                };
                text.red().to_string()
            }
        }
    }
}

/// One line per event plus a summary, for batch reports.
pub fn render_batch(report: &BatchReport) -> String {
    let mut lines: Vec<String> = report
        .entries
        .iter()
        .map(|entry| format!("   {} {}", entry.title, entry.outcome.render()))
        .collect();

    let (created, updated, deleted) = report.synced_counts();
    let failed = report.failed();
    let skipped = report.skipped();

    if report.entries.is_empty() {
        lines.push(format!("   {}", "nothing to sync".dimmed()));
    } else {
        let mut summary = format!(
            "   {} created, {} updated, {} deleted",
            created, updated, deleted
        );
        if skipped > 0 {
            summary.push_str(&format!(", {} skipped", skipped));
        }
        if failed > 0 {
            summary.push_str(&format!(", {}", format!("{} failed", failed).red()));
        }
        lines.push(summary);
    }

    lines.join("\n")
}
