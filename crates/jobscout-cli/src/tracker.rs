//! Tracker command handlers for the CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use jobscout_db::{DbError, TrackedOfferRow};

/// Sub-commands available under `tracker`.
#[derive(Debug, Subcommand)]
pub enum TrackerCommands {
    /// Start tracking an offer by hand
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "N/A")]
        location: String,
        /// Offer URL; identifies the offer
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "New")]
        status: String,
    },
    /// Change an offer's status and/or append a note
    Update {
        /// Offer id as shown by `tracker list`
        id: i64,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// List tracked offers, newest first
    List {
        /// Substring of title, company or status; includes inactive offers
        #[arg(long)]
        search: Option<String>,
        /// Include closed statuses such as `Rejected` and `No Response`
        #[arg(long)]
        all: bool,
        #[arg(long, default_value_t = 25)]
        limit: u32,
    },
    /// Show the note history of an offer
    Notes { id: i64 },
    /// Count tracked offers per status
    Stats,
    /// Move offers with no reply after `--days` to `No Response`
    Cleanup {
        #[arg(long, default_value_t = 60)]
        days: u32,
    },
}

/// Dispatch one tracker sub-command.
///
/// # Errors
///
/// Returns an error if arguments are unusable, the offer does not exist, or
/// a query fails.
pub(crate) async fn run_tracker(
    pool: &sqlx::SqlitePool,
    command: TrackerCommands,
) -> anyhow::Result<()> {
    match command {
        TrackerCommands::Add {
            company,
            title,
            location,
            url,
            status,
        } => {
            let url = url.trim();
            if url.is_empty() {
                anyhow::bail!("--url must not be empty");
            }
            let id = jobscout_db::record_offer(
                pool,
                company.trim(),
                title.trim(),
                location.trim(),
                url,
                non_empty(&status, "--status")?,
                Utc::now(),
            )
            .await?;
            println!("tracking offer {id}");
        }
        TrackerCommands::Update { id, status, note } => {
            if status.is_none() && note.is_none() {
                anyhow::bail!("nothing to update; pass --status and/or --note");
            }
            if let Some(status) = status {
                let status = non_empty(&status, "--status")?;
                jobscout_db::update_status(pool, id, status)
                    .await
                    .map_err(|e| not_found(e, id))?;
                println!("offer {id}: status -> {status}");
            }
            if let Some(note) = note {
                jobscout_db::append_note(pool, id, non_empty(&note, "--note")?, Utc::now())
                    .await
                    .map_err(|e| not_found(e, id))?;
                println!("offer {id}: note added");
            }
        }
        TrackerCommands::List { search, all, limit } => {
            let offers =
                jobscout_db::list_tracked_offers(pool, search.as_deref(), all, limit).await?;
            print_offers(&offers);
        }
        TrackerCommands::Notes { id } => {
            let notes = jobscout_db::list_notes(pool, id).await?;
            if notes.is_empty() {
                println!("no notes for offer {id}");
            }
            for note in &notes {
                println!("{}  {}", note.noted_at.format("%Y-%m-%d %H:%M"), note.note);
            }
        }
        TrackerCommands::Stats => {
            let counts = jobscout_db::status_counts(pool).await?;
            if counts.is_empty() {
                println!("tracker is empty");
            }
            for row in &counts {
                println!("{:<16}{}", row.status, row.count);
            }
        }
        TrackerCommands::Cleanup { days } => {
            let cutoff = cleanup_cutoff(Utc::now(), days)?;
            let changed = jobscout_db::expire_stale_offers(pool, cutoff).await?;
            println!(
                "{changed} offer(s) older than {days} day(s) moved to '{}'",
                jobscout_db::STATUS_NO_RESPONSE
            );
        }
    }
    Ok(())
}

fn print_offers(offers: &[TrackedOfferRow]) {
    if offers.is_empty() {
        println!("no tracked offers match");
        return;
    }

    println!(
        "{:<6}{:<12}{:<14}{:<30}TITLE",
        "ID", "ADDED", "STATUS", "COMPANY"
    );
    for offer in offers {
        println!(
            "{:<6}{:<12}{:<14}{:<30}{}",
            offer.id,
            offer.added_at.format("%Y-%m-%d").to_string(),
            offer.status,
            crate::hunt::truncate(&offer.company, 28),
            offer.title
        );
    }
}

/// `now` minus `days`, or an error when that falls outside the calendar range.
fn cleanup_cutoff(now: DateTime<Utc>, days: u32) -> anyhow::Result<DateTime<Utc>> {
    chrono::Duration::try_days(i64::from(days))
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| anyhow::anyhow!("--days {days} reaches before the earliest supported date"))
}

fn non_empty<'a>(value: &'a str, flag: &str) -> anyhow::Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("{flag} must not be empty");
    }
    Ok(value)
}

fn not_found(error: DbError, id: i64) -> anyhow::Error {
    match error {
        DbError::NotFound => anyhow::anyhow!("offer {id} not found; see `tracker list --all`"),
        other => other.into(),
    }
}
