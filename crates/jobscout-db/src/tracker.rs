//! Application tracker: companies, tracked offers and their note history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::DbError;

/// Statuses shown by default when listing tracked offers.
pub const ACTIVE_STATUSES: [&str; 6] = ["New", "Lead", "Applied", "Under Review", "Interview", "Offer"];

/// Statuses that [`expire_stale_offers`] gives up on.
const EXPIRABLE_STATUSES: [&str; 3] = ["New", "Applied", "Lead"];

pub const STATUS_NO_RESPONSE: &str = "No Response";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A tracked offer joined with its company name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct TrackedOfferRow {
    pub id: i64,
    pub company: String,
    pub title: String,
    pub location: String,
    pub source_url: String,
    pub status: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct OfferNoteRow {
    pub id: i64,
    pub offer_id: i64,
    pub noted_at: DateTime<Utc>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Records an offer under its company, creating the company on first sight.
///
/// An offer whose `source_url` is already tracked is left untouched,
/// including its status. Returns the offer's id either way.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn record_offer(
    pool: &SqlitePool,
    company: &str,
    title: &str,
    location: &str,
    source_url: &str,
    status: &str,
    added_at: DateTime<Utc>,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO companies (name, added_at) VALUES (?1, ?2) ON CONFLICT (name) DO NOTHING")
        .bind(company)
        .bind(added_at)
        .execute(&mut *tx)
        .await?;

    let company_id: i64 = sqlx::query_scalar("SELECT id FROM companies WHERE name = ?1")
        .bind(company)
        .fetch_one(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO tracked_offers (company_id, title, location, source_url, status, added_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT (source_url) DO NOTHING",
    )
    .bind(company_id)
    .bind(title)
    .bind(location)
    .bind(source_url)
    .bind(status)
    .bind(added_at)
    .execute(&mut *tx)
    .await?;

    let offer_id: i64 = sqlx::query_scalar("SELECT id FROM tracked_offers WHERE source_url = ?1")
        .bind(source_url)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(offer_id)
}

/// Sets the free-text status of an offer.
///
/// # Errors
///
/// - [`DbError::NotFound`] if no offer has `offer_id`.
/// - [`DbError::Sqlx`] if the query fails.
pub async fn update_status(pool: &SqlitePool, offer_id: i64, status: &str) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE tracked_offers SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(offer_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

/// Appends a timestamped note to an offer's history. Returns the note id.
///
/// # Errors
///
/// - [`DbError::NotFound`] if no offer has `offer_id`.
/// - [`DbError::Sqlx`] if the query fails.
pub async fn append_note(
    pool: &SqlitePool,
    offer_id: i64,
    note: &str,
    noted_at: DateTime<Utc>,
) -> Result<i64, DbError> {
    let note_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO offer_notes (offer_id, noted_at, note) \
         SELECT id, ?2, ?3 FROM tracked_offers WHERE id = ?1 \
         RETURNING id",
    )
    .bind(offer_id)
    .bind(noted_at)
    .bind(note)
    .fetch_optional(pool)
    .await?;

    note_id.ok_or(DbError::NotFound)
}

/// Moves offers still waiting on the employer (`New`, `Applied`, `Lead`)
/// and added before `cutoff` to `No Response`. Returns how many changed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn expire_stale_offers(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE tracked_offers SET status = ?1 \
         WHERE status IN (SELECT value FROM json_each(?2)) AND added_at < ?3",
    )
    .bind(STATUS_NO_RESPONSE)
    .bind(status_list(&EXPIRABLE_STATUSES))
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Lists tracked offers, newest first.
///
/// With `search`, matches title, company or status by substring and ignores
/// `include_inactive`. Without it, only [`ACTIVE_STATUSES`] are shown unless
/// `include_inactive` is set.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_tracked_offers(
    pool: &SqlitePool,
    search: Option<&str>,
    include_inactive: bool,
    limit: u32,
) -> Result<Vec<TrackedOfferRow>, DbError> {
    let pattern = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));
    let active_only = pattern.is_none() && !include_inactive;

    let rows = sqlx::query_as::<_, TrackedOfferRow>(
        "SELECT o.id, c.name AS company, o.title, o.location, o.source_url, o.status, o.added_at \
         FROM tracked_offers o \
         JOIN companies c ON c.id = o.company_id \
         WHERE (?1 IS NULL OR o.title LIKE ?1 OR c.name LIKE ?1 OR o.status LIKE ?1) \
           AND (?2 = 0 OR o.status IN (SELECT value FROM json_each(?3))) \
         ORDER BY o.added_at DESC, o.id DESC \
         LIMIT ?4",
    )
    .bind(pattern)
    .bind(active_only)
    .bind(status_list(&ACTIVE_STATUSES))
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the note history of an offer, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_notes(pool: &SqlitePool, offer_id: i64) -> Result<Vec<OfferNoteRow>, DbError> {
    let rows = sqlx::query_as::<_, OfferNoteRow>(
        "SELECT id, offer_id, noted_at, note FROM offer_notes \
         WHERE offer_id = ?1 \
         ORDER BY noted_at, id",
    )
    .bind(offer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Number of tracked offers per status, most common first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn status_counts(pool: &SqlitePool) -> Result<Vec<StatusCount>, DbError> {
    let rows = sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM tracked_offers \
         GROUP BY status \
         ORDER BY count DESC, status",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

fn status_list(statuses: &[&str]) -> String {
    serde_json::to_string(statuses).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
