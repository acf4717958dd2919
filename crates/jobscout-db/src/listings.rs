//! Database operations for the `listings` table.
//!
//! Rows are partitioned by search keyword and keyed by a SHA-256 hash of the
//! listing link, so re-saving the same listing under the same keyword updates
//! the existing row. Reads page through a group with keyset pagination on
//! `(partition_key, row_key)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use jobscout_core::{ContinuationToken, ListingSummary};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `listings` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ListingRow {
    pub listing_group: String,
    pub partition_key: String,
    pub row_key: String,
    pub title: String,
    pub company: String,
    pub salary: String,
    pub location: String,
    pub link: String,
    pub requirements: String,
    pub scraped_at: DateTime<Utc>,
    pub created_by: String,
}

/// One page of a group's listings.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub listings: Vec<ListingRow>,
    /// Present only when at least one more row exists after this page.
    pub next_token: Option<ContinuationToken>,
}

/// Position after the last row of a page. Serialized into the raw token.
#[derive(Debug, Serialize, Deserialize)]
struct Cursor {
    partition_key: String,
    row_key: String,
}

impl Cursor {
    fn encode(&self) -> ContinuationToken {
        // Two plain strings always serialize.
        ContinuationToken::from_raw(serde_json::to_string(self).unwrap_or_default())
    }

    fn decode(token: &ContinuationToken) -> Result<Self, DbError> {
        serde_json::from_str(token.as_raw()).map_err(|_| DbError::InvalidContinuationToken)
    }
}

/// Stable row key for a listing link: lowercase hex SHA-256.
#[must_use]
pub fn link_row_key(link: &str) -> String {
    format!("{:x}", Sha256::digest(link.as_bytes()))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Inserts a listing, or updates every non-key column of the existing row
/// for the same group, keyword and link.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_listing(
    pool: &SqlitePool,
    group: &str,
    listing: &ListingSummary,
    created_by: &str,
    scraped_at: DateTime<Utc>,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO listings \
             (listing_group, partition_key, row_key, title, company, salary, location, link, \
              requirements, scraped_at, created_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
         ON CONFLICT (listing_group, partition_key, row_key) DO UPDATE SET \
             title = excluded.title, \
             company = excluded.company, \
             salary = excluded.salary, \
             location = excluded.location, \
             link = excluded.link, \
             requirements = excluded.requirements, \
             scraped_at = excluded.scraped_at, \
             created_by = excluded.created_by",
    )
    .bind(group)
    .bind(&listing.keyword)
    .bind(link_row_key(&listing.link))
    .bind(&listing.title)
    .bind(&listing.company)
    .bind(&listing.salary_text)
    .bind(&listing.location)
    .bind(&listing.link)
    .bind(&listing.requirements_summary)
    .bind(scraped_at)
    .bind(created_by)
    .execute(pool)
    .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns up to `page_size` listings of `group` after `token`, ordered by
/// `(partition_key, row_key)`.
///
/// A `page_size` of `0` is treated as `1`.
///
/// # Errors
///
/// - [`DbError::InvalidContinuationToken`] if `token` was not issued here.
/// - [`DbError::Sqlx`] if the query fails.
pub async fn list_listings_page(
    pool: &SqlitePool,
    group: &str,
    page_size: u32,
    token: Option<&ContinuationToken>,
) -> Result<ListingPage, DbError> {
    let page_size = page_size.max(1);
    let cursor = token.map(Cursor::decode).transpose()?;
    let (after_partition, after_row) = cursor
        .map(|c| (Some(c.partition_key), Some(c.row_key)))
        .unwrap_or_default();

    let mut rows = sqlx::query_as::<_, ListingRow>(
        "SELECT listing_group, partition_key, row_key, title, company, salary, location, link, \
                requirements, scraped_at, created_by \
         FROM listings \
         WHERE listing_group = ?1 \
           AND (?2 IS NULL OR (partition_key, row_key) > (?2, ?3)) \
         ORDER BY partition_key, row_key \
         LIMIT ?4",
    )
    .bind(group)
    .bind(after_partition)
    .bind(after_row)
    .bind(i64::from(page_size) + 1)
    .fetch_all(pool)
    .await?;

    let has_more = rows.len() > page_size as usize;
    rows.truncate(page_size as usize);

    let next_token = if has_more {
        rows.last().map(|last| {
            Cursor {
                partition_key: last.partition_key.clone(),
                row_key: last.row_key.clone(),
            }
            .encode()
        })
    } else {
        None
    };

    Ok(ListingPage {
        listings: rows,
        next_token,
    })
}

#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;
