pub mod aggregate;
pub mod analyze;
pub mod cache;
pub mod client;
pub mod detail;
pub mod error;
pub mod harvest;
pub mod parse;
pub(crate) mod parse_helpers;
pub mod rate_limit;
pub mod types;

pub use aggregate::aggregate;
pub use analyze::{analyze_candidate, analyze_candidates, AnalysisReport, ScoredListing, Skip};
pub use cache::{Clock, ListingCache, SystemClock};
pub use client::JobBoardClient;
pub use detail::parse_listing_detail;
pub use error::{ParseError, ScraperError};
pub use harvest::{normalize_keywords, select_candidates, Harvester};
pub use parse::parse_search_results;
pub use rate_limit::{DelayRange, RetryPolicy};
