//! `AniList` GraphQL client module.
//!
//! Sends the fixed media queries to the `AniList` GraphQL endpoint through a
//! shared rate limiter, retrying failed attempts with exponential backoff.

mod api;
mod client;
pub mod display;
mod error;
mod executor;
mod handle;
mod params;
mod query;
mod rate_limiter;
mod types;
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{AniListApi, LocalAniListApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{AniListClient, AniListClientBuilder, DEFAULT_ENDPOINT};
pub use error::{RequestError, TerminalError};
pub use executor::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RequestExecutor, RetryPolicy};
pub use handle::{RequestHandle, spawn_request};
pub use params::{
    DEFAULT_PER_PAGE, DEFAULT_SORT, MediaFormat, MediaSeason, MediaSort, MediaStatus, MediaType,
    ParseEnumError, QueryVariables,
};
pub use query::QueryDocument;
pub use rate_limiter::{DEFAULT_MIN_INTERVAL, RateLimiter, SharedRateLimiter};
pub use types::{
    CharacterConnection, CharacterEdge, CoverImage, FuzzyDate, Media, MediaData, MediaPage,
    MediaResponse, MediaTag, MediaTitle, PageData, PageInfo, PageResponse, Person, PersonName,
    RelationConnection, RelationEdge, StaffConnection, StaffEdge, Studio, StudioConnection,
};
pub use util::{PagedMedia, fetch_pages};
