//! API client library for anidex.
//!
//! Provides a rate-limited, retrying client for the `AniList` GraphQL API.

/// `AniList` GraphQL client.
pub mod anilist;
