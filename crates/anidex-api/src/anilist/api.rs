//! `AniListApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::{MediaSeason, MediaType, QueryVariables};
use super::types::{Media, MediaPage};

/// `AniList` query functions.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every method propagates the executor's [`TerminalError`](super::TerminalError)
/// as the root error without added context.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(AniListApi: Send)]
pub trait LocalAniListApi {
    /// Searches media. Sort defaults to popularity then score unless set.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn search_media(&self, variables: &QueryVariables) -> Result<MediaPage>;

    /// Fetches a single media without relations.
    ///
    /// Returns `Ok(None)` when the ID does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn media_by_id(&self, id: u64) -> Result<Option<Media>>;

    /// Fetches a single media with relations, characters, and staff.
    ///
    /// Returns `Ok(None)` when the ID does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn media_with_details(&self, id: u64) -> Result<Option<Media>>;

    /// Fetches the most popular media of a type.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn top_media(&self, media_type: MediaType, page: u32, per_page: u32)
    -> Result<MediaPage>;

    /// Fetches media of a genre, 20 per page.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn media_by_genre(
        &self,
        genre: &str,
        media_type: MediaType,
        page: u32,
    ) -> Result<MediaPage>;

    /// Fetches anime of a season, 20 per page.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn seasonal_anime(&self, season: MediaSeason, year: i32, page: u32)
    -> Result<MediaPage>;

    /// Fetches media whose text matches a studio name, 20 per page.
    ///
    /// Approximate: the name is used as a free-text search.
    ///
    /// # Errors
    ///
    /// Returns an error if all attempts fail or the payload does not decode.
    async fn media_by_studio(
        &self,
        studio: &str,
        media_type: MediaType,
        page: u32,
    ) -> Result<MediaPage>;
}
