//! `AniList` response types.

use serde::Deserialize;

use super::params::{MediaFormat, MediaSeason, MediaStatus, MediaType};

// --- Envelopes ---

/// Response of the paged search query: `{ "data": { "Page": ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    /// Response data.
    pub data: PageData,
}

/// `data` object of a paged response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageData {
    /// The requested page.
    #[serde(rename = "Page")]
    pub page: MediaPage,
}

/// Response of a single-item query: `{ "data": { "Media": ... | null } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaResponse {
    /// Response data.
    pub data: MediaData,
}

/// `data` object of a single-item response.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaData {
    /// The record, `None` when the ID does not exist.
    #[serde(rename = "Media")]
    pub media: Option<Media>,
}

// --- Page ---

/// One page of media plus pagination state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    /// Pagination state.
    pub page_info: PageInfo,
    /// Records on this page.
    #[serde(default)]
    pub media: Vec<Media>,
}

/// Pagination state reported by the upstream service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    /// Total matching records.
    pub total: Option<u32>,
    /// Current page number.
    pub current_page: Option<u32>,
    /// Last page number.
    pub last_page: Option<u32>,
    /// Whether another page follows.
    pub has_next_page: bool,
    /// Page size.
    pub per_page: Option<u32>,
}

// --- Media ---

/// An anime or manga record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// `AniList` media ID.
    pub id: u64,
    /// Title variants.
    #[serde(default)]
    pub title: MediaTitle,
    /// Description (may contain HTML).
    pub description: Option<String>,
    /// Cover image URLs.
    pub cover_image: Option<CoverImage>,
    /// Banner image URL.
    pub banner_image: Option<String>,
    /// Weighted average score (0-100).
    pub average_score: Option<u32>,
    /// Mean score (0-100).
    pub mean_score: Option<u32>,
    /// Release status.
    pub status: Option<MediaStatus>,
    /// Episode count (anime).
    pub episodes: Option<u32>,
    /// Chapter count (manga).
    pub chapters: Option<u32>,
    /// Volume count (manga).
    pub volumes: Option<u32>,
    /// Start date.
    pub start_date: Option<FuzzyDate>,
    /// End date.
    pub end_date: Option<FuzzyDate>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Tags (detail query only).
    #[serde(default)]
    pub tags: Vec<MediaTag>,
    /// Studios.
    pub studios: Option<StudioConnection>,
    /// Format.
    pub format: Option<MediaFormat>,
    /// Season.
    pub season: Option<MediaSeason>,
    /// Season year.
    pub season_year: Option<i32>,
    /// Popularity (number of list entries).
    pub popularity: Option<u64>,
    /// Trending score.
    pub trending: Option<u64>,
    /// Favourite count.
    pub favourites: Option<u64>,
    /// Media type.
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
    /// Related media (detail query only).
    pub relations: Option<RelationConnection>,
    /// Characters (detail query only).
    pub characters: Option<CharacterConnection>,
    /// Staff (detail query only).
    pub staff: Option<StaffConnection>,
}

/// Title variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaTitle {
    /// Romanized title.
    pub romaji: Option<String>,
    /// English title.
    pub english: Option<String>,
    /// Native title.
    pub native: Option<String>,
}

/// Cover image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoverImage {
    /// Large image URL.
    pub large: Option<String>,
    /// Medium image URL.
    pub medium: Option<String>,
}

/// Date with optional month and day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FuzzyDate {
    /// Year.
    pub year: Option<i32>,
    /// Month (1-12).
    pub month: Option<u32>,
    /// Day (1-31).
    pub day: Option<u32>,
}

/// A media tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTag {
    /// Tag ID.
    pub id: u64,
    /// Tag name.
    pub name: String,
    /// Relevance rank (0-100).
    pub rank: Option<u32>,
    /// Whether the tag spoils this media.
    #[serde(default)]
    pub is_media_spoiler: bool,
}

/// Studio list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudioConnection {
    /// Studios.
    pub nodes: Vec<Studio>,
}

/// A studio.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Studio {
    /// Studio ID (absent in the by-id query).
    pub id: Option<u64>,
    /// Studio name.
    pub name: String,
}

// --- Detail edges ---

/// Related media.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelationConnection {
    /// Relation edges.
    pub edges: Vec<RelationEdge>,
}

/// A relation to another media.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    /// Relation kind (e.g. `SEQUEL`).
    pub relation_type: Option<String>,
    /// Related media (subset of fields).
    pub node: Media,
}

/// Characters of a media.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CharacterConnection {
    /// Character edges.
    pub edges: Vec<CharacterEdge>,
}

/// A character and their role.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterEdge {
    /// Role (`MAIN`, `SUPPORTING`, `BACKGROUND`).
    pub role: Option<String>,
    /// The character.
    pub node: Person,
}

/// Staff of a media.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StaffConnection {
    /// Staff edges.
    pub edges: Vec<StaffEdge>,
}

/// A staff member and their role.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffEdge {
    /// Free-text role (e.g. "Director").
    pub role: Option<String>,
    /// The staff member.
    pub node: Person,
}

/// A character or staff member.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    /// ID.
    pub id: u64,
    /// Name parts.
    #[serde(default)]
    pub name: PersonName,
    /// Image URLs.
    pub image: Option<CoverImage>,
}

/// Name parts of a character or staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersonName {
    /// First name.
    pub first: Option<String>,
    /// Last name.
    pub last: Option<String>,
    /// Full name.
    pub full: Option<String>,
}
