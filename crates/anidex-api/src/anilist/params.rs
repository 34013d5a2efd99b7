//! `AniList` query variables and schema enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when text does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Enum type name.
    kind: &'static str,
    /// Rejected input.
    input: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.input)
    }
}

impl std::error::Error for ParseEnumError {}

/// Normalizes user input to the upstream spelling (`tv-short` -> `TV_SHORT`).
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Declares a schema enum serialized in its upstream SCREAMING_SNAKE_CASE spelling.
macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// All values in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the upstream spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match normalize(s).as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        input: String::from(s),
                    }),
                }
            }
        }
    };
}

schema_enum! {
    /// Media type.
    MediaType, "media type" {
        /// Anime.
        Anime => "ANIME",
        /// Manga.
        Manga => "MANGA",
    }
}

schema_enum! {
    /// Media format.
    MediaFormat, "media format" {
        /// TV series.
        Tv => "TV",
        /// Short TV series.
        TvShort => "TV_SHORT",
        /// Movie.
        Movie => "MOVIE",
        /// Special.
        Special => "SPECIAL",
        /// Original video animation.
        Ova => "OVA",
        /// Original net animation.
        Ona => "ONA",
        /// Music video.
        Music => "MUSIC",
        /// Manga.
        Manga => "MANGA",
        /// Light novel.
        Novel => "NOVEL",
        /// One shot.
        OneShot => "ONE_SHOT",
    }
}

schema_enum! {
    /// Release status.
    MediaStatus, "media status" {
        /// Finished.
        Finished => "FINISHED",
        /// Currently releasing.
        Releasing => "RELEASING",
        /// Announced.
        NotYetReleased => "NOT_YET_RELEASED",
        /// Cancelled.
        Cancelled => "CANCELLED",
        /// On hiatus.
        Hiatus => "HIATUS",
    }
}

schema_enum! {
    /// Broadcast season.
    MediaSeason, "media season" {
        /// December to February.
        Winter => "WINTER",
        /// March to May.
        Spring => "SPRING",
        /// June to August.
        Summer => "SUMMER",
        /// September to November.
        Fall => "FALL",
    }
}

schema_enum! {
    /// Sort key for list queries.
    MediaSort, "media sort" {
        /// Most popular first.
        PopularityDesc => "POPULARITY_DESC",
        /// Least popular first.
        Popularity => "POPULARITY",
        /// Highest score first.
        ScoreDesc => "SCORE_DESC",
        /// Lowest score first.
        Score => "SCORE",
        /// Trending first.
        TrendingDesc => "TRENDING_DESC",
        /// Most favourited first.
        FavouritesDesc => "FAVOURITES_DESC",
        /// Newest first.
        StartDateDesc => "START_DATE_DESC",
        /// Oldest first.
        StartDate => "START_DATE",
        /// Romaji title.
        TitleRomaji => "TITLE_ROMAJI",
        /// Recently updated first.
        UpdatedAtDesc => "UPDATED_AT_DESC",
        /// Media ID.
        Id => "ID",
    }
}

/// Sort applied when the caller does not choose one.
pub const DEFAULT_SORT: [MediaSort; 2] = [MediaSort::PopularityDesc, MediaSort::ScoreDesc];

/// Default page size of the convenience queries.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Returns `true` when an optional string is absent or blank.
#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Returns `true` when an optional list is absent or empty.
#[allow(clippy::ref_option)]
fn is_empty_list<T>(value: &Option<Vec<T>>) -> bool {
    value.as_ref().is_none_or(Vec::is_empty)
}

/// Variables substituted into the fixed GraphQL documents.
///
/// Absent, blank, or empty values are omitted from the serialized object.
/// `AniList` treats an omitted filter differently from an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Media type filter.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    /// Free-text search.
    #[serde(skip_serializing_if = "is_blank")]
    pub search: Option<String>,
    /// Genre filter.
    #[serde(rename = "genre_in", skip_serializing_if = "is_empty_list")]
    pub genre_in: Option<Vec<String>>,
    /// Format filter.
    #[serde(rename = "format_in", skip_serializing_if = "is_empty_list")]
    pub format_in: Option<Vec<MediaFormat>>,
    /// Status filter.
    #[serde(rename = "status_in", skip_serializing_if = "is_empty_list")]
    pub status_in: Option<Vec<MediaStatus>>,
    /// Season filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<MediaSeason>,
    /// Season year filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_year: Option<i32>,
    /// Sort order.
    #[serde(skip_serializing_if = "is_empty_list")]
    pub sort: Option<Vec<MediaSort>>,
    /// Media ID (single-item queries).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl QueryVariables {
    /// Creates empty variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates variables for a single-item query.
    #[must_use]
    pub fn for_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Sets the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the media type.
    #[must_use]
    pub const fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    /// Sets the free-text search.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Restricts results to a single genre.
    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre_in = Some(vec![genre.into()]);
        self
    }

    /// Restricts results to a single format.
    #[must_use]
    pub fn format(mut self, format: MediaFormat) -> Self {
        self.format_in = Some(vec![format]);
        self
    }

    /// Restricts results to a single status.
    #[must_use]
    pub fn status(mut self, status: MediaStatus) -> Self {
        self.status_in = Some(vec![status]);
        self
    }

    /// Sets the season filter.
    #[must_use]
    pub const fn season(mut self, season: MediaSeason) -> Self {
        self.season = Some(season);
        self
    }

    /// Sets the season year filter.
    #[must_use]
    pub const fn season_year(mut self, year: i32) -> Self {
        self.season_year = Some(year);
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn sort(mut self, sort: Vec<MediaSort>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Fills in [`DEFAULT_SORT`] unless the caller chose a non-empty sort.
    #[must_use]
    pub fn with_default_sort(mut self) -> Self {
        if is_empty_list(&self.sort) {
            self.sort = Some(DEFAULT_SORT.to_vec());
        }
        self
    }

    /// Variables for the most popular media of a type.
    #[must_use]
    pub fn top(media_type: MediaType, page: u32, per_page: u32) -> Self {
        Self::new()
            .page(page)
            .per_page(per_page)
            .media_type(media_type)
            .with_default_sort()
    }

    /// Variables for media of a single genre.
    #[must_use]
    pub fn by_genre(genre: &str, media_type: MediaType, page: u32) -> Self {
        Self::top(media_type, page, DEFAULT_PER_PAGE).genre(genre)
    }

    /// Variables for anime airing in a season.
    #[must_use]
    pub fn seasonal(season: MediaSeason, year: i32, page: u32) -> Self {
        Self::top(MediaType::Anime, page, DEFAULT_PER_PAGE)
            .season(season)
            .season_year(year)
    }

    /// Variables for media of a studio.
    ///
    /// The schema has no studio filter, so the name goes into the free-text
    /// search. Results may include media that merely mention the name.
    #[must_use]
    pub fn by_studio(studio: &str, media_type: MediaType, page: u32) -> Self {
        Self::top(media_type, page, DEFAULT_PER_PAGE).search(studio)
    }

    /// Returns `true` when no filter beyond paging, type, and sort is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        is_blank(&self.search)
            && is_empty_list(&self.genre_in)
            && is_empty_list(&self.format_in)
            && is_empty_list(&self.status_in)
            && self.season.is_none()
            && self.season_year.is_none()
    }
}
