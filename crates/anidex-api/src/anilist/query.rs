//! Fixed GraphQL documents sent to `AniList`.

/// Paged media search (`Page.media`) with all browse filters.
const MEDIA_SEARCH_QUERY: &str = r"
query (
  $page: Int,
  $perPage: Int,
  $type: MediaType,
  $search: String,
  $genre_in: [String],
  $format_in: [MediaFormat],
  $status_in: [MediaStatus],
  $season: MediaSeason,
  $seasonYear: Int,
  $sort: [MediaSort]
) {
  Page(page: $page, perPage: $perPage) {
    pageInfo {
      total
      currentPage
      lastPage
      hasNextPage
      perPage
    }
    media(
      type: $type,
      search: $search,
      genre_in: $genre_in,
      format_in: $format_in,
      status_in: $status_in,
      season: $season,
      seasonYear: $seasonYear,
      sort: $sort
    ) {
      id
      title { romaji english native }
      description
      coverImage { large medium }
      bannerImage
      averageScore
      status
      episodes
      chapters
      volumes
      startDate { year month day }
      endDate { year month day }
      genres
      studios { nodes { id name } }
      format
      season
      seasonYear
      popularity
      type
    }
  }
}
";

/// Single media with relations, characters, and staff.
const MEDIA_DETAIL_QUERY: &str = r"
query ($id: Int) {
  Media(id: $id) {
    id
    title { romaji english native }
    description
    coverImage { large medium }
    bannerImage
    averageScore
    status
    episodes
    chapters
    volumes
    startDate { year month day }
    endDate { year month day }
    genres
    tags { id name rank isMediaSpoiler }
    studios { nodes { id name } }
    format
    season
    seasonYear
    popularity
    type
    relations {
      edges {
        relationType
        node {
          id
          title { romaji english native }
          coverImage { medium }
          type
          format
          status
          startDate { year }
          averageScore
        }
      }
    }
    characters(page: 1, perPage: 8, sort: [ROLE, RELEVANCE]) {
      edges {
        role
        node {
          id
          name { first last full }
          image { medium }
        }
      }
    }
    staff(page: 1, perPage: 6, sort: [RELEVANCE]) {
      edges {
        role
        node {
          id
          name { first last full }
          image { medium }
        }
      }
    }
  }
}
";

/// Single media without edges (legacy by-id lookup).
const MEDIA_BY_ID_QUERY: &str = r"
query ($id: Int) {
  Media(id: $id) {
    id
    title { romaji english native }
    description
    coverImage { large medium }
    bannerImage
    averageScore
    meanScore
    status
    episodes
    chapters
    volumes
    startDate { year month day }
    endDate { year month day }
    genres
    studios { nodes { name } }
    format
    season
    seasonYear
    popularity
    trending
    favourites
    type
  }
}
";

/// One of the fixed GraphQL operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDocument {
    /// Paged list query.
    Search,
    /// Single media with relations, characters, and staff.
    Detail,
    /// Single media, flat fields only.
    ById,
}

impl QueryDocument {
    /// Returns the GraphQL source text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => MEDIA_SEARCH_QUERY,
            Self::Detail => MEDIA_DETAIL_QUERY,
            Self::ById => MEDIA_BY_ID_QUERY,
        }
    }

    /// Short operation name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Search => "MediaSearch",
            Self::Detail => "MediaDetail",
            Self::ById => "MediaById",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_document_declares_all_filters() {
        // Arrange
        let doc = QueryDocument::Search.as_str();

        // Act & Assert
        for var in [
            "$page",
            "$perPage",
            "$type",
            "$search",
            "$genre_in",
            "$format_in",
            "$status_in",
            "$season",
            "$seasonYear",
            "$sort",
        ] {
            assert!(doc.contains(var), "missing {var}");
        }
        assert!(doc.contains("hasNextPage"));
    }

    #[test]
    fn test_detail_document_requests_edges() {
        // Arrange
        let doc = QueryDocument::Detail.as_str();

        // Act & Assert
        assert!(doc.contains("relations"));
        assert!(doc.contains("characters(page: 1, perPage: 8"));
        assert!(doc.contains("staff(page: 1, perPage: 6"));
    }

    #[test]
    fn test_by_id_document_has_no_edges() {
        // Arrange
        let doc = QueryDocument::ById.as_str();

        // Act & Assert
        assert!(doc.contains("Media(id: $id)"));
        assert!(!doc.contains("relations"));
        assert!(doc.contains("favourites"));
    }
}
