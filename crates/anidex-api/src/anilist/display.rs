//! Human-readable formatting of `AniList` records.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::params::{MediaSeason, MediaStatus};
use super::types::{FuzzyDate, Media, PersonName};

/// Placeholder for missing names and dates.
pub const UNKNOWN: &str = "Unknown";

/// Regex matching HTML tags in descriptions.
#[allow(clippy::expect_used)]
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("failed to compile HTML tag regex"));

impl Media {
    /// Preferred title: English, then romaji, then native.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [&self.title.english, &self.title.romaji, &self.title.native]
            .into_iter()
            .find_map(|t| t.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(UNKNOWN)
    }

    /// Studio names joined by `", "`.
    #[must_use]
    pub fn studio_names(&self) -> String {
        self.studios
            .as_ref()
            .map(|s| {
                s.nodes
                    .iter()
                    .map(|n| n.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }

    /// Description with HTML tags removed.
    #[must_use]
    pub fn plain_description(&self) -> Option<String> {
        self.description.as_deref().map(strip_html_tags)
    }
}

impl fmt::Display for FuzzyDate {
    /// `YYYY`, `YYYY.MM`, or `YYYY.MM.DD`; `Unknown` without a year.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(year) = self.year else {
            return f.write_str(UNKNOWN);
        };
        write!(f, "{year}")?;
        if let Some(month) = self.month.filter(|&m| m > 0) {
            write!(f, ".{month:02}")?;
            if let Some(day) = self.day.filter(|&d| d > 0) {
                write!(f, ".{day:02}")?;
            }
        }
        Ok(())
    }
}

/// Formats a 0-100 score as a percentage, `N/A` when absent or zero.
#[must_use]
pub fn format_score(score: Option<u32>) -> String {
    match score {
        Some(s) if s > 0 => format!("{s}%"),
        _ => String::from("N/A"),
    }
}

/// Formats an optional date, `Unknown` when absent.
#[must_use]
pub fn format_date(date: Option<&FuzzyDate>) -> String {
    date.map_or_else(|| String::from(UNKNOWN), ToString::to_string)
}

/// Removes HTML tags (`AniList` descriptions contain `<br>`, `<i>`, ...).
#[must_use]
pub fn strip_html_tags(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").into_owned()
}

/// Full name, else "first last", else `Unknown`.
#[must_use]
pub fn person_name(name: &PersonName) -> String {
    if let Some(full) = name.full.as_deref().filter(|s| !s.is_empty()) {
        return String::from(full);
    }
    let joined = format!(
        "{} {}",
        name.first.as_deref().unwrap_or_default(),
        name.last.as_deref().unwrap_or_default()
    );
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        String::from(UNKNOWN)
    } else {
        String::from(trimmed)
    }
}

/// Label for a release status.
#[must_use]
pub const fn status_label(status: Option<MediaStatus>) -> &'static str {
    match status {
        Some(MediaStatus::Finished) => "Finished",
        Some(MediaStatus::Releasing) => "Releasing",
        Some(MediaStatus::NotYetReleased) => "Not yet released",
        Some(MediaStatus::Cancelled) => "Cancelled",
        Some(MediaStatus::Hiatus) => "On hiatus",
        None => UNKNOWN,
    }
}

/// Label for a relation type, falling back to the raw value.
#[must_use]
pub fn relation_label(relation_type: &str) -> &str {
    match relation_type {
        "SEQUEL" => "Sequel",
        "PREQUEL" => "Prequel",
        "PARENT" => "Parent",
        "SIDE_STORY" => "Side story",
        "CHARACTER" => "Character",
        "SUMMARY" => "Summary",
        "ALTERNATIVE" => "Alternative",
        "SPIN_OFF" => "Spin-off",
        "OTHER" => "Other",
        "SOURCE" => "Source",
        "COMPILATION" => "Compilation",
        "CONTAINS" => "Contains",
        "ADAPTATION" => "Adaptation",
        other => other,
    }
}

/// Label for a character role, falling back to the raw value.
#[must_use]
pub fn role_label(role: &str) -> &str {
    match role {
        "MAIN" => "Main",
        "SUPPORTING" => "Supporting",
        "BACKGROUND" => "Background",
        other => other,
    }
}

/// Season of the given date (Dec-Feb winter, Mar-May spring, ...).
#[must_use]
pub fn current_season(date: NaiveDate) -> MediaSeason {
    match date.month() {
        3..=5 => MediaSeason::Spring,
        6..=8 => MediaSeason::Summer,
        9..=11 => MediaSeason::Fall,
        _ => MediaSeason::Winter,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn media(title: serde_json::Value) -> Media {
        serde_json::from_value(serde_json::json!({ "id": 1, "title": title })).unwrap()
    }

    #[test]
    fn test_display_title_prefers_english() {
        // Arrange
        let m = media(serde_json::json!({
            "romaji": "Sousou no Frieren",
            "english": "Frieren: Beyond Journey's End"
        }));

        // Act & Assert
        assert_eq!(m.display_title(), "Frieren: Beyond Journey's End");
    }

    #[test]
    fn test_display_title_falls_back() {
        // Arrange
        let romaji = media(serde_json::json!({ "romaji": "Mushishi", "english": null }));
        let native = media(serde_json::json!({ "native": "蟲師" }));
        let none = media(serde_json::json!({}));

        // Act & Assert
        assert_eq!(romaji.display_title(), "Mushishi");
        assert_eq!(native.display_title(), "蟲師");
        assert_eq!(none.display_title(), "Unknown");
    }

    #[test]
    fn test_format_score() {
        // Arrange & Act & Assert
        assert_eq!(format_score(Some(86)), "86%");
        assert_eq!(format_score(Some(0)), "N/A");
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn test_fuzzy_date_display() {
        // Arrange
        let full = FuzzyDate {
            year: Some(2023),
            month: Some(9),
            day: Some(29),
        };
        let month_only = FuzzyDate {
            year: Some(2023),
            month: Some(9),
            day: None,
        };
        let year_only = FuzzyDate {
            year: Some(1998),
            month: None,
            day: None,
        };

        // Act & Assert
        assert_eq!(full.to_string(), "2023.09.29");
        assert_eq!(month_only.to_string(), "2023.09");
        assert_eq!(year_only.to_string(), "1998");
        assert_eq!(FuzzyDate::default().to_string(), "Unknown");
        assert_eq!(format_date(None), "Unknown");
    }

    #[test]
    fn test_strip_html_tags() {
        // Arrange
        let html = "Spike<br><br>\n<i>(Source: Sunrise)</i>";

        // Act & Assert
        assert_eq!(strip_html_tags(html), "Spike\n(Source: Sunrise)");
    }

    #[test]
    fn test_person_name() {
        // Arrange
        let full = PersonName {
            full: Some(String::from("Spike Spiegel")),
            ..PersonName::default()
        };
        let parts = PersonName {
            first: Some(String::from("Faye")),
            last: None,
            full: None,
        };

        // Act & Assert
        assert_eq!(person_name(&full), "Spike Spiegel");
        assert_eq!(person_name(&parts), "Faye");
        assert_eq!(person_name(&PersonName::default()), "Unknown");
    }

    #[test]
    fn test_labels() {
        // Arrange & Act & Assert
        assert_eq!(status_label(Some(MediaStatus::NotYetReleased)), "Not yet released");
        assert_eq!(status_label(None), "Unknown");
        assert_eq!(relation_label("SIDE_STORY"), "Side story");
        assert_eq!(relation_label("NEW_KIND"), "NEW_KIND");
        assert_eq!(role_label("MAIN"), "Main");
    }

    #[test]
    fn test_current_season() {
        // Arrange
        let date = |m| NaiveDate::from_ymd_opt(2024, m, 15).unwrap();

        // Act & Assert
        assert_eq!(current_season(date(1)), MediaSeason::Winter);
        assert_eq!(current_season(date(4)), MediaSeason::Spring);
        assert_eq!(current_season(date(7)), MediaSeason::Summer);
        assert_eq!(current_season(date(10)), MediaSeason::Fall);
        assert_eq!(current_season(date(12)), MediaSeason::Winter);
    }
}
