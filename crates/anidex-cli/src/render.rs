//! Log-based rendering of media lists and detail views.

use anidex_api::anilist::display::{
    format_date, format_score, person_name, relation_label, role_label, status_label,
};
use anidex_api::anilist::{Media, PageInfo};

/// Placeholder for absent numeric values.
const DASH: &str = "-";

/// Formats an optional value, `-` when absent.
fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from(DASH), |v| v.to_string())
}

/// Logs a titled media list followed by its pagination summary.
pub fn render_list(heading: &str, media: &[Media], page_info: &PageInfo) {
    tracing::info!("== {heading} ==");
    if media.is_empty() {
        tracing::info!("No results");
        return;
    }

    tracing::info!("ID\tScore\tFormat\tTitle");
    for m in media {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            m.id,
            format_score(m.average_score),
            or_dash(m.format),
            m.display_title(),
        );
    }
    tracing::info!(
        "Page {} of {}, {} total{}",
        or_dash(page_info.current_page),
        or_dash(page_info.last_page),
        or_dash(page_info.total),
        if page_info.has_next_page {
            ", more available"
        } else {
            ""
        },
    );
}

/// Logs the summary fields of a single media record.
pub fn render_media(media: &Media) {
    tracing::info!("{} (#{})", media.display_title(), media.id);
    if let Some(native) = media.title.native.as_deref() {
        tracing::info!("Native: {native}");
    }
    tracing::info!(
        "Format: {}\tStatus: {}\tScore: {}",
        or_dash(media.format),
        status_label(media.status),
        format_score(media.average_score),
    );
    if media.episodes.is_some() || media.chapters.is_some() {
        tracing::info!(
            "Episodes: {}\tChapters: {}\tVolumes: {}",
            or_dash(media.episodes),
            or_dash(media.chapters),
            or_dash(media.volumes),
        );
    }
    tracing::info!(
        "Aired: {} .. {}",
        format_date(media.start_date.as_ref()),
        format_date(media.end_date.as_ref()),
    );
    if let (Some(season), Some(year)) = (media.season, media.season_year) {
        tracing::info!("Season: {season} {year}");
    }
    if !media.genres.is_empty() {
        tracing::info!("Genres: {}", media.genres.join(", "));
    }
    let studios = media.studio_names();
    if !studios.is_empty() {
        tracing::info!("Studios: {studios}");
    }
    if let Some(description) = media.plain_description() {
        tracing::info!("{}", description.trim());
    }
}

/// Logs a detail record: summary fields plus tags, relations, characters, and staff.
pub fn render_details(media: &Media) {
    render_media(media);

    let tags: Vec<&str> = media
        .tags
        .iter()
        .filter(|t| !t.is_media_spoiler)
        .map(|t| t.name.as_str())
        .collect();
    if !tags.is_empty() {
        tracing::info!("Tags: {}", tags.join(", "));
    }

    if let Some(ref relations) = media.relations {
        for edge in &relations.edges {
            tracing::info!(
                "Relation\t{}\t{}\t{}",
                edge.relation_type.as_deref().map_or(DASH, relation_label),
                edge.node.id,
                edge.node.display_title(),
            );
        }
    }
    if let Some(ref characters) = media.characters {
        for edge in &characters.edges {
            tracing::info!(
                "Character\t{}\t{}",
                edge.role.as_deref().map_or(DASH, role_label),
                person_name(&edge.node.name),
            );
        }
    }
    if let Some(ref staff) = media.staff {
        for edge in &staff.edges {
            tracing::info!(
                "Staff\t{}\t{}",
                edge.role.as_deref().unwrap_or(DASH),
                person_name(&edge.node.name),
            );
        }
    }
}
