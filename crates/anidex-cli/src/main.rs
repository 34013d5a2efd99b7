//! anidex - `AniList` catalog browser CLI.

/// Application configuration (TOML).
mod config;
/// Log-based output of media lists and details.
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, Theme, resolve_config_path};
use crate::render::{render_details, render_list, render_media};
use anidex_api::anilist::display::current_season;
use anidex_api::anilist::{
    AniListClient, DEFAULT_PER_PAGE, LocalAniListApi, MediaFormat, MediaSeason, MediaSort,
    MediaStatus, MediaType, QueryVariables, fetch_pages,
};

/// Number of entries per list on the home view.
const HOME_PER_PAGE: u32 = 10;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show top anime and top manga side by side.
    Home,
    /// Search media with filters.
    Search(SearchArgs),
    /// List top media by popularity.
    Top(TopArgs),
    /// List media of a genre.
    Genre(GenreArgs),
    /// List anime of a season.
    Seasonal(SeasonalArgs),
    /// List media of a studio.
    Studio(StudioArgs),
    /// Show a single media record.
    Show(ShowArgs),
    /// Show or change the color theme preference.
    Theme(ThemeCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Free-text search (e.g. "Frieren").
    #[arg(long)]
    query: Option<String>,
    /// Media type: anime or manga.
    #[arg(long = "type", default_value = "anime")]
    media_type: MediaType,
    /// Genre filter (e.g. "Action").
    #[arg(long)]
    genre: Option<String>,
    /// Format filter (e.g. tv, movie, ova).
    #[arg(long)]
    format: Option<MediaFormat>,
    /// Status filter (e.g. releasing, finished).
    #[arg(long)]
    status: Option<MediaStatus>,
    /// Season filter (winter, spring, summer, fall).
    #[arg(long)]
    season: Option<MediaSeason>,
    /// Season year filter.
    #[arg(long)]
    year: Option<i32>,
    /// Studio name. Replaces the other filters with a studio search.
    #[arg(long)]
    studio: Option<String>,
    /// Comma-separated sort keys (default: popularity-desc,score-desc).
    #[arg(long, value_delimiter = ',')]
    sort: Vec<MediaSort>,
    /// First page to fetch.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Results per page.
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: u32,
    /// Maximum number of consecutive pages to append.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pages: u32,
}

/// Arguments for the `top` subcommand.
#[derive(clap::Args)]
struct TopArgs {
    /// Media type: anime or manga.
    #[arg(long = "type", default_value = "anime")]
    media_type: MediaType,
    /// Page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Results per page.
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    per_page: u32,
}

/// Arguments for the `genre` subcommand.
#[derive(clap::Args)]
struct GenreArgs {
    /// Genre name (e.g. "Romance").
    genre: String,
    /// Media type: anime or manga.
    #[arg(long = "type", default_value = "anime")]
    media_type: MediaType,
    /// Page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `seasonal` subcommand.
#[derive(clap::Args)]
struct SeasonalArgs {
    /// Season (default: current season).
    #[arg(long)]
    season: Option<MediaSeason>,
    /// Year (default: current year).
    #[arg(long)]
    year: Option<i32>,
    /// Page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `studio` subcommand.
#[derive(clap::Args)]
struct StudioArgs {
    /// Studio name (e.g. "Kyoto Animation").
    name: String,
    /// Media type: anime or manga.
    #[arg(long = "type", default_value = "anime")]
    media_type: MediaType,
    /// Page number.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// `AniList` media ID.
    id: u64,
    /// Include tags, relations, characters, and staff.
    #[arg(long)]
    details: bool,
}

/// Arguments for the `theme` subcommand.
#[derive(clap::Args)]
struct ThemeCommand {
    /// Theme subcommand to run (default: show).
    #[command(subcommand)]
    command: Option<ThemeSubcommands>,
}

/// Available theme subcommands.
#[derive(Subcommand)]
enum ThemeSubcommands {
    /// Print the current theme.
    Show,
    /// Set the theme.
    Set {
        /// New theme.
        theme: Theme,
    },
    /// Switch between light and dark.
    Toggle,
}

/// Builds an `AniList` client from the `[api]` config section.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
fn build_client(dir: Option<&PathBuf>) -> Result<AniListClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    config
        .api
        .client_builder()?
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build API client")
}

/// Runs the `home` subcommand.
///
/// Both lists are requested concurrently; the shared rate limiter spaces them.
///
/// # Errors
///
/// Returns an error if either request fails.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let (anime, manga) = tokio::try_join!(
        client.top_media(MediaType::Anime, 1, HOME_PER_PAGE),
        client.top_media(MediaType::Manga, 1, HOME_PER_PAGE),
    )?;

    render_list("Top Anime", &anime.media, &anime.page_info);
    render_list("Top Manga", &manga.media, &manga.page_info);
    Ok(())
}

/// Builds search variables from the `search` arguments.
///
/// A studio name switches to the studio query, which ignores the other filters.
fn search_variables(args: &SearchArgs) -> QueryVariables {
    if let Some(ref studio) = args.studio {
        return QueryVariables::by_studio(studio, args.media_type, args.page)
            .per_page(args.per_page);
    }

    let mut variables = QueryVariables::new()
        .page(args.page)
        .per_page(args.per_page)
        .media_type(args.media_type);
    if let Some(ref query) = args.query {
        variables = variables.search(query.as_str());
    }
    if let Some(ref genre) = args.genre {
        variables = variables.genre(genre.as_str());
    }
    if let Some(format) = args.format {
        variables = variables.format(format);
    }
    if let Some(status) = args.status {
        variables = variables.status(status);
    }
    if let Some(season) = args.season {
        variables = variables.season(season);
    }
    if let Some(year) = args.year {
        variables = variables.season_year(year);
    }
    if !args.sort.is_empty() {
        variables = variables.sort(args.sort.clone());
    }
    variables
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or any page request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let variables = search_variables(args);

    let result = fetch_pages(&client, &variables, args.pages).await?;
    tracing::debug!(pages = result.pages_fetched, "Search finished");

    render_list("Search", &result.media, &result.page_info);
    Ok(())
}

/// Runs the `top` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_top(args: &TopArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let page = client
        .top_media(args.media_type, args.page, args.per_page)
        .await?;

    render_list(
        &format!("Top {}", args.media_type),
        &page.media,
        &page.page_info,
    );
    Ok(())
}

/// Runs the `genre` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_genre(args: &GenreArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let page = client
        .media_by_genre(&args.genre, args.media_type, args.page)
        .await?;

    render_list(
        &format!("Genre: {} ({})", args.genre, args.media_type),
        &page.media,
        &page.page_info,
    );
    Ok(())
}

/// Runs the `seasonal` subcommand, defaulting to the current season and year.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_seasonal(args: &SeasonalArgs, dir: Option<&PathBuf>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let season = args.season.unwrap_or_else(|| current_season(today));
    let year = args.year.unwrap_or_else(|| today.year());

    let client = build_client(dir)?;
    let page = client.seasonal_anime(season, year, args.page).await?;

    render_list(
        &format!("Seasonal: {season} {year}"),
        &page.media,
        &page.page_info,
    );
    Ok(())
}

/// Runs the `studio` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_studio(args: &StudioArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let page = client
        .media_by_studio(&args.name, args.media_type, args.page)
        .await?;

    render_list(
        &format!("Studio: {}", args.name),
        &page.media,
        &page.page_info,
    );
    Ok(())
}

/// Runs the `show` subcommand.
///
/// A missing record is logged as a warning and is not an error.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_show(args: &ShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;
    let media = if args.details {
        client.media_with_details(args.id).await?
    } else {
        client.media_by_id(args.id).await?
    };

    match media {
        Some(ref m) if args.details => render_details(m),
        Some(ref m) => render_media(m),
        None => tracing::warn!("Media {} not found", args.id),
    }
    Ok(())
}

/// Runs the `theme` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
#[instrument(skip_all)]
fn run_theme(cmd: &ThemeCommand, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;

    let new_theme = match cmd.command {
        None | Some(ThemeSubcommands::Show) => {
            tracing::info!("Theme: {}", config.display.theme);
            return Ok(());
        }
        Some(ThemeSubcommands::Set { theme }) => theme,
        Some(ThemeSubcommands::Toggle) => config.display.theme.toggled(),
    };

    config.display.theme = new_theme;
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("Theme set to {new_theme}");
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Home => run_home(dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Top(args) => run_top(&args, dir).await,
        Commands::Genre(args) => run_genre(&args, dir).await,
        Commands::Seasonal(args) => run_seasonal(&args, dir).await,
        Commands::Studio(args) => run_studio(&args, dir).await,
        Commands::Show(args) => run_show(&args, dir).await,
        Commands::Theme(cmd) => run_theme(&cmd, dir),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    fn parse_search(args: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(["anidex", "search"].iter().chain(args)).unwrap();
        match cli.command {
            Commands::Search(args) => args,
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_search_variables_unfiltered() {
        // Arrange
        let args = parse_search(&[]);

        // Act
        let variables = search_variables(&args);

        // Assert
        assert!(variables.is_unfiltered());
        assert_eq!(variables.media_type, Some(MediaType::Anime));
        assert_eq!(variables.page, Some(1));
        assert_eq!(variables.per_page, Some(DEFAULT_PER_PAGE));
        assert!(variables.sort.is_none());
    }

    #[test]
    fn test_search_variables_filters() {
        // Arrange
        let args = parse_search(&[
            "--query",
            "Frieren",
            "--type",
            "anime",
            "--genre",
            "Fantasy",
            "--format",
            "tv",
            "--status",
            "finished",
            "--season",
            "fall",
            "--year",
            "2023",
            "--sort",
            "score-desc,popularity-desc",
        ]);

        // Act
        let variables = search_variables(&args);

        // Assert
        assert_eq!(variables.search.as_deref(), Some("Frieren"));
        assert_eq!(variables.media_type, Some(MediaType::Anime));
        assert_eq!(variables.genre_in, Some(vec![String::from("Fantasy")]));
        assert_eq!(variables.format_in, Some(vec![MediaFormat::Tv]));
        assert_eq!(variables.status_in, Some(vec![MediaStatus::Finished]));
        assert_eq!(variables.season, Some(MediaSeason::Fall));
        assert_eq!(variables.season_year, Some(2023));
        assert_eq!(
            variables.sort,
            Some(vec![MediaSort::ScoreDesc, MediaSort::PopularityDesc])
        );
    }

    #[test]
    fn test_search_variables_manga_type() {
        // Arrange
        let args = parse_search(&["--type", "manga", "--query", "Berserk"]);

        // Act
        let variables = search_variables(&args);

        // Assert
        assert_eq!(variables.media_type, Some(MediaType::Manga));
        assert_eq!(variables.search.as_deref(), Some("Berserk"));
    }

    #[test]
    fn test_search_variables_studio_replaces_filters() {
        // Arrange
        let args = parse_search(&["--studio", "MAPPA", "--genre", "Action", "--page", "2"]);

        // Act
        let variables = search_variables(&args);

        // Assert
        assert_eq!(
            variables,
            QueryVariables::by_studio("MAPPA", MediaType::Anime, 2).per_page(DEFAULT_PER_PAGE)
        );
        assert!(variables.genre_in.is_none());
    }

    #[test]
    fn test_search_rejects_zero_pages() {
        // Arrange & Act
        let result = Cli::try_parse_from(["anidex", "search", "--pages", "0"]);

        // Assert
        assert!(result.is_err());
    }
}
