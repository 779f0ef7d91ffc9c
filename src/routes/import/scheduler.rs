use crate::configuration::ImportSettings;
use crate::routes::media::reload_media;
use crate::tmdb::TmdbClient;
use serde::Serialize;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub movies: usize,
    pub tv_shows: usize,
    pub loaded: u64,
}

/// One import run: fetch a page of popular movies and TV shows, reshape
/// both into the common record and overwrite the cache table. When both
/// fetches come back empty the current cache is kept as is.
pub async fn run_import(
    connection: &PgPool,
    tmdb: &TmdbClient,
    page: u32,
) -> Result<ImportOutcome, sqlx::Error> {
    let query_span = tracing::info_span!("Catalog import", page);
    tracing::info!("Starting catalog import from the metadata service");

    let movies = tmdb.popular_movies(page, None).await;
    let tv_shows = tmdb.popular_tv(page, None).await;

    if movies.results.is_empty() && tv_shows.results.is_empty() {
        tracing::info!("Nothing fetched, keeping the current cache");
        return Ok(ImportOutcome {
            movies: 0,
            tv_shows: 0,
            loaded: 0,
        });
    }

    let movie_count = movies.results.len();
    let tv_count = tv_shows.results.len();
    let mut records = movies.results;
    records.extend(tv_shows.results);

    let loaded = reload_media(connection, &records, query_span).await?;
    tracing::info!(
        "Catalog import finished, {} movies and {} tv shows loaded",
        movie_count,
        tv_count
    );

    Ok(ImportOutcome {
        movies: movie_count,
        tv_shows: tv_count,
        loaded,
    })
}

/// Periodic import loop. The first tick fires immediately, so the cache
/// is populated right after boot.
pub fn spawn_import_schedule(
    connection: PgPool,
    tmdb: TmdbClient,
    settings: ImportSettings,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(settings.interval_minutes * 60));
        loop {
            interval.tick().await;
            if let Err(err) = run_import(&connection, &tmdb, settings.page).await {
                tracing::error!("Catalog import failed: {:#?}", err);
            }
        }
    })
}
