use crate::tmdb::{MediaRecord, MediaType};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Fixed page size of the metadata service, cache reads mirror it.
pub const CACHE_PAGE_SIZE: i64 = 20;

#[derive(Deserialize, Debug)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub query: Option<String>,
    pub genre_id: Option<i32>,
}

pub async fn fetch_cached_media(
    connection: &PgPool,
    media_type: Option<MediaType>,
    page: u32,
    now_playing: bool,
    span: Span,
) -> Result<Vec<MediaRecord>, sqlx::Error> {
    let offset = (page.max(1) as i64 - 1) * CACHE_PAGE_SIZE;
    sqlx::query_as::<_, MediaRecord>(
        r#"
        SELECT tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average
        FROM media
        WHERE ($1::media_kind IS NULL OR media_type = $1)
          AND (NOT $2 OR release_date >= CURRENT_DATE)
        ORDER BY imported_at, tmdb_id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(media_type)
    .bind(now_playing)
    .bind(CACHE_PAGE_SIZE)
    .bind(offset)
    .fetch_all(connection)
    .instrument(span)
    .await
}

pub async fn fetch_cached_media_by_id(
    connection: &PgPool,
    tmdb_id: i32,
    media_type: MediaType,
    span: Span,
) -> Result<Option<MediaRecord>, sqlx::Error> {
    sqlx::query_as::<_, MediaRecord>(
        r#"
        SELECT tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average
        FROM media
        WHERE tmdb_id = $1 AND media_type = $2
        LIMIT 1
        "#,
    )
    .bind(tmdb_id)
    .bind(media_type)
    .fetch_optional(connection)
    .instrument(span)
    .await
}

pub async fn fetch_suggestion(
    connection: &PgPool,
    media_type: Option<MediaType>,
    min_vote: f64,
    span: Span,
) -> Result<Option<MediaRecord>, sqlx::Error> {
    sqlx::query_as::<_, MediaRecord>(
        r#"
        SELECT tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average
        FROM media
        WHERE ($1::media_kind IS NULL OR media_type = $1)
          AND vote_average >= $2
        ORDER BY RANDOM()
        LIMIT 1
        "#,
    )
    .bind(media_type)
    .bind(min_vote)
    .fetch_optional(connection)
    .instrument(span)
    .await
}

/// Overwrites the whole cache table with `records` in one transaction.
/// Callers are expected to skip the call when they fetched nothing, so a
/// failed upstream never wipes a previously good cache.
pub async fn reload_media(
    connection: &PgPool,
    records: &[MediaRecord],
    span: Span,
) -> Result<u64, sqlx::Error> {
    let mut transaction = connection.begin().await?;
    sqlx::query("DELETE FROM media")
        .execute(&mut *transaction)
        .instrument(span.clone())
        .await?;

    let imported_at = Utc::now();
    for record in records {
        sqlx::query(
            r#"
            INSERT INTO media (id, tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average, imported_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.tmdb_id)
        .bind(record.media_type)
        .bind(record.title.clone())
        .bind(record.original_title.clone())
        .bind(record.release_date)
        .bind(record.overview.clone())
        .bind(record.poster_path.clone())
        .bind(record.vote_average)
        .bind(imported_at)
        .execute(&mut *transaction)
        .instrument(span.clone())
        .await?;
    }

    transaction.commit().await?;
    Ok(records.len() as u64)
}
