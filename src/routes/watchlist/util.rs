use crate::tmdb::{MediaRecord, MediaType};
use chrono::Utc;
use sqlx::PgPool;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Returns false when the entry was already saved, which callers treat
/// as success rather than a conflict.
pub async fn insert_watchlist_entry(
    connection: &PgPool,
    record: &MediaRecord,
    span: Span,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO towatch (id, tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average, added_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (tmdb_id, media_type) DO NOTHING
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
    .bind(Utc::now())
    .execute(connection)
    .instrument(span)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn fetch_watchlist_entries(
    connection: &PgPool,
    span: Span,
) -> Result<Vec<MediaRecord>, sqlx::Error> {
    sqlx::query_as::<_, MediaRecord>(
        r#"
        SELECT tmdb_id, media_type, title, original_title, release_date, overview, poster_path, vote_average
        FROM towatch
        ORDER BY added_at DESC, tmdb_id
        "#,
    )
    .fetch_all(connection)
    .instrument(span)
    .await
}

// Movie and TV id spaces overlap upstream, so the delete has to carry
// the media type just like the (tmdb_id, media_type) unique key does.
pub async fn delete_watchlist_entry(
    connection: &PgPool,
    tmdb_id: i32,
    media_type: MediaType,
    span: Span,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM towatch WHERE tmdb_id = $1 AND media_type = $2")
        .bind(tmdb_id)
        .bind(media_type)
        .execute(connection)
        .instrument(span)
        .await?;
    Ok(result.rows_affected())
}
