use super::{fetch_cached_media, ListQuery};
use crate::tmdb::{MediaType, TmdbClient};
use actix_web::{
    web::{Data, Query},
    HttpResponse,
};
use serde_json::json;
use sqlx::PgPool;

pub async fn get_tv_list(
    connection: Data<PgPool>,
    tmdb: Data<TmdbClient>,
    info: Query<ListQuery>,
) -> HttpResponse {
    let query_span = tracing::info_span!("Tv list request");
    let page = info.page.unwrap_or(1).max(1);
    let search_term = info.query.as_deref().unwrap_or("").trim().to_string();

    let remote = if search_term.is_empty() {
        tmdb.popular_tv(page, info.genre_id).await
    } else {
        tmdb.search_tv(search_term.as_str(), page).await
    };

    if !remote.results.is_empty() {
        return HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": remote.total_pages,
                "results": remote.results
            },
            "source": "remote"
        }));
    }

    tracing::info!("Remote tv page is empty, serving from cache");
    match fetch_cached_media(
        connection.as_ref(),
        Some(MediaType::Tv),
        page,
        false,
        query_span,
    )
    .await
    {
        Ok(records) => HttpResponse::Ok().json(json!({
            "data": {
                "page": page,
                "total_pages": 0,
                "results": records
            },
            "source": "cache"
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
