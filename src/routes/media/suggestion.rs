use super::fetch_suggestion;
use crate::tmdb::MediaType;
use actix_web::{
    web::{Data, Json},
    HttpResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Movie,
    Tv,
    Both,
}

impl SuggestionKind {
    fn as_filter(self) -> Option<MediaType> {
        match self {
            SuggestionKind::Movie => Some(MediaType::Movie),
            SuggestionKind::Tv => Some(MediaType::Tv),
            SuggestionKind::Both => None,
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct SuggestionBody {
    pub media_type: Option<SuggestionKind>,
    #[validate(range(min = 0.0, max = 10.0, message = "min_vote must be between 0 and 10"))]
    pub min_vote: Option<f64>,
}

/// One random cached row matching the optional type and minimum-rating
/// filters. `{"suggestion": null}` when the cache has nothing to offer.
pub async fn get_suggestion(connection: Data<PgPool>, body: Json<SuggestionBody>) -> HttpResponse {
    let query_span = tracing::info_span!("Suggestion draw", ?body);

    let is_valid = body.validate();
    if let Err(error) = is_valid {
        let source = error.field_errors();
        for i in source.iter() {
            for err in i.1.iter() {
                if let Some(message) = err.message.as_ref() {
                    tracing::error!("Error: {}", message.as_ref());
                    return HttpResponse::BadRequest().json(json!({
                        "Error" : message.as_ref()
                    }));
                }
            }
        }
        return HttpResponse::BadRequest().finish();
    }

    let media_type = body
        .media_type
        .unwrap_or(SuggestionKind::Both)
        .as_filter();
    let min_vote = body.min_vote.unwrap_or(0.0);

    match fetch_suggestion(connection.as_ref(), media_type, min_vote, query_span).await {
        Ok(record) => HttpResponse::Ok().json(json!({
            "suggestion": record
        })),
        Err(err) => {
            tracing::error!("Database Error {:#?}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Something went wrong"
            }))
        }
    }
}
