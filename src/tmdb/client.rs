use super::{CatalogPage, GenreEntry, GenreResponse, MediaType, RemotePage};
use crate::configuration::TmdbSettings;
use serde_json::{json, Value};

// https://developer.themoviedb.org/docs/getting-started

#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    image_base_url: String,
    language: String,
    auth_token: String,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings, auth_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url,
            image_base_url: settings.image_base_url,
            language: settings.language,
            auth_token,
        }
    }

    pub async fn popular_movies(&self, page: u32, genre_id: Option<i32>) -> CatalogPage {
        let mut params = vec![("page", page.to_string())];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        self.fetch_page("/movie/popular", MediaType::Movie, params)
            .await
    }

    pub async fn now_playing_movies(&self, page: u32, genre_id: Option<i32>) -> CatalogPage {
        let mut params = vec![("page", page.to_string())];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        self.fetch_page("/movie/now_playing", MediaType::Movie, params)
            .await
    }

    pub async fn popular_tv(&self, page: u32, genre_id: Option<i32>) -> CatalogPage {
        let mut params = vec![("page", page.to_string())];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        self.fetch_page("/tv/popular", MediaType::Tv, params).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> CatalogPage {
        let params = vec![("query", query.to_string()), ("page", page.to_string())];
        self.fetch_page("/search/movie", MediaType::Movie, params)
            .await
    }

    pub async fn search_tv(&self, query: &str, page: u32) -> CatalogPage {
        let params = vec![("query", query.to_string()), ("page", page.to_string())];
        self.fetch_page("/search/tv", MediaType::Tv, params).await
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> Option<Value> {
        self.fetch_details(format!("/movie/{}", tmdb_id).as_str())
            .await
    }

    pub async fn tv_details(&self, tmdb_id: i32) -> Option<Value> {
        self.fetch_details(format!("/tv/{}", tmdb_id).as_str())
            .await
    }

    pub async fn movie_genres(&self) -> Vec<GenreEntry> {
        self.fetch_genres("/genre/movie/list").await
    }

    pub async fn tv_genres(&self) -> Vec<GenreEntry> {
        self.fetch_genres("/genre/tv/list").await
    }

    /// One page of a list endpoint. Any transport error, non-2xx status or
    /// decode failure is logged and degrades to an empty page so callers
    /// can fall through to the local cache.
    async fn fetch_page(
        &self,
        path: &str,
        media_type: MediaType,
        params: Vec<(&str, String)>,
    ) -> CatalogPage {
        let url = format!("{}{}", self.base_url, path);
        let response = match self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Accept", "application/json")
            .query(&[("language", self.language.as_str())])
            .query(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Error fetching {}: {:#?}", url, err);
                return CatalogPage::empty();
            }
        };

        if !response.status().is_success() {
            tracing::error!("Error fetching {}: {}", url, response.status());
            return CatalogPage::empty();
        }

        match response.json::<RemotePage>().await {
            Ok(page) => CatalogPage {
                total_pages: page.total_pages,
                results: page
                    .results
                    .into_iter()
                    .map(|entry| entry.into_record(media_type))
                    .collect(),
            },
            Err(err) => {
                tracing::error!("Error decoding {} response: {:#?}", url, err);
                CatalogPage::empty()
            }
        }
    }

    async fn fetch_details(&self, path: &str) -> Option<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Accept", "application/json")
            .query(&[
                ("language", self.language.as_str()),
                ("append_to_response", "credits,videos"),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Error fetching {}: {:#?}", url, err);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::error!("Error fetching {}: {}", url, response.status());
            return None;
        }

        match response.json::<Value>().await {
            Ok(mut body) => {
                self.absolutize_detail_images(&mut body);
                Some(body)
            }
            Err(err) => {
                tracing::error!("Error decoding {} response: {:#?}", url, err);
                None
            }
        }
    }

    async fn fetch_genres(&self, path: &str) -> Vec<GenreEntry> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.auth_token))
            .header("Accept", "application/json")
            .query(&[("language", self.language.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Error fetching {}: {:#?}", url, err);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::error!("Error fetching {}: {}", url, response.status());
            return Vec::new();
        }

        match response.json::<GenreResponse>().await {
            Ok(body) => body.genres,
            Err(err) => {
                tracing::error!("Error decoding {} response: {:#?}", url, err);
                Vec::new()
            }
        }
    }

    /// Detail payloads carry relative image paths, rewrite the known spots
    /// to full URLs so the client never has to know the image host.
    fn absolutize_detail_images(&self, body: &mut Value) {
        self.absolutize_image(body, "poster_path");
        self.absolutize_image(body, "backdrop_path");
        if let Some(collection) = body.get_mut("belongs_to_collection") {
            self.absolutize_image(collection, "poster_path");
            self.absolutize_image(collection, "backdrop_path");
        }
        if let Some(companies) = body
            .get_mut("production_companies")
            .and_then(Value::as_array_mut)
        {
            for company in companies.iter_mut() {
                self.absolutize_image(company, "logo_path");
            }
        }
        if let Some(seasons) = body.get_mut("seasons").and_then(Value::as_array_mut) {
            for season in seasons.iter_mut() {
                self.absolutize_image(season, "poster_path");
            }
        }
        if let Some(cast) = body
            .pointer_mut("/credits/cast")
            .and_then(Value::as_array_mut)
        {
            for member in cast.iter_mut() {
                self.absolutize_image(member, "profile_path");
            }
        }
    }

    fn absolutize_image(&self, value: &mut Value, key: &str) {
        let Some(path) = value.get(key).and_then(Value::as_str) else {
            return;
        };
        if !path.starts_with('/') {
            return;
        }
        value[key] = json!(format!("{}{}", self.image_base_url, path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TmdbClient {
        TmdbClient::new(
            TmdbSettings {
                base_url: "http://127.0.0.1:9".to_string(),
                image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
                language: "en-US".to_string(),
            },
            "test-token".to_string(),
        )
    }

    #[test]
    fn detail_image_paths_get_prefixed() {
        let client = test_client();
        let mut body = json!({
            "id": 550,
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "belongs_to_collection": { "poster_path": "/collection.jpg" },
            "production_companies": [
                { "logo_path": "/logo.jpg" },
                { "logo_path": null }
            ],
            "credits": { "cast": [ { "profile_path": "/face.jpg" } ] }
        });
        client.absolutize_detail_images(&mut body);

        assert_eq!(
            body["poster_path"],
            json!("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            body["belongs_to_collection"]["poster_path"],
            json!("https://image.tmdb.org/t/p/w500/collection.jpg")
        );
        assert_eq!(
            body["production_companies"][0]["logo_path"],
            json!("https://image.tmdb.org/t/p/w500/logo.jpg")
        );
        assert_eq!(body["production_companies"][1]["logo_path"], json!(null));
        assert_eq!(
            body["credits"]["cast"][0]["profile_path"],
            json!("https://image.tmdb.org/t/p/w500/face.jpg")
        );
    }

    #[test]
    fn absolute_urls_are_left_alone() {
        let client = test_client();
        let mut body = json!({
            "poster_path": "https://image.tmdb.org/t/p/w500/poster.jpg"
        });
        client.absolutize_detail_images(&mut body);
        assert_eq!(
            body["poster_path"],
            json!("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }

    #[actix_rt::test]
    async fn unreachable_remote_degrades_to_empty_page() {
        let client = test_client();
        let page = client.popular_movies(1, None).await;
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);

        assert!(client.movie_details(550).await.is_none());
        assert!(client.movie_genres().await.is_empty());
    }
}
