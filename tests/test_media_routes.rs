
use chrono::{Duration, NaiveDate, Utc};
use moviedeck_backend::routes::media::reload_media;
use moviedeck_backend::tmdb::{MediaRecord, MediaType};
use serde_json::{json, Value};
use test_startup::*;

fn sample_record(
    tmdb_id: i32,
    media_type: MediaType,
    title: &str,
    vote_average: f64,
    release_date: Option<NaiveDate>,
) -> MediaRecord {
    MediaRecord {
        tmdb_id,
        media_type,
        title: Some(title.to_string()),
        original_title: Some(title.to_string()),
        release_date,
        overview: Some(format!("Overview of {}", title)),
        poster_path: Some("/poster.jpg".to_string()),
        vote_average,
    }
}

async fn seed_cache(app: &TestApp, records: Vec<MediaRecord>) {
    reload_media(&app.db_pool, &records, tracing::info_span!("test seed"))
        .await
        .expect("Failed to seed the media cache");
}

#[actix_rt::test]
async fn movie_list_falls_back_to_cache() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    seed_cache(
        &app,
        vec![
            sample_record(1, MediaType::Movie, "First Movie", 7.1, date),
            sample_record(2, MediaType::Movie, "Second Movie", 6.4, date),
            sample_record(3, MediaType::Tv, "Some Show", 8.0, date),
        ],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/movies", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["source"], json!("cache"));
    let results = body["data"]["results"]
        .as_array()
        .expect("results should be an array");
    assert_eq!(results.len(), 2);
    for entry in results {
        assert_eq!(entry["media_type"], json!("movie"));
    }
}

#[actix_rt::test]
async fn tv_list_only_serves_tv_rows() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    seed_cache(
        &app,
        vec![
            sample_record(1, MediaType::Movie, "A Movie", 7.1, date),
            sample_record(2, MediaType::Tv, "A Show", 8.0, date),
        ],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/tv", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["source"], json!("cache"));
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], json!("A Show"));
}

#[actix_rt::test]
async fn cache_pages_are_one_based_slices_of_twenty() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    let records = (1..=25)
        .map(|n| sample_record(n, MediaType::Movie, format!("Movie {}", n).as_str(), 7.0, date))
        .collect::<Vec<_>>();
    seed_cache(&app, records).await;

    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/media/movies?page=1", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");
    let body = res.json::<Value>().await.expect("Failed to parse body");
    let first_page = body["data"]["results"].as_array().unwrap();
    assert_eq!(first_page.len(), 20);
    assert_eq!(first_page[0]["tmdb_id"], json!(1));
    assert_eq!(first_page[19]["tmdb_id"], json!(20));

    let res = client
        .get(format!("{}/media/movies?page=2", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");
    let body = res.json::<Value>().await.expect("Failed to parse body");
    let second_page = body["data"]["results"].as_array().unwrap();
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[0]["tmdb_id"], json!(21));
    assert_eq!(second_page[4]["tmdb_id"], json!(25));

    // page=0 and a missing page both mean the first page.
    for address in [
        format!("{}/media/movies?page=0", app.address),
        format!("{}/media/movies", app.address),
    ] {
        let res = client
            .get(address.as_str())
            .send()
            .await
            .expect("Failed to execute request");
        let body = res.json::<Value>().await.expect("Failed to parse body");
        let results = body["data"]["results"].as_array().unwrap();
        assert_eq!(results.len(), 20);
        assert_eq!(results[0]["tmdb_id"], json!(1));
    }
}

#[actix_rt::test]
async fn now_playing_keeps_only_upcoming_release_dates() {
    let app = spawn_app().await;
    let today = Utc::now().date_naive();
    seed_cache(
        &app,
        vec![
            sample_record(10, MediaType::Movie, "Old Movie", 7.0, Some(today - Duration::days(400))),
            sample_record(11, MediaType::Movie, "Fresh Movie", 7.0, Some(today + Duration::days(14))),
            sample_record(12, MediaType::Movie, "Undated Movie", 7.0, None),
        ],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/movies/now-playing", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], json!("Fresh Movie"));
}

#[actix_rt::test]
async fn movie_detail_is_served_from_cache() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(1999, 10, 15);
    seed_cache(
        &app,
        vec![sample_record(550, MediaType::Movie, "Fight Club", 8.4, date)],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/movies/550", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["source"], json!("cache"));
    assert_eq!(body["data"]["tmdb_id"], json!(550));
    assert_eq!(body["data"]["title"], json!("Fight Club"));
}

#[actix_rt::test]
async fn unknown_media_id_returns_404() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/movies/4242", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 404);
}

#[actix_rt::test]
async fn suggestion_from_empty_cache_is_null() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/media/suggestion", app.address).as_str())
        .json(&json!({ "media_type": "both" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["suggestion"], json!(null));
}

#[actix_rt::test]
async fn suggestion_honors_type_and_rating_filters() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    seed_cache(
        &app,
        vec![
            sample_record(1, MediaType::Movie, "Low Rated", 4.0, date),
            sample_record(2, MediaType::Movie, "High Rated", 9.0, date),
            sample_record(3, MediaType::Tv, "Only Show", 9.5, date),
        ],
    )
    .await;

    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/media/suggestion", app.address).as_str())
        .json(&json!({ "media_type": "movie", "min_vote": 8.5 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["suggestion"]["title"], json!("High Rated"));

    // No movie reaches 9.2, only the show does, so a movie filter draws nothing.
    let res = client
        .post(format!("{}/media/suggestion", app.address).as_str())
        .json(&json!({ "media_type": "movie", "min_vote": 9.2 }))
        .send()
        .await
        .expect("Failed to execute request");
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["suggestion"], json!(null));

    let res = client
        .post(format!("{}/media/suggestion", app.address).as_str())
        .json(&json!({ "media_type": "tv" }))
        .send()
        .await
        .expect("Failed to execute request");
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["suggestion"]["title"], json!("Only Show"));
}

#[actix_rt::test]
async fn suggestion_rejects_out_of_range_rating() {
    let app = spawn_app().await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/media/suggestion", app.address).as_str())
        .json(&json!({ "min_vote": 42.0 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 400);
}

#[actix_rt::test]
async fn reload_overwrites_previous_import() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    seed_cache(
        &app,
        vec![
            sample_record(1, MediaType::Movie, "First Run", 7.0, date),
            sample_record(2, MediaType::Movie, "Also First Run", 7.0, date),
        ],
    )
    .await;
    seed_cache(
        &app,
        vec![sample_record(3, MediaType::Movie, "Second Run", 7.0, date)],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/media/movies", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    let body = res.json::<Value>().await.expect("Failed to parse body");
    let results = body["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], json!("Second Run"));
}

#[actix_rt::test]
async fn import_run_with_unreachable_remote_keeps_cache() {
    let app = spawn_app().await;
    let date = NaiveDate::from_ymd_opt(2012, 6, 1);
    seed_cache(
        &app,
        vec![sample_record(1, MediaType::Movie, "Kept Movie", 7.0, date)],
    )
    .await;

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/import/run", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["data"]["loaded"], json!(0));

    // The previously imported page must still be there.
    let res = client
        .get(format!("{}/media/movies", app.address).as_str())
        .send()
        .await
        .expect("Failed to execute request");
    let body = res.json::<Value>().await.expect("Failed to parse body");
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
}
