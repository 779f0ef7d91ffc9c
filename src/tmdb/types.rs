use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MediaType::Movie => "movie",
                MediaType::Tv => "tv",
            }
        )
    }
}

/// Common record shape shared by movie and TV results, and by the cache
/// table rows. TV payloads use `name`/`original_name`/`first_air_date`
/// where movies use `title`/`original_title`/`release_date`, the serde
/// aliases on [`RemoteEntry`] fold both into this one shape.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MediaRecord {
    pub tmdb_id: i32,
    pub media_type: MediaType,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: f64,
}

#[derive(Debug, Deserialize)]
pub struct RemoteEntry {
    pub id: i32,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default, alias = "original_name")]
    pub original_title: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl RemoteEntry {
    pub fn into_record(self, media_type: MediaType) -> MediaRecord {
        // TMDB sends "" for unknown dates, which parses to None here.
        let release_date = self
            .release_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
        MediaRecord {
            tmdb_id: self.id,
            media_type,
            title: self.title,
            original_title: self.original_title,
            release_date,
            overview: self.overview,
            poster_path: self.poster_path,
            vote_average: self.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemotePage {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<RemoteEntry>,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub total_pages: u32,
    pub results: Vec<MediaRecord>,
}

impl CatalogPage {
    pub fn empty() -> Self {
        Self {
            total_pages: 0,
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenreEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreResponse {
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn movie_entry_maps_to_common_record() {
        let raw = serde_json::json!({
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "release_date": "1999-10-15",
            "overview": "An insomniac office worker...",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "vote_average": 8.4,
            "popularity": 61.4
        });
        let entry: RemoteEntry = serde_json::from_value(raw).unwrap();
        let record = entry.into_record(MediaType::Movie);

        assert_eq!(record.tmdb_id, 550);
        assert_eq!(record.media_type, MediaType::Movie);
        assert_eq!(record.title.as_deref(), Some("Fight Club"));
        assert_eq!(
            record.release_date,
            Some(NaiveDate::from_ymd_opt(1999, 10, 15).unwrap())
        );
        assert_eq!(record.vote_average, 8.4);
    }

    #[test]
    fn tv_entry_aliases_name_and_air_date() {
        let raw = serde_json::json!({
            "id": 1396,
            "name": "Breaking Bad",
            "original_name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "overview": "A chemistry teacher...",
            "poster_path": "/ztkUQFLlC19CCMYHW9o1zWhJRNq.jpg",
            "vote_average": 8.9
        });
        let entry: RemoteEntry = serde_json::from_value(raw).unwrap();
        let record = entry.into_record(MediaType::Tv);

        assert_eq!(record.title.as_deref(), Some("Breaking Bad"));
        assert_eq!(record.original_title.as_deref(), Some("Breaking Bad"));
        assert_eq!(
            record.release_date,
            Some(NaiveDate::from_ymd_opt(2008, 1, 20).unwrap())
        );
    }

    #[test]
    fn blank_date_and_missing_fields_stay_none() {
        let raw = serde_json::json!({
            "id": 7,
            "name": "Untitled Pilot",
            "first_air_date": ""
        });
        let entry: RemoteEntry = serde_json::from_value(raw).unwrap();
        let record = entry.into_record(MediaType::Tv);

        assert_eq!(record.release_date, None);
        assert_eq!(record.overview, None);
        assert_eq!(record.poster_path, None);
        assert_eq!(record.vote_average, 0.0);
    }
}
