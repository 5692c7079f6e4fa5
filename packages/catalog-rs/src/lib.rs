pub mod models;

use reqwest::Client;

use crate::models::{ErrorResponse, Track, TrackResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.deezer.com";

#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub base_url: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    options: CatalogOptions,
    client: Client,
}

impl CatalogService {
    pub fn new(options: CatalogOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Looks up a single track by its catalog id. Returns `Ok(None)` when the
    /// catalog does not know the id, `Err` on transport or decode failures.
    pub async fn get_track(&self, track_id: &str) -> Result<Option<Track>, &'static str> {
        if track_id.is_empty() || !track_id.chars().all(|c| c.is_ascii_digit()) {
            return Err("Track id must be numeric");
        }

        let url = format!("{}/track/{}", self.options.base_url, track_id);

        let res = self.client.get(url).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Catalog error ({}): {}", status, error_body);
                    return Err("Catalog returned an error");
                }

                // The API reports unknown ids as a 200 with an error body.
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        eprintln!("Failed to read catalog response: {}", e);
                        return Err("Error reading catalog response");
                    }
                };

                if let Ok(err) = serde_json::from_str::<ErrorResponse>(&body) {
                    if err.error.code == 800 {
                        return Ok(None);
                    }
                    eprintln!(
                        "Catalog error {} ({}): {}",
                        err.error.code, err.error.kind, err.error.message
                    );
                    return Err("Catalog returned an error");
                }

                match serde_json::from_str::<TrackResponse>(&body) {
                    Ok(raw) => Ok(Some(Track::from(raw))),
                    Err(e) => {
                        eprintln!("Failed to parse catalog response: {}", e);
                        Err("Error parsing track response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to catalog failed: {}", e);
                Err("Error fetching track")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_point_at_public_api() {
        let options = CatalogOptions::default();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn rejects_non_numeric_track_ids() {
        let service = CatalogService::new(CatalogOptions::default());
        let result = service.get_track("not-a-track").await;
        assert!(result.is_err());
    }

    #[test]
    fn unknown_track_error_body_decodes() {
        let body = r#"{"error":{"type":"DataException","message":"no data","code":800}}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.code, 800);
    }

    #[test]
    fn track_response_flattens() {
        let body = r#"{
            "id": 3135556,
            "title": "Harder, Better, Faster, Stronger",
            "artist": {"name": "Daft Punk"},
            "album": {"cover_medium": "https://cdn.example/cover.jpg"},
            "preview": "https://cdn.example/preview.mp3"
        }"#;
        let raw: TrackResponse = serde_json::from_str(body).unwrap();
        let track = Track::from(raw);
        assert_eq!(track.artist_name, "Daft Punk");
        assert_eq!(
            track.artwork_url.as_deref(),
            Some("https://cdn.example/cover.jpg")
        );
    }
}
