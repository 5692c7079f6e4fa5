use serde::Deserialize;

/// Raw track payload from the catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub id: u64,
    pub title: String,
    pub artist: ArtistResponse,
    #[serde(default)]
    pub album: Option<AlbumResponse>,
    #[serde(default)]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistResponse {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumResponse {
    #[serde(default)]
    pub cover_medium: Option<String>,
}

/// Error body the catalog API returns with a 200 status for bad ids.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub code: i64,
}

/// Flattened track metadata handed to consumers.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist_name: String,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
}

impl From<TrackResponse> for Track {
    fn from(raw: TrackResponse) -> Self {
        Track {
            id: raw.id,
            title: raw.title,
            artist_name: raw.artist.name,
            artwork_url: raw.album.and_then(|a| a.cover_medium),
            preview_url: raw.preview,
        }
    }
}
