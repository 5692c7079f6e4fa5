//! GraphQL data types for catalog tracks.

use serde::{Deserialize, Serialize};

/// GraphQL-friendly representation of a catalog track
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A track from the music catalog")]
pub struct TrackData {
    /// Catalog identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Primary artist name
    pub artist_name: String,

    /// Cover art URL, if available
    pub artwork_url: Option<String>,

    /// 30-second preview URL, if available
    pub preview_url: Option<String>,
}

impl From<catalog::models::Track> for TrackData {
    fn from(t: catalog::models::Track) -> Self {
        Self {
            id: t.id.to_string(),
            title: t.title,
            artist_name: t.artist_name,
            artwork_url: t.artwork_url,
            preview_url: t.preview_url,
        }
    }
}
