//! GraphQL data types for received likes.

use serde::{Deserialize, Serialize};

use crate::common::PageInfo;
use crate::domains::matching::data::track::TrackData;
use crate::domains::matching::models::like::Like;
use crate::domains::member::data::MemberData;

/// GraphQL-friendly representation of a like someone sent the viewer
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A like received by the current member")]
pub struct LikeData {
    /// Unique identifier
    pub id: String,

    /// The member who sent the like
    pub sender: MemberData,

    /// Kind of like: like, mega_like
    pub like_type: String,

    /// Surface it was sent from: live, explore, likes_me
    pub match_type: String,

    /// Track attached to the like, if any
    pub track: Option<TrackData>,

    /// When the like was sent (ISO 8601)
    pub created_at: String,
}

impl LikeData {
    /// Assemble from the row plus resolver-fetched sender and track.
    pub fn assemble(like: Like, sender: MemberData, track: Option<TrackData>) -> Self {
        Self {
            id: like.id.to_string(),
            sender,
            like_type: like.like_type.to_string(),
            match_type: like.match_type.to_string(),
            track,
            created_at: like.created_at.to_rfc3339(),
        }
    }
}

/// A page of received likes
#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(description = "A page of likes received by the current member")]
pub struct LikeConnection {
    /// Likes in this page, newest first
    pub nodes: Vec<LikeData>,

    /// Cursor bookkeeping for the next page
    pub page_info: PageInfo,
}
