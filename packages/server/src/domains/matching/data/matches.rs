//! GraphQL data types for matches.

use serde::{Deserialize, Serialize};

use crate::common::{MemberId, PairSide};
use crate::domains::matching::data::track::TrackData;
use crate::domains::matching::models::matches::Match;
use crate::domains::member::data::MemberData;

/// GraphQL-friendly representation of a match, oriented to the viewer
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A mutual match between the current member and another member")]
pub struct MatchData {
    /// Unique identifier
    pub id: String,

    /// The chat opened for this match
    pub chat_id: String,

    /// The other member
    pub counterpart: MemberData,

    /// Kind of like the viewer sent: like, mega_like
    pub my_like_type: String,

    /// Kind of like the counterpart sent
    pub their_like_type: String,

    /// Surface the viewer liked from: live, explore, likes_me
    pub my_match_type: String,

    /// Surface the counterpart liked from
    pub their_match_type: String,

    /// Track the viewer attached, if any
    pub my_track: Option<TrackData>,

    /// Track the counterpart attached, if any
    pub their_track: Option<TrackData>,

    /// When the match was created (ISO 8601)
    pub created_at: String,
}

impl MatchData {
    /// Assemble from the row, oriented so "my" fields belong to `viewer`.
    pub fn for_viewer(
        match_record: &Match,
        viewer: MemberId,
        counterpart: MemberData,
        my_track: Option<TrackData>,
        their_track: Option<TrackData>,
    ) -> Self {
        let my_side = if viewer == match_record.lower_member_id {
            PairSide::Lower
        } else {
            PairSide::Higher
        };
        let their_side = match my_side {
            PairSide::Lower => PairSide::Higher,
            PairSide::Higher => PairSide::Lower,
        };
        let (my_like, my_origin, _) = match_record.side_attribution(my_side);
        let (their_like, their_origin, _) = match_record.side_attribution(their_side);

        Self {
            id: match_record.id.to_string(),
            chat_id: match_record.chat_id.to_string(),
            counterpart,
            my_like_type: my_like.to_string(),
            their_like_type: their_like.to_string(),
            my_match_type: my_origin.to_string(),
            their_match_type: their_origin.to_string(),
            my_track,
            their_track,
            created_at: match_record.created_at.to_rfc3339(),
        }
    }
}
