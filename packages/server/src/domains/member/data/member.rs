use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use serde::{Deserialize, Serialize};

use crate::domains::member::models::member::Member as MemberModel;

/// Member GraphQL data type
///
/// Public API representation of a member (for GraphQL responses)
#[derive(Debug, Clone, Serialize, Deserialize, GraphQLObject)]
#[graphql(description = "A member of the app")]
pub struct MemberData {
    /// Unique identifier
    pub id: String,

    /// Display name shown to other members
    pub display_name: String,

    /// BCP 47 language tag used for notifications
    pub locale: String,

    /// Whether this member has a premium subscription
    pub is_premium: bool,

    /// Remaining likes
    pub like_count: i32,

    /// Remaining mega-likes
    pub mega_like_count: i32,

    /// Remaining rewarded-ad redemptions
    pub ad_count: i32,

    /// Whether push notifications are enabled
    pub notifications_enabled: bool,

    /// When the member registered
    pub created_at: DateTime<Utc>,
}

impl From<MemberModel> for MemberData {
    fn from(member: MemberModel) -> Self {
        Self {
            id: member.id.to_string(),
            display_name: member.display_name,
            locale: member.locale,
            is_premium: member.is_premium,
            like_count: member.like_count,
            mega_like_count: member.mega_like_count,
            ad_count: member.ad_count,
            notifications_enabled: member.notifications_enabled,
            created_at: member.created_at,
        }
    }
}
