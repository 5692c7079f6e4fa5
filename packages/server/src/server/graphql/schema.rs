//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};
use tracing::{error, warn};
use uuid::Uuid;

// Common types
use crate::common::{build_page_info, trim_results, Cursor, MemberId, PairSide, PaginationArgs};

// Domain actions
use crate::domains::matching::actions as matching_actions;
use crate::domains::matching::actions::{SubmitKind, SubmitOutcome};
use crate::domains::matching::effects as matching_effects;
use crate::domains::matching::events::MatchingEvent;
use crate::domains::member::actions as member_actions;

// Domain data types (GraphQL types)
use crate::domains::chats::data::ChatData;
use crate::domains::matching::data::{
    ActionResult, AdRewardResult, LikeConnection, LikeData, LikeResult, MatchData, RewindResult,
    TrackData,
};
use crate::domains::member::data::MemberData;

// Domain models (for queries)
use crate::domains::chats::models::chat::Chat;
use crate::domains::matching::models::like::Like;
use crate::domains::matching::models::matches::Match;
use crate::domains::matching::models::MatchOrigin;
use crate::domains::member::models::member::Member;

/// Kind of like being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum LikeTypeInput {
    Like,
    MegaLike,
}

/// Surface a reaction was sent from
#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum MatchTypeInput {
    Live,
    Explore,
    LikesMe,
}

impl MatchTypeInput {
    fn into_origin(self) -> MatchOrigin {
        match self {
            MatchTypeInput::Live => MatchOrigin::Live,
            MatchTypeInput::Explore => MatchOrigin::Explore,
            MatchTypeInput::LikesMe => MatchOrigin::LikesMe,
        }
    }
}

/// Kind of reaction being taken back
#[derive(Debug, Clone, Copy, PartialEq, Eq, juniper::GraphQLEnum)]
pub enum RewindKindInput {
    Like,
    MegaLike,
    Dislike,
}

impl RewindKindInput {
    fn into_kind(self) -> SubmitKind {
        match self {
            RewindKindInput::Like => SubmitKind::Like,
            RewindKindInput::MegaLike => SubmitKind::MegaLike,
            RewindKindInput::Dislike => SubmitKind::Dislike,
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Convert anyhow::Error to juniper FieldError for thin resolvers
fn to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

/// Resolve a catalog track reference; lookup failures hide the track
/// rather than failing the whole response.
async fn resolve_track(track_ref: Option<&str>, ctx: &GraphQLContext) -> Option<TrackData> {
    let reference = track_ref?;
    match ctx.deps.catalog_service.get_track(reference).await {
        Ok(found) => found.map(TrackData::from),
        Err(e) => {
            warn!(track_ref = %reference, error = %e, "Track lookup failed, omitting track");
            None
        }
    }
}

/// Assemble a viewer-oriented MatchData, loading the counterpart profile
/// and both attached tracks.
async fn match_data_for_viewer(
    match_record: &Match,
    viewer: MemberId,
    ctx: &GraphQLContext,
) -> FieldResult<MatchData> {
    let counterpart_id = match_record.counterpart_of(viewer).ok_or_else(|| {
        FieldError::new("Viewer is not part of this match", juniper::Value::null())
    })?;

    let counterpart = Member::find_optional(counterpart_id, &ctx.db_pool)
        .await
        .map_err(to_field_error)?
        .ok_or_else(|| FieldError::new("Member not found", juniper::Value::null()))?;

    let my_side = if viewer == match_record.lower_member_id {
        PairSide::Lower
    } else {
        PairSide::Higher
    };
    let their_side = match my_side {
        PairSide::Lower => PairSide::Higher,
        PairSide::Higher => PairSide::Lower,
    };
    let (_, _, my_ref) = match_record.side_attribution(my_side);
    let (_, _, their_ref) = match_record.side_attribution(their_side);

    let my_track = resolve_track(my_ref, ctx).await;
    let their_track = resolve_track(their_ref, ctx).await;

    Ok(MatchData::for_viewer(
        match_record,
        viewer,
        MemberData::from(counterpart),
        my_track,
        their_track,
    ))
}

/// Dispatch post-commit fan-out. Delivery failures are logged inside the
/// effect layer, never surfaced to the mutation response.
async fn dispatch_fanout(events: Vec<MatchingEvent>, ctx: &GraphQLContext) {
    for event in &events {
        matching_effects::dispatch(event, &ctx.deps).await;
    }
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Member Queries
    // =========================================================================

    /// The authenticated member's own profile and quota counters
    async fn me(ctx: &GraphQLContext) -> FieldResult<MemberData> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        let member = Member::find_optional(user.member_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?
            .ok_or_else(|| FieldError::new("Member not found", juniper::Value::null()))?;

        Ok(MemberData::from(member))
    }

    // =========================================================================
    // Matching Queries
    // =========================================================================

    /// Incoming likes for the authenticated member, newest first
    ///
    /// Cursor-based forward pagination (first/after). Each node carries the
    /// sender's profile and the attached track when one resolves.
    async fn likes_me(
        ctx: &GraphQLContext,
        first: Option<i32>,
        after: Option<String>,
    ) -> FieldResult<LikeConnection> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        let pagination_args = PaginationArgs { first, after };
        let validated = pagination_args
            .validate()
            .map_err(|e| FieldError::new(e, juniper::Value::null()))?;

        let rows = Like::find_received_page(
            user.member_id,
            validated.cursor,
            validated.fetch_limit(),
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        let (rows, has_more) = trim_results(rows, validated.limit);

        let sender_ids: Vec<Uuid> = rows.iter().map(|l| l.from_member.into_uuid()).collect();
        let senders = ctx.loaders.member.load_many(sender_ids).await;

        let start_cursor = rows.first().map(|l| Cursor::encode_uuid(l.id.into_uuid()));
        let end_cursor = rows.last().map(|l| Cursor::encode_uuid(l.id.into_uuid()));

        let mut nodes = Vec::with_capacity(rows.len());
        for like in rows {
            // A missing sender is a deletion cascade racing this page;
            // the like row is already gone, skip the orphan.
            let Some(sender) = senders.get(&like.from_member.into_uuid()).cloned().flatten()
            else {
                continue;
            };
            let track = resolve_track(like.track_ref.as_deref(), ctx).await;
            nodes.push(LikeData::assemble(like, MemberData::from(sender), track));
        }

        Ok(LikeConnection {
            nodes,
            page_info: build_page_info(has_more, start_cursor, end_cursor),
        })
    }

    // =========================================================================
    // Chat Queries
    // =========================================================================

    /// The authenticated member's chat inbox, most recent activity first
    async fn my_chats(ctx: &GraphQLContext, limit: Option<i32>) -> FieldResult<Vec<ChatData>> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        let limit = i64::from(limit.unwrap_or(50).clamp(1, 100));
        let chats = Chat::find_for_member(user.member_id, limit, &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        let counterpart_ids: Vec<Uuid> = chats
            .iter()
            .filter_map(|c| c.counterpart_of(user.member_id))
            .map(|id| id.into_uuid())
            .collect();
        let counterparts = ctx.loaders.member.load_many(counterpart_ids).await;

        let mut inbox = Vec::with_capacity(chats.len());
        for chat in &chats {
            let Some(counterpart_id) = chat.counterpart_of(user.member_id) else {
                continue;
            };
            let Some(member) = counterparts.get(&counterpart_id.into_uuid()).cloned().flatten()
            else {
                continue;
            };
            inbox.push(ChatData::for_viewer(
                chat,
                user.member_id,
                MemberData::from(member),
            ));
        }

        Ok(inbox)
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Matching Mutations
    // =========================================================================

    /// Send a like or mega-like toward another member
    ///
    /// Promotes to a match when the target already has a like pending toward
    /// the viewer; `matched` carries the new match in that case. Business
    /// refusals come back as `{success: false, error: CODE}`.
    async fn like(
        ctx: &GraphQLContext,
        target_id: Uuid,
        like_type: Option<LikeTypeInput>,
        match_type: Option<MatchTypeInput>,
        track_ref: Option<String>,
    ) -> FieldResult<LikeResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        let kind = match like_type.unwrap_or(LikeTypeInput::Like) {
            LikeTypeInput::Like => SubmitKind::Like,
            LikeTypeInput::MegaLike => SubmitKind::MegaLike,
        };
        let origin = match_type.unwrap_or(MatchTypeInput::Explore).into_origin();

        match matching_actions::submit_action(
            user.member_id,
            MemberId::from_uuid(target_id),
            kind,
            origin,
            track_ref,
            &ctx.db_pool,
        )
        .await
        {
            Ok(outcome) => {
                dispatch_fanout(outcome.fanout_events(), ctx).await;
                match outcome {
                    SubmitOutcome::Matched { match_record, .. } => {
                        let data =
                            match_data_for_viewer(&match_record, user.member_id, ctx).await?;
                        Ok(LikeResult::matched(data))
                    }
                    _ => Ok(LikeResult::accepted()),
                }
            }
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(LikeResult::refused(code)),
                None => {
                    error!("Like submission failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Pass on another member
    ///
    /// Records a dislike so the pair stops surfacing. Free and idempotent.
    async fn dislike(ctx: &GraphQLContext, target_id: Uuid) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match matching_actions::submit_action(
            user.member_id,
            MemberId::from_uuid(target_id),
            SubmitKind::Dislike,
            MatchOrigin::Explore,
            None,
            &ctx.db_pool,
        )
        .await
        {
            Ok(_) => Ok(ActionResult::ok()),
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(ActionResult::refused(code)),
                None => {
                    error!("Dislike submission failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Take back a pending reaction toward another member (premium only)
    ///
    /// Mega-like rewinds refund the credit; plain like rewinds do not
    /// restore a free-tier credit.
    async fn rewind(
        ctx: &GraphQLContext,
        target_id: Uuid,
        kind: RewindKindInput,
    ) -> FieldResult<RewindResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match matching_actions::rewind(
            user.member_id,
            MemberId::from_uuid(target_id),
            kind.into_kind(),
            &ctx.db_pool,
        )
        .await
        {
            Ok(outcome) => Ok(RewindResult::applied(outcome.refunded_mega_like)),
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(RewindResult::refused(code)),
                None => {
                    error!("Rewind failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// End a match with another member
    ///
    /// Deletes the chat, its messages, and the match. The counterpart's
    /// live session is told to drop the chat.
    async fn end_match(ctx: &GraphQLContext, target_id: Uuid) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match matching_actions::end_match(
            user.member_id,
            MemberId::from_uuid(target_id),
            &ctx.db_pool,
        )
        .await
        {
            Ok(outcome) => {
                dispatch_fanout(outcome.fanout_events(), ctx).await;
                Ok(ActionResult::ok())
            }
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(ActionResult::refused(code)),
                None => {
                    error!("End match failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Block another member
    ///
    /// Succeeds whether or not a match exists; an existing match is torn
    /// down in the same transaction.
    async fn block_member(ctx: &GraphQLContext, target_id: Uuid) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match matching_actions::block_member(
            user.member_id,
            MemberId::from_uuid(target_id),
            &ctx.db_pool,
        )
        .await
        {
            Ok(outcome) => {
                dispatch_fanout(outcome.fanout_events(), ctx).await;
                Ok(ActionResult::ok())
            }
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(ActionResult::refused(code)),
                None => {
                    error!("Block failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Remove a block the viewer holds against another member
    ///
    /// Restores nothing that the block tore down.
    async fn unblock_member(ctx: &GraphQLContext, target_id: Uuid) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match matching_actions::unblock_member(
            user.member_id,
            MemberId::from_uuid(target_id),
            &ctx.db_pool,
        )
        .await
        {
            Ok(()) => Ok(ActionResult::ok()),
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(ActionResult::refused(code)),
                None => {
                    error!("Unblock failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    // =========================================================================
    // Member Mutations
    // =========================================================================

    /// Trade an ad credit for like credits
    async fn redeem_ad_reward(ctx: &GraphQLContext) -> FieldResult<AdRewardResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match member_actions::redeem_ad_reward(user.member_id, &ctx.db_pool).await {
            Ok(member) => Ok(AdRewardResult::applied(member.like_count, member.ad_count)),
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(AdRewardResult::refused(code)),
                None => {
                    error!("Ad reward redemption failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Delete the authenticated member's account
    ///
    /// Tears down every relationship (likes, dislikes, blocks, matches,
    /// chats) and the profile itself. Matched counterparts are told their
    /// chat is gone.
    async fn delete_account(ctx: &GraphQLContext) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        match member_actions::delete_account(user.member_id, &ctx.db_pool).await {
            Ok(outcome) => {
                dispatch_fanout(outcome.fanout_events(), ctx).await;
                Ok(ActionResult::ok())
            }
            Err(e) => match e.refusal_code() {
                Some(code) => Ok(ActionResult::refused(code)),
                None => {
                    error!("Account deletion failed: {}", e);
                    Err(to_field_error(e.into()))
                }
            },
        }
    }

    /// Register or clear the member's Expo push token
    async fn update_push_token(
        ctx: &GraphQLContext,
        token: Option<String>,
    ) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        if Member::find_optional(user.member_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?
            .is_none()
        {
            return Ok(ActionResult::refused("INVALID_FIELDS"));
        }

        Member::update_push_token(user.member_id, token.as_deref(), &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(ActionResult::ok())
    }

    /// Turn push notification delivery on or off
    async fn set_notifications_enabled(
        ctx: &GraphQLContext,
        enabled: bool,
    ) -> FieldResult<ActionResult> {
        let user = ctx
            .auth_user
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))?;

        if Member::find_optional(user.member_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?
            .is_none()
        {
            return Ok(ActionResult::refused("INVALID_FIELDS"));
        }

        Member::set_notifications_enabled(user.member_id, enabled, &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(ActionResult::ok())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
