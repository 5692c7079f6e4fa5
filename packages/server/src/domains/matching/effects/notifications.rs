//! Post-commit fan-out for matching events.
//!
//! Runs after the owning transaction commits. Nothing here may fail the
//! request: delivery errors are logged and swallowed, and a member who
//! disappeared between commit and fan-out is skipped.

use anyhow::Result;
use tracing::{debug, instrument, warn};

use crate::common::utils::l10n::{Locale, NotificationKind};
use crate::common::{ChatId, MemberId};
use crate::domains::chats::models::chat::Chat;
use crate::domains::matching::events::MatchingEvent;
use crate::domains::matching::models::like::{Like, LikeKind};
use crate::domains::matching::models::matches::Match;
use crate::domains::member::models::member::Member;
use crate::kernel::ServerDeps;

/// Deliver one event. Never propagates failures.
pub async fn dispatch(event: &MatchingEvent, deps: &ServerDeps) {
    let result = match event {
        MatchingEvent::MatchCreated { match_record, chat } => {
            fan_out_match(match_record, chat, deps).await
        }
        MatchingEvent::LikeReceived { like } => fan_out_like(like, deps).await,
        MatchingEvent::RelationshipEnded {
            ended_by,
            counterpart,
            chat_id,
        } => fan_out_ended(*ended_by, *counterpart, *chat_id, deps).await,
    };

    if let Err(e) = result {
        warn!(error = %e, "Fan-out failed, event dropped");
    }
}

/// Tell both members about their new match: a stream payload per live
/// session plus a localized push per enabled token.
#[instrument(skip(match_record, chat, deps), fields(match_id = %match_record.id, chat_id = %chat.id))]
async fn fan_out_match(match_record: &Match, chat: &Chat, deps: &ServerDeps) -> Result<()> {
    let members = Member::find_many(
        &[match_record.lower_member_id, match_record.higher_member_id],
        &deps.db_pool,
    )
    .await?;

    let lower = members
        .iter()
        .find(|m| m.id == match_record.lower_member_id);
    let higher = members
        .iter()
        .find(|m| m.id == match_record.higher_member_id);

    // A missing side means a racing account deletion; its cascade sends
    // end_user, so there is nothing useful to announce here.
    let (lower, higher) = match (lower, higher) {
        (Some(l), Some(h)) => (l, h),
        _ => {
            warn!("Match fan-out skipped, member deleted");
            return Ok(());
        }
    };
    let recipients = [(lower, higher), (higher, lower)];

    let mut prepared: Vec<(String, String, String, serde_json::Value)> = Vec::new();

    for (me, other) in &recipients {
        let live = deps
            .session_hub
            .publish(
                me.id,
                serde_json::json!({
                    "type": "new_match",
                    "chatId": chat.id.to_string(),
                    "matchId": match_record.id.to_string(),
                    "counterpartId": other.id.to_string(),
                    "counterpartName": other.display_name,
                }),
            )
            .await;
        debug!(member_id = %me.id, live, "Published new_match to sessions");

        if let Some(token) = me.push_token.as_deref() {
            if me.can_receive_push() {
                let locale = me.notification_locale();
                prepared.push((
                    token.to_string(),
                    NotificationKind::NewMatch.title(locale),
                    NotificationKind::NewMatch.body(locale, &other.display_name),
                    serde_json::json!({
                        "type": NotificationKind::NewMatch.data_type(),
                        "chatId": chat.id.to_string(),
                    }),
                ));
            }
        }
    }

    if !prepared.is_empty() {
        let channel = NotificationKind::NewMatch.channel();
        let batch: Vec<(&str, &str, &str, serde_json::Value, &str)> = prepared
            .iter()
            .map(|(token, title, body, data)| {
                (
                    token.as_str(),
                    title.as_str(),
                    body.as_str(),
                    data.clone(),
                    channel,
                )
            })
            .collect();
        deps.push_service.send_batch(batch).await?;
    }

    Ok(())
}

/// Tell the receiving member about a new pending like.
#[instrument(skip(like, deps), fields(like_id = %like.id, to_member = %like.to_member))]
async fn fan_out_like(like: &Like, deps: &ServerDeps) -> Result<()> {
    let Some(target) = Member::find_optional(like.to_member, &deps.db_pool).await? else {
        return Ok(());
    };
    let sender = Member::find_optional(like.from_member, &deps.db_pool).await?;

    let kind = match like.like_type {
        LikeKind::Like => NotificationKind::NewLike,
        LikeKind::MegaLike => NotificationKind::NewMegaLike,
    };

    let live = deps
        .session_hub
        .publish(
            target.id,
            serde_json::json!({
                "type": kind.data_type(),
                "likeId": like.id.to_string(),
                "senderId": like.from_member.to_string(),
            }),
        )
        .await;
    debug!(member_id = %target.id, live, "Published like to sessions");

    if let (Some(token), Some(sender)) = (target.push_token.as_deref(), sender) {
        if target.can_receive_push() {
            let locale = target.notification_locale();
            deps.push_service
                .send_notification(
                    token,
                    &kind.title(locale),
                    &kind.body(locale, &sender.display_name),
                    serde_json::json!({
                        "type": kind.data_type(),
                        "likeId": like.id.to_string(),
                    }),
                    kind.channel(),
                )
                .await?;
        }
    }

    Ok(())
}

/// Tell the counterpart their chat is gone. Stream only, no push.
#[instrument(skip(deps), fields(counterpart = %counterpart, chat_id = %chat_id))]
async fn fan_out_ended(
    ended_by: MemberId,
    counterpart: MemberId,
    chat_id: ChatId,
    deps: &ServerDeps,
) -> Result<()> {
    let live = deps
        .session_hub
        .publish(
            counterpart,
            serde_json::json!({
                "type": "end_user",
                "userId": ended_by.to_string(),
                "chatId": chat_id.to_string(),
            }),
        )
        .await;
    debug!(live, "Published end_user to sessions");
    Ok(())
}
