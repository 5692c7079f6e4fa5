//! Integration tests for taking back pending reactions.

mod common;

use crate::common::{create_member, create_member_with, create_premium_member, TestHarness};
use duet_core::common::TransitionError;
use duet_core::domains::matching::actions::{rewind, submit_action, SubmitKind, SubmitOutcome};
use duet_core::domains::matching::models::{Dislike, Like, MatchOrigin};
use duet_core::domains::member::models::member::Member;
use test_context::test_context;

/// Rewind is a premium feature.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_requires_premium(ctx: &TestHarness) {
    let a = create_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();

    let err = rewind(a.id, b.id, SubmitKind::Like, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionError::NoPermission));
    assert_eq!(err.refusal_code(), Some("NO_PERMISSION"));

    // The pending like is untouched
    assert!(Like::find_between(a.id, b.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_some());
}

/// Rewinding a plain like deletes the row without restoring the credit.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_like_deletes_without_refund(ctx: &TestHarness) {
    let a = create_premium_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();

    let outcome = rewind(a.id, b.id, SubmitKind::Like, &ctx.db_pool)
        .await
        .unwrap();
    assert!(!outcome.refunded_mega_like);

    assert!(Like::find_between(a.id, b.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());

    // Premium likes never billed, so the counter stayed where it was
    let refreshed = Member::find_by_id(a.id, &ctx.db_pool).await.unwrap();
    assert_eq!(refreshed.like_count, 20);
}

/// Rewinding a mega-like refunds the credit.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_mega_like_refunds_credit(ctx: &TestHarness) {
    let a = create_premium_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::MegaLike, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    let spent = Member::find_by_id(a.id, &ctx.db_pool).await.unwrap();
    assert_eq!(spent.mega_like_count, 4);

    let outcome = rewind(a.id, b.id, SubmitKind::MegaLike, &ctx.db_pool)
        .await
        .unwrap();
    assert!(outcome.refunded_mega_like);

    let refunded = Member::find_by_id(a.id, &ctx.db_pool).await.unwrap();
    assert_eq!(refunded.mega_like_count, 5);
}

/// Rewinding a dislike clears the way for a later match.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_dislike_reopens_the_pair(ctx: &TestHarness) {
    let a = create_premium_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::Dislike, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    rewind(a.id, b.id, SubmitKind::Dislike, &ctx.db_pool)
        .await
        .unwrap();
    assert!(Dislike::find_between(a.id, b.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());

    // With the dislike gone the pair can match normally
    submit_action(b.id, a.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    let outcome = submit_action(a.id, b.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Matched { .. }));
}

/// Each kind reports its own not-found code.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_nothing_reports_kind_specific_code(ctx: &TestHarness) {
    let a = create_premium_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    let err = rewind(a.id, b.id, SubmitKind::Like, &ctx.db_pool)
        .await
        .unwrap_err();
    assert_eq!(err.refusal_code(), Some("NOT_FOUND_LIKE"));

    let err = rewind(a.id, b.id, SubmitKind::MegaLike, &ctx.db_pool)
        .await
        .unwrap_err();
    assert_eq!(err.refusal_code(), Some("NOT_FOUND_MEGALIKE"));

    let err = rewind(a.id, b.id, SubmitKind::Dislike, &ctx.db_pool)
        .await
        .unwrap_err();
    assert_eq!(err.refusal_code(), Some("NOT_FOUND_DISLIKE"));
}

/// A promotion is terminal; the consumed like cannot be taken back.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_after_match_is_refused(ctx: &TestHarness) {
    let a = create_premium_member(&ctx.db_pool, "Ava").await.unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    submit_action(b.id, a.id, SubmitKind::Like, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();

    let err = rewind(a.id, b.id, SubmitKind::Like, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, TransitionError::AlreadyMatch));
    assert_eq!(err.refusal_code(), Some("ALREADY_MATCH"));
}

/// A mega-like refund cannot push the counter past what was ever granted;
/// rewinding twice reports not-found the second time.
#[test_context(TestHarness)]
#[tokio::test]
async fn rewind_is_not_repeatable(ctx: &TestHarness) {
    let a = create_member_with(&ctx.db_pool, "Ava", true, 20, 1, 5)
        .await
        .unwrap();
    let b = create_member(&ctx.db_pool, "Beau").await.unwrap();

    submit_action(a.id, b.id, SubmitKind::MegaLike, MatchOrigin::Explore, None, &ctx.db_pool)
        .await
        .unwrap();
    rewind(a.id, b.id, SubmitKind::MegaLike, &ctx.db_pool)
        .await
        .unwrap();

    let err = rewind(a.id, b.id, SubmitKind::MegaLike, &ctx.db_pool)
        .await
        .unwrap_err();
    assert_eq!(err.refusal_code(), Some("NOT_FOUND_MEGALIKE"));

    let refreshed = Member::find_by_id(a.id, &ctx.db_pool).await.unwrap();
    assert_eq!(refreshed.mega_like_count, 1);
}
