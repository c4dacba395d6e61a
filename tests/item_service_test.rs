use chrono::{Duration, Utc};
use shareit::application::{ErrorKind, item};
use shareit::domain::{
    ItemId, ItemPatch, RequestId,
    commands::{AddComment, CreateItem, UpdateItem},
};

mod common;

use common::{book, create_item, create_user, memory_deps, respond};

// ============================================================================
// アイテムの登録・更新・削除
// ============================================================================

#[tokio::test]
async fn test_create_item_requires_existing_owner_and_request() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;

    let unknown_owner = item::create_item(
        &deps,
        CreateItem {
            owner_id: shareit::domain::UserId::new(999),
            name: "Drill".to_string(),
            description: "Cordless".to_string(),
            available: true,
            request_id: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unknown_owner.kind(), ErrorKind::NotFound);

    let unknown_request = item::create_item(
        &deps,
        CreateItem {
            owner_id: owner.id,
            name: "Drill".to_string(),
            description: "Cordless".to_string(),
            available: true,
            request_id: Some(RequestId::new(999)),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unknown_request.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_owner_can_patch_item_fields() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let drill = create_item(&deps, owner.id, "Drill").await;

    let updated = item::update_item(
        &deps,
        UpdateItem {
            user_id: owner.id,
            item_id: drill.id,
            patch: ItemPatch {
                name: Some("Hammer drill".to_string()),
                available: Some(false),
                ..ItemPatch::default()
            },
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Hammer drill");
    assert_eq!(updated.description, drill.description);
    assert!(!updated.available);
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete_item() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let other = create_user(&deps, "Other").await;
    let drill = create_item(&deps, owner.id, "Drill").await;

    let update = item::update_item(
        &deps,
        UpdateItem {
            user_id: other.id,
            item_id: drill.id,
            patch: ItemPatch {
                name: Some("Mine now".to_string()),
                ..ItemPatch::default()
            },
        },
    )
    .await
    .unwrap_err();
    assert_eq!(update.kind(), ErrorKind::AccessDenied);

    let delete = item::delete_item(&deps, other.id, drill.id)
        .await
        .unwrap_err();
    assert_eq!(delete.kind(), ErrorKind::AccessDenied);

    let stored = item::get_item(&deps, owner.id, drill.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(stored.name, "Drill");
}

#[tokio::test]
async fn test_deleted_item_is_gone() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let drill = create_item(&deps, owner.id, "Drill").await;

    item::delete_item(&deps, owner.id, drill.id).await.unwrap();

    let err = item::get_item(&deps, owner.id, drill.id, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ============================================================================
// 一覧・検索
// ============================================================================

#[tokio::test]
async fn test_list_owner_items_returns_only_own_items() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let other = create_user(&deps, "Other").await;
    let drill = create_item(&deps, owner.id, "Drill").await;
    let saw = create_item(&deps, owner.id, "Saw").await;
    create_item(&deps, other.id, "Ladder").await;

    let items = item::list_owner_items(&deps, owner.id, Utc::now())
        .await
        .unwrap();

    let ids: Vec<ItemId> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![drill.id, saw.id]);
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_skips_unavailable() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let drill = create_item(&deps, owner.id, "Power Drill").await;
    let hidden = create_item(&deps, owner.id, "Drill bits").await;
    item::update_item(
        &deps,
        UpdateItem {
            user_id: owner.id,
            item_id: hidden.id,
            patch: ItemPatch {
                available: Some(false),
                ..ItemPatch::default()
            },
        },
    )
    .await
    .unwrap();

    let found = item::search_items(&deps, "dRiLl").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, drill.id);
    assert!(found[0].last_booking.is_none());
}

#[tokio::test]
async fn test_blank_search_returns_nothing() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    create_item(&deps, owner.id, "Drill").await;

    assert!(item::search_items(&deps, "").await.unwrap().is_empty());
    assert!(item::search_items(&deps, "   ").await.unwrap().is_empty());
}

// ============================================================================
// コメント
// ============================================================================

#[tokio::test]
async fn test_comment_requires_completed_approved_booking() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let booker = create_user(&deps, "Booker").await;
    let drill = create_item(&deps, owner.id, "Drill").await;
    let now = Utc::now();

    let comment = |created_at| AddComment {
        author_id: booker.id,
        item_id: drill.id,
        text: "Works great".to_string(),
        created_at,
    };

    // 予約なし
    let err = item::add_comment(&deps, comment(now)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // 未承認のまま終了した予約
    let finished = book(
        &deps,
        booker.id,
        &drill,
        now - Duration::days(3),
        now - Duration::days(2),
    )
    .await;
    let err = item::add_comment(&deps, comment(now)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // 承認済みで終了した予約
    respond(&deps, owner.id, finished.id, true).await;
    let view = item::add_comment(&deps, comment(now)).await.unwrap();

    assert_eq!(view.text, "Works great");
    assert_eq!(view.author_name, "Booker");
    assert_eq!(view.item_id, drill.id);
}

#[tokio::test]
async fn test_comment_on_booking_still_running_is_refused() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let booker = create_user(&deps, "Booker").await;
    let drill = create_item(&deps, owner.id, "Drill").await;
    let now = Utc::now();

    let running = book(
        &deps,
        booker.id,
        &drill,
        now - Duration::days(1),
        now + Duration::days(1),
    )
    .await;
    respond(&deps, owner.id, running.id, true).await;

    let err = item::add_comment(
        &deps,
        AddComment {
            author_id: booker.id,
            item_id: drill.id,
            text: "Too early".to_string(),
            created_at: now,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_comments_are_visible_to_every_viewer() {
    let deps = memory_deps();
    let owner = create_user(&deps, "Owner").await;
    let booker = create_user(&deps, "Booker").await;
    let stranger = create_user(&deps, "Stranger").await;
    let drill = create_item(&deps, owner.id, "Drill").await;
    let now = Utc::now();

    let finished = book(
        &deps,
        booker.id,
        &drill,
        now - Duration::days(3),
        now - Duration::days(2),
    )
    .await;
    respond(&deps, owner.id, finished.id, true).await;
    item::add_comment(
        &deps,
        AddComment {
            author_id: booker.id,
            item_id: drill.id,
            text: "Solid".to_string(),
            created_at: now,
        },
    )
    .await
    .unwrap();

    let as_stranger = item::get_item(&deps, stranger.id, drill.id, now)
        .await
        .unwrap();
    let as_owner = item::get_item(&deps, owner.id, drill.id, now).await.unwrap();

    assert_eq!(as_stranger.comments.len(), 1);
    assert_eq!(as_stranger.comments[0].text, "Solid");
    assert!(as_stranger.last_booking.is_none());
    assert_eq!(as_owner.last_booking.map(|b| b.id), Some(finished.id));
}
