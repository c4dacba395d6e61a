use chrono::{Duration, Utc};
use shareit::application::{ErrorKind, item, request};
use shareit::domain::{
    RequestId, UserId,
    commands::{CreateItem, CreateItemRequest},
};

mod common;

use common::{create_user, memory_deps};

#[tokio::test]
async fn test_request_lists_items_offered_against_it() {
    let deps = memory_deps();
    let asker = create_user(&deps, "Asker").await;
    let owner = create_user(&deps, "Owner").await;

    let created = request::create_request(
        &deps,
        CreateItemRequest {
            requestor_id: asker.id,
            description: "Need a ladder".to_string(),
            created_at: Utc::now(),
        },
    )
    .await
    .unwrap();
    assert!(created.items.is_empty());

    let ladder = item::create_item(
        &deps,
        CreateItem {
            owner_id: owner.id,
            name: "Ladder".to_string(),
            description: "Three metres".to_string(),
            available: true,
            request_id: Some(created.id),
        },
    )
    .await
    .unwrap();
    assert_eq!(ladder.request_id, Some(created.id));

    let fetched = request::get_request(&deps, created.id).await.unwrap();
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].id, ladder.id);
    assert_eq!(fetched.items[0].owner_id, owner.id);
}

#[tokio::test]
async fn test_requests_are_listed_newest_first() {
    let deps = memory_deps();
    let asker = create_user(&deps, "Asker").await;
    let other = create_user(&deps, "Other").await;
    let now = Utc::now();

    let mut ids = Vec::new();
    for (requestor, offset) in [(asker.id, 2), (other.id, 1), (asker.id, 0)] {
        let view = request::create_request(
            &deps,
            CreateItemRequest {
                requestor_id: requestor,
                description: format!("Request {offset}"),
                created_at: now - Duration::hours(offset),
            },
        )
        .await
        .unwrap();
        ids.push(view.id);
    }

    let own: Vec<RequestId> = request::list_own_requests(&deps, asker.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    let all: Vec<RequestId> = request::list_all_requests(&deps)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(own, vec![ids[2], ids[0]]);
    assert_eq!(all, vec![ids[2], ids[1], ids[0]]);
}

#[tokio::test]
async fn test_request_errors_are_not_found() {
    let deps = memory_deps();

    let unknown_user = request::create_request(
        &deps,
        CreateItemRequest {
            requestor_id: UserId::new(5),
            description: "Anything".to_string(),
            created_at: Utc::now(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unknown_user.kind(), ErrorKind::NotFound);

    let missing = request::get_request(&deps, RequestId::new(5))
        .await
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);
}
