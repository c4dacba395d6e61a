use crate::domain::{self, Item, ItemId, NewItem, UserId, commands::*};
use chrono::{DateTime, Utc};

use crate::application::booking::summarize_item_bookings;
use crate::application::dependencies::{ServiceDependencies, load_item, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::ItemView;

/// コメントを付与したビューを作る
async fn item_view(deps: &ServiceDependencies, item: &Item) -> Result<ItemView> {
    let comments = deps
        .comments
        .find_by_item(item.item_id)
        .await
        .map_err(ApplicationError::Repository)?;
    Ok(ItemView::without_bookings(item, &comments))
}

/// コメントと直前・直後の承認済み予約を付与したビューを作る（所有者向け）
async fn owner_item_view(
    deps: &ServiceDependencies,
    item: &Item,
    now: DateTime<Utc>,
) -> Result<ItemView> {
    let (view, summary) = futures::future::try_join(
        item_view(deps, item),
        summarize_item_bookings(deps, item.item_id, now),
    )
    .await?;

    Ok(ItemView {
        last_booking: summary.last,
        next_booking: summary.next,
        ..view
    })
}

/// 所有者であることを確認する
fn ensure_owner(user_id: UserId, item: &Item) -> Result<()> {
    if !item.is_owned_by(user_id) {
        tracing::warn!(user_id = %user_id, item_id = %item.item_id, "Not the item owner");
        return Err(ApplicationError::NotItemOwner(user_id, item.item_id));
    }
    Ok(())
}

/// アイテムを登録する
///
/// リクエストIDが指定された場合、そのリクエストが存在すること（RequestNotFound）。
pub async fn create_item(deps: &ServiceDependencies, cmd: CreateItem) -> Result<ItemView> {
    load_user(deps, cmd.owner_id).await?;

    if let Some(request_id) = cmd.request_id {
        deps.requests
            .find_by_id(request_id)
            .await
            .map_err(ApplicationError::Repository)?
            .ok_or(ApplicationError::RequestNotFound(request_id))?;
    }

    let item = deps
        .items
        .insert(NewItem {
            name: cmd.name,
            description: cmd.description,
            available: cmd.available,
            owner_id: cmd.owner_id,
            request_id: cmd.request_id,
        })
        .await
        .map_err(ApplicationError::Repository)?;

    tracing::info!(item_id = %item.item_id, owner_id = %item.owner_id, "Item created");
    Ok(ItemView::without_bookings(&item, &[]))
}

/// アイテムを部分更新する（所有者のみ）
pub async fn update_item(deps: &ServiceDependencies, cmd: UpdateItem) -> Result<ItemView> {
    load_user(deps, cmd.user_id).await?;
    let item = load_item(deps, cmd.item_id).await?;
    ensure_owner(cmd.user_id, &item)?;

    let updated = domain::apply_item_patch(item, cmd.patch);
    deps.items
        .update(&updated)
        .await
        .map_err(ApplicationError::Repository)?;

    tracing::info!(item_id = %updated.item_id, "Item updated");
    item_view(deps, &updated).await
}

/// アイテムを削除する（所有者のみ）
pub async fn delete_item(
    deps: &ServiceDependencies,
    user_id: UserId,
    item_id: ItemId,
) -> Result<()> {
    load_user(deps, user_id).await?;
    let item = load_item(deps, item_id).await?;
    ensure_owner(user_id, &item)?;

    let deleted = deps
        .items
        .delete(item_id)
        .await
        .map_err(ApplicationError::Repository)?;
    if !deleted {
        return Err(ApplicationError::ItemNotFound(item_id));
    }

    tracing::info!(item_id = %item_id, "Item deleted");
    Ok(())
}

/// アイテム詳細を取得する
///
/// コメントは常に含める。直前・直後の予約は閲覧者が所有者の場合のみ含める。
pub async fn get_item(
    deps: &ServiceDependencies,
    viewer_id: UserId,
    item_id: ItemId,
    now: DateTime<Utc>,
) -> Result<ItemView> {
    let item = load_item(deps, item_id).await?;
    load_user(deps, viewer_id).await?;

    if item.is_owned_by(viewer_id) {
        owner_item_view(deps, &item, now).await
    } else {
        item_view(deps, &item).await
    }
}

/// 所有者のアイテム一覧（直前・直後の予約付き）
pub async fn list_owner_items(
    deps: &ServiceDependencies,
    owner_id: UserId,
    now: DateTime<Utc>,
) -> Result<Vec<ItemView>> {
    load_user(deps, owner_id).await?;

    let items = deps
        .items
        .find_by_owner(owner_id)
        .await
        .map_err(ApplicationError::Repository)?;

    futures::future::try_join_all(items.iter().map(|item| owner_item_view(deps, item, now))).await
}

/// 貸出可能なアイテムを検索する
///
/// 空白のみの検索語は空の結果を返す。予約情報は含めない。
pub async fn search_items(deps: &ServiceDependencies, text: &str) -> Result<Vec<ItemView>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items = deps
        .items
        .search_available(text)
        .await
        .map_err(ApplicationError::Repository)?;

    futures::future::try_join_all(items.iter().map(|item| item_view(deps, item))).await
}
