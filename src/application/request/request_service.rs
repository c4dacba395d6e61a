use crate::domain::{ItemRequest, NewItemRequest, RequestId, UserId, commands::CreateItemRequest};

use crate::application::dependencies::{ServiceDependencies, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::ItemRequestView;

/// リクエストに応えたアイテムを付与してビューを作る
async fn with_items(deps: &ServiceDependencies, request: &ItemRequest) -> Result<ItemRequestView> {
    let items = deps
        .items
        .find_by_request(request.request_id)
        .await
        .map_err(ApplicationError::Repository)?;
    Ok(ItemRequestView::new(request, &items))
}

async fn with_items_all(
    deps: &ServiceDependencies,
    requests: &[ItemRequest],
) -> Result<Vec<ItemRequestView>> {
    futures::future::try_join_all(requests.iter().map(|request| with_items(deps, request))).await
}

/// アイテムリクエストを登録する
pub async fn create_request(
    deps: &ServiceDependencies,
    cmd: CreateItemRequest,
) -> Result<ItemRequestView> {
    load_user(deps, cmd.requestor_id).await?;

    let request = deps
        .requests
        .insert(NewItemRequest {
            description: cmd.description,
            requestor_id: cmd.requestor_id,
            created_at: cmd.created_at,
        })
        .await
        .map_err(ApplicationError::Repository)?;

    tracing::info!(
        request_id = %request.request_id,
        requestor_id = %request.requestor_id,
        "Item request created"
    );
    Ok(ItemRequestView::new(&request, &[]))
}

/// IDでリクエストを取得する（応えたアイテム付き）
pub async fn get_request(
    deps: &ServiceDependencies,
    request_id: RequestId,
) -> Result<ItemRequestView> {
    let request = deps
        .requests
        .find_by_id(request_id)
        .await
        .map_err(ApplicationError::Repository)?
        .ok_or(ApplicationError::RequestNotFound(request_id))?;

    with_items(deps, &request).await
}

/// 自分のリクエスト一覧（新しい順）
pub async fn list_own_requests(
    deps: &ServiceDependencies,
    requestor_id: UserId,
) -> Result<Vec<ItemRequestView>> {
    load_user(deps, requestor_id).await?;

    let requests = deps
        .requests
        .find_by_requestor(requestor_id)
        .await
        .map_err(ApplicationError::Repository)?;

    with_items_all(deps, &requests).await
}

/// 全リクエスト一覧（新しい順）
pub async fn list_all_requests(deps: &ServiceDependencies) -> Result<Vec<ItemRequestView>> {
    let requests = deps
        .requests
        .find_all()
        .await
        .map_err(ApplicationError::Repository)?;

    with_items_all(deps, &requests).await
}
