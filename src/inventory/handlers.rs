use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{auth::services::AuthUser, error::internal, expiry, state::AppState};

use super::dto::{
    AddItemsRequest, AddItemsResponse, ClearedResponse, DeleteItemRequest, InventoryResponse,
    StatsResponse,
};
use super::services::{self, AlertGroup, ClassifiedItem, ItemDraft, ListQuery};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/stats", get(get_stats))
        .route("/items/alerts", get(get_alerts))
        .route("/items/near-expiry", get(get_near_expiry))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/items", axum::routing::post(add_items).delete(delete_item))
        .route("/items/all", delete(clear_items))
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<InventoryResponse>, (StatusCode, String)> {
    let items = state.items.list(user_id).await.map_err(internal)?;
    let total = items.len();
    let rows = services::list_items(items, &q, expiry::today());
    Ok(Json(InventoryResponse {
        total,
        shown: rows.len(),
        items: rows,
    }))
}

#[instrument(skip(state, body))]
pub async fn add_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddItemsRequest>,
) -> Result<(StatusCode, Json<AddItemsResponse>), (StatusCode, String)> {
    if body.items.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "items must be non-empty".into()));
    }
    let drafts = body
        .items
        .into_iter()
        .map(|i| ItemDraft {
            name: i.name,
            expiry_date: i.expiry_date,
            added_date: i.added_date,
            category: i.category,
        })
        .collect();

    let outcome = services::add_items(state.items.as_ref(), user_id, drafts, expiry::today())
        .await
        .map_err(internal)?;

    let status = if outcome.added > 0 {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(AddItemsResponse {
            added: outcome.added,
            skipped: outcome.skipped,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<DeleteItemRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = state
        .items
        .remove(user_id, &body.name, body.expiry_date)
        .await
        .map_err(internal)?;
    if !removed {
        warn!(%user_id, name = %body.name, "delete: no such item");
        return Err((StatusCode::NOT_FOUND, "Item not found".into()));
    }
    info!(%user_id, name = %body.name, expiry = %body.expiry_date, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn clear_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ClearedResponse>, (StatusCode, String)> {
    let removed = state.items.clear(user_id).await.map_err(internal)?;
    info!(%user_id, removed, "inventory cleared");
    Ok(Json(ClearedResponse { removed }))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let items = state.items.list(user_id).await.map_err(internal)?;
    Ok(Json(StatsResponse {
        stats: services::statistics(&items, expiry::today()),
    }))
}

#[instrument(skip(state))]
pub async fn get_alerts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<AlertGroup>>, (StatusCode, String)> {
    let items = state.items.list(user_id).await.map_err(internal)?;
    Ok(Json(services::alerts(&items, expiry::today())))
}

#[instrument(skip(state))]
pub async fn get_near_expiry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ClassifiedItem>>, (StatusCode, String)> {
    let items = state.items.list(user_id).await.map_err(internal)?;
    Ok(Json(services::near_expiry(items, expiry::today())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::dto::NewItem;
    use crate::inventory::repo_types::Category;
    use time::Duration;
    use uuid::Uuid;

    fn new_item(name: &str, days: i64) -> NewItem {
        NewItem {
            name: name.into(),
            expiry_date: expiry::today() + Duration::days(days),
            added_date: None,
            category: Category::Other,
        }
    }

    #[tokio::test]
    async fn add_list_delete_clear() {
        let state = AppState::fake();
        let user = Uuid::new_v4();

        let (status, Json(added)) = add_items(
            State(state.clone()),
            AuthUser(user),
            Json(AddItemsRequest {
                items: vec![
                    new_item("Milk", 2),
                    new_item("milk", 2),
                    new_item("Bread", 9),
                ],
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(added.added, 2);
        assert_eq!(added.skipped.len(), 1);

        let Json(listed) = list_items(
            State(state.clone()),
            AuthUser(user),
            Query(ListQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(listed.total, 2);
        assert_eq!(listed.items[0].item.name, "Bread");

        let Json(near) = get_near_expiry(State(state.clone()), AuthUser(user))
            .await
            .unwrap();
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].item.name, "Milk");

        let status = delete_item(
            State(state.clone()),
            AuthUser(user),
            Json(DeleteItemRequest {
                name: "MILK".into(),
                expiry_date: expiry::today() + Duration::days(2),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = delete_item(
            State(state.clone()),
            AuthUser(user),
            Json(DeleteItemRequest {
                name: "Milk".into(),
                expiry_date: expiry::today() + Duration::days(2),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        let Json(cleared) = clear_items(State(state.clone()), AuthUser(user))
            .await
            .unwrap();
        assert_eq!(cleared.removed, 1);

        let Json(stats) = get_stats(State(state), AuthUser(user)).await.unwrap();
        assert_eq!(stats.stats.total_items, 0);
    }

    #[tokio::test]
    async fn empty_batch_is_bad_request() {
        let state = AppState::fake();
        let err = add_items(
            State(state),
            AuthUser(Uuid::new_v4()),
            Json(AddItemsRequest { items: vec![] }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn new_item_defaults_category_and_added_date() {
        let body = r#"{"name":"Kale","expiry_date":"2024-06-01"}"#;
        let item: NewItem = serde_json::from_str(body).unwrap();
        assert_eq!(item.category, Category::Other);
        assert!(item.added_date.is_none());
        assert_eq!(item.expiry_date, time::macros::date!(2024 - 06 - 01));
    }
}
