use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use models::filter::ToyFilter;
use models::toy::{Toy, ToyInput};
use service::errors::ServiceError;
use service::toy_service::QueryResult;

use crate::auth::{AuthUser, ServerState};
use crate::errors::JsonApiError;

/// List toys matching the query-string filter.
pub async fn list_toys(
    State(state): State<ServerState>,
    filter: Result<Query<ToyFilter>, QueryRejection>,
) -> Result<Json<QueryResult>, JsonApiError> {
    let Query(filter) = filter?;
    Ok(Json(state.toys.query(&filter).await))
}

pub async fn get_toy(
    State(state): State<ServerState>,
    Path(toy_id): Path<String>,
) -> Result<Json<Toy>, JsonApiError> {
    state
        .toys
        .get_by_id(&toy_id)
        .await
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("toy").into())
}

/// Create a toy owned by the caller. Any `_id` in the body is ignored.
pub async fn create_toy(
    State(state): State<ServerState>,
    AuthUser(user): AuthUser,
    Json(mut input): Json<ToyInput>,
) -> Result<Json<Toy>, JsonApiError> {
    input.id = None;
    let toy = state.toys.save(input, &user).await?;
    Ok(Json(toy))
}

/// Update name, price and image of the toy at `toy_id`.
pub async fn update_toy(
    State(state): State<ServerState>,
    AuthUser(user): AuthUser,
    Path(toy_id): Path<String>,
    Json(mut input): Json<ToyInput>,
) -> Result<Json<Toy>, JsonApiError> {
    input.id = Some(toy_id);
    let toy = state.toys.save(input, &user).await?;
    Ok(Json(toy))
}

pub async fn remove_toy(
    State(state): State<ServerState>,
    AuthUser(user): AuthUser,
    Path(toy_id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.toys.remove(&toy_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
