//! Handlers for `/api/v1/users`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use super::AppState;
use crate::auth::authorize;
use crate::dto::{
    CreateUserRequest, DataResponse, DeleteRequest, LoginRequest, LoginResponse, UpdateUserRequest,
    UserResponse, DELETE_SUCCESS,
};
use crate::error::ApiError;

type UserResult = Result<Json<DataResponse<UserResponse>>, ApiError>;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> UserResult {
    let Json(req) = body?;
    let user = state.service.create_user(req.into()).await?;
    Ok(Json(DataResponse::new(user.into())))
}

pub async fn login_user(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = body?;
    let token = state
        .service
        .login_user(&req.nickname, &req.password)
        .await?;
    Ok(Json(LoginResponse { token, error: None }))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> UserResult {
    let Path(id) = path?;
    let user = state.service.get_user(id).await?;
    Ok(Json(DataResponse::new(user.into())))
}

/// The token must belong to the user named in the path.
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> UserResult {
    let Json(req) = body?;
    let Path(id) = path?;
    authorize(&state, &headers, id)?;

    let user = state.service.update_user(id, req.into()).await?;
    Ok(Json(DataResponse::new(user.into())))
}

pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    let Json(req) = body?;
    let Path(id) = path?;
    authorize(&state, &headers, req.user_id)?;

    state.service.delete_user(id, req.user_id).await?;
    Ok(Json(DataResponse::new(DELETE_SUCCESS)))
}
