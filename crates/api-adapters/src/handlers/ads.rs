//! Handlers for `/api/v1/ads`.
//!
//! Mutating routes decode the body, then the path, then check the token
//! against the body's `user_id` before calling the service.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use super::AppState;
use crate::auth::authorize;
use crate::dto::{
    AdResponse, ChangeAdStatusRequest, CreateAdRequest, DataResponse, DeleteRequest, ListAdsQuery,
    UpdateAdRequest, DELETE_SUCCESS,
};
use crate::error::ApiError;

type AdResult = Result<Json<DataResponse<AdResponse>>, ApiError>;

pub async fn create_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateAdRequest>, JsonRejection>,
) -> AdResult {
    let Json(req) = body?;
    authorize(&state, &headers, req.user_id)?;

    let ad = state
        .service
        .create_ad(&req.title, &req.text, req.user_id)
        .await?;
    Ok(Json(DataResponse::new(ad.into())))
}

pub async fn get_ad(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AdResult {
    let Path(id) = path?;
    let ad = state.service.get_ad(id).await?;
    Ok(Json(DataResponse::new(ad.into())))
}

pub async fn list_ads(
    State(state): State<AppState>,
    query: Result<Query<ListAdsQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<AdResponse>>>, ApiError> {
    let Query(query) = query?;
    let ads = match query.into_filter().map_err(ApiError::BadRequest)? {
        Some(filter) => state.service.list_ads(&filter).await?,
        None => state.service.list_published_ads().await?,
    };
    Ok(Json(DataResponse::new(ads.into_iter().map(AdResponse::from).collect())))
}

pub async fn update_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateAdRequest>, JsonRejection>,
) -> AdResult {
    let Json(req) = body?;
    let Path(id) = path?;
    authorize(&state, &headers, req.user_id)?;

    let ad = state
        .service
        .update_ad(id, req.user_id, &req.title, &req.text)
        .await?;
    Ok(Json(DataResponse::new(ad.into())))
}

pub async fn change_ad_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ChangeAdStatusRequest>, JsonRejection>,
) -> AdResult {
    let Json(req) = body?;
    let Path(id) = path?;
    authorize(&state, &headers, req.user_id)?;

    let ad = state
        .service
        .change_ad_status(id, req.user_id, req.published)
        .await?;
    Ok(Json(DataResponse::new(ad.into())))
}

pub async fn delete_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    let Json(req) = body?;
    let Path(id) = path?;
    authorize(&state, &headers, req.user_id)?;

    state.service.delete_ad(id, req.user_id).await?;
    Ok(Json(DataResponse::new(DELETE_SUCCESS)))
}
