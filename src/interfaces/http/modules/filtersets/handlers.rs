//! Filter set REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{FilterCriteriaDto, FiltersetRequest, FiltersetResponse};
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, EmptyData, ValidatedJson,
};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/boards/{board}/filtersets",
    tag = "Filter sets",
    params(("board" = String, Path, description = "Board name")),
    responses(
        (status = 200, description = "Filter sets of the board", body = ApiResponse<Vec<FiltersetResponse>>),
        (status = 404, description = "Unknown board")
    )
)]
pub async fn list_filtersets(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> ApiResult<Vec<FiltersetResponse>> {
    let filtersets = state.filtersets.list(&board).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        filtersets.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards/{board}/filtersets",
    tag = "Filter sets",
    params(("board" = String, Path, description = "Board name")),
    request_body = FiltersetRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<FiltersetResponse>),
        (status = 404, description = "Unknown board, type, category or domain"),
        (status = 409, description = "Name taken or criteria already saved"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_filterset(
    State(state): State<AppState>,
    Path(board): Path<String>,
    ValidatedJson(req): ValidatedJson<FiltersetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FiltersetResponse>>), ApiError> {
    let fs = state
        .filtersets
        .create(&board, req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(fs.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/boards/{board}/filtersets/{name}",
    tag = "Filter sets",
    params(
        ("board" = String, Path, description = "Board name"),
        ("name" = String, Path, description = "Filter set name")
    ),
    responses(
        (status = 200, description = "Filter set", body = ApiResponse<FiltersetResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_filterset(
    State(state): State<AppState>,
    Path((board, name)): Path<(String, String)>,
) -> ApiResult<FiltersetResponse> {
    let fs = state
        .filtersets
        .get(&board, &name)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(fs.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/boards/{board}/filtersets/{name}",
    tag = "Filter sets",
    params(
        ("board" = String, Path, description = "Board name"),
        ("name" = String, Path, description = "Filter set name")
    ),
    request_body = FiltersetRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<FiltersetResponse>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name taken or criteria already saved"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn update_filterset(
    State(state): State<AppState>,
    Path((board, name)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<FiltersetRequest>,
) -> ApiResult<FiltersetResponse> {
    let fs = state
        .filtersets
        .update(&board, &name, req.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(fs.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/boards/{board}/filtersets/{name}",
    tag = "Filter sets",
    params(
        ("board" = String, Path, description = "Board name"),
        ("name" = String, Path, description = "Filter set name")
    ),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_filterset(
    State(state): State<AppState>,
    Path((board, name)): Path<(String, String)>,
) -> ApiResult<EmptyData> {
    state
        .filtersets
        .delete(&board, &name)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

/// Find the filter set saved with exactly these criteria
#[utoipa::path(
    post,
    path = "/api/v1/boards/{board}/filtersets/lookup",
    tag = "Filter sets",
    params(("board" = String, Path, description = "Board name")),
    request_body = FilterCriteriaDto,
    responses(
        (status = 200, description = "Matching filter set", body = ApiResponse<FiltersetResponse>),
        (status = 404, description = "No filter set has these criteria")
    )
)]
pub async fn lookup_filterset(
    State(state): State<AppState>,
    Path(board): Path<String>,
    ValidatedJson(filters): ValidatedJson<FilterCriteriaDto>,
) -> ApiResult<FiltersetResponse> {
    match state
        .filtersets
        .lookup(&board, &filters.into())
        .await
        .map_err(error_response)?
    {
        Some(fs) => Ok(Json(ApiResponse::success(fs.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No filter set matches these criteria")),
        )),
    }
}
