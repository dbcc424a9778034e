//! Taxonomy REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateTaxonomyItemRequest, TaxonomyItemResponse};
use crate::domain::TaxonomyKind;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::router::AppState;

fn parse_kind(kind: &str) -> Result<TaxonomyKind, ApiError> {
    TaxonomyKind::from_str(kind).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Unknown taxonomy '{}': expected job-types, job-categories, tags or domains",
                kind
            ))),
        )
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/taxonomy/{kind}",
    tag = "Taxonomy",
    params(("kind" = String, Path, description = "job-types, job-categories, tags or domains")),
    responses(
        (status = 200, description = "Items of this kind", body = ApiResponse<Vec<TaxonomyItemResponse>>),
        (status = 404, description = "Unknown kind")
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Vec<TaxonomyItemResponse>> {
    let kind = parse_kind(&kind)?;
    let items = state.taxonomy.list(kind).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        items.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/taxonomy/{kind}",
    tag = "Taxonomy",
    params(("kind" = String, Path, description = "job-types, job-categories, tags or domains")),
    request_body = CreateTaxonomyItemRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<TaxonomyItemResponse>),
        (status = 404, description = "Unknown kind"),
        (status = 409, description = "Name taken"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateTaxonomyItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TaxonomyItemResponse>>), ApiError> {
    let kind = parse_kind(&kind)?;
    let item = state
        .taxonomy
        .create(kind, &req.title)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item.into()))))
}
