//! Public listing handlers
//!
//! The board is chosen by the request host: `{board}.{server_name}` serves
//! that board, the bare server name serves the root board.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{BoardListingResponse, FiltersetPageResponse};
use crate::application::board_name_from_host;
use crate::domain::FilterCriteria;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult};
use crate::interfaces::http::modules::filtersets::FilterQuery;
use crate::interfaces::http::modules::jobs::JobPostResponse;
use crate::interfaces::http::router::AppState;

fn board_for(state: &AppState, headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    board_name_from_host(host, &state.site.server_name, &state.site.root_board)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    params(FilterQuery),
    responses(
        (status = 200, description = "Jobs of the host's board", body = ApiResponse<BoardListingResponse>),
        (status = 404, description = "No board on this host")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> ApiResult<BoardListingResponse> {
    let board = board_for(&state, &headers);
    let filters: FilterCriteria = query.into();
    let listing = state
        .listings
        .index(&board, &filters)
        .await
        .map_err(error_response)?;

    // Point at the saved filter set for these filters when one exists
    let filterset = if listing.filters.is_empty() {
        None
    } else {
        state
            .filtersets
            .lookup(&board, &listing.filters)
            .await
            .map_err(error_response)?
    };

    Ok(Json(ApiResponse::success(BoardListingResponse::new(
        listing,
        filterset.map(Into::into),
    ))))
}

#[utoipa::path(
    get,
    path = "/f/{name}",
    tag = "Public",
    params(("name" = String, Path, description = "Filter set name")),
    responses(
        (status = 200, description = "Filter set with its jobs", body = ApiResponse<FiltersetPageResponse>),
        (status = 404, description = "Unknown filter set")
    )
)]
pub async fn filterset_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> ApiResult<FiltersetPageResponse> {
    let board = board_for(&state, &headers);
    let page = state
        .listings
        .filterset_page(&board, &name)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/view/{hashid}",
    tag = "Public",
    params(("hashid" = String, Path, description = "Public job identifier")),
    responses(
        (status = 200, description = "Job post", body = ApiResponse<JobPostResponse>),
        (status = 404, description = "No such job on the host's board")
    )
)]
pub async fn view_job(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(hashid): Path<String>,
) -> ApiResult<JobPostResponse> {
    let board = board_for(&state, &headers);
    let job = state
        .jobs
        .get_on_board(&board, &hashid)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(job.into())))
}

/// Bare section paths of the old site lead back to the index with a 302
pub async fn legacy_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/")])
}

/// Paths answered by [`legacy_redirect`]
pub const LEGACY_PATHS: [&str; 6] = [
    "/type/",
    "/category/",
    "/view/",
    "/edit/",
    "/confirm/",
    "/withdraw/",
];
