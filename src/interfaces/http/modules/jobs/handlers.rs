//! Job post REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateJobPostRequest, JobPostResponse};
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::modules::filtersets::FilterQuery;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/boards/{board}/jobs",
    tag = "Jobs",
    params(("board" = String, Path, description = "Board name"), FilterQuery),
    responses(
        (status = 200, description = "Matching jobs, newest first", body = ApiResponse<Vec<JobPostResponse>>),
        (status = 404, description = "Unknown board")
    )
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<JobPostResponse>> {
    let listing = state
        .listings
        .index(&board, &query.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        listing.jobs.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards/{board}/jobs",
    tag = "Jobs",
    params(("board" = String, Path, description = "Board name")),
    request_body = CreateJobPostRequest,
    responses(
        (status = 201, description = "Posted", body = ApiResponse<JobPostResponse>),
        (status = 404, description = "Unknown board, type, category or domain"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Path(board): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateJobPostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobPostResponse>>), ApiError> {
    let job = state
        .jobs
        .create(&board, req.into_job_post())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(job.into()))))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{hashid}",
    tag = "Jobs",
    params(("hashid" = String, Path, description = "Public job identifier")),
    responses(
        (status = 200, description = "Job post", body = ApiResponse<JobPostResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(hashid): Path<String>,
) -> ApiResult<JobPostResponse> {
    let job = state.jobs.get(&hashid).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(job.into())))
}
