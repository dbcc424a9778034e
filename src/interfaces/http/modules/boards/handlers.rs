//! Board REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{BoardResponse, CreateBoardRequest};
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/boards",
    tag = "Boards",
    responses(
        (status = 200, description = "All boards", body = ApiResponse<Vec<BoardResponse>>)
    )
)]
pub async fn list_boards(State(state): State<AppState>) -> ApiResult<Vec<BoardResponse>> {
    let boards = state.boards.list().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        boards.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/boards/{board}",
    tag = "Boards",
    params(("board" = String, Path, description = "Board name")),
    responses(
        (status = 200, description = "Board", body = ApiResponse<BoardResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_board(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> ApiResult<BoardResponse> {
    let board = state.boards.get(&board).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(board.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/boards",
    tag = "Boards",
    request_body = CreateBoardRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<BoardResponse>),
        (status = 409, description = "Name taken"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_board(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoardResponse>>), ApiError> {
    let board = state
        .boards
        .create(&req.name, &req.title, &req.description)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(board.into()))))
}
