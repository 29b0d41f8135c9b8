//! Board HTTP Routes
//!
//! Board creation, secret-addressed lookup and board-level operations.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::access::Access;
use crate::service::{BoardDraft, BoardPatch, BoardView, CreatedBoard};

use super::response::{
    data, gated, json_body, parse_id, service_error, ApiError, ApiResult, DataResponse, TokenQuery,
};
use super::SharedJournal;

// ==================
// Board Routes
// ==================

pub fn board_routes(journal: SharedJournal) -> Router {
    Router::new()
        .route("/boards", post(create_board_handler))
        .route("/boards/edit/:token", get(open_for_edit_handler))
        .route("/boards/public/:token", get(open_public_handler))
        .route(
            "/boards/:board_id",
            get(get_board_handler)
                .put(update_board_handler)
                .delete(delete_board_handler),
        )
        .with_state(journal)
}

// ==================
// Handlers
// ==================

async fn create_board_handler(
    State(journal): State<SharedJournal>,
    payload: Result<Json<BoardDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<CreatedBoard>>), ApiError> {
    let draft = json_body(payload)?;
    let created = journal.boards().create(draft).map_err(service_error)?;
    Ok((StatusCode::CREATED, data(created)))
}

async fn open_for_edit_handler(
    State(journal): State<SharedJournal>,
    Path(token): Path<String>,
) -> ApiResult<BoardView> {
    let board = journal.boards().open_for_edit(&token).map_err(service_error)?;
    Ok(data(board))
}

async fn open_public_handler(
    State(journal): State<SharedJournal>,
    Path(token): Path<String>,
) -> ApiResult<BoardView> {
    let board = journal.boards().open_public(&token).map_err(service_error)?;
    Ok(data(board))
}

async fn get_board_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
) -> ApiResult<BoardView> {
    let board_id = parse_id(&board_id, "board ID")?;
    let board = journal
        .boards()
        .get(board_id, tokens.secret())
        .map_err(service_error)?;
    Ok(data(board))
}

async fn update_board_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<BoardPatch>, JsonRejection>,
) -> ApiResult<BoardView> {
    let board_id = parse_id(&board_id, "board ID")?;
    let patch = gated(&journal, board_id, Access::Edit, tokens.secret(), json_body(payload))?;
    let board = journal
        .boards()
        .update(board_id, tokens.secret(), patch)
        .map_err(service_error)?;
    Ok(data(board))
}

async fn delete_board_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
) -> Result<StatusCode, ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    journal
        .boards()
        .delete(board_id, tokens.secret())
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
