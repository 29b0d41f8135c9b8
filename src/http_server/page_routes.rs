//! Page HTTP Routes

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::model::Page;
use crate::service::{PageDraft, PageList, PageUpdate, PageView};

use crate::access::Access;

use super::response::{
    data, gated, json_body, parse_id, service_error, ApiError, ApiResult, DataResponse, TokenQuery,
};
use super::SharedJournal;

pub fn page_routes(journal: SharedJournal) -> Router {
    Router::new()
        .route(
            "/boards/:board_id/pages",
            get(list_pages_handler).post(create_page_handler),
        )
        .route(
            "/boards/:board_id/pages/:page_id",
            get(get_page_handler)
                .put(update_page_handler)
                .delete(delete_page_handler),
        )
        .with_state(journal)
}

async fn create_page_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<PageDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Page>>), ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    let draft = gated(&journal, board_id, Access::Edit, tokens.secret(), json_body(payload))?;
    let page = journal
        .pages()
        .create(board_id, tokens.secret(), draft)
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, data(page)))
}

async fn list_pages_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
) -> ApiResult<PageList> {
    let board_id = parse_id(&board_id, "board ID")?;
    let pages = journal
        .pages()
        .list(board_id, tokens.secret())
        .map_err(service_error)?;
    Ok(data(pages))
}

async fn get_page_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
) -> ApiResult<PageView> {
    let board_id = parse_id(&board_id, "board ID")?;
    let page_id = gated(
        &journal,
        board_id,
        Access::PublicRead,
        tokens.secret(),
        parse_id(&page_id, "page ID"),
    )?;
    let page = journal
        .pages()
        .get(board_id, page_id, tokens.secret())
        .map_err(service_error)?;
    Ok(data(page))
}

async fn update_page_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<PageUpdate>, JsonRejection>,
) -> ApiResult<Page> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let page_id = gated(&journal, board_id, Access::Edit, secret, parse_id(&page_id, "page ID"))?;
    let update = gated(&journal, board_id, Access::Edit, secret, json_body(payload))?;
    let page = journal
        .pages()
        .update(board_id, page_id, tokens.secret(), update)
        .map_err(service_error)?;
    Ok(data(page))
}

async fn delete_page_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
) -> Result<StatusCode, ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    let page_id = gated(
        &journal,
        board_id,
        Access::Edit,
        tokens.secret(),
        parse_id(&page_id, "page ID"),
    )?;
    journal
        .pages()
        .delete(board_id, page_id, tokens.secret())
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}
