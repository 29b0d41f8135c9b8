//! Element HTTP Routes
//!
//! Element CRUD within a page plus the batch `z` reorder.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::access::Access;
use crate::model::{Element, ElementDraft, ElementKind, ElementPatch, Geometry};
use crate::ordering::Position;
use crate::service::ElementList;

use super::response::{
    data, gated, json_body, parse_id, service_error, validation_error, ApiError, ApiResult,
    DataResponse, TokenQuery,
};
use super::SharedJournal;

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateElementRequest {
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub rotation: f64,
    pub payload: serde_json::Value,
}

impl CreateElementRequest {
    fn into_draft(self) -> Result<ElementDraft, ApiError> {
        let kind: ElementKind = self.kind.parse().map_err(validation_error)?;
        Ok(ElementDraft {
            kind,
            geometry: Geometry {
                x: self.x,
                y: self.y,
                w: self.w,
                h: self.h,
                rotation: self.rotation,
            },
            payload: self.payload,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ZAssignment {
    pub id: Uuid,
    pub z: Position,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub elements: Vec<ZAssignment>,
}

// ==================
// Element Routes
// ==================

pub fn element_routes(journal: SharedJournal) -> Router {
    Router::new()
        .route(
            "/boards/:board_id/pages/:page_id/elements",
            get(list_elements_handler).post(create_element_handler),
        )
        .route(
            "/boards/:board_id/pages/:page_id/elements/reorder",
            put(reorder_elements_handler),
        )
        .route(
            "/boards/:board_id/pages/:page_id/elements/:element_id",
            put(update_element_handler).delete(delete_element_handler),
        )
        .with_state(journal)
}

async fn create_element_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<CreateElementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Element>>), ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let page_id = gated(&journal, board_id, Access::Edit, secret, parse_id(&page_id, "page ID"))?;
    let draft = json_body(payload).and_then(CreateElementRequest::into_draft);
    let draft = gated(&journal, board_id, Access::Edit, secret, draft)?;
    let element = journal
        .elements()
        .create(board_id, page_id, secret, draft)
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, data(element)))
}

async fn list_elements_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
) -> ApiResult<ElementList> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let page_id = gated(
        &journal,
        board_id,
        Access::PublicRead,
        secret,
        parse_id(&page_id, "page ID"),
    )?;
    let elements = journal
        .elements()
        .list(board_id, page_id, secret)
        .map_err(service_error)?;
    Ok(data(elements))
}

async fn update_element_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id, element_id)): Path<(String, String, String)>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<ElementPatch>, JsonRejection>,
) -> ApiResult<Element> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let (page_id, element_id) = gated(
        &journal,
        board_id,
        Access::Edit,
        secret,
        child_ids(&page_id, &element_id),
    )?;
    let patch = gated(&journal, board_id, Access::Edit, secret, json_body(payload))?;
    let element = journal
        .elements()
        .update(board_id, page_id, element_id, secret, patch)
        .map_err(service_error)?;
    Ok(data(element))
}

async fn delete_element_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id, element_id)): Path<(String, String, String)>,
    Query(tokens): Query<TokenQuery>,
) -> Result<StatusCode, ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let (page_id, element_id) = gated(
        &journal,
        board_id,
        Access::Edit,
        secret,
        child_ids(&page_id, &element_id),
    )?;
    journal
        .elements()
        .delete(board_id, page_id, element_id, secret)
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reorder_elements_handler(
    State(journal): State<SharedJournal>,
    Path((board_id, page_id)): Path<(String, String)>,
    Query(tokens): Query<TokenQuery>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let board_id = parse_id(&board_id, "board ID")?;
    let secret = tokens.secret();
    let page_id = gated(&journal, board_id, Access::Edit, secret, parse_id(&page_id, "page ID"))?;
    let request = gated(&journal, board_id, Access::Edit, secret, json_body(payload))?;
    let assignments: Vec<(Uuid, Position)> = request
        .elements
        .into_iter()
        .map(|assignment| (assignment.id, assignment.z))
        .collect();

    journal
        .elements()
        .reorder(board_id, page_id, secret, &assignments)
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

fn child_ids(page_id: &str, element_id: &str) -> Result<(Uuid, Uuid), ApiError> {
    Ok((parse_id(page_id, "page ID")?, parse_id(element_id, "element ID")?))
}
