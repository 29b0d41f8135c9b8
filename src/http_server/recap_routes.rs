//! Recap HTTP Routes

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::service::{Recap, RecapFilter};

use crate::access::Access;

use super::response::{
    data, gated, parse_id, service_error, validation_error, ApiError, ApiResult, TokenQuery,
};
use super::SharedJournal;

#[derive(Debug, Default, Deserialize)]
pub struct RecapQuery {
    /// `day`, `week` or `month`; `day` when absent
    #[serde(default)]
    pub filter: Option<String>,
    /// Reference date, `YYYY-MM-DD`; today when absent
    #[serde(default)]
    pub date: Option<String>,
}

pub fn recap_routes(journal: SharedJournal) -> Router {
    Router::new()
        .route("/boards/:board_id/recap", get(recap_handler))
        .with_state(journal)
}

async fn recap_handler(
    State(journal): State<SharedJournal>,
    Path(board_id): Path<String>,
    Query(tokens): Query<TokenQuery>,
    Query(query): Query<RecapQuery>,
) -> ApiResult<Recap> {
    let board_id = parse_id(&board_id, "board ID")?;

    let secret = tokens.secret();
    let filter = gated(
        &journal,
        board_id,
        Access::PublicRead,
        secret,
        parse_filter(query.filter.as_deref()),
    )?;
    let reference = gated(
        &journal,
        board_id,
        Access::PublicRead,
        secret,
        parse_date(query.date.as_deref()),
    )?;

    let recap = journal
        .recaps()
        .recap(board_id, secret, filter, reference)
        .map_err(service_error)?;
    Ok(data(recap))
}

fn parse_filter(raw: Option<&str>) -> Result<RecapFilter, ApiError> {
    match raw {
        None | Some("") => Ok(RecapFilter::default()),
        Some(name) => name.parse::<RecapFilter>().map_err(service_error),
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| validation_error("Invalid date format, expected YYYY-MM-DD")),
    }
}
