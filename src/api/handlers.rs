use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::ProductRecord;
use crate::service::{ScrapeError, ScrapeOutcome, ScrapeService};

use super::models::{
    ErrorResponse, MSG_KEYWORD_REQUIRED, MSG_NOT_FOUND, MSG_SCRAPE_FAILED, ScrapeParams,
};

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ScrapeError::BadRequest => (StatusCode::BAD_REQUEST, MSG_KEYWORD_REQUIRED),
            ScrapeError::NotFound => (StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            ScrapeError::UpstreamFailure(detail) => {
                log::error!("error while scraping: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_SCRAPE_FAILED)
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub async fn scrape_handler(
    State(service): State<Arc<ScrapeService>>,
    params: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<Vec<ProductRecord>>, ScrapeError> {
    let start = Instant::now();
    let Query(params) = params.map_err(|e| {
        log::warn!("rejected scrape query: {e}");
        ScrapeError::BadRequest
    })?;
    let keyword = params.keyword().unwrap_or_default().to_string();

    let outcome = service.scrape(&keyword).await?;
    if let ScrapeOutcome::EmptyResult { candidates } = &outcome {
        log::warn!("all {candidates} results for {keyword:?} were dropped during extraction");
    }
    let records = outcome.into_records();

    log::info!(
        "scrape for {:?} returned {} records in {}ms",
        keyword.trim(),
        records.len(),
        start.elapsed().as_millis()
    );
    Ok(Json(records))
}

pub async fn health_handler() -> &'static str {
    "OK"
}
