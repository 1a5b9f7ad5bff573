//! Catalog reads: count, filtered pages, single card.

use axum::extract::{Query, State};
use axum::Json;
use cs_02_card_catalog::{paginate, parse_page, CardPage};
use shared_types::CardDescriptor;

use crate::domain::{ApiError, ApiResult, CardBody, CardQuery, CardsQuery, CountBody, Success};
use crate::state::AppState;

/// `GET /api/count`
pub async fn count(State(state): State<AppState>) -> Json<Success<CountBody>> {
    Json(Success::new(CountBody {
        count: state.catalog.count(),
    }))
}

/// `GET /api/cards?q=&page=`
pub async fn cards(
    State(state): State<AppState>,
    Query(query): Query<CardsQuery>,
) -> Json<Success<CardPage<CardDescriptor>>> {
    let matches = state.catalog.cards(&query.q);
    let page = parse_page(query.page.as_deref());
    Json(Success::new(paginate(matches, page)))
}

/// `GET /api/card?pack=&card=`
pub async fn card(
    State(state): State<AppState>,
    Query(query): Query<CardQuery>,
) -> ApiResult<Json<Success<CardBody>>> {
    let card = state
        .catalog
        .find(&query.pack, &query.card)
        .cloned()
        .ok_or_else(ApiError::card_not_found)?;
    Ok(Json(Success::new(CardBody { card })))
}
