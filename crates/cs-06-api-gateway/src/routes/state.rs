//! Client write paths: state and analytics. Both are key-gated.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use cs_01_card_state::KeyDeriver;
use cs_02_card_catalog::DataRequest;
use cs_04_analytics::parse_events;
use shared_types::{CardInstanceKey, CardState, UrlParams};
use tracing::{debug, error, warn};

use crate::domain::{
    decode_embedded, AnalyticsRequest, ApiError, ApiResult, DataBody, StateRequest, Success,
};
use crate::routes::body::decode_body;
use crate::state::AppState;

type Ack = Json<Success<serde_json::Map<String, serde_json::Value>>>;

async fn authorize(state: &AppState, card_key: &CardInstanceKey, api_key: &str) -> ApiResult<()> {
    state.gate.validate(card_key, api_key).await.into_result().map_err(|reason| {
        state.metrics.record_auth_rejection();
        ApiError::unauthorized(reason)
    })
}

/// `POST /api/state`
pub async fn post_state(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Ack> {
    let body = body?;
    let request: StateRequest = decode_body(&headers, &body)?;
    let document = decode_embedded("state", request.state)?;
    let card_key = CardInstanceKey::from_raw(request.card_key);

    authorize(&state, &card_key, &request.api_key).await?;

    state
        .store
        .set(&card_key, CardState::new(document))
        .await
        .map_err(|e| {
            error!(card_key = %card_key, error = %e, "State write failed");
            ApiError::storage(&e)
        })?;

    state.metrics.record_state_write();
    debug!(card_key = %card_key, "State written");
    Ok(Json(Success::empty()))
}

/// `POST /api/analytics`
pub async fn post_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Ack> {
    let body = body?;
    let request: AnalyticsRequest = decode_body(&headers, &body)?;
    let items = parse_events(decode_embedded("events", request.events)?)?;
    let card_key = CardInstanceKey::from_raw(request.card_key);

    authorize(&state, &card_key, &request.api_key).await?;

    let recorded = state
        .analytics
        .record_card_events(&request.pack, &request.card, items)
        .await
        .map_err(|e| {
            warn!(pack = %request.pack, card = %request.card, error = %e, "Analytics batch failed");
            ApiError::analytics(&e)
        })?;

    state.metrics.record_analytics_events(recorded);
    Ok(Json(Success::empty()))
}

/// `GET /api/data/{pack}/{card}?params`
///
/// Public, like rendering: the returned state is persisted without a key.
pub async fn get_data(
    State(state): State<AppState>,
    Path((pack, card)): Path<(String, String)>,
    Query(params): Query<UrlParams>,
) -> ApiResult<Json<Success<DataBody>>> {
    let module = state
        .registry
        .resolve(&pack, &card)
        .ok_or_else(ApiError::card_not_found)?;

    let card_key = KeyDeriver::derive(&pack, &card, &params);
    if !module.capabilities().data {
        return Ok(Json(Success::new(DataBody {
            card_key,
            data: serde_json::Value::Null,
        })));
    }

    let prior = state.store.get(&card_key).await?;
    let response = module
        .generate(DataRequest { params, state: prior })
        .await
        .map_err(|e| {
            error!(pack = %pack, card = %card, error = %e, "Card data generation failed");
            ApiError::internal(e.to_string())
        })?;

    if let Some(next) = response.state {
        state.store.set(&card_key, next).await?;
        state.metrics.record_state_write();
    }

    Ok(Json(Success::new(DataBody {
        card_key,
        data: response.view,
    })))
}
