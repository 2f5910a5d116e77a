use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use tailor_service::{
	Error, HistoryRequest, HistoryResponse, PreferencesResponse, SearchRequest, SearchResponse,
	SetPreferencesRequest,
};

/// Identifies the caller. Requests without it are anonymous.
pub const USER_ID_HEADER: &str = "x-tailor-user-id";

#[derive(Debug, Deserialize)]
pub struct SearchBody {
	pub query: String,
	#[serde(default)]
	pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
	#[serde(default)]
	pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesBody {
	pub preferences: String,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/history", get(history))
		.route(
			"/v1/preferences",
			get(get_preferences).put(set_preferences).delete(clear_preferences),
		)
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
	let req = SearchRequest {
		query: payload.query,
		page: payload.page.unwrap_or(1),
		user_id: caller(&headers)?,
	};
	let response = state.service.search(req).await?;

	Ok(Json(response))
}

async fn history(
	State(state): State<AppState>,
	headers: HeaderMap,
	Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
	let user_id = required_caller(&headers)?;
	let response = state.service.history(HistoryRequest { user_id, limit: query.limit }).await?;

	Ok(Json(response))
}

async fn get_preferences(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<PreferencesResponse>, ApiError> {
	let user_id = required_caller(&headers)?;
	let response = state.service.get_preferences(&user_id).await?;

	Ok(Json(response))
}

async fn set_preferences(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<PreferencesBody>,
) -> Result<Json<PreferencesResponse>, ApiError> {
	let user_id = required_caller(&headers)?;
	let response = state
		.service
		.set_preferences(SetPreferencesRequest { user_id, preferences: payload.preferences })
		.await?;

	Ok(Json(response))
}

async fn clear_preferences(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<PreferencesResponse>, ApiError> {
	let user_id = required_caller(&headers)?;
	let response = state.service.clear_preferences(&user_id).await?;

	Ok(Json(response))
}

/// Blank or absent ids are anonymous.
fn caller(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
	let Some(value) = headers.get(USER_ID_HEADER) else { return Ok(None) };
	let value = value.to_str().map_err(|_| {
		json_error(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			format!("{USER_ID_HEADER} must be visible ASCII."),
			Some(vec![USER_ID_HEADER.to_string()]),
		)
	})?;
	let value = value.trim();

	Ok((!value.is_empty()).then(|| value.to_string()))
}

fn required_caller(headers: &HeaderMap) -> Result<String, ApiError> {
	caller(headers)?.ok_or_else(|| {
		json_error(
			StatusCode::UNAUTHORIZED,
			"missing_user",
			format!("{USER_ID_HEADER} is required."),
			Some(vec![USER_ID_HEADER.to_string()]),
		)
	})
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage request failed.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Storage is unavailable.",
					None,
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
