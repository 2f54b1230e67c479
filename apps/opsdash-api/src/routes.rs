use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	routing::{get, post},
};
use serde::Serialize;

use opsdash_domain::{ActivityRecord, MetricRecord, ProjectRecord};
use opsdash_service::{
	DashboardSnapshot, DatasetErrors, HeaderStats, LoadReport, LoadedAt, LoadingState,
	PacingMetrics, StatusIndicators,
};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoadingResponse {
	pub loading: LoadingState,
	pub errors: DatasetErrors,
	pub loaded_at: LoadedAt,
	pub refresh_in_flight: bool,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/dashboard", get(snapshot))
		.route("/v1/dashboard/activities", get(recent_activities))
		.route("/v1/dashboard/projects", get(active_projects))
		.route("/v1/dashboard/metrics", get(metrics))
		.route("/v1/dashboard/status", get(status_indicators))
		.route("/v1/dashboard/pacing", get(pacing_metrics))
		.route("/v1/dashboard/header", get(header_stats))
		.route("/v1/dashboard/loading", get(loading))
		.route("/v1/dashboard/refresh", post(refresh))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn snapshot(State(state): State<AppState>) -> Json<DashboardSnapshot> {
	Json(state.service.snapshot())
}

async fn recent_activities(State(state): State<AppState>) -> Json<Vec<ActivityRecord>> {
	Json(state.service.recent_activities())
}

async fn active_projects(State(state): State<AppState>) -> Json<Vec<ProjectRecord>> {
	Json(state.service.active_projects())
}

async fn metrics(State(state): State<AppState>) -> Json<Vec<MetricRecord>> {
	Json(state.service.dashboard_metrics())
}

async fn status_indicators(State(state): State<AppState>) -> Json<StatusIndicators> {
	Json(state.service.status_indicators())
}

async fn pacing_metrics(State(state): State<AppState>) -> Json<PacingMetrics> {
	Json(state.service.pacing_metrics())
}

async fn header_stats(State(state): State<AppState>) -> Json<HeaderStats> {
	Json(state.service.header_stats())
}

async fn loading(State(state): State<AppState>) -> Json<LoadingResponse> {
	Json(LoadingResponse {
		loading: state.service.loading_state(),
		errors: state.service.last_errors(),
		loaded_at: state.service.loaded_at(),
		refresh_in_flight: state.service.refresh_in_flight(),
	})
}

/// Runs a full refresh round. Dataset failures are reported in the body, never as an HTTP error.
async fn refresh(State(state): State<AppState>) -> Json<LoadReport> {
	Json(state.service.update_data().await)
}
