use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use opsdash_domain::{ActivityRecord, MetricRecord, ProjectRecord};
use opsdash_storage::{
	Query,
	models::{
		DASHBOARD_METRICS_VIEW, DEALS_TABLE, RECENT_ACTIVITY_TABLE, RawActivity, RawDeal,
		RawMetric,
	},
};

use crate::{DashboardService, Error, Result, normalize, state::DatasetCell};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetOutcome {
	Loaded { rows: usize },
	Failed { error: String },
}
impl DatasetOutcome {
	pub fn is_loaded(&self) -> bool {
		matches!(self, Self::Loaded { .. })
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadReport {
	pub activities: DatasetOutcome,
	pub projects: DatasetOutcome,
	pub metrics: DatasetOutcome,
}
impl LoadReport {
	pub fn all_loaded(&self) -> bool {
		self.activities.is_loaded() && self.projects.is_loaded() && self.metrics.is_loaded()
	}
}

impl DashboardService {
	/// Refreshes all three datasets concurrently and returns once every fetch has resolved.
	///
	/// Rounds are serialized: a call made while another round is outstanding waits for it and
	/// then fetches afresh, so an older round never overwrites a newer one.
	pub async fn load_all_data(&self) -> LoadReport {
		self.load_all_data_at(OffsetDateTime::now_utc()).await
	}

	pub async fn load_all_data_at(&self, now: OffsetDateTime) -> LoadReport {
		let _guard = self.reload_guard.lock().await;
		let (activities, projects, metrics) = tokio::join!(
			self.refresh_recent_activities(now),
			self.refresh_active_projects(now),
			self.refresh_dashboard_metrics(now),
		);
		let report = LoadReport { activities, projects, metrics };

		if report.all_loaded() {
			tracing::info!("Dashboard data refreshed.");
		} else {
			tracing::warn!(?report, "Dashboard data refreshed with failures.");
		}

		report
	}

	/// Trigger for periodic refresh.
	pub async fn update_data(&self) -> LoadReport {
		self.load_all_data().await
	}

	pub async fn load_recent_activities(&self, now: OffsetDateTime) -> DatasetOutcome {
		let _guard = self.reload_guard.lock().await;

		self.refresh_recent_activities(now).await
	}

	pub async fn load_active_projects(&self, now: OffsetDateTime) -> DatasetOutcome {
		let _guard = self.reload_guard.lock().await;

		self.refresh_active_projects(now).await
	}

	pub async fn load_dashboard_metrics(&self, now: OffsetDateTime) -> DatasetOutcome {
		let _guard = self.reload_guard.lock().await;

		self.refresh_dashboard_metrics(now).await
	}

	pub async fn fetch_recent_activities(
		&self,
		now: OffsetDateTime,
	) -> Result<Vec<ActivityRecord>> {
		let limit = self.limits.activities;
		let query =
			Query::table(RECENT_ACTIVITY_TABLE).order_by("activity_time", true).limit(limit);
		let rows = self.fetch_rows(&query).await?;

		rows.into_iter()
			.take(limit as usize)
			.map(|row| {
				normalize::decode::<RawActivity>(RECENT_ACTIVITY_TABLE, row)
					.map(|raw| normalize::activity(raw, now))
			})
			.collect()
	}

	pub async fn fetch_active_projects(&self, now: OffsetDateTime) -> Result<Vec<ProjectRecord>> {
		let limit = self.limits.projects;
		let query = Query::table(DEALS_TABLE)
			.neq("project_status", "completed")
			.order_by("start_date", true)
			.limit(limit);
		let rows = self.fetch_rows(&query).await?;

		rows.into_iter()
			.take(limit as usize)
			.map(|row| {
				normalize::decode::<RawDeal>(DEALS_TABLE, row).map(|raw| normalize::project(raw, now))
			})
			.collect()
	}

	pub async fn fetch_dashboard_metrics(&self) -> Result<Vec<MetricRecord>> {
		let query = Query::table(DASHBOARD_METRICS_VIEW).order_by("metric_name", false);
		let rows = self.fetch_rows(&query).await?;

		rows.into_iter()
			.map(|row| {
				normalize::decode::<RawMetric>(DASHBOARD_METRICS_VIEW, row).map(normalize::metric)
			})
			.collect()
	}

	async fn fetch_rows(&self, query: &Query) -> Result<Vec<Value>> {
		self.source.query(query).await.map_err(|err| Error::query(&query.table, err))
	}

	async fn refresh_recent_activities(&self, now: OffsetDateTime) -> DatasetOutcome {
		refresh(
			&self.state.activities,
			RECENT_ACTIVITY_TABLE,
			self.fetch_recent_activities(now),
			now,
		)
		.await
	}

	async fn refresh_active_projects(&self, now: OffsetDateTime) -> DatasetOutcome {
		refresh(&self.state.projects, DEALS_TABLE, self.fetch_active_projects(now), now).await
	}

	async fn refresh_dashboard_metrics(&self, now: OffsetDateTime) -> DatasetOutcome {
		refresh(&self.state.metrics, DASHBOARD_METRICS_VIEW, self.fetch_dashboard_metrics(), now)
			.await
	}
}

/// Marks `dataset` loading, awaits `fetch`, and either swaps in the new rows or keeps the old
/// ones and records the error. The error never leaves this function. If this future is dropped
/// mid-fetch the loading flag is cleared and the previous rows stay.
async fn refresh<T, F>(
	dataset: &DatasetCell<T>,
	table: &str,
	fetch: F,
	now: OffsetDateTime,
) -> DatasetOutcome
where
	F: Future<Output = Result<Vec<T>>>,
{
	let pending = dataset.begin();

	match fetch.await {
		Ok(items) => {
			let rows = items.len();

			pending.replace(items, now);

			tracing::debug!(table, rows, "Dataset refreshed.");

			DatasetOutcome::Loaded { rows }
		},
		Err(err) => {
			tracing::error!(table, error = %err, "Dataset refresh failed; keeping previous rows.");

			pending.fail(err.to_string());

			DatasetOutcome::Failed { error: err.to_string() }
		},
	}
}
