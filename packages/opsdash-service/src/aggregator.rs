use serde::Serialize;

use opsdash_domain::{ActivityRecord, CanonicalStatus, MetricRecord, ProjectRecord, get_metric};

use crate::{DashboardService, DatasetErrors, LoadedAt, LoadingState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusIndicators {
	pub on_track: usize,
	pub needs_attention: usize,
	pub at_risk: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PacingMetrics {
	pub units_completed: i64,
	pub units_completed_change: i64,
	pub scheduled_today: i64,
	pub scheduled_today_change: i64,
	pub completion_rate: f64,
	pub completion_rate_change: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HeaderStats {
	pub total_projects: usize,
	pub active_projects: usize,
	pub completed_today: usize,
	pub alerts: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
	pub recent_activities: Vec<ActivityRecord>,
	pub active_projects: Vec<ProjectRecord>,
	pub metrics: Vec<MetricRecord>,
	pub status_indicators: StatusIndicators,
	pub pacing_metrics: PacingMetrics,
	pub header_stats: HeaderStats,
	pub loading: LoadingState,
	pub errors: DatasetErrors,
}

impl DashboardService {
	pub fn recent_activities(&self) -> Vec<ActivityRecord> {
		self.state.activities.items()
	}

	pub fn active_projects(&self) -> Vec<ProjectRecord> {
		self.state.projects.items()
	}

	pub fn dashboard_metrics(&self) -> Vec<MetricRecord> {
		self.state.metrics.items()
	}

	/// Project counts for the three indicator buckets. Zero while projects are loading.
	pub fn status_indicators(&self) -> StatusIndicators {
		if self.state.projects.is_loading() {
			return StatusIndicators::default();
		}

		self.state.projects.with_items(|projects| {
			let mut indicators = StatusIndicators::default();

			for project in projects {
				match project.status {
					CanonicalStatus::OnTrack => indicators.on_track += 1,
					CanonicalStatus::NeedsAttention => indicators.needs_attention += 1,
					CanonicalStatus::AtRisk => indicators.at_risk += 1,
					CanonicalStatus::InProgress | CanonicalStatus::Completed => {},
				}
			}

			indicators
		})
	}

	/// Zero while metrics are loading. Values and changes are truncated toward zero, except the
	/// completion rate value which keeps its fraction.
	pub fn pacing_metrics(&self) -> PacingMetrics {
		if self.state.metrics.is_loading() {
			return PacingMetrics::default();
		}

		self.state.metrics.with_items(|metrics| {
			let units_completed = get_metric(metrics, "units_completed");
			let scheduled_today = get_metric(metrics, "scheduled_today");
			let completion_rate = get_metric(metrics, "completion_rate");

			PacingMetrics {
				units_completed: units_completed.value as i64,
				units_completed_change: units_completed.change as i64,
				scheduled_today: scheduled_today.value as i64,
				scheduled_today_change: scheduled_today.change as i64,
				completion_rate: completion_rate.value,
				completion_rate_change: completion_rate.change as i64,
			}
		})
	}

	/// Computed from whatever lists are cached, regardless of loading flags.
	pub fn header_stats(&self) -> HeaderStats {
		let (total_projects, active_projects, alerts) = self.state.projects.with_items(|projects| {
			let count = |status: CanonicalStatus| {
				projects.iter().filter(|project| project.status == status).count()
			};

			(projects.len(), count(CanonicalStatus::InProgress), count(CanonicalStatus::AtRisk))
		});
		let completed_today = self.state.activities.with_items(|activities| {
			activities
				.iter()
				.filter(|activity| activity.status == CanonicalStatus::Completed)
				.count()
		});

		HeaderStats { total_projects, active_projects, completed_today, alerts }
	}

	pub fn loading_state(&self) -> LoadingState {
		LoadingState {
			activities: self.state.activities.is_loading(),
			projects: self.state.projects.is_loading(),
			metrics: self.state.metrics.is_loading(),
		}
	}

	pub fn last_errors(&self) -> DatasetErrors {
		DatasetErrors {
			activities: self.state.activities.last_error(),
			projects: self.state.projects.last_error(),
			metrics: self.state.metrics.last_error(),
		}
	}

	pub fn loaded_at(&self) -> LoadedAt {
		LoadedAt {
			activities: self.state.activities.loaded_at(),
			projects: self.state.projects.loaded_at(),
			metrics: self.state.metrics.loaded_at(),
		}
	}

	pub fn snapshot(&self) -> DashboardSnapshot {
		DashboardSnapshot {
			recent_activities: self.recent_activities(),
			active_projects: self.active_projects(),
			metrics: self.dashboard_metrics(),
			status_indicators: self.status_indicators(),
			pacing_metrics: self.pacing_metrics(),
			header_stats: self.header_stats(),
			loading: self.loading_state(),
			errors: self.last_errors(),
		}
	}
}
