pub mod aggregator;
pub mod loader;
pub mod normalize;
pub mod state;

mod error;
mod time_serde;

pub use aggregator::{DashboardSnapshot, HeaderStats, PacingMetrics, StatusIndicators};
pub use error::{Error, Result};
pub use loader::{DatasetOutcome, LoadReport};
pub use state::{DashboardState, Dataset, DatasetCell, DatasetErrors, LoadedAt, LoadingState};

use std::sync::Arc;

use tokio::sync::Mutex;

use opsdash_storage::DataSource;

/// Row caps for the capped datasets. Metrics are never capped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
	pub activities: u32,
	pub projects: u32,
}
impl Default for Limits {
	fn default() -> Self {
		Self { activities: 20, projects: 10 }
	}
}
impl From<&opsdash_config::Dashboard> for Limits {
	fn from(cfg: &opsdash_config::Dashboard) -> Self {
		Self { activities: cfg.activity_limit, projects: cfg.project_limit }
	}
}

/// Owns the cached dashboard datasets and the source they are refreshed from.
///
/// Share it as `Arc<DashboardService>`; every read view takes `&self`.
pub struct DashboardService {
	pub source: Arc<dyn DataSource>,
	pub limits: Limits,
	pub state: DashboardState,
	reload_guard: Mutex<()>,
}
impl DashboardService {
	pub fn new(source: Arc<dyn DataSource>, limits: Limits) -> Self {
		Self { source, limits, state: DashboardState::default(), reload_guard: Mutex::new(()) }
	}

	/// True while a refresh round holds the reload guard.
	pub fn refresh_in_flight(&self) -> bool {
		self.reload_guard.try_lock().is_err()
	}
}
