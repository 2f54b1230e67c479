use std::{sync::Arc, time::Duration};

use tokio::{
	task::JoinHandle,
	time::{self, MissedTickBehavior},
};

use opsdash_service::DashboardService;

/// Refreshes the dashboard immediately and then once per `interval`.
///
/// A slow round delays the next tick instead of queueing a burst behind it.
pub fn spawn(service: Arc<DashboardService>, interval: Duration) -> JoinHandle<()> {
	tokio::spawn(async move {
		let mut ticker = time::interval(interval);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		loop {
			ticker.tick().await;

			let report = service.update_data().await;

			if !report.all_loaded() {
				tracing::warn!(?report, "Scheduled dashboard refresh left stale datasets.");
			}
		}
	})
}
