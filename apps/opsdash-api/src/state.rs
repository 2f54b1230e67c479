use std::sync::Arc;

use opsdash_service::{DashboardService, Limits};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DashboardService>,
}
impl AppState {
	pub async fn new(config: &opsdash_config::Config) -> color_eyre::Result<Self> {
		let source = opsdash_storage::connect(&config.source).await?;
		let service = DashboardService::new(source, Limits::from(&config.dashboard));

		Ok(Self { service: Arc::new(service) })
	}

	pub fn from_service(service: Arc<DashboardService>) -> Self {
		Self { service }
	}
}
