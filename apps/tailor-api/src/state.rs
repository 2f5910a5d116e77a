use std::sync::Arc;

use tailor_service::TailorService;
use tailor_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TailorService>,
}
impl AppState {
	pub async fn new(config: tailor_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = TailorService::new(config, db);

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: TailorService) -> Self {
		Self { service: Arc::new(service) }
	}
}
