use serde::{Deserialize, Serialize};

use tailor_storage::models::SearchRecord;

use crate::{Result, TailorService, preferences::require_user_id};

#[derive(Clone, Debug, Deserialize)]
pub struct HistoryRequest {
	pub user_id: String,
	#[serde(default)]
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HistoryResponse {
	pub user_id: String,
	/// Newest first.
	pub items: Vec<SearchRecord>,
}

impl TailorService {
	pub async fn history(&self, req: HistoryRequest) -> Result<HistoryResponse> {
		let user_id = require_user_id(&req.user_id)?;
		let items = self.stores.history.history(user_id, req.limit).await?;

		Ok(HistoryResponse { user_id: user_id.to_string(), items })
	}
}
