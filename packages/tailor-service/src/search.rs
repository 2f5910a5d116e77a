use serde::{Deserialize, Serialize};

use tailor_providers::search::SearchHit;
use tailor_storage::models::SearchRecord;

use crate::{Error, Result, TailorService, UserContext};

#[derive(Clone, Debug, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	/// 1-based. Pages after the first continue an already personalized query and are dispatched
	/// verbatim.
	#[serde(default = "default_page")]
	pub page: u32,
	#[serde(default)]
	pub user_id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResponse {
	/// The query that was dispatched. Send it back unchanged to fetch further pages.
	pub query: String,
	pub original_query: String,
	pub personalized: bool,
	pub page: u32,
	pub total: u64,
	pub results: Vec<SearchHit>,
}

impl TailorService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let original_query = req.query.trim();

		if original_query.is_empty() {
			return Err(Error::invalid("query must be non-empty."));
		}
		if req.page == 0 {
			return Err(Error::invalid("page must be 1 or greater."));
		}

		let user = UserContext::from_user_id(req.user_id.as_deref());
		let query = if req.page == 1 {
			self.personalize(original_query, &user).await
		} else {
			original_query.to_string()
		};
		let page =
			self.providers.search.search(&self.cfg.providers.search, &query, req.page).await;

		if let Some(user_id) = user.user_id()
			&& req.page == 1
		{
			let record = SearchRecord::new(user_id, query.as_str());

			if let Err(err) = self.stores.history.append(&record).await {
				tracing::error!(user_id, error = %err, "Failed to record search.");
			}
		}

		tracing::info!(
			personalized = query != original_query,
			page = req.page,
			total = page.total,
			hits = page.hits.len(),
			"Search dispatched."
		);

		Ok(SearchResponse {
			personalized: query != original_query,
			original_query: original_query.to_string(),
			query,
			page: req.page,
			total: page.total,
			results: page.hits,
		})
	}
}

fn default_page() -> u32 {
	1
}
