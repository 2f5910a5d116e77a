use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tailor_config::SearchProviderConfig;

use crate::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
	pub title: String,
	pub url: String,
	pub snippet: String,
}

/// One page of provider results. `total` is the provider's estimate across all pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
	pub hits: Vec<SearchHit>,
	pub total: u64,
}
impl SearchPage {
	pub fn empty() -> Self {
		Self::default()
	}
}

/// Fetches one page of web results. `page` is 1-based.
pub async fn search(cfg: &SearchProviderConfig, query: &str, page: u32) -> Result<SearchPage> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client.get(&url).query(&query_params(cfg, query, page)).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	if let Some(message) = json.get("error").and_then(Value::as_str) {
		return Err(Error::InvalidResponse {
			provider_id: cfg.provider_id.clone(),
			message: message.to_string(),
		});
	}

	Ok(parse_search_page(&json))
}

pub fn query_params(
	cfg: &SearchProviderConfig,
	query: &str,
	page: u32,
) -> Vec<(&'static str, String)> {
	let per_page = cfg.results_per_page;
	let start = page.saturating_sub(1).saturating_mul(per_page);

	vec![
		("q", query.to_string()),
		("api_key", cfg.api_key.clone()),
		("engine", cfg.engine.clone()),
		("start", start.to_string()),
		("num", per_page.to_string()),
		("hl", cfg.language.clone()),
		("gl", cfg.country.clone()),
		("google_domain", cfg.domain.clone()),
	]
}

/// Maps `organic_results` to hits. A `total_results` that is not an integer counts as zero.
pub fn parse_search_page(json: &Value) -> SearchPage {
	let field = |item: &Value, key: &str| {
		item.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
	};
	let hits = json
		.get("organic_results")
		.and_then(Value::as_array)
		.map(|items| {
			items
				.iter()
				.map(|item| SearchHit {
					title: field(item, "title"),
					url: field(item, "link"),
					snippet: field(item, "snippet"),
				})
				.collect()
		})
		.unwrap_or_default();
	let total = json
		.get("search_information")
		.and_then(|info| info.get("total_results"))
		.and_then(Value::as_u64)
		.unwrap_or(0);

	SearchPage { hits, total }
}
