use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub personalization: Personalization,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub completion: LlmProviderConfig,
	pub search: SearchProviderConfig,
}

/// OpenAI-compatible chat completion endpoint used to rewrite queries.
#[derive(Clone, Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub max_output_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// SerpApi-compatible web search endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub engine: String,
	pub results_per_page: u32,
	pub language: String,
	pub country: String,
	pub domain: String,
	pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Personalization {
	pub enabled: bool,
	/// Rewrites whose edit similarity to the original query is above this value are discarded.
	pub similarity_threshold: f64,
	/// Leading labels removed from model output, matched case-insensitively.
	pub strip_labels: Vec<String>,
	/// Preference term -> words that make the term relevant to a query.
	pub contextual_map: BTreeMap<String, Vec<String>>,
}
impl Default for Personalization {
	fn default() -> Self {
		Self {
			enabled: true,
			similarity_threshold: 0.9,
			strip_labels: default_strip_labels(),
			contextual_map: default_contextual_map(),
		}
	}
}

fn default_strip_labels() -> Vec<String> {
	["output:", "modified query:", "result:"].into_iter().map(str::to_string).collect()
}

fn default_contextual_map() -> BTreeMap<String, Vec<String>> {
	let table: [(&str, &[&str]); 5] = [
		("gaming", &["headset", "mouse", "monitor", "controller", "games"]),
		("music", &["headphones", "speakers", "playlist"]),
		("coding", &["keyboard", "programming", "tools", "laptops"]),
		("sports", &["basketball", "football", "shoes"]),
		("english teacher", &["teaching", "curriculum", "lesson", "resources"]),
	];

	table
		.into_iter()
		.map(|(term, triggers)| {
			(term.to_string(), triggers.iter().map(|word| word.to_string()).collect())
		})
		.collect()
}
