pub mod history;
pub mod personalize;
pub mod preferences;
pub mod rewrite;
pub mod search;

mod error;
mod store;

pub use error::{Error, Result};
pub use history::{HistoryRequest, HistoryResponse};
pub use personalize::UserContext;
pub use preferences::{PreferencesResponse, SetPreferencesRequest};
pub use rewrite::RewriteOutcome;
pub use search::{SearchRequest, SearchResponse};
pub use store::PgStore;

use std::{future::Future, pin::Pin, sync::Arc};

use tailor_config::{Config, LlmProviderConfig, SearchProviderConfig};
use tailor_domain::{preferences::PreferenceSet, relevance::ContextualMap, rewrite::RewritePrompt};
use tailor_providers::{
	completion,
	search::{self as web, SearchPage},
};
use tailor_storage::{db::Db, models::SearchRecord};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Text completion service used by the query rewriter.
pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a RewritePrompt,
	) -> BoxFuture<'a, tailor_providers::Result<String>>;
}

/// Web search dispatch. Implementations fail closed and return an empty page on any error.
pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a SearchProviderConfig,
		query: &'a str,
		page: u32,
	) -> BoxFuture<'a, SearchPage>;
}

pub trait HistoryStore
where
	Self: Send + Sync,
{
	/// Newest first.
	fn history<'a>(
		&'a self,
		user_id: &'a str,
		limit: Option<u32>,
	) -> BoxFuture<'a, Result<Vec<SearchRecord>>>;

	fn append<'a>(&'a self, record: &'a SearchRecord) -> BoxFuture<'a, Result<()>>;
}

pub trait PreferenceStore
where
	Self: Send + Sync,
{
	fn get<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Option<PreferenceSet>>>;

	fn set<'a>(
		&'a self,
		user_id: &'a str,
		preferences: &'a PreferenceSet,
	) -> BoxFuture<'a, Result<()>>;

	fn clear<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub completion: Arc<dyn CompletionProvider>,
	pub search: Arc<dyn SearchProvider>,
}
impl Providers {
	pub fn new(completion: Arc<dyn CompletionProvider>, search: Arc<dyn SearchProvider>) -> Self {
		Self { completion, search }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { completion: provider.clone(), search: provider }
	}
}

#[derive(Clone)]
pub struct Stores {
	pub history: Arc<dyn HistoryStore>,
	pub preferences: Arc<dyn PreferenceStore>,
}
impl Stores {
	pub fn new(history: Arc<dyn HistoryStore>, preferences: Arc<dyn PreferenceStore>) -> Self {
		Self { history, preferences }
	}

	pub fn postgres(db: Db) -> Self {
		let store = Arc::new(PgStore::new(db));

		Self { history: store.clone(), preferences: store }
	}
}

pub struct TailorService {
	pub cfg: Config,
	pub stores: Stores,
	pub providers: Providers,
	contextual_map: ContextualMap,
}
impl TailorService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_parts(cfg, Stores::postgres(db), Providers::default())
	}

	pub fn with_parts(cfg: Config, stores: Stores, providers: Providers) -> Self {
		let contextual_map = ContextualMap::from_config(&cfg.personalization);

		Self { cfg, stores, providers, contextual_map }
	}

	pub fn contextual_map(&self) -> &ContextualMap {
		&self.contextual_map
	}
}

struct DefaultProviders;
impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a RewritePrompt,
	) -> BoxFuture<'a, tailor_providers::Result<String>> {
		Box::pin(completion::complete(cfg, prompt))
	}
}
impl SearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a SearchProviderConfig,
		query: &'a str,
		page: u32,
	) -> BoxFuture<'a, SearchPage> {
		Box::pin(async move {
			match web::search(cfg, query, page).await {
				Ok(results) => results,
				Err(err) => {
					tracing::error!(
						provider_id = %cfg.provider_id,
						page,
						error = %err,
						"Search dispatch failed. Returning an empty page."
					);

					SearchPage::empty()
				},
			}
		})
	}
}
