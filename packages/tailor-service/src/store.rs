use tailor_domain::preferences::PreferenceSet;
use tailor_storage::{db::Db, models::SearchRecord, queries};

use crate::{BoxFuture, HistoryStore, PreferenceStore, Result};

/// History and preference stores backed by Postgres.
pub struct PgStore {
	db: Db,
}
impl PgStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl HistoryStore for PgStore {
	fn history<'a>(
		&'a self,
		user_id: &'a str,
		limit: Option<u32>,
	) -> BoxFuture<'a, Result<Vec<SearchRecord>>> {
		Box::pin(async move {
			let records =
				queries::list_search_records(&self.db, user_id, limit.map(i64::from)).await?;

			Ok(records)
		})
	}

	fn append<'a>(&'a self, record: &'a SearchRecord) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			queries::insert_search_record(&self.db, record).await?;

			Ok(())
		})
	}
}

impl PreferenceStore for PgStore {
	fn get<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Option<PreferenceSet>>> {
		Box::pin(async move {
			let stored = queries::get_preferences(&self.db, user_id).await?;

			Ok(stored.map(|raw| PreferenceSet::parse(&raw)))
		})
	}

	fn set<'a>(
		&'a self,
		user_id: &'a str,
		preferences: &'a PreferenceSet,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			queries::set_preferences(&self.db, user_id, &preferences.to_stored()).await?;

			Ok(())
		})
	}

	fn clear<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			queries::clear_preferences(&self.db, user_id).await?;

			Ok(())
		})
	}
}
