use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// One executed search. Rows are append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SearchRecord {
	pub search_id: Uuid,
	pub user_id: String,
	pub query: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
impl SearchRecord {
	pub fn new(user_id: impl Into<String>, query: impl Into<String>) -> Self {
		Self {
			search_id: Uuid::new_v4(),
			user_id: user_id.into(),
			query: query.into(),
			created_at: OffsetDateTime::now_utc(),
		}
	}
}
