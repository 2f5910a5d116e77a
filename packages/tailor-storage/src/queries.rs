use crate::{Error, Result, db::Db, models::SearchRecord};

pub async fn insert_search_record(db: &Db, record: &SearchRecord) -> Result<()> {
	require_user_id(&record.user_id)?;

	sqlx::query(
		"\
INSERT INTO search_records (search_id, user_id, query, created_at)
VALUES ($1, $2, $3, $4)",
	)
	.bind(record.search_id)
	.bind(record.user_id.as_str())
	.bind(record.query.as_str())
	.bind(record.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Newest first. `limit` of `None` returns the whole history.
pub async fn list_search_records(
	db: &Db,
	user_id: &str,
	limit: Option<i64>,
) -> Result<Vec<SearchRecord>> {
	require_user_id(user_id)?;

	let rows = sqlx::query_as::<_, SearchRecord>(
		"\
SELECT search_id, user_id, query, created_at
FROM search_records
WHERE user_id = $1
ORDER BY created_at DESC, search_id
LIMIT $2",
	)
	.bind(user_id)
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn get_preferences(db: &Db, user_id: &str) -> Result<Option<String>> {
	require_user_id(user_id)?;

	let stored: Option<Option<String>> =
		sqlx::query_scalar("SELECT preferences FROM users WHERE user_id = $1")
			.bind(user_id)
			.fetch_optional(&db.pool)
			.await?;

	Ok(stored.flatten())
}

pub async fn set_preferences(db: &Db, user_id: &str, preferences: &str) -> Result<()> {
	require_user_id(user_id)?;

	sqlx::query(
		"\
INSERT INTO users (user_id, preferences)
VALUES ($1, $2)
ON CONFLICT (user_id) DO UPDATE
SET preferences = EXCLUDED.preferences, updated_at = now()",
	)
	.bind(user_id)
	.bind(preferences)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn clear_preferences(db: &Db, user_id: &str) -> Result<()> {
	require_user_id(user_id)?;

	sqlx::query("UPDATE users SET preferences = NULL, updated_at = now() WHERE user_id = $1")
		.bind(user_id)
		.execute(&db.pool)
		.await?;

	Ok(())
}

fn require_user_id(user_id: &str) -> Result<()> {
	if user_id.trim().is_empty() {
		return Err(Error::InvalidArgument("user_id must be non-empty.".to_string()));
	}

	Ok(())
}
