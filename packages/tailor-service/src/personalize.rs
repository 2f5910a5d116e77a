use tailor_domain::{
	preferences::{self, PreferenceSet},
	relevance,
};

use crate::{Result, TailorService};

/// Who a search is running for. Anonymous searches are never personalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserContext {
	Anonymous,
	Known { user_id: String },
}
impl UserContext {
	/// Blank ids are treated as anonymous.
	pub fn from_user_id(user_id: Option<&str>) -> Self {
		match user_id.map(str::trim) {
			Some(user_id) if !user_id.is_empty() => Self::Known { user_id: user_id.to_string() },
			_ => Self::Anonymous,
		}
	}

	pub fn user_id(&self) -> Option<&str> {
		match self {
			Self::Anonymous => None,
			Self::Known { user_id } => Some(user_id.as_str()),
		}
	}
}

impl TailorService {
	/// Returns the query to dispatch for `user`.
	///
	/// Falls back to `query` unchanged when the user is anonymous, no preference is relevant, the
	/// rewrite is a no-op, or any collaborator fails. Never errors.
	pub async fn personalize(&self, query: &str, user: &UserContext) -> String {
		let Some(user_id) = user.user_id() else { return query.to_string() };

		if !self.cfg.personalization.enabled {
			return query.to_string();
		}

		let preferences = match self.load_or_infer_preferences(user_id).await {
			Ok(preferences) => preferences,
			Err(err) => {
				tracing::warn!(
					user_id,
					error = %err,
					"Failed to load preferences. Using the original query."
				);

				return query.to_string();
			},
		};
		let relevant = relevance::relevant_preferences(query, &preferences, self.contextual_map());

		if relevant.is_empty() {
			tracing::debug!(
				user_id,
				preferences = %preferences,
				"No relevant preferences. Using the original query."
			);

			return query.to_string();
		}

		let final_query = self.rewrite(query, &relevant).await;

		tracing::debug!(
			user_id,
			relevant = ?relevant,
			original = query,
			final_query = %final_query,
			"Personalized query."
		);

		final_query
	}

	/// Persisted preferences, or preferences inferred from history and persisted on first use.
	///
	/// An empty inference is not persisted, so it is retried once the user has history.
	pub async fn load_or_infer_preferences(&self, user_id: &str) -> Result<PreferenceSet> {
		if let Some(stored) = self.stores.preferences.get(user_id).await?
			&& !stored.is_empty()
		{
			return Ok(stored);
		}

		let history = self.stores.history.history(user_id, None).await?;
		// Stores return newest first; scan oldest first so ties keep first-searched order.
		let inferred = preferences::infer(history.iter().rev().map(|record| record.query.as_str()));

		if !inferred.is_empty() {
			self.stores.preferences.set(user_id, &inferred).await?;

			tracing::debug!(user_id, preferences = %inferred, "Inferred preferences from history.");
		}

		Ok(inferred)
	}
}
