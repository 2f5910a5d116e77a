use serde::{Deserialize, Serialize};

use tailor_domain::preferences::PreferenceSet;

use crate::{Error, Result, TailorService};

#[derive(Clone, Debug, Deserialize)]
pub struct SetPreferencesRequest {
	pub user_id: String,
	/// Comma separated, e.g. `"gaming, music"`. Blank input clears the preferences.
	pub preferences: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PreferencesResponse {
	pub user_id: String,
	/// `None` until preferences are declared or inferred from a search.
	pub preferences: Option<PreferenceSet>,
}

impl TailorService {
	pub async fn get_preferences(&self, user_id: &str) -> Result<PreferencesResponse> {
		let user_id = require_user_id(user_id)?;
		let preferences = self.stores.preferences.get(user_id).await?;

		Ok(PreferencesResponse { user_id: user_id.to_string(), preferences })
	}

	/// Replaces the user's preferences with declared ones.
	pub async fn set_preferences(&self, req: SetPreferencesRequest) -> Result<PreferencesResponse> {
		let user_id = require_user_id(&req.user_id)?;
		let preferences = PreferenceSet::parse(&req.preferences);

		if preferences.is_empty() {
			return self.clear_preferences(user_id).await;
		}

		self.stores.preferences.set(user_id, &preferences).await?;

		tracing::info!(user_id, preferences = %preferences, "Preferences declared.");

		Ok(PreferencesResponse { user_id: user_id.to_string(), preferences: Some(preferences) })
	}

	/// Forgets the user's preferences. The next search infers them again from history.
	pub async fn clear_preferences(&self, user_id: &str) -> Result<PreferencesResponse> {
		let user_id = require_user_id(user_id)?;

		self.stores.preferences.clear(user_id).await?;

		tracing::info!(user_id, "Preferences cleared.");

		Ok(PreferencesResponse { user_id: user_id.to_string(), preferences: None })
	}
}

pub(crate) fn require_user_id(user_id: &str) -> Result<&str> {
	let trimmed = user_id.trim();

	if trimmed.is_empty() {
		return Err(Error::invalid("user_id must be non-empty."));
	}

	Ok(trimmed)
}
