mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, LlmProviderConfig, Personalization, Postgres, Providers, SearchProviderConfig,
	Service, Storage,
};

use std::{collections::BTreeMap, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw =
		fs::read_to_string(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::Parse { source, .. } => Error::Parse { path: path.to_path_buf(), source },
		other => other,
	})
}

/// Parses, normalizes and validates a TOML document.
pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config =
		toml::from_str(raw).map_err(|err| Error::Parse { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::invalid("service.http_bind", "must be non-empty."));
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::invalid("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::invalid("storage.postgres.pool_max_conns", "must be greater than zero."));
	}

	validate_completion(&cfg.providers.completion)?;
	validate_search(&cfg.providers.search)?;
	validate_personalization(&cfg.personalization)?;

	Ok(())
}

fn validate_completion(completion: &LlmProviderConfig) -> Result<()> {
	for (key, value) in [
		("providers.completion.api_base", &completion.api_base),
		("providers.completion.api_key", &completion.api_key),
		("providers.completion.model", &completion.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::invalid(key, "must be non-empty."));
		}
	}

	if !completion.temperature.is_finite() {
		return Err(Error::invalid("providers.completion.temperature", "must be a finite number."));
	}
	if !(0.0..=2.0).contains(&completion.temperature) {
		return Err(Error::invalid(
			"providers.completion.temperature",
			"must be in the range 0.0-2.0.",
		));
	}
	if completion.max_output_tokens == 0 {
		return Err(Error::invalid(
			"providers.completion.max_output_tokens",
			"must be greater than zero.",
		));
	}
	if completion.timeout_ms == 0 {
		return Err(Error::invalid("providers.completion.timeout_ms", "must be greater than zero."));
	}

	Ok(())
}

fn validate_search(search: &SearchProviderConfig) -> Result<()> {
	for (key, value) in [
		("providers.search.api_base", &search.api_base),
		("providers.search.api_key", &search.api_key),
		("providers.search.engine", &search.engine),
	] {
		if value.trim().is_empty() {
			return Err(Error::invalid(key, "must be non-empty."));
		}
	}

	if !(1..=100).contains(&search.results_per_page) {
		return Err(Error::invalid("providers.search.results_per_page", "must be in the range 1-100."));
	}
	if search.timeout_ms == 0 {
		return Err(Error::invalid("providers.search.timeout_ms", "must be greater than zero."));
	}

	Ok(())
}

fn validate_personalization(personalization: &Personalization) -> Result<()> {
	let threshold = personalization.similarity_threshold;

	if !threshold.is_finite() {
		return Err(Error::invalid(
			"personalization.similarity_threshold",
			"must be a finite number.",
		));
	}
	if !(0.0..=1.0).contains(&threshold) {
		return Err(Error::invalid(
			"personalization.similarity_threshold",
			"must be in the range 0.0-1.0.",
		));
	}
	if personalization.strip_labels.iter().any(|label| label.is_empty()) {
		return Err(Error::invalid("personalization.strip_labels", "must not contain empty labels."));
	}

	for (term, triggers) in &personalization.contextual_map {
		if term.is_empty() {
			return Err(Error::invalid(
				"personalization.contextual_map",
				"must not contain empty preference terms.",
			));
		}
		if triggers.is_empty() {
			return Err(Error::invalid(
				format!("personalization.contextual_map.{term}"),
				"must list at least one trigger word.",
			));
		}
		if triggers.iter().any(|word| word.is_empty() || word.contains(char::is_whitespace)) {
			return Err(Error::invalid(
				format!("personalization.contextual_map.{term}"),
				"trigger words must be single non-empty words.",
			));
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.providers.completion.api_base =
		cfg.providers.completion.api_base.trim_end_matches('/').to_string();
	cfg.providers.search.api_base = cfg.providers.search.api_base.trim_end_matches('/').to_string();

	let personalization = &mut cfg.personalization;

	for label in personalization.strip_labels.iter_mut() {
		*label = label.trim().to_lowercase();
	}

	let raw = std::mem::take(&mut personalization.contextual_map);
	let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();

	for (term, triggers) in raw {
		let words = merged.entry(term.trim().to_lowercase()).or_default();

		for word in triggers {
			let word = word.trim().to_lowercase();

			if !words.contains(&word) {
				words.push(word);
			}
		}
	}

	personalization.contextual_map = merged;
}
