use std::collections::{BTreeMap, BTreeSet};

use tailor_config::Personalization;

use crate::preferences::PreferenceSet;

/// Preference term -> trigger words that make the term relevant to a query.
///
/// Matching is closed-world: a preference without an entry is never relevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextualMap {
	entries: BTreeMap<String, BTreeSet<String>>,
}
impl ContextualMap {
	pub fn new<I, T, W>(entries: I) -> Self
	where
		I: IntoIterator<Item = (T, W)>,
		T: AsRef<str>,
		W: IntoIterator,
		W::Item: AsRef<str>,
	{
		let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

		for (term, triggers) in entries {
			let term = term.as_ref().trim().to_lowercase();

			if term.is_empty() {
				continue;
			}

			let words = map.entry(term).or_default();

			for word in triggers {
				let word = word.as_ref().trim().to_lowercase();

				if !word.is_empty() {
					words.insert(word);
				}
			}
		}

		map.retain(|_, words| !words.is_empty());

		Self { entries: map }
	}

	pub fn from_config(cfg: &Personalization) -> Self {
		Self::new(cfg.contextual_map.iter().map(|(term, words)| (term, words.iter())))
	}

	pub fn triggers(&self, term: &str) -> Option<&BTreeSet<String>> {
		self.entries.get(term)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

const SENTENCE_PUNCTUATION: &[char] =
	&['.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}'];

/// Each lowercased word as written, without sentence punctuation, and without any punctuation, so
/// triggers such as `c++` or `c#` match as well as `headphones` in `headphones?`.
fn word_forms(query: &str) -> BTreeSet<String> {
	let mut forms = BTreeSet::new();

	for word in query.split_whitespace() {
		let word = word.to_lowercase();

		for form in [
			word.trim_matches(SENTENCE_PUNCTUATION),
			word.trim_matches(|ch: char| !ch.is_alphanumeric()),
		] {
			if !form.is_empty() {
				forms.insert(form.to_string());
			}
		}

		forms.insert(word);
	}

	forms
}

/// Preferences from `preferences` that one of the query's words triggers, in preference order.
pub fn relevant_preferences(
	query: &str,
	preferences: &PreferenceSet,
	map: &ContextualMap,
) -> Vec<String> {
	if preferences.is_empty() {
		return Vec::new();
	}

	let words = word_forms(query);

	if words.is_empty() {
		return Vec::new();
	}

	preferences
		.iter()
		.filter(|term| {
			map.triggers(term)
				.map(|triggers| !triggers.is_disjoint(&words))
				.unwrap_or(false)
		})
		.map(str::to_string)
		.collect()
}
