use std::{collections::HashMap, fmt};

use serde::Serialize;

/// Upper bound on terms kept in a [`PreferenceSet`], inferred or declared.
pub const MAX_PREFERENCES: usize = 10;

/// Ranked, deduplicated topical terms for one user.
///
/// Terms are lowercase, trimmed and unique. The first term is the strongest preference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreferenceSet(Vec<String>);
impl PreferenceSet {
	/// Builds a set from already ranked terms. Blank and repeated terms are dropped and the result
	/// is capped at [`MAX_PREFERENCES`].
	pub fn from_terms<I, S>(terms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut out: Vec<String> = Vec::new();

		for term in terms {
			let Some(term) = normalize_term(term.as_ref()) else { continue };

			if out.contains(&term) {
				continue;
			}

			out.push(term);

			if out.len() == MAX_PREFERENCES {
				break;
			}
		}

		Self(out)
	}

	/// Parses the comma separated form used for declared and persisted preferences, e.g.
	/// `"gaming, music"`.
	pub fn parse(raw: &str) -> Self {
		Self::from_terms(raw.split(','))
	}

	/// Comma separated form, the inverse of [`PreferenceSet::parse`].
	pub fn to_stored(&self) -> String {
		self.0.join(", ")
	}

	pub fn terms(&self) -> &[String] {
		&self.0
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	pub fn contains(&self, term: &str) -> bool {
		self.0.iter().any(|candidate| candidate == term)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl fmt::Display for PreferenceSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_stored())
	}
}

/// Infers preferences from a user's past queries.
///
/// Every query is split on whitespace and commas and lowercased; words are ranked by how often they occur
/// across the whole history, ties keeping the order in which words were first seen. No stemming
/// or stopword removal is applied. An empty history yields an empty set.
pub fn infer<'a, I>(queries: I) -> PreferenceSet
where
	I: IntoIterator<Item = &'a str>,
{
	// word -> (count, first seen position)
	let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

	for query in queries {
		// Commas separate stored terms, so they cannot be part of an inferred one.
		for word in query.split(|ch: char| ch.is_whitespace() || ch == ',') {
			if word.is_empty() {
				continue;
			}

			let seen = counts.len();
			let entry = counts.entry(word.to_lowercase()).or_insert((0, seen));

			entry.0 += 1;
		}
	}

	let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();

	ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
		count_b.cmp(count_a).then(first_a.cmp(first_b))
	});

	PreferenceSet::from_terms(ranked.into_iter().map(|(word, _)| word))
}

fn normalize_term(raw: &str) -> Option<String> {
	let term = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

	if term.is_empty() { None } else { Some(term) }
}
