use serde::Serialize;

pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that personalizes search queries based on user preferences. \
Only apply preferences if they are relevant to the query. If no preferences are relevant, \
return the query unchanged. Do not include any prefixes, labels, or additional text.";

/// Input/output pairs that anchor the shape of the model's answer.
pub const FEW_SHOT_EXAMPLES: [FewShotExample; 4] = [
	FewShotExample {
		preferences: "gaming, music",
		query: "cooking recipes",
		output: "cooking recipes",
	},
	FewShotExample {
		preferences: "coding, gaming",
		query: "wireless headphones",
		output: "gaming wireless headphones",
	},
	FewShotExample {
		preferences: "sports",
		query: "basketball equipment",
		output: "sports basketball equipment",
	},
	FewShotExample {
		preferences: "english teacher",
		query: "teaching resources",
		output: "english teacher teaching resources",
	},
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FewShotExample {
	pub preferences: &'static str,
	pub query: &'static str,
	pub output: &'static str,
}

/// Everything a completion service needs to produce one rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RewritePrompt {
	pub system: String,
	pub examples: Vec<FewShotExample>,
	/// User turns, sent in order after the system message.
	pub turns: Vec<String>,
}
impl RewritePrompt {
	pub fn new(query: &str, relevant_preferences: &[String]) -> Self {
		Self {
			system: SYSTEM_INSTRUCTION.to_string(),
			examples: FEW_SHOT_EXAMPLES.to_vec(),
			turns: vec![
				format!("Preferences: {}", relevant_preferences.join(", ")),
				format!("Original Query: {query}"),
			],
		}
	}

	/// System message with the examples appended, the layout chat models are primed with.
	pub fn system_message(&self) -> String {
		if self.examples.is_empty() {
			return self.system.clone();
		}

		let mut out = format!("{}\n\nExamples:\n", self.system);

		for example in &self.examples {
			out.push_str(&format!(
				"- Preferences: {}\n  Original Query: {}\n  Output: {}\n",
				example.preferences, example.query, example.output
			));
		}

		out
	}
}

/// Why a candidate rewrite was not used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rejection {
	Empty,
	Identical,
	TooSimilar { similarity: f64 },
}

/// Removes leading labels such as `Output:` and surrounding whitespace from a model answer.
///
/// `labels` must be lowercase. Labels are tried in order and each is removed at most once.
pub fn clean_candidate(raw: &str, labels: &[String]) -> String {
	let mut candidate = raw.trim();

	for label in labels {
		let Some(head) = candidate.get(..label.len()) else { continue };

		if head.eq_ignore_ascii_case(label) {
			candidate = candidate[label.len()..].trim();
		}
	}

	candidate.to_string()
}

/// Normalized edit similarity in `[0, 1]`; `1.0` means identical.
pub fn similarity(a: &str, b: &str) -> f64 {
	strsim::normalized_levenshtein(a, b)
}

/// Accepts `candidate` only when it is a real change to `original`.
pub fn judge_candidate(original: &str, candidate: &str, threshold: f64) -> Result<(), Rejection> {
	if candidate.is_empty() {
		return Err(Rejection::Empty);
	}
	if candidate == original {
		return Err(Rejection::Identical);
	}

	let similarity = similarity(original, candidate);

	if similarity > threshold {
		return Err(Rejection::TooSimilar { similarity });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn labels() -> Vec<String> {
		vec!["output:".to_string(), "modified query:".to_string(), "result:".to_string()]
	}

	#[test]
	fn label_longer_than_candidate_is_ignored() {
		assert_eq!(clean_candidate("out", &labels()), "out");
	}

	#[test]
	fn multibyte_prefix_does_not_panic() {
		assert_eq!(clean_candidate("écouteurs sans fil", &labels()), "écouteurs sans fil");
	}
}
