use tailor_domain::{
	preferences::{self, MAX_PREFERENCES, PreferenceSet},
	relevance::{self, ContextualMap},
	rewrite::{self, RewritePrompt, Rejection},
};

fn labels() -> Vec<String> {
	tailor_config::Personalization::default().strip_labels
}

#[test]
fn inference_is_idempotent_on_stable_history() {
	let history = ["gaming mouse", "Gaming headset", "cooking pasta", "pasta recipes"];

	assert_eq!(preferences::infer(history), preferences::infer(history));
}

#[test]
fn inference_caps_at_ten_terms() {
	let history: Vec<String> = (0..40).map(|i| format!("word{i} other{i}")).collect();
	let prefs = preferences::infer(history.iter().map(String::as_str));

	assert_eq!(prefs.len(), MAX_PREFERENCES);
	assert_eq!(prefs.terms()[0], "word0");
}

#[test]
fn frequent_terms_rank_first() {
	let prefs = preferences::infer(["gaming mouse", "gaming headset", "cooking"]);

	assert_eq!(prefs.terms(), ["gaming", "mouse", "headset", "cooking"]);
}

#[test]
fn empty_history_yields_empty_set() {
	let prefs = preferences::infer(Vec::<&str>::new());

	assert!(prefs.is_empty());
	assert_eq!(prefs.to_stored(), "");
}

#[test]
fn inferred_terms_are_lowercase_and_unique() {
	let prefs = preferences::infer(["Rust RUST rust", "  Tokio\trust "]);

	assert_eq!(prefs.terms(), ["rust", "tokio"]);
}

#[test]
fn stored_form_round_trips() {
	let prefs = PreferenceSet::parse("gaming, music");

	assert_eq!(PreferenceSet::parse(&prefs.to_stored()), prefs);
	assert_eq!(serde_json::to_value(&prefs).expect("serialize"), serde_json::json!(["gaming", "music"]));
}

#[test]
fn declared_preferences_are_capped() {
	let raw = (0..15).map(|i| format!("topic{i}")).collect::<Vec<_>>().join(",");

	assert_eq!(PreferenceSet::parse(&raw).len(), MAX_PREFERENCES);
}

#[test]
fn unmapped_preference_is_never_relevant() {
	let map = ContextualMap::new([("coding", ["keyboard", "programming"])]);
	let prefs = PreferenceSet::parse("coding");

	assert!(relevance::relevant_preferences("wireless headphones", &prefs, &map).is_empty());

	let prefs = PreferenceSet::parse("cooking");

	assert!(relevance::relevant_preferences("cooking keyboard", &prefs, &map).is_empty());
}

#[test]
fn trigger_word_makes_preference_relevant() {
	let map = ContextualMap::new([("music", ["headphones", "speakers"])]);
	let prefs = PreferenceSet::parse("music");

	assert_eq!(relevance::relevant_preferences("wireless headphones", &prefs, &map), ["music"]);
}

#[test]
fn triggers_match_whole_words_case_insensitively() {
	let map = ContextualMap::new([("music", ["headphones"])]);
	let prefs = PreferenceSet::parse("music");

	assert_eq!(relevance::relevant_preferences("Wireless HEADPHONES", &prefs, &map), ["music"]);
	assert!(relevance::relevant_preferences("headphonesx", &prefs, &map).is_empty());
}

#[test]
fn relevant_preferences_follow_preference_order() {
	let cfg = tailor_config::Personalization::default();
	let map = ContextualMap::from_config(&cfg);
	let prefs = PreferenceSet::parse("music, coding, gaming");
	let relevant = relevance::relevant_preferences("gaming headset keyboard", &prefs, &map);

	assert_eq!(relevant, ["coding", "gaming"]);
}

#[test]
fn empty_query_or_preferences_yield_nothing() {
	let map = ContextualMap::new([("music", ["headphones"])]);

	assert!(relevance::relevant_preferences("", &PreferenceSet::parse("music"), &map).is_empty());
	assert!(
		relevance::relevant_preferences("headphones", &PreferenceSet::default(), &map).is_empty()
	);
}

#[test]
fn persisted_gaming_music_only_keeps_music_for_headphones() {
	let map = ContextualMap::from_config(&tailor_config::Personalization::default());
	let prefs = PreferenceSet::parse("gaming, music");

	assert_eq!(relevance::relevant_preferences("wireless headphones", &prefs, &map), ["music"]);
}

#[test]
fn prompt_carries_relevant_preferences_and_query_as_separate_turns() {
	let prompt = RewritePrompt::new("wireless headphones", &["music".to_string()]);

	assert_eq!(prompt.turns, ["Preferences: music", "Original Query: wireless headphones"]);
	assert_eq!(prompt.examples.len(), rewrite::FEW_SHOT_EXAMPLES.len());

	let system = prompt.system_message();

	assert!(system.starts_with(rewrite::SYSTEM_INSTRUCTION));
	assert!(system.contains("Original Query: basketball equipment"));
	assert!(system.contains("Output: sports basketball equipment"));
}

#[test]
fn strips_labels_case_insensitively() {
	assert_eq!(rewrite::clean_candidate("  Output: music headphones ", &labels()), "music headphones");
	assert_eq!(rewrite::clean_candidate("MODIFIED QUERY:music headphones", &labels()), "music headphones");
	assert_eq!(rewrite::clean_candidate("Result:  x", &labels()), "x");
	assert_eq!(rewrite::clean_candidate("music headphones", &labels()), "music headphones");
}

#[test]
fn identical_candidate_is_rejected() {
	assert_eq!(
		rewrite::judge_candidate("wireless headphones", "wireless headphones", 0.9),
		Err(Rejection::Identical)
	);
}

#[test]
fn near_identical_candidate_is_rejected() {
	let verdict = rewrite::judge_candidate(
		"wireless noise cancelling headphones",
		"wireless noise-cancelling headphones",
		0.9,
	);

	assert!(matches!(verdict, Err(Rejection::TooSimilar { .. })), "{verdict:?}");
}

#[test]
fn empty_candidate_is_rejected() {
	assert_eq!(rewrite::judge_candidate("headphones", "", 0.9), Err(Rejection::Empty));
}

#[test]
fn meaningful_rewrite_is_accepted() {
	assert_eq!(
		rewrite::judge_candidate("wireless headphones", "music wireless headphones", 0.9),
		Ok(())
	);
}

#[test]
fn similarity_is_a_ratio() {
	assert_eq!(rewrite::similarity("abc", "abc"), 1.0);
	assert!(rewrite::similarity("abc", "xyz") < 0.01);
}
