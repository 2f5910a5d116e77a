use tailor_config::Config;
use tailor_domain::rewrite::{self, Rejection, RewritePrompt};

use crate::{CompletionProvider, TailorService};

/// What happened to one rewrite attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum RewriteOutcome {
	Rewritten(String),
	/// The model answer was empty or too close to the original to be worth using.
	NoOp(Rejection),
	/// The completion service failed; holds the error message.
	ServiceFailure(String),
}
impl RewriteOutcome {
	pub fn into_query(self, original: &str) -> String {
		match self {
			Self::Rewritten(query) => query,
			Self::NoOp(_) | Self::ServiceFailure(_) => original.to_string(),
		}
	}
}

/// Asks the completion service to fold `relevant` preferences into `query`.
///
/// Failures are logged and reported as an outcome, never as an error. No retry is attempted.
pub async fn rewrite_query(
	provider: &dyn CompletionProvider,
	cfg: &Config,
	query: &str,
	relevant: &[String],
) -> RewriteOutcome {
	let prompt = RewritePrompt::new(query, relevant);
	let raw = match provider.complete(&cfg.providers.completion, &prompt).await {
		Ok(raw) => raw,
		Err(err) => {
			tracing::error!(
				provider_id = %cfg.providers.completion.provider_id,
				error = %err,
				"Query rewrite failed. Using the original query."
			);

			return RewriteOutcome::ServiceFailure(err.to_string());
		},
	};
	let candidate = rewrite::clean_candidate(&raw, &cfg.personalization.strip_labels);

	match rewrite::judge_candidate(query, &candidate, cfg.personalization.similarity_threshold) {
		Ok(()) => RewriteOutcome::Rewritten(candidate),
		Err(rejection) => {
			tracing::debug!(
				original = query,
				candidate = %candidate,
				rejection = ?rejection,
				"Discarded rewrite. Using the original query."
			);

			RewriteOutcome::NoOp(rejection)
		},
	}
}

impl TailorService {
	/// Rewrites `query` with the given relevant preferences, returning the original query when the
	/// rewrite is unusable.
	pub async fn rewrite(&self, query: &str, relevant: &[String]) -> String {
		if relevant.is_empty() {
			return query.to_string();
		}

		rewrite_query(self.providers.completion.as_ref(), &self.cfg, query, relevant)
			.await
			.into_query(query)
	}
}
