use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use tailor_config::LlmProviderConfig;
use tailor_domain::rewrite::RewritePrompt;

use crate::{Error, Result};

/// Sends one chat completion request and returns the text of the first choice.
///
/// The request is not retried; callers decide how to degrade on failure.
pub async fn complete(cfg: &LlmProviderConfig, prompt: &RewritePrompt) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&request_body(cfg, prompt))
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_content(&cfg.provider_id, &json)
}

pub fn request_body(cfg: &LlmProviderConfig, prompt: &RewritePrompt) -> Value {
	let mut messages =
		vec![serde_json::json!({ "role": "system", "content": prompt.system_message() })];

	for turn in &prompt.turns {
		messages.push(serde_json::json!({ "role": "user", "content": turn }));
	}

	serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_output_tokens,
		"messages": messages,
	})
}

fn parse_completion_content(provider_id: &str, json: &Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| Error::InvalidResponse {
			provider_id: provider_id.to_string(),
			message: "Completion response is missing choices[0].message.content.".to_string(),
		})
}
