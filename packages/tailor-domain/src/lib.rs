pub mod preferences;
pub mod relevance;
pub mod rewrite;
