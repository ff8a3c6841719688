//! Remote move scoring.
//!
//! The scoring service is trusted for per-column scores only; legality is
//! always decided locally by [`crate::logic::legal_columns`].

pub mod http;

pub use http::HttpScorer;

use crate::core::{PlayerId, COLUMNS};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// 列番号 -> スコア
pub type ScoreMap = HashMap<usize, f64>;

#[derive(Debug, thiserror::Error)]
pub enum ScoringUnavailable {
    #[error("scoring request failed: {0}")]
    Transport(String),
    #[error("scoring service answered {0}")]
    Status(u16),
    #[error("scoring response is not a score object: {0}")]
    Body(String),
}

/// Scores every column of an encoded board for `player`.
#[async_trait::async_trait]
pub trait Scorer: Send + Sync {
    async fn fetch_scores(
        &self,
        encoded_board: &str,
        player: PlayerId,
    ) -> Result<ScoreMap, ScoringUnavailable>;

    fn name(&self) -> &str;
}

#[async_trait::async_trait]
impl<T: Scorer + ?Sized> Scorer for Arc<T> {
    async fn fetch_scores(
        &self,
        encoded_board: &str,
        player: PlayerId,
    ) -> Result<ScoreMap, ScoringUnavailable> {
        (**self).fetch_scores(encoded_board, player).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Parses a score body such as `{"0": 1.5, "3": "-2"}`.
///
/// The body must be a JSON object. Keys that are not columns and values that
/// are not numbers (or numeric strings) are skipped.
pub fn parse_scores(body: &str) -> Result<ScoreMap, ScoringUnavailable> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ScoringUnavailable::Body(e.to_string()))?;
    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(ScoringUnavailable::Body(format!(
                "expected object, got {}",
                other
            )))
        }
    };

    let mut scores = ScoreMap::new();
    for (key, raw) in entries {
        // only the canonical spelling "0".."6" names a column
        let Some(col) = (0..COLUMNS).find(|c| c.to_string() == key) else {
            tracing::debug!(key = %key, "ignoring score for unknown column");
            continue;
        };
        let score = match &raw {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match score.filter(|s| !s.is_nan()) {
            Some(s) => {
                scores.insert(col, s);
            }
            None => tracing::debug!(column = col, value = %raw, "ignoring non-numeric score"),
        }
    }
    Ok(scores)
}
