//! Like counter payloads and the local flag key scheme.
//!
//! The likes backend exposes three surfaces: a one-shot map of every count,
//! a register call keyed by article id, and a realtime stream of
//! [`LikeUpdate`] messages. Browsers remember which articles a visitor liked
//! under `<visitorId>::<articleId>` keys.

#[cfg(test)]
#[path = "likes_test.rs"]
mod likes_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::WireError;

/// Storage key holding the anonymous visitor identifier.
pub const VISITOR_ID_KEY: &str = "anonymous-visitor-id";

const LIKE_FLAG_SEPARATOR: &str = "::";

/// Body of `GET /likes/.json`: article id to like count.
pub type LikeCounts = HashMap<String, u64>;

/// Storage key for the like flag of one visitor on one article.
#[must_use]
pub fn like_flag_key(visitor_id: &str, article_id: &str) -> String {
    format!("{visitor_id}{LIKE_FLAG_SEPARATOR}{article_id}")
}

/// Look up one article's count. Articles without an entry are absent, not zero.
#[must_use]
pub fn count_for(counts: &LikeCounts, article_id: &str) -> Option<u64> {
    counts.get(article_id).copied()
}

/// Realtime push message: the current count for one article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeUpdate {
    pub id: String,
    pub count: u64,
}

impl LikeUpdate {
    #[must_use]
    pub fn new(id: impl Into<String>, count: u64) -> Self {
        Self { id: id.into(), count }
    }

    /// Encode as a websocket text frame.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a websocket text frame.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Decode`] on malformed JSON and
    /// [`WireError::MissingId`] when the id is blank.
    pub fn decode(text: &str) -> Result<Self, WireError> {
        let update: Self = serde_json::from_str(text)?;
        if update.id.trim().is_empty() {
            return Err(WireError::MissingId);
        }
        Ok(update)
    }
}

/// Query string of the register and live endpoints (`?id=<articleId>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl RegisterQuery {
    /// The article id, if present and not blank.
    #[must_use]
    pub fn article_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Append `?id=<url-encoded article id>` to an endpoint base URL.
#[must_use]
pub fn with_article_query(base: &str, article_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(article_id.as_bytes()).collect();
    let joiner = if base.contains('?') { '&' } else { '?' };
    format!("{base}{joiner}id={encoded}")
}
