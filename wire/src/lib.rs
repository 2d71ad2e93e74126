//! Shared wire model for the blog server and the Leptos client.
//!
//! This crate owns the JSON shapes exchanged between `blog-server` and
//! `blog-client`: per-article like counts and realtime updates, the register
//! query, the local storage key scheme for like flags, and article records with
//! their derived metadata.

pub mod articles;
pub mod likes;

pub use articles::{Article, ArticleRef, ArticleSummary, DerivedFields, Frontmatter, Neighbor, TermCount};
pub use likes::{LikeCounts, LikeUpdate, RegisterQuery, VISITOR_ID_KEY};

/// Error returned when a wire payload cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The text was not valid JSON for the expected shape.
    #[error("failed to decode wire payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The payload decoded but carried an empty article id.
    #[error("payload is missing an article id")]
    MissingId,
}
