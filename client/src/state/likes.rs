//! Like counter state for one (visitor, article) pair.
//!
//! DESIGN
//! ======
//! Pure transitions only. `LikeSession` owns persistence, timers and remote
//! calls and feeds their results back through these methods, so every policy
//! decision lives in one place and is testable without a browser.
//!
//! POLICY
//! ======
//! `Optimistic` (the default) registers at most one like per visitor and
//! article: the flag and count change immediately, and a failed registration
//! rolls both back. `Toggle` lets the visitor un-like locally and swallows
//! registration failures.

#[cfg(test)]
#[path = "likes_test.rs"]
mod likes_test;

/// How clicks on the like control are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LikePolicy {
    #[default]
    Optimistic,
    Toggle,
}

impl LikePolicy {
    /// Parse a configured policy name: `optimistic` or `toggle`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Some(Self::Optimistic),
            "toggle" => Some(Self::Toggle),
            _ => None,
        }
    }
}

/// Where the visitor stands with this article.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LikePhase {
    /// Local flag not loaded yet.
    #[default]
    Unknown,
    NotLiked,
    Liked,
    /// Flag set locally; registration still in flight.
    LikePending,
}

/// What a click asks the session to do remotely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    /// Send one registration request.
    Register,
    /// Flag cleared locally; nothing to send.
    Unliked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LikeState {
    pub article_id: String,
    pub visitor_id: Option<String>,
    pub phase: LikePhase,
    /// Displayed count. `None` until the backend reports one.
    pub count: Option<u64>,
    /// Transient attention animation on the unliked control.
    pub shaking: bool,
    pub policy: LikePolicy,
    /// Count shown before an unconfirmed local +1, restored if it fails.
    count_before_like: Option<Option<u64>>,
}

impl LikeState {
    #[must_use]
    pub fn new(article_id: impl Into<String>, policy: LikePolicy) -> Self {
        Self {
            article_id: article_id.into(),
            visitor_id: None,
            phase: LikePhase::Unknown,
            count: None,
            shaking: false,
            policy,
            count_before_like: None,
        }
    }

    /// Apply the locally persisted flag.
    pub fn load(&mut self, visitor_id: String, liked: bool) {
        self.visitor_id = Some(visitor_id);
        self.phase = if liked { LikePhase::Liked } else { LikePhase::NotLiked };
        if liked {
            self.shaking = false;
        }
    }

    /// The value of the persisted like flag.
    #[must_use]
    pub fn is_liked(&self) -> bool {
        matches!(self.phase, LikePhase::Liked | LikePhase::LikePending)
    }

    /// Only an unliked control may shake.
    #[must_use]
    pub fn shake_allowed(&self) -> bool {
        self.phase == LikePhase::NotLiked
    }

    pub fn set_shaking(&mut self, on: bool) {
        self.shaking = on && self.shake_allowed();
    }

    /// A count pushed or fetched from the backend. Last write wins.
    pub fn apply_remote_count(&mut self, count: u64) {
        self.count = Some(count);
        self.count_before_like = None;
    }

    pub fn click(&mut self) -> ClickOutcome {
        match (self.policy, self.phase) {
            (_, LikePhase::Unknown | LikePhase::LikePending) | (LikePolicy::Optimistic, LikePhase::Liked) => {
                ClickOutcome::Ignored
            }
            (LikePolicy::Optimistic, LikePhase::NotLiked) => {
                self.phase = LikePhase::LikePending;
                self.bump_up();
                ClickOutcome::Register
            }
            (LikePolicy::Toggle, LikePhase::NotLiked) => {
                self.phase = LikePhase::Liked;
                self.bump_up();
                ClickOutcome::Register
            }
            (LikePolicy::Toggle, LikePhase::Liked) => {
                self.phase = LikePhase::NotLiked;
                self.count = self.count.map(|c| c.saturating_sub(1));
                self.count_before_like = None;
                ClickOutcome::Unliked
            }
        }
    }

    /// Settle an in-flight registration. Returns `true` when the like flag was
    /// reverted and needs persisting.
    pub fn registration_settled(&mut self, ok: bool) -> bool {
        if self.policy != LikePolicy::Optimistic || self.phase != LikePhase::LikePending {
            return false;
        }
        if ok {
            self.phase = LikePhase::Liked;
            self.count_before_like = None;
            return false;
        }
        self.phase = LikePhase::NotLiked;
        // A remote count received meanwhile is authoritative; keep it.
        if let Some(previous) = self.count_before_like.take() {
            self.count = previous;
        }
        true
    }

    fn bump_up(&mut self) {
        self.count_before_like = Some(self.count);
        self.count = Some(self.count.unwrap_or(0).saturating_add(1));
        self.shaking = false;
    }
}
