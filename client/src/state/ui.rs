//! Local UI chrome state shared across pages.
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of the like and article state so the
//! header controls can change without touching data flow. Provided as a
//! `RwSignal<UiState>` from the app root, seeded from build-time settings.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::state::likes::LikePolicy;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    /// Click handling for every like counter on the page.
    pub like_policy: LikePolicy,
    /// Twitter handle credited in share links, without the `@`.
    pub share_via: Option<String>,
}

impl UiState {
    /// Settings baked in when the client is compiled: `BLOG_LIKE_POLICY`
    /// (`optimistic` or `toggle`) and `BLOG_SHARE_VIA` (Twitter handle).
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::configured(option_env!("BLOG_LIKE_POLICY"), option_env!("BLOG_SHARE_VIA"))
    }

    /// Initial state from raw settings. Unknown policies fall back to the
    /// default with a warning; blank handles mean no credit.
    #[must_use]
    pub fn configured(like_policy: Option<&str>, share_via: Option<&str>) -> Self {
        let like_policy = match like_policy.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => LikePolicy::parse(raw).unwrap_or_else(|| {
                leptos::logging::warn!("ui: unknown like policy {raw:?}; using the default");
                LikePolicy::default()
            }),
            None => LikePolicy::default(),
        };
        let share_via = share_via
            .map(|handle| handle.trim().trim_start_matches('@'))
            .filter(|handle| !handle.is_empty())
            .map(str::to_owned);
        Self { dark_mode: false, like_policy, share_via }
    }
}
