//! Heart button with the article's like count.
//!
//! DESIGN
//! ======
//! The component owns one `LikeSession` per mount, kept in a local
//! `StoredValue` because the session is `!Send`. The session pushes snapshots
//! into a signal; the view only reads that signal. The session is created in
//! an effect so SSR renders the neutral unliked state and hydration takes over.

#[cfg(test)]
#[path = "like_counter_test.rs"]
mod like_counter_test;

use leptos::prelude::*;

use crate::net::likes::{HttpLikesBackend, LikesEndpoints};
use crate::state::like_session::LikeSession;
use crate::state::likes::LikeState;
use crate::state::ui::UiState;
use crate::util::cache::PersistentCache;
use crate::util::schedule::BrowserScheduler;

type BrowserSession = LikeSession<HttpLikesBackend, BrowserScheduler>;

/// Count label; hidden while unknown or zero.
fn count_label(count: Option<u64>) -> String {
    match count {
        Some(n) if n > 0 => n.to_string(),
        _ => String::new(),
    }
}

fn button_class(liked: bool, shaking: bool) -> &'static str {
    match (liked, shaking) {
        (true, _) => "like-counter__button like-counter__button--liked",
        (false, true) => "like-counter__button like-counter__button--unliked shake-me",
        (false, false) => "like-counter__button like-counter__button--unliked",
    }
}

#[component]
pub fn LikeCounter(article_id: String) -> impl IntoView {
    let cache = expect_context::<PersistentCache>();
    let endpoints = expect_context::<LikesEndpoints>();
    let ui = expect_context::<RwSignal<UiState>>();

    let view_state = RwSignal::new(LikeState::new(article_id.clone(), ui.get_untracked().like_policy));
    let session = StoredValue::new_local(None::<BrowserSession>);

    Effect::new(move || {
        if session.with_value(Option::is_some) {
            return;
        }
        let live = LikeSession::new(
            article_id.clone(),
            ui.get_untracked().like_policy,
            cache.clone(),
            HttpLikesBackend::new(endpoints.clone()),
            BrowserScheduler,
            move |state: &LikeState| view_state.set(state.clone()),
        );
        let fetch = live.mount();
        session.set_value(Some(live));
        leptos::task::spawn_local(fetch);
    });

    on_cleanup(move || {
        if let Some(Some(live)) = session.try_update_value(Option::take) {
            live.unmount();
        }
    });

    let on_click = move |_| {
        let registration = session.with_value(|live| live.as_ref().and_then(BrowserSession::click));
        if let Some(registration) = registration {
            leptos::task::spawn_local(registration);
        }
    };

    let liked = move || view_state.with(LikeState::is_liked);

    view! {
        <div class="like-counter">
            <button
                class=move || view_state.with(|s| button_class(s.is_liked(), s.shaking))
                on:click=on_click
                aria-pressed=move || liked().to_string()
                aria-label="Like this article"
                title=move || if liked() { "Thanks for the like!" } else { "Like this article" }
            >
                {move || if liked() { "♥" } else { "♡" }}
            </button>
            <span class="like-counter__count">{move || view_state.with(|s| count_label(s.count))}</span>
        </div>
    }
}
