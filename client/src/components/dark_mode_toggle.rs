//! Header button switching between light and dark themes.

use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::cache::PersistentCache;
use crate::util::dark_mode;

#[component]
pub fn DarkModeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let cache = expect_context::<PersistentCache>();

    view! {
        <button
            class="btn header__dark-toggle"
            on:click=move |_| {
                let next = dark_mode::toggle(&cache, ui.get_untracked().dark_mode);
                ui.update(|u| u.dark_mode = next);
            }
            title="Toggle dark mode"
        >
            {move || if ui.get().dark_mode { "☀" } else { "☾" }}
        </button>
    }
}
