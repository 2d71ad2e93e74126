//! Site header with the home link and theme toggle.

use leptos::prelude::*;

use crate::components::dark_mode_toggle::DarkModeToggle;

#[component]
pub fn SiteHeader(#[prop(into)] title: String) -> impl IntoView {
    view! {
        <header class="header">
            <a class="header__title" href="/">{title}</a>
            <span class="header__spacer"></span>
            <DarkModeToggle/>
        </header>
    }
}
