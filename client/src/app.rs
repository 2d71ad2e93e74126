//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::likes::LikesEndpoints;
use crate::net::api::TermKind;
use crate::pages::{
    blog::BlogPage,
    post::PostPage,
    terms::{TermPage, TermsPage},
};
use crate::state::ui::UiState;
use crate::util::cache::PersistentCache;
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the persistent cache, likes endpoints and UI state, applies the
/// stored theme and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let cache = PersistentCache::browser();
    let ui = RwSignal::new(UiState::from_build_env());

    provide_context(cache.clone());
    provide_context(LikesEndpoints::default());
    provide_context(ui);

    // Runs once after hydration; the server always renders the light theme.
    Effect::new(move || {
        let enabled = dark_mode::read_preference(&cache);
        dark_mode::apply(enabled);
        ui.update(|u| u.dark_mode = enabled);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/blog.css"/>
        <Title text="Blog"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=BlogPage/>
                <Route path=StaticSegment("posts") view=BlogPage/>
                <Route path=(StaticSegment("posts"), ParamSegment("slug")) view=PostPage/>
                <Route path=StaticSegment("tags") view=|| view! { <TermsPage kind=TermKind::Tags/> }/>
                <Route
                    path=(StaticSegment("tags"), ParamSegment("term"))
                    view=|| view! { <TermPage kind=TermKind::Tags/> }
                />
                <Route
                    path=StaticSegment("categories")
                    view=|| view! { <TermsPage kind=TermKind::Categories/> }
                />
                <Route
                    path=(StaticSegment("categories"), ParamSegment("term"))
                    view=|| view! { <TermPage kind=TermKind::Categories/> }
                />
            </Routes>
        </Router>
    }
}
