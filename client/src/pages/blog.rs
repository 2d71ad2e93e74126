//! Blog index listing every published article.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes `/` and `/posts`. Fetches the article list and taxonomy counts from the
//! content API once hydrated; SSR renders the loading shell.

use leptos::prelude::*;

use blog_wire::{ArticleSummary, TermCount};

use crate::components::header::SiteHeader;
use crate::components::post_card::PostCard;
use crate::components::term_list::TermList;
use crate::net::api::TermKind;

#[component]
pub fn BlogPage() -> impl IntoView {
    let articles = RwSignal::new(None::<Vec<ArticleSummary>>);
    let tags = RwSignal::new(Vec::<TermCount>::new());
    let categories = RwSignal::new(Vec::<TermCount>::new());
    let failed = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::{fetch_articles, fetch_terms};

        leptos::task::spawn_local(async move {
            match fetch_articles().await {
                // Newest first on the index.
                Some(mut list) => {
                    list.reverse();
                    articles.set(Some(list));
                }
                None => failed.set(true),
            }
        });
        leptos::task::spawn_local(async move {
            if let Some(list) = fetch_terms(TermKind::Tags).await {
                tags.set(list);
            }
            if let Some(list) = fetch_terms(TermKind::Categories).await {
                categories.set(list);
            }
        });
    }

    view! {
        <div class="blog-page">
            <SiteHeader title="Blog"/>
            <main class="blog-page__main">
                <Show when=move || failed.get()>
                    <p class="blog-page__error">"Could not load articles."</p>
                </Show>
                <Show
                    when=move || articles.with(Option::is_some)
                    fallback=move || view! { <p>"Loading articles..."</p> }
                >
                    <div class="blog-page__cards">
                        {move || {
                            articles
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .map(|article| view! { <PostCard article=article/> })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </main>
            <aside class="blog-page__terms">
                <TermList kind=TermKind::Categories terms=categories/>
                <TermList kind=TermKind::Tags terms=tags/>
            </aside>
        </div>
    }
}
