//! Taxonomy pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes `/tags`, `/categories`, `/tags/:term` and `/categories/:term`.
//! The index pages list every term with its article count; the term pages
//! list the articles filed under one term, newest first.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use blog_wire::{ArticleSummary, TermCount};

use crate::components::header::SiteHeader;
use crate::components::post_card::PostCard;
use crate::components::term_list::TermList;
use crate::net::api::{TermKind, fetch_term_articles, fetch_terms};

#[component]
pub fn TermsPage(kind: TermKind) -> impl IntoView {
    let terms = RwSignal::new(Vec::<TermCount>::new());

    Effect::new(move || {
        leptos::task::spawn_local(async move {
            if let Some(list) = fetch_terms(kind).await {
                terms.set(list);
            }
        });
    });

    view! {
        <div class="blog-page">
            <SiteHeader title="Blog"/>
            <main class="blog-page__main">
                <TermList kind=kind terms=terms/>
            </main>
        </div>
    }
}

#[derive(Clone, Debug, PartialEq)]
enum TermLoad {
    Loading,
    Missing,
    Ready(Vec<ArticleSummary>),
}

#[component]
pub fn TermPage(kind: TermKind) -> impl IntoView {
    let params = use_params_map();
    let term = move || params.with(|p| p.get("term").unwrap_or_default());
    let load = RwSignal::new(TermLoad::Loading);

    Effect::new(move || {
        let term = term();
        load.set(TermLoad::Loading);
        leptos::task::spawn_local(async move {
            let next = match fetch_term_articles(kind, &term).await {
                Some(mut list) => {
                    list.reverse();
                    TermLoad::Ready(list)
                }
                None => TermLoad::Missing,
            };
            load.set(next);
        });
    });

    view! {
        <div class="blog-page">
            <SiteHeader title="Blog"/>
            <main class="blog-page__main">
                <h1 class="blog-page__heading">
                    <a href=kind.index_path()>{kind.heading()}</a>
                    {move || format!(": {}", term())}
                </h1>
                {move || match load.get() {
                    TermLoad::Loading => view! { <p>"Loading articles..."</p> }.into_any(),
                    TermLoad::Missing => view! { <p class="blog-page__error">"Nothing filed here."</p> }.into_any(),
                    TermLoad::Ready(list) => view! {
                        <div class="blog-page__cards">
                            {list.into_iter().map(|article| view! { <PostCard article=article/> }).collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}
