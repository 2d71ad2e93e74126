//! Single article page with like counter, share link and neighbors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/posts/:slug`. The article body arrives as rendered HTML from the
//! content API. The footer is rebuilt per article so each post mounts its own
//! like counter session.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use blog_wire::{Article, Neighbor};

use crate::components::header::SiteHeader;
use crate::components::post_footer::PostFooter;
use crate::net::api::TermKind;

#[derive(Clone, Debug, PartialEq)]
enum PostLoad {
    Loading,
    Missing,
    Ready(Article),
}

#[component]
pub fn PostPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.with(|p| p.get("slug").unwrap_or_default());
    let load = RwSignal::new(PostLoad::Loading);

    Effect::new(move || {
        let slug = slug();
        load.set(PostLoad::Loading);
        leptos::task::spawn_local(async move {
            let next = match crate::net::api::fetch_article(&slug).await {
                Some(article) => PostLoad::Ready(article),
                None => PostLoad::Missing,
            };
            load.set(next);
        });
    });

    view! {
        <div class="post-page">
            <SiteHeader title="Blog"/>
            {move || match load.get() {
                PostLoad::Loading => view! { <p class="post-page__status">"Loading..."</p> }.into_any(),
                PostLoad::Missing => view! { <p class="post-page__status">"Article not found."</p> }.into_any(),
                PostLoad::Ready(article) => view! { <PostBody article=article/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn PostBody(article: Article) -> impl IntoView {
    let reference = article.reference();
    let Article { title, date, category, tags, body, prev, next, .. } = article;
    let category_path = TermKind::Categories.term_path(&category);

    view! {
        <article class="post">
            <h1 class="post__title">{title}</h1>
            <div class="post__meta">
                <time>{date}</time>
                <a class="post__category" href=category_path>{category}</a>
            </div>
            <ul class="post__tags">
                {tags
                    .into_iter()
                    .map(|tag| {
                        let path = TermKind::Tags.term_path(&tag);
                        view! { <li><a href=path>{tag}</a></li> }
                    })
                    .collect::<Vec<_>>()}
            </ul>
            <div class="post__body" inner_html=body></div>
            <PostFooter article=reference/>
            <nav class="post__neighbors">
                <NeighborLink neighbor=prev rel="prev"/>
                <NeighborLink neighbor=next rel="next"/>
            </nav>
        </article>
    }
}

#[component]
fn NeighborLink(neighbor: Option<Neighbor>, rel: &'static str) -> impl IntoView {
    neighbor.map(|n| {
        let arrow = if rel == "prev" { "← " } else { "→ " };
        view! {
            <a class=format!("post__neighbor post__neighbor--{rel}") href=n.path rel=rel>
                {arrow}
                {n.title}
            </a>
        }
    })
}
