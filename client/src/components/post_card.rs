//! Listing card for one article on the blog index.

use leptos::prelude::*;

use blog_wire::ArticleSummary;

use crate::net::api::TermKind;

#[component]
pub fn PostCard(article: ArticleSummary) -> impl IntoView {
    let ArticleSummary { title, excerpt, slug, date, category, tags, .. } = article;
    let has_category = !category.is_empty();
    let category_path = TermKind::Categories.term_path(&category);

    view! {
        <article class="post-card">
            <a class="post-card__title" href=slug>{title}</a>
            <div class="post-card__meta">
                <time class="post-card__date">{date}</time>
                <Show when=move || has_category>
                    <a class="post-card__category" href=category_path.clone()>{category.clone()}</a>
                </Show>
            </div>
            <p class="post-card__excerpt">{excerpt}</p>
            <ul class="post-card__tags">
                {tags
                    .into_iter()
                    .map(|tag| {
                        let path = TermKind::Tags.term_path(&tag);
                        view! {
                            <li class="post-card__tag">
                                <a href=path>{tag}</a>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </article>
    }
}
