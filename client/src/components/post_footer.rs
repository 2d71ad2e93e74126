//! Footer under a post: like counter and share link.

use leptos::prelude::*;

use blog_wire::ArticleRef;

use crate::components::like_counter::LikeCounter;
use crate::state::ui::UiState;
use crate::util::share::{page_origin, tweet_url};

#[component]
pub fn PostFooter(article: ArticleRef) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let article_id = article.article_id.clone();
    let share_href = move || tweet_url(&page_origin(), &article, ui.with(|u| u.share_via.clone()).as_deref());

    view! {
        <footer class="post-footer">
            <LikeCounter article_id=article_id/>
            <a class="post-footer__share" href=share_href target="_blank" rel="noopener noreferrer">
                "Share on Twitter"
            </a>
        </footer>
    }
}
