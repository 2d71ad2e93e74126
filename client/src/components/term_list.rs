//! Tag or category counts, each linking to its listing page.

use leptos::prelude::*;

use blog_wire::TermCount;

use crate::net::api::TermKind;

#[component]
pub fn TermList(kind: TermKind, terms: RwSignal<Vec<TermCount>>) -> impl IntoView {
    view! {
        <Show when=move || terms.with(|t| !t.is_empty())>
            <section class="term-list">
                <h2 class="term-list__heading">
                    <a href=kind.index_path()>{kind.heading()}</a>
                </h2>
                <ul>
                    {move || {
                        terms
                            .get()
                            .into_iter()
                            .map(|term| {
                                let path = kind.term_path(&term.name);
                                view! {
                                    <li class="term-list__item">
                                        <a href=path>{term.name}</a>
                                        <span class="term-list__count">{format!(" ({})", term.count)}</span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </ul>
            </section>
        </Show>
    }
}
