//! # blog-client
//!
//! Leptos + WASM frontend for the blog: article pages, the like counter
//! widget and dark mode.
//!
//! The like counter is split into a pure state machine (`state::likes`), a
//! session that binds it to storage, network and timers
//! (`state::like_session`), and the `LikeCounter` component that renders it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
