//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render blog chrome and the like counter while reading shared
//! state from Leptos context providers.

pub mod dark_mode_toggle;
pub mod header;
pub mod like_counter;
pub mod post_card;
pub mod post_footer;
pub mod term_list;
