//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! theme, share links) from page and component logic.

pub mod cache;
pub mod dark_mode;
pub mod schedule;
pub mod share;
