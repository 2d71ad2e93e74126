//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `likes` holds the pure like counter transitions, `like_session` binds them
//! to storage, network and timers, and `ui` carries page chrome.

pub mod like_session;
pub mod likes;
pub mod ui;
