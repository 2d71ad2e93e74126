//! Networking modules for the blog's HTTP and websocket endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` fetches article content, `likes` talks to the like counter backend.
//! Wire types come from `blog-wire`.

pub mod api;
pub mod likes;
