//! Dark mode initialization and toggle.
//!
//! Reads the visitor's preference from the persistent cache and applies a
//! `data-theme` attribute to the `<html>` element. Toggle writes back to the
//! cache and updates that attribute.
//!
//! TRADE-OFFS
//! ==========
//! With no stored preference the system `prefers-color-scheme` decides; SSR
//! paths always render light to keep server output deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::util::cache::PersistentCache;

const STORAGE_KEY: &str = "dark-mode";

/// Read the dark mode preference.
///
/// Returns the stored choice when there is one, otherwise whether the system
/// prefers a dark color scheme.
pub fn read_preference(cache: &PersistentCache) -> bool {
    cache.read::<Option<bool>>(STORAGE_KEY, None).unwrap_or_else(system_prefers_dark)
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", if enabled { "dark" } else { "light" });
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Toggle dark mode and persist the new preference.
pub fn toggle(cache: &PersistentCache, current: bool) -> bool {
    let next = !current;
    apply(next);
    cache.write(STORAGE_KEY, &next);
    next
}
