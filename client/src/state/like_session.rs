//! Lifecycle of one mounted like counter.
//!
//! DESIGN
//! ======
//! `LikeSession` wires a [`LikeState`] to the persistent cache, a
//! [`LikesBackend`] and a [`Scheduler`]. Every change goes through `mutate`,
//! which refuses updates after unmount and hands the listener a snapshot.
//! Timer and subscription callbacks only hold weak references, so dropping
//! the session tears everything down.
//!
//! TRADE-OFFS
//! ==========
//! Remote work is returned as futures instead of being spawned here. The
//! component drives them with `spawn_local`; tests drive them with
//! `block_on`. A registration that outlives the session still settles the
//! persisted flag but never reaches the listener.

#[cfg(test)]
#[path = "like_session_test.rs"]
mod like_session_test;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use blog_wire::VISITOR_ID_KEY;
use blog_wire::likes::like_flag_key;

use crate::net::likes::{LikeError, LikesBackend, Subscription};
use crate::state::likes::{ClickOutcome, LikePolicy, LikeState};
use crate::util::cache::PersistentCache;
use crate::util::schedule::{Scheduler, TimerHandle};

/// Idle period between attention shakes of an unliked control.
pub const SHAKE_EVERY: Duration = Duration::from_secs(10);
/// How long one shake lasts.
pub const SHAKE_FOR: Duration = Duration::from_secs(1);

/// Return the anonymous visitor id, creating and persisting one on first use.
pub fn ensure_visitor_id(cache: &PersistentCache) -> String {
    let existing: String = cache.read(VISITOR_ID_KEY, String::new());
    if !existing.is_empty() {
        return existing;
    }
    let id = uuid::Uuid::new_v4().simple().to_string();
    cache.write(VISITOR_ID_KEY, &id);
    id
}

type Listener = Box<dyn Fn(&LikeState)>;

struct SessionInner<B, S> {
    state: RefCell<LikeState>,
    cache: PersistentCache,
    backend: B,
    scheduler: S,
    alive: Cell<bool>,
    listener: Listener,
    idle: RefCell<Option<TimerHandle>>,
    shake_off: RefCell<Option<TimerHandle>>,
    subscription: RefCell<Option<Subscription>>,
}

/// One like counter bound to one article.
pub struct LikeSession<B, S> {
    inner: Rc<SessionInner<B, S>>,
}

impl<B, S> LikeSession<B, S>
where
    B: LikesBackend + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        article_id: impl Into<String>,
        policy: LikePolicy,
        cache: PersistentCache,
        backend: B,
        scheduler: S,
        listener: impl Fn(&LikeState) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                state: RefCell::new(LikeState::new(article_id, policy)),
                cache,
                backend,
                scheduler,
                alive: Cell::new(false),
                listener: Box::new(listener),
                idle: RefCell::new(None),
                shake_off: RefCell::new(None),
                subscription: RefCell::new(None),
            }),
        }
    }

    /// Load the persisted flag, subscribe to live counts and start the idle
    /// timer. The returned future performs the initial count fetch.
    pub fn mount(&self) -> impl Future<Output = ()> + use<B, S> {
        let inner = &self.inner;
        let visitor_id = ensure_visitor_id(&inner.cache);
        let article_id = inner.state.borrow().article_id.clone();
        let liked = inner.cache.read(&like_flag_key(&visitor_id, &article_id), false);

        inner.alive.set(true);
        inner.mutate(|state| state.load(visitor_id, liked));

        let weak = Rc::downgrade(inner);
        let subscription = inner.backend.subscribe_like_count(
            &article_id,
            Box::new(move |count| {
                if let Some(inner) = weak.upgrade() {
                    inner.mutate(|state| state.apply_remote_count(count));
                }
            }),
        );
        let previous = inner.subscription.borrow_mut().replace(subscription);
        drop(previous);

        let weak = Rc::downgrade(inner);
        async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Some(count) = inner.backend.fetch_like_count(&article_id).await {
                inner.mutate(|state| state.apply_remote_count(count));
            }
        }
    }

    /// Handle a click on the like control. Returns the registration to drive
    /// when the click produced one.
    pub fn click(&self) -> Option<impl Future<Output = ()> + use<B, S>> {
        let outcome = self.inner.mutate(LikeState::click)?;
        match outcome {
            ClickOutcome::Ignored => None,
            ClickOutcome::Unliked => {
                self.inner.persist_flag();
                None
            }
            ClickOutcome::Register => {
                self.inner.persist_flag();
                let inner = Rc::clone(&self.inner);
                let article_id = inner.state.borrow().article_id.clone();
                Some(async move {
                    let result = inner.backend.register_like(&article_id).await;
                    inner.settle(result);
                })
            }
        }
    }
}

impl<B, S> LikeSession<B, S> {
    /// Stop timers and the live subscription. Later updates are dropped.
    pub fn unmount(&self) {
        self.inner.alive.set(false);
        let subscription = self.inner.subscription.borrow_mut().take();
        let idle = self.inner.idle.borrow_mut().take();
        let shake_off = self.inner.shake_off.borrow_mut().take();
        drop((subscription, idle, shake_off));
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.alive.get()
    }

    #[must_use]
    pub fn state(&self) -> LikeState {
        self.inner.state.borrow().clone()
    }
}

impl<B, S> Drop for LikeSession<B, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<B, S> std::fmt::Debug for LikeSession<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LikeSession")
            .field("state", &*self.inner.state.borrow())
            .field("mounted", &self.inner.alive.get())
            .finish_non_exhaustive()
    }
}

impl<B, S> SessionInner<B, S>
where
    B: LikesBackend + 'static,
    S: Scheduler + 'static,
{
    /// Apply `f` while mounted, then resync the idle timer and notify.
    fn mutate<R>(self: &Rc<Self>, f: impl FnOnce(&mut LikeState) -> R) -> Option<R> {
        if !self.alive.get() {
            return None;
        }
        let (result, snapshot) = {
            let mut state = self.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.sync_idle(&snapshot);
        (self.listener)(&snapshot);
        Some(result)
    }

    fn sync_idle(self: &Rc<Self>, state: &LikeState) {
        if state.shake_allowed() {
            if self.idle.borrow().is_some() {
                return;
            }
            let weak = Rc::downgrade(self);
            let handle = self.scheduler.every(
                SHAKE_EVERY,
                Box::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.shake();
                    }
                }),
            );
            *self.idle.borrow_mut() = Some(handle);
        } else {
            let idle = self.idle.borrow_mut().take();
            let shake_off = self.shake_off.borrow_mut().take();
            drop((idle, shake_off));
        }
    }

    fn shake(self: &Rc<Self>) {
        if self.mutate(|state| state.set_shaking(true)).is_none() || !self.state.borrow().shaking {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.once(
            SHAKE_FOR,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.mutate(|state| state.set_shaking(false));
                }
            }),
        );
        let previous = self.shake_off.borrow_mut().replace(handle);
        drop(previous);
    }

    fn settle(self: &Rc<Self>, result: Result<(), LikeError>) {
        let ok = match result {
            Ok(()) => true,
            Err(e) => {
                leptos::logging::warn!("likes: registration failed for {}: {e}", self.state.borrow().article_id);
                false
            }
        };
        let reverted = match self.mutate(|state| state.registration_settled(ok)) {
            Some(reverted) => reverted,
            None => self.state.borrow_mut().registration_settled(ok),
        };
        if reverted {
            self.persist_flag();
        }
    }

    fn persist_flag(&self) {
        let state = self.state.borrow();
        if let Some(visitor_id) = state.visitor_id.as_deref() {
            self.cache.write(&like_flag_key(visitor_id, &state.article_id), &state.is_liked());
        }
    }
}
