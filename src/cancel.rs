//! One-shot cooperative cancellation.
//!
//! A [`CancellationSource`] owns the signal; [`CancellationToken`]s observe it
//! and [`Registration`] handles let callbacks be withdrawn. Cancellation is a
//! synchronous broadcast: [`cancel`](CancellationSource::cancel) runs every
//! registered callback on the calling thread, in registration order, before
//! returning. Nothing is scheduled or awaited.
//!
//! ## States
//!
//! ```text
//!   ┌────────┐   cancel()    ┌───────────┐
//!   │  Live  │ ────────────► │ Cancelled │ ──┐ cancel() again: no-op
//!   └────────┘               └───────────┘ ◄─┘
//!
//!   Live:       register(cb) → stored, fired later by cancel()
//!   Cancelled:  register(cb) → cb runs immediately, inert handle returned
//! ```
//!
//! ## Ownership
//!
//! ```text
//!   CancellationSource ──Rc──► State { cancelled, callbacks: BTreeMap<id, cb> }
//!   CancellationToken  ──Rc──►   ▲
//!   Registration       ─Weak─────┘   (never keeps the state alive)
//! ```
//!
//! The types are single-threaded (`!Send`); long-running work polls
//! [`throw_if_requested`](CancellationToken::throw_if_requested) and
//! propagates [`Cancelled`] with `?`.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use shufflekit::cancel::{CancellationSource, CancellationToken};
//! use shufflekit::error::Cancelled;
//!
//! fn place_items(token: &CancellationToken, rounds: u32) -> Result<u32, Cancelled> {
//!     let mut placed = 0;
//!     for _ in 0..rounds {
//!         token.throw_if_requested()?;
//!         placed += 1;
//!     }
//!     Ok(placed)
//! }
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//!
//! let notified = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&notified);
//! token.register(move || flag.set(true));
//!
//! assert_eq!(place_items(&token, 10), Ok(10));
//! source.cancel();
//! assert!(notified.get());
//! assert_eq!(place_items(&token, 10), Err(Cancelled));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use log::debug;

use crate::error::Cancelled;

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct State {
    cancelled: bool,
    next_id: u64,
    callbacks: BTreeMap<u64, Callback>,
}

/// Owner of a cancellation signal.
pub struct CancellationSource {
    state: Rc<RefCell<State>>,
}

impl CancellationSource {
    /// Creates a live source.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    /// Returns a token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: TokenInner::Source(Rc::clone(&self.state)),
        }
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    /// Requests cancellation.
    ///
    /// The first call flips the source to cancelled and then runs every
    /// registered callback once, oldest registration first. Later calls do
    /// nothing. Callbacks run after the internal state is released, so they
    /// may query tokens or register further callbacks (which fire at once).
    pub fn cancel(&self) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            if state.cancelled {
                return;
            }
            state.cancelled = true;
            mem::take(&mut state.callbacks)
        };
        debug!(
            "cancellation requested; firing {} callback(s)",
            callbacks.len()
        );
        for callback in callbacks.into_values() {
            callback();
        }
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CancellationSource")
            .field("cancelled", &state.cancelled)
            .field("registered", &state.callbacks.len())
            .finish()
    }
}

#[derive(Clone)]
enum TokenInner {
    Never,
    Always,
    Source(Rc<RefCell<State>>),
}

/// Read-only handle observing a cancellation signal.
#[derive(Clone)]
pub struct CancellationToken {
    inner: TokenInner,
}

impl CancellationToken {
    /// A token that is never cancelled. Registrations are inert.
    pub const fn none() -> Self {
        Self {
            inner: TokenInner::Never,
        }
    }

    /// A token that is always cancelled.
    pub const fn cancelled() -> Self {
        Self {
            inner: TokenInner::Always,
        }
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_requested(&self) -> bool {
        match &self.inner {
            TokenInner::Never => false,
            TokenInner::Always => true,
            TokenInner::Source(state) => state.borrow().cancelled,
        }
    }

    /// Returns `false` for tokens that can never become cancelled.
    pub fn can_be_cancelled(&self) -> bool {
        !matches!(self.inner, TokenInner::Never)
    }

    /// Returns `Err(Cancelled)` if cancellation has been requested.
    pub fn throw_if_requested(&self) -> Result<(), Cancelled> {
        if self.is_requested() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Registers `callback` to run when cancellation is requested.
    ///
    /// If the token is already cancelled the callback runs immediately and
    /// the returned handle is inert.
    pub fn register(&self, callback: impl FnOnce() + 'static) -> Registration {
        let state = match &self.inner {
            TokenInner::Never => return Registration::inert(),
            TokenInner::Always => {
                callback();
                return Registration::inert();
            },
            TokenInner::Source(state) => state,
        };

        let mut guard = state.borrow_mut();
        if guard.cancelled {
            drop(guard);
            callback();
            return Registration::inert();
        }
        let id = guard.next_id;
        guard.next_id += 1;
        guard.callbacks.insert(id, Box::new(callback));
        Registration {
            state: Rc::downgrade(state),
            id,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("requested", &self.is_requested())
            .finish()
    }
}

/// Handle for withdrawing a registered callback.
#[derive(Debug, Clone)]
pub struct Registration {
    state: Weak<RefCell<State>>,
    id: u64,
}

impl Registration {
    fn inert() -> Self {
        Self {
            state: Weak::new(),
            id: 0,
        }
    }

    /// Withdraws the callback.
    ///
    /// Safe to call any number of times, and after the callback has fired or
    /// the source has been dropped.
    pub fn unregister(&self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().callbacks.remove(&self.id);
        }
    }

    /// Returns `true` while the callback is still waiting to fire.
    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().callbacks.contains_key(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use test_log::test;

    fn recorder() -> (
        Rc<RefCell<Vec<&'static str>>>,
        impl Fn(&'static str) -> Box<dyn FnOnce()>,
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn cancel_fires_callbacks_in_registration_order_once() {
        let (log, make) = recorder();
        let source = CancellationSource::new();
        let token = source.token();
        token.register(make("first"));
        token.register(make("second"));

        assert!(!token.is_requested());
        source.cancel();
        assert!(token.is_requested());
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        source.cancel();
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn unregister_before_cancel_prevents_firing() {
        let (log, make) = recorder();
        let source = CancellationSource::new();
        let token = source.token();
        let keep = token.register(make("keep"));
        let drop_me = token.register(make("drop"));

        assert!(drop_me.is_active());
        drop_me.unregister();
        drop_me.unregister();
        assert!(!drop_me.is_active());
        assert!(keep.is_active());

        source.cancel();
        assert_eq!(*log.borrow(), vec!["keep"]);
        assert!(!keep.is_active());
        keep.unregister();
    }

    #[test]
    fn throw_if_requested_signals_cancelled() {
        let source = CancellationSource::new();
        let token = source.token();
        assert_eq!(token.throw_if_requested(), Ok(()));
        source.cancel();
        assert_eq!(token.throw_if_requested(), Err(Cancelled));
        assert!(source.is_cancelled());
    }

    #[test]
    fn late_registration_fires_immediately() {
        let source = CancellationSource::new();
        source.cancel();

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let handle = source.token().register(move || counter.set(counter.get() + 1));
        assert_eq!(fired.get(), 1);
        assert!(!handle.is_active());
        handle.unregister();
    }

    #[test]
    fn callback_may_register_during_cancel() {
        let source = CancellationSource::new();
        let token = source.token();
        let fired = Rc::new(Cell::new(0));

        let inner_token = token.clone();
        let inner_fired = Rc::clone(&fired);
        token.register(move || {
            assert!(inner_token.is_requested());
            let counter = Rc::clone(&inner_fired);
            inner_token.register(move || counter.set(counter.get() + 10));
            inner_fired.set(inner_fired.get() + 1);
        });

        source.cancel();
        assert_eq!(fired.get(), 11);
    }

    #[test]
    fn none_token_is_never_requested() {
        let token = CancellationToken::none();
        assert!(!token.is_requested());
        assert!(!token.can_be_cancelled());
        assert_eq!(token.throw_if_requested(), Ok(()));

        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = token.register(move || flag.set(true));
        assert!(!handle.is_active());
        handle.unregister();
        assert!(!fired.get());
    }

    #[test]
    fn cancelled_token_is_always_requested() {
        let token = CancellationToken::cancelled();
        assert!(token.is_requested());
        assert_eq!(token.throw_if_requested(), Err(Cancelled));

        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        token.register(move || flag.set(true));
        assert!(fired.get());
    }

    #[test]
    fn registration_outliving_source_is_inert() {
        let source = CancellationSource::new();
        let handle = source.token().register(|| {});
        assert!(handle.is_active());
        drop(source);
        assert!(!handle.is_active());
        handle.unregister();
    }

    #[test]
    fn debug_output_reports_state() {
        let source = CancellationSource::new();
        source.token().register(|| {});
        let dbg = format!("{source:?}");
        assert!(dbg.contains("cancelled: false"));
        assert!(dbg.contains("registered: 1"));
        assert!(format!("{:?}", source.token()).contains("requested: false"));
    }
}
