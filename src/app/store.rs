//! Observable view state for the search screen.
//!
//! [`ViewStateStore`] holds two independent pieces of state, a loading flag
//! and the last request outcome, and notifies subscribers on every write.
//! It is single-writer: all mutation happens on the plugin's update tick.
//!
//! # Write ordering
//!
//! Completing a request publishes `Loading(false)` before the new state, so a
//! subscriber that sees "not loading" can rely on the final state following
//! immediately in the same tick.

use crate::request::RequestOutcome;
use std::fmt;
use std::sync::Arc;

/// Last known result of the screen's request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// No request has completed yet.
    Idle,
    /// The latest completed request succeeded.
    Success(T),
    /// The latest completed request failed.
    Error(String),
}

impl<T> ViewState<T> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// A single published write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent<T> {
    Loading(bool),
    /// Immutable snapshot of the state just written.
    State(Arc<ViewState<T>>),
}

/// Handle returned by [`ViewStateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&StoreEvent<T>)>;

/// Loading flag plus last outcome, with publish/subscribe.
///
/// # Example
///
/// ```
/// use bookfinder::app::store::{StoreEvent, ViewState, ViewStateStore};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut store = ViewStateStore::<u32>::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&log);
/// store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
///
/// store.start_request();
/// store.complete_success(3);
///
/// assert!(!store.loading());
/// assert_eq!(*store.state(), ViewState::Success(3));
/// assert_eq!(log.borrow().len(), 3);
/// ```
pub struct ViewStateStore<T> {
    loading: bool,
    state: Arc<ViewState<T>>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T> ViewStateStore<T> {
    /// Creates a store in the `Idle`, not-loading state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: false,
            state: Arc::new(ViewState::Idle),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Returns a cheap shared handle to the current state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ViewState<T>> {
        Arc::clone(&self.state)
    }

    /// Registers a listener for every subsequent write.
    ///
    /// Listeners run synchronously, in subscription order, inside the write
    /// that triggered them.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent<T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Marks a request as in flight.
    pub fn start_request(&mut self) {
        tracing::debug!(was_loading = self.loading, "request started");
        self.set_loading(true);
    }

    /// Records a successful outcome.
    pub fn complete_success(&mut self, payload: T) {
        self.finish(ViewState::Success(payload));
    }

    /// Records a failed outcome.
    pub fn complete_error(&mut self, message: String) {
        self.finish(ViewState::Error(message));
    }

    /// Routes a normalized outcome to the matching completion.
    pub fn apply(&mut self, outcome: RequestOutcome<T>) {
        let next = outcome.dispatch(ViewState::Success, ViewState::Error);
        self.finish(next);
    }

    fn finish(&mut self, next: ViewState<T>) {
        if !self.loading {
            tracing::debug!("outcome delivered with no request in flight");
        }
        self.set_loading(false);

        tracing::debug!(state = next.name(), "view state replaced");
        self.state = Arc::new(next);
        let event = StoreEvent::State(Arc::clone(&self.state));
        self.publish(&event);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.publish(&StoreEvent::Loading(loading));
    }

    fn publish(&mut self, event: &StoreEvent<T>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl<T> Default for ViewStateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewStateStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateStore")
            .field("loading", &self.loading)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
