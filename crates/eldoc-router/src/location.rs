//! Current location fragment and navigation events.
//!
//! [`Location`] abstracts the browser location: it reports the current
//! fragment, accepts fragment changes, and delivers a [`NavigationEvent`] to
//! every subscriber whenever the fragment changes. The router core depends
//! only on this trait, so tests drive it with synthetic fragments through
//! [`MemoryLocation`].

use std::sync::Mutex;
use std::sync::mpsc::{self, TryRecvError};

/// A fragment change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEvent {
    /// The new fragment, including the leading `#`.
    pub fragment: String,
}

/// Receiver for navigation events.
///
/// Events arrive in the order the fragment changed. Nothing is coalesced:
/// two quick changes produce two events.
pub struct NavigationEvents {
    rx: mpsc::Receiver<NavigationEvent>,
}

impl NavigationEvents {
    /// Create a new receiver from a channel receiver.
    pub(crate) fn new(rx: mpsc::Receiver<NavigationEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event (blocking).
    ///
    /// Returns `None` when the location is dropped.
    #[must_use]
    pub fn recv(&self) -> Option<NavigationEvent> {
        self.rx.recv().ok()
    }

    /// Try to receive an event without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<NavigationEvent> {
        self.rx.try_recv().ok()
    }

    /// Returns an iterator over events currently queued, without blocking.
    pub fn pending(&self) -> impl Iterator<Item = NavigationEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Handle keeping a navigation subscription alive.
///
/// Uses RAII pattern - dropping the handle unsubscribes. The location notices
/// the closed shutdown channel and stops delivering events.
pub struct Subscription {
    _shutdown: Option<mpsc::Sender<()>>,
}

impl Subscription {
    pub(crate) fn new(shutdown: mpsc::Sender<()>) -> Self {
        Self {
            _shutdown: Some(shutdown),
        }
    }

    /// Unsubscribe immediately (consumes the handle).
    pub fn stop(mut self) {
        self._shutdown.take();
    }
}

/// Source of the current fragment and of fragment change notifications.
pub trait Location: Send + Sync {
    /// Current fragment, including the leading `#`, or empty.
    fn fragment(&self) -> String;

    /// Navigate to a new fragment.
    ///
    /// Subscribers receive an event only if the fragment actually changed.
    fn set_fragment(&self, fragment: &str);

    /// Subscribe to fragment changes.
    ///
    /// Events flow until the returned [`Subscription`] is dropped.
    fn subscribe(&self) -> (NavigationEvents, Subscription);

    /// Reset the viewport after a navigation. No-op by default.
    fn scroll_to_top(&self) {}
}

struct Listener {
    tx: mpsc::Sender<NavigationEvent>,
    shutdown: mpsc::Receiver<()>,
}

impl Listener {
    fn is_closed(&self) -> bool {
        matches!(self.shutdown.try_recv(), Err(TryRecvError::Disconnected))
    }
}

#[derive(Default)]
struct LocationState {
    fragment: String,
    listeners: Vec<Listener>,
    scroll_resets: usize,
}

/// In-process [`Location`].
///
/// Stores the fragment in memory and delivers events synchronously to
/// subscriber channels on [`set_fragment`](Location::set_fragment).
#[derive(Default)]
pub struct MemoryLocation {
    state: Mutex<LocationState>,
}

impl MemoryLocation {
    /// Create a location with an initial fragment.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            state: Mutex::new(LocationState {
                fragment: normalize(fragment),
                ..LocationState::default()
            }),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        state.listeners.retain(|l| !l.is_closed());
        state.listeners.len()
    }

    /// Number of times [`scroll_to_top`](Location::scroll_to_top) was requested.
    #[must_use]
    pub fn scroll_resets(&self) -> usize {
        self.state.lock().unwrap().scroll_resets
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.state.lock().unwrap().fragment.clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let fragment = normalize(fragment);
        let mut state = self.state.lock().unwrap();
        if state.fragment == fragment {
            return;
        }
        state.fragment.clone_from(&fragment);

        let event = NavigationEvent { fragment };
        state
            .listeners
            .retain(|l| !l.is_closed() && l.tx.send(event.clone()).is_ok());
    }

    fn subscribe(&self) -> (NavigationEvents, Subscription) {
        let (tx, rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel();

        self.state.lock().unwrap().listeners.push(Listener {
            tx,
            shutdown: shutdown_rx,
        });

        (NavigationEvents::new(rx), Subscription::new(shutdown_tx))
    }

    fn scroll_to_top(&self) {
        self.state.lock().unwrap().scroll_resets += 1;
    }
}

/// Fragments are stored with a leading `#` unless empty.
fn normalize(fragment: &str) -> String {
    match fragment {
        "" | "#" => String::new(),
        f if f.starts_with('#') => f.to_owned(),
        f => format!("#{f}"),
    }
}
