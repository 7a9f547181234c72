//! # Reducer Stores
//!
//! A [`Store`] owns one context value and changes it only by applying events
//! through a [`Reducer`]:
//!
//! ```text
//! dispatch(event) → [serialize] → reduce(&context, event) → publish snapshot
//! ```
//!
//! Snapshots are immutable `Arc<Context>` values published through a
//! [`Dynamic`] cell, so readers and subscribers always observe either the
//! previous or the next context, never a partial update.

use crate::reactive::{Dynamic, DynamicLink, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "signals")]
use futures_signals::signal::{Mutable, MutableSignalCloned};

/// An event accepted by a store.
pub trait StoreEvent: Send + 'static {
    /// Stable upper-case name of the event, used in logs.
    fn kind(&self) -> &'static str;
}

/// Pure transition function over a context.
///
/// `reduce` must be total: every event yields a context. Events that refer
/// to something absent (an unknown id, a stopped operation) reduce to an
/// unchanged context.
pub trait Reducer: Send + Sync + 'static {
    /// Data held by the store.
    type Context: Clone + Send + Sync + 'static;
    /// Events the store accepts.
    type Event: StoreEvent;

    /// Store name used in logs.
    const NAME: &'static str;

    /// Compute the context that results from applying `event`.
    fn reduce(&self, context: &Self::Context, event: Self::Event) -> Self::Context;
}

/// Serialized event processor over a single context.
pub struct Store<R: Reducer> {
    reducer: R,
    state: Dynamic<Arc<R::Context>>,
    /// Held across reduce, publish and the signal mirror so both see
    /// events in the same order.
    dispatch_lock: Mutex<()>,
    #[cfg(feature = "signals")]
    mirror: Mutable<Arc<R::Context>>,
}

impl<R: Reducer> Store<R> {
    /// Create a store seeded with `initial`.
    pub fn new(reducer: R, initial: R::Context) -> Self {
        let initial = Arc::new(initial);
        Self {
            reducer,
            #[cfg(feature = "signals")]
            mirror: Mutable::new(initial.clone()),
            state: Dynamic::new(initial),
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Apply one event and return the resulting snapshot.
    ///
    /// Concurrent callers are serialized: each event sees the context left by
    /// the previous one, in the order the lock was acquired.
    pub fn dispatch(&self, event: R::Event) -> Arc<R::Context> {
        let _serial = self.dispatch_lock.lock();
        let kind = event.kind();

        let version = self
            .state
            .update(|current| Arc::new(self.reducer.reduce(current, event)));
        let next = self.state.get();

        #[cfg(feature = "signals")]
        self.mirror.set(next.clone());

        tracing::trace!(store = R::NAME, event = kind, version, "dispatched");
        next
    }

    /// Apply several events in order, returning the final snapshot.
    pub fn dispatch_all<I>(&self, events: I) -> Arc<R::Context>
    where
        I: IntoIterator<Item = R::Event>,
    {
        let mut last = self.snapshot();
        for event in events {
            last = self.dispatch(event);
        }
        last
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<R::Context> {
        self.state.get()
    }

    /// Run `f` against the current context without cloning the snapshot.
    pub fn read<T>(&self, f: impl FnOnce(&R::Context) -> T) -> T {
        self.state.with(|snapshot| f(snapshot))
    }

    /// Number of events applied so far.
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Poll-based subscription to snapshot changes.
    pub fn subscribe(&self) -> Subscription<Arc<R::Context>> {
        self.state.subscribe()
    }

    /// Derive a read-only view of the context.
    ///
    /// The derived cell starts at `f(current snapshot)` and is refreshed each
    /// time `propagate()` is called on the returned link after a dispatch.
    pub fn select<U, F>(&self, f: F) -> (Dynamic<U>, DynamicLink<Arc<R::Context>, U, F>)
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(Arc<R::Context>) -> U + Send + Sync + 'static,
    {
        self.state.map(f)
    }

    /// The reducer driving this store.
    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Signal of snapshots for async consumers.
    #[cfg(feature = "signals")]
    pub fn signal(&self) -> MutableSignalCloned<Arc<R::Context>> {
        self.mirror.signal_cloned()
    }
}

impl<R> std::fmt::Debug for Store<R>
where
    R: Reducer,
    R::Context: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &R::NAME)
            .field("version", &self.version())
            .field("context", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum CounterEvent {
        Add(i64),
        Reset,
    }

    impl StoreEvent for CounterEvent {
        fn kind(&self) -> &'static str {
            match self {
                Self::Add(_) => "ADD",
                Self::Reset => "RESET",
            }
        }
    }

    struct Counter;

    impl Reducer for Counter {
        type Context = i64;
        type Event = CounterEvent;
        const NAME: &'static str = "counter";

        fn reduce(&self, context: &i64, event: CounterEvent) -> i64 {
            match event {
                CounterEvent::Add(n) => context + n,
                CounterEvent::Reset => 0,
            }
        }
    }

    #[test]
    fn test_dispatch_returns_new_snapshot() {
        let store = Store::new(Counter, 1);
        assert_eq!(*store.dispatch(CounterEvent::Add(2)), 3);
        assert_eq!(*store.snapshot(), 3);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_old_snapshot_is_not_mutated() {
        let store = Store::new(Counter, 0);
        let before = store.snapshot();
        store.dispatch(CounterEvent::Add(5));
        assert_eq!(*before, 0);
    }

    #[test]
    fn test_dispatch_all_applies_in_order() {
        let store = Store::new(Counter, 0);
        let last = store.dispatch_all([
            CounterEvent::Add(3),
            CounterEvent::Reset,
            CounterEvent::Add(7),
        ]);
        assert_eq!(*last, 7);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn test_subscribe_sees_dispatches() {
        let store = Store::new(Counter, 0);
        let mut sub = store.subscribe();
        assert!(sub.poll().is_none());

        store.dispatch(CounterEvent::Add(1));
        assert_eq!(sub.poll().as_deref(), Some(&1));
    }

    #[test]
    fn test_read_sees_latest_context() {
        let store = Store::new(Counter, 2);
        store.dispatch(CounterEvent::Add(3));
        assert_eq!(store.read(|n| n * 10), 50);
    }

    #[test]
    fn test_select_derives_view() {
        let store = Store::new(Counter, 4);
        let (is_even, mut link) = store.select(|n| *n % 2 == 0);
        assert!(is_even.get());

        store.dispatch(CounterEvent::Add(1));
        assert!(link.propagate());
        assert!(!is_even.get());
    }

    #[test]
    fn test_concurrent_dispatch_is_serialized() {
        let store = Arc::new(Store::new(Counter, 0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.dispatch(CounterEvent::Add(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*store.snapshot(), 800);
        assert_eq!(store.version(), 800);
    }

    #[cfg(feature = "signals")]
    #[test]
    fn test_signal_yields_latest_snapshot() {
        use futures::StreamExt;
        use futures_signals::signal::SignalExt;

        let store = Store::new(Counter, 0);
        let mut stream = store.signal().to_stream();
        store.dispatch(CounterEvent::Add(9));

        let first = futures::executor::block_on(stream.next());
        assert_eq!(first.as_deref(), Some(&9));
    }
}
