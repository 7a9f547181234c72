//! Dynamic<T> - a versioned reactive cell
//!
//! The value and its version are updated under the same write guard, so a
//! reader never sees a value paired with a stale version.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct DynamicInner<T> {
    value: RwLock<T>,
    /// Incremented while the write guard on `value` is held.
    version: AtomicU64,
}

impl<T: Clone> DynamicInner<T> {
    fn read_versioned(&self) -> (T, u64) {
        let guard = self.value.read();
        (guard.clone(), self.version.load(Ordering::Acquire))
    }
}

/// A reactive value that can be observed for changes.
///
/// `Dynamic<T>` provides:
/// - `get()`: read the current value
/// - `set()` / `update()`: replace the value and bump the version
/// - `subscribe()`: a [`Subscription`] for polling changes
/// - `map()`: a derived `Dynamic<U>` kept current through a [`DynamicLink`]
///
/// Clones share the same underlying cell. `Dynamic<T>` is `Send + Sync`
/// whenever `T` is.
#[derive(Clone)]
pub struct Dynamic<T> {
    inner: Arc<DynamicInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Dynamic<T> {
    /// Create a new cell holding `value` at version 0.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(DynamicInner {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.read())
    }

    /// Number of writes since creation.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Replace the value and bump the version. Returns the new version.
    pub fn set(&self, value: T) -> u64 {
        let mut guard = self.inner.value.write();
        *guard = value;
        self.inner.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Replace the value with `f(current)` under a single write guard.
    ///
    /// Unlike a `get()` followed by `set()`, no other writer can land between
    /// the read and the write.
    pub fn update<F>(&self, f: F) -> u64
    where
        F: FnOnce(&T) -> T,
    {
        let mut guard = self.inner.value.write();
        let next = f(&guard);
        *guard = next;
        self.inner.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Subscribe to changes made after this call.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            source: self.inner.clone(),
            last_version: self.version(),
        }
    }

    /// Create a derived cell holding `f(value)`.
    ///
    /// The derived cell is initialised immediately; later source updates are
    /// carried over by calling [`DynamicLink::propagate`].
    ///
    /// ```rust
    /// use lumen_core::reactive::Dynamic;
    ///
    /// let counter = Dynamic::new(5);
    /// let (doubled, mut link) = counter.map(|x| x * 2);
    /// assert_eq!(doubled.get(), 10);
    ///
    /// counter.set(10);
    /// assert!(link.propagate());
    /// assert_eq!(doubled.get(), 20);
    /// ```
    pub fn map<U, F>(&self, f: F) -> (Dynamic<U>, DynamicLink<T, U, F>)
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source_sub = self.subscribe();
        let derived = Dynamic::new(f(source_sub.get()));

        let link = DynamicLink {
            source_sub,
            target: derived.clone(),
            transform: f,
        };

        (derived, link)
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Dynamic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (value, version) = self.inner.read_versioned();
        f.debug_struct("Dynamic")
            .field("value", &value)
            .field("version", &version)
            .finish()
    }
}

/// A polling subscription to a [`Dynamic`].
///
/// Version-based rather than queue-based: several writes between two polls
/// are observed as a single change carrying the latest value.
pub struct Subscription<T> {
    source: Arc<DynamicInner<T>>,
    last_version: u64,
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
    /// Whether the source has been written since the last poll.
    pub fn has_changed(&self) -> bool {
        self.source.version.load(Ordering::Acquire) > self.last_version
    }

    /// Return the latest value if the source changed since the last poll.
    pub fn poll(&mut self) -> Option<T> {
        if !self.has_changed() {
            return None;
        }
        let (value, version) = self.source.read_versioned();
        self.last_version = version;
        Some(value)
    }

    /// Current value regardless of whether it changed.
    pub fn get(&self) -> T {
        self.source.value.read().clone()
    }

    /// Current version of the source.
    pub fn source_version(&self) -> u64 {
        self.source.version.load(Ordering::Acquire)
    }

    /// Last version this subscription observed.
    pub fn last_observed_version(&self) -> u64 {
        self.last_version
    }
}

/// Sync link between a source [`Dynamic`] and a derived one.
pub struct DynamicLink<T, U, F>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    source_sub: Subscription<T>,
    target: Dynamic<U>,
    transform: F,
}

impl<T, U, F> DynamicLink<T, U, F>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    /// Recompute the derived value if the source changed.
    ///
    /// Returns `true` when the target was updated.
    pub fn propagate(&mut self) -> bool {
        match self.source_sub.poll() {
            Some(value) => {
                self.target.set((self.transform)(value));
                true
            }
            None => false,
        }
    }

    /// Whether the source changed since the last propagation.
    pub fn has_pending_update(&self) -> bool {
        self.source_sub.has_changed()
    }

    /// The derived cell.
    pub fn target(&self) -> &Dynamic<U> {
        &self.target
    }
}
