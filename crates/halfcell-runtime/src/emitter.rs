#![forbid(unsafe_code)]

//! Priority-ordered event emitter with deferred dispatch.
//!
//! Listeners are registered per event tag with a priority and a once flag.
//! [`EventEmitter::emit`] selects the listeners for a tag, orders them by
//! descending priority (registration order on ties) and pushes one task per
//! listener onto the [`TaskQueue`]. Nothing runs inside `emit` itself.
//!
//! # Once-listeners
//!
//! With [`OncePolicy::FiredOnly`] (the default) an emission removes the
//! once-listeners it scheduled. [`OncePolicy::PurgeAll`] keeps the older
//! behaviour where every emission removes every once-listener in the
//! registry, whatever its tag.
//!
//! # Example
//!
//! ```
//! use halfcell_runtime::emitter::EventEmitter;
//!
//! let mut emitter: EventEmitter<&str, u32> = EventEmitter::new();
//! emitter.on("tick", |n: &u32| assert_eq!(*n, 7));
//! assert_eq!(emitter.emit(&"tick", 7), 1);
//! assert_eq!(emitter.run_pending(), 1);
//! ```

use std::fmt;
use std::rc::Rc;

use crate::task_queue::TaskQueue;

/// Shared listener callback. Two handles are equal when they point to the
/// same closure.
pub struct Callback<P>(Rc<dyn Fn(&P)>);

impl<P> Callback<P> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&P) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    #[inline]
    pub fn call(&self, payload: &P) {
        (self.0)(payload);
    }
}

impl<P> Clone for Callback<P> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<P> PartialEq for Callback<P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<P> Eq for Callback<P> {}

impl<P> fmt::Debug for Callback<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Which tags an unsubscribe or count applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<E> {
    /// Every tag.
    Any,
    /// One tag.
    Event(E),
}

impl<E: PartialEq> Selector<E> {
    /// Whether `event` falls under this selector.
    pub fn matches(&self, event: &E) -> bool {
        match self {
            Self::Any => true,
            Self::Event(e) => e == event,
        }
    }
}

impl<E> From<E> for Selector<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// How an emission treats once-listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OncePolicy {
    /// Remove the once-listeners scheduled by this emission.
    #[default]
    FiredOnly,
    /// Remove every once-listener in the registry, whatever its tag.
    PurgeAll,
}

struct Listener<E, P> {
    event: E,
    callback: Callback<P>,
    priority: i32,
    once: bool,
}

/// Registry of listeners keyed by event tag `E`, carrying payloads `P`.
pub struct EventEmitter<E, P> {
    listeners: Vec<Listener<E, P>>,
    queue: TaskQueue,
    once_policy: OncePolicy,
}

impl<E, P> Default for EventEmitter<E, P> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            queue: TaskQueue::new(),
            once_policy: OncePolicy::default(),
        }
    }
}

impl<E: PartialEq, P: 'static> EventEmitter<E, P> {
    /// Empty emitter with its own task queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how once-listeners are removed.
    #[must_use]
    pub fn with_once_policy(mut self, policy: OncePolicy) -> Self {
        self.once_policy = policy;
        self
    }

    /// Dispatch onto a shared task queue.
    #[must_use]
    pub fn with_queue(mut self, queue: TaskQueue) -> Self {
        self.queue = queue;
        self
    }

    /// Active once-policy.
    pub fn once_policy(&self) -> OncePolicy {
        self.once_policy
    }

    /// The queue listener tasks are pushed onto.
    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Register `callback` for `event`.
    pub fn subscribe(&mut self, event: E, callback: Callback<P>, priority: i32, once: bool) {
        self.listeners.push(Listener {
            event,
            callback,
            priority,
            once,
        });
    }

    /// Register a closure with priority 0. Returns its handle for [`off`](Self::off).
    pub fn on(&mut self, event: E, f: impl Fn(&P) + 'static) -> Callback<P> {
        self.on_with_priority(event, 0, f)
    }

    /// Register a closure with the given priority.
    pub fn on_with_priority(
        &mut self,
        event: E,
        priority: i32,
        f: impl Fn(&P) + 'static,
    ) -> Callback<P> {
        let callback = Callback::new(f);
        self.subscribe(event, callback.clone(), priority, false);
        callback
    }

    /// Register a closure removed after its first dispatch.
    pub fn once(&mut self, event: E, f: impl Fn(&P) + 'static) -> Callback<P> {
        self.once_with_priority(event, 0, f)
    }

    /// Once-listener with the given priority.
    pub fn once_with_priority(
        &mut self,
        event: E,
        priority: i32,
        f: impl Fn(&P) + 'static,
    ) -> Callback<P> {
        let callback = Callback::new(f);
        self.subscribe(event, callback.clone(), priority, true);
        callback
    }

    /// Remove listeners.
    ///
    /// Without a callback every listener under `selector` goes. With one,
    /// only listeners under `selector` holding that exact callback go.
    /// Returns the number removed.
    pub fn off(&mut self, selector: impl Into<Selector<E>>, callback: Option<&Callback<P>>) -> usize {
        let selector = selector.into();
        let before = self.listeners.len();
        self.listeners.retain(|listener| {
            let selected = selector.matches(&listener.event);
            let same_callback = callback.is_none_or(|cb| *cb == listener.callback);
            !(selected && same_callback)
        });
        before - self.listeners.len()
    }

    /// Number of listeners under `selector`.
    pub fn listener_count(&self, selector: impl Into<Selector<E>>) -> usize {
        let selector = selector.into();
        self.listeners
            .iter()
            .filter(|listener| selector.matches(&listener.event))
            .count()
    }

    /// Schedule every listener of `event` with `payload`.
    ///
    /// Tasks are queued by descending priority, ties in registration order.
    /// Returns the number of tasks queued.
    pub fn emit(&mut self, event: &E, payload: P) -> usize {
        let mut selected: Vec<usize> = self
            .listeners
            .iter()
            .enumerate()
            .filter(|(_, listener)| listener.event == *event)
            .map(|(index, _)| index)
            .collect();
        selected.sort_by(|&a, &b| self.listeners[b].priority.cmp(&self.listeners[a].priority));

        let payload = Rc::new(payload);
        for &index in &selected {
            let callback = self.listeners[index].callback.clone();
            let payload = Rc::clone(&payload);
            self.queue.push(move || callback.call(&payload));
        }

        let purged = match self.once_policy {
            OncePolicy::FiredOnly => {
                // Every listener registered under `event` was scheduled above.
                let before = self.listeners.len();
                self.listeners
                    .retain(|listener| !(listener.once && listener.event == *event));
                before - self.listeners.len()
            }
            OncePolicy::PurgeAll => {
                let before = self.listeners.len();
                self.listeners.retain(|listener| !listener.once);
                before - self.listeners.len()
            }
        };

        tracing::trace!(scheduled = selected.len(), purged, "event emitted");
        selected.len()
    }

    /// Run queued listener tasks. See [`TaskQueue::run_pending`].
    pub fn run_pending(&self) -> usize {
        self.queue.run_pending()
    }
}

impl<E, P> fmt::Debug for EventEmitter<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .field("once_policy", &self.once_policy)
            .finish()
    }
}
