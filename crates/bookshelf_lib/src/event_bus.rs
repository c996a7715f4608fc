//! In-process, topic-keyed publish/subscribe.
//!
//! Every call to [`EventBus::subscribe`] registers a fresh listener backed by
//! its own unbounded channel. [`EventBus::publish`] pushes the event into the
//! channel of every listener currently registered on the event's topic, and
//! drops it when there are none. Nothing is buffered on behalf of future
//! listeners, so a listener only ever sees events published after it
//! subscribed. Dropping the returned [`EventStream`] unregisters the listener.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};

use bookshelf_common_types::{Author, Book, Topic};
use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::{metrics, PrometheusMetrics};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AuthorAdded(Author),
    BookAdded(Book),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::AuthorAdded(_) => Topic::AuthorAdded,
            Event::BookAdded(_) => Topic::BookAdded,
        }
    }
}

type ListenerId = u64;

struct Listener {
    id: ListenerId,
    tx: mpsc::UnboundedSender<Event>,
}

struct Registry {
    next_listener_id: ListenerId,
    listeners: HashMap<Topic, Vec<Listener>>,
    metrics: &'static PrometheusMetrics,
}

impl Registry {
    fn update_gauge(&self, topic: Topic) {
        let count = self.listeners.get(&topic).map_or(0, Vec::len);
        self.metrics
            .active_subscriptions
            .with_label_values(&[topic.as_ref()])
            .set(count as i64);
    }
}

/// Cheaply cloneable handle to a shared listener registry.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_metrics(metrics())
    }

    pub(crate) fn with_metrics(metrics: &'static PrometheusMetrics) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_listener_id: 0,
                listeners: HashMap::new(),
                metrics,
            })),
        }
    }

    /// Delivers `event` to every listener registered on its topic and returns
    /// how many of them received it.
    ///
    /// Concurrent publishers are delivered in the order they acquire the
    /// registry lock. Callers that need delivery order to follow creation
    /// order must publish under the same lock they create under.
    pub fn publish(&self, event: Event) -> usize {
        let topic = event.topic();
        let mut registry = self.registry.lock();

        let listeners = registry.listeners.entry(topic).or_default();
        // Sends only fail when the receiving half is gone.
        listeners.retain(|listener| listener.tx.send(event.clone()).is_ok());
        let delivered = listeners.len();
        registry.update_gauge(topic);

        registry
            .metrics
            .events_published
            .with_label_values(&[topic.as_ref()])
            .inc();
        if delivered == 0 {
            registry
                .metrics
                .events_dropped
                .with_label_values(&[topic.as_ref()])
                .inc();
            debug!(%topic, "Event dropped, no listeners");
        } else {
            trace!(%topic, delivered, "Event published");
        }

        delivered
    }

    /// Registers a new listener on `topic`. The returned stream yields every
    /// event published on `topic` from now on, in publish order.
    pub fn subscribe(&self, topic: Topic) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut registry = self.registry.lock();
        let id = registry.next_listener_id;
        registry.next_listener_id += 1;
        registry
            .listeners
            .entry(topic)
            .or_default()
            .push(Listener { id, tx });
        registry.update_gauge(topic);

        debug!(%topic, listener_id = id, "Listener registered");
        EventStream {
            topic,
            id,
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Authors created from now on.
    pub fn authors_added(&self) -> impl Stream<Item = Author> + Send + 'static {
        self.subscribe(Topic::AuthorAdded)
            .filter_map(|event| match event {
                Event::AuthorAdded(author) => ready(Some(author)),
                _ => ready(None),
            })
    }

    /// Books created from now on.
    pub fn books_added(&self) -> impl Stream<Item = Book> + Send + 'static {
        self.subscribe(Topic::BookAdded)
            .filter_map(|event| match event {
                Event::BookAdded(book) => ready(Some(book)),
                _ => ready(None),
            })
    }

    pub fn listener_count(&self, topic: Topic) -> usize {
        self.registry
            .lock()
            .listeners
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

/// A single listener's view of the bus. Ends when the bus itself is dropped.
pub struct EventStream {
    topic: Topic,
    id: ListenerId,
    rx: mpsc::UnboundedReceiver<Event>,
    registry: Weak<Mutex<Registry>>,
}

impl Stream for EventStream {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };

        let mut registry = registry.lock();
        if let Some(listeners) = registry.listeners.get_mut(&self.topic) {
            listeners.retain(|listener| listener.id != self.id);
        }
        registry.update_gauge(self.topic);

        debug!(topic = %self.topic, listener_id = self.id, "Listener unregistered");
    }
}
