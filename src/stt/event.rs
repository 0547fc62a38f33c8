use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bitflags::bitflags;

use super::RecognitionResult;

bitflags! {
    /// Selects which events a subscription receives.
    pub struct EventFilter: u32 {
        /// A recognition started talking to the service.
        const SESSION_STARTED = 0b0000_0001;
        /// A recognition finished talking to the service.
        const SESSION_STOPPED = 0b0000_0010;
        /// Both session events.
        const SESSION = 0b0000_0011;
        /// Intermediate hypotheses.
        const RECOGNIZING = 0b0000_0100;
        /// Final results, including results without a match.
        const RECOGNIZED = 0b0000_1000;
        /// Canceled recognitions, including backend errors.
        const CANCELED = 0b0001_0000;
        /// Every event.
        const ALL = Self::SESSION.bits
            | Self::RECOGNIZING.bits
            | Self::RECOGNIZED.bits
            | Self::CANCELED.bits;
    }
}

/// An event raised by a recognizer while it recognizes.
///
/// Events are delivered on the recognizer's worker thread, not on the thread that started the
/// recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The recognizer started a recognition on the given session.
    SessionStarted {
        /// Identifier of the backend session.
        session_id: String,
    },
    /// The recognition on the given session is over.
    SessionStopped {
        /// Identifier of the backend session.
        session_id: String,
    },
    /// The backend reported an intermediate hypothesis.
    Recognizing(RecognitionResult),
    /// The backend produced a final result.
    Recognized(RecognitionResult),
    /// The recognition was canceled by the caller or failed.
    Canceled(RecognitionResult),
}

impl RecognitionEvent {
    /// The filter flag that selects this event.
    pub fn kind(&self) -> EventFilter {
        match self {
            Self::SessionStarted { .. } => EventFilter::SESSION_STARTED,
            Self::SessionStopped { .. } => EventFilter::SESSION_STOPPED,
            Self::Recognizing(_) => EventFilter::RECOGNIZING,
            Self::Recognized(_) => EventFilter::RECOGNIZED,
            Self::Canceled(_) => EventFilter::CANCELED,
        }
    }

    /// Identifier of the backend session the event belongs to.
    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionStarted { session_id } | Self::SessionStopped { session_id } => session_id,
            Self::Recognizing(result) | Self::Recognized(result) | Self::Canceled(result) => {
                &result.session_id
            }
        }
    }

    /// The result carried by the event, if any.
    pub fn result(&self) -> Option<&RecognitionResult> {
        match self {
            Self::Recognizing(result) | Self::Recognized(result) | Self::Canceled(result) => {
                Some(result)
            }
            _ => None,
        }
    }
}

/// The handler a recognizer calls for the events it subscribed to.
pub trait EventHandler: Send + Sync {
    /// Called on the recognizer's worker thread for every matching event.
    fn on_event(&self, event: RecognitionEvent);
}

impl<F: Fn(RecognitionEvent) + Send + Sync> EventHandler for F {
    fn on_event(&self, event: RecognitionEvent) {
        self(event)
    }
}

/// Identifies a subscription so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: Arc<dyn EventHandler>,
}

#[derive(Default)]
pub(crate) struct EventHub {
    next_id: AtomicU64,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl EventHub {
    pub fn subscribe<E: EventHandler + 'static>(
        &self,
        filter: EventFilter,
        handler: E,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.subscriptions.lock().unwrap().push(Subscription {
            id,
            filter,
            handler: Arc::new(handler),
        });
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    pub fn clear(&self) {
        self.subscriptions.lock().unwrap().clear();
    }

    /// Calls every matching handler. Handlers run without the subscription lock held, so they may
    /// subscribe or unsubscribe themselves.
    pub fn dispatch(&self, event: RecognitionEvent) {
        let kind = event.kind();
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.filter.intersects(kind))
            .map(|s| s.handler.clone())
            .collect();
        for handler in handlers {
            handler.on_event(event.clone());
        }
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("subscriptions", &self.subscriptions.lock().unwrap().len())
            .finish()
    }
}
