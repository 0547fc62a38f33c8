use ::tokio::sync::mpsc::{self, Receiver};
use ::tokio::sync::oneshot;

use crate::{Error, Result};

use super::{EventFilter, RecognitionEvent, RecognitionResult, Recognizer, SubscriptionId};

#[cfg_attr(docsrs, doc(cfg(feature = "tokio-stt")))]
impl Recognizer {
    /// Performs a single recognition without blocking the current thread.
    ///
    /// Behaves like [`recognize_once`](Self::recognize_once). Dropping the future does not stop the
    /// recognition; use a [`Canceller`](super::Canceller) for that.
    pub async fn recognize_once_async(&self) -> Result<RecognitionResult> {
        let (tx, rx) = oneshot::channel();
        self.start(move |result| {
            let _ = tx.send(result);
        })?;
        rx.await.map_err(|_| {
            Error::Resource("the recognition worker terminated unexpectedly".to_owned())
        })?
    }

    /// Subscribes a channel to the events selected by `filter`.
    ///
    /// Events that do not fit into the channel's buffer are dropped.
    pub fn subscribe_channel(
        &self,
        filter: EventFilter,
        buffer: usize,
    ) -> Result<(SubscriptionId, Receiver<RecognitionEvent>)> {
        let (tx, rx) = mpsc::channel::<RecognitionEvent>(buffer);
        let handler = move |event| {
            let _ = tx.try_send(event);
        };
        Ok((self.subscribe(filter, handler)?, rx))
    }
}
