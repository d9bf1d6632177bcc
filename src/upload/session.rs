//! Upload session events and delivery channel.
//!
//! An upload produces a finite event sequence: one `Loading`, any number of
//! deduplicated `Progress` values, then exactly one terminal `Success` or
//! `Error`. The producer side is non-blocking for progress (slow consumers
//! lose intermediate percentages, never the terminal event) and the whole
//! session can be cancelled from the consumer side.

use crate::server::error::ApiError;
use crate::server::ServerLecture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Buffered events per session; progress beyond this is dropped for slow
/// consumers.
const EVENT_BUFFER: usize = 32;

/// One event in an upload session.
#[derive(Debug)]
pub enum UploadEvent {
    /// The request is being prepared and sent
    Loading,
    /// Percentage of the primary file written so far
    Progress(u8),
    /// Terminal: the server accepted the upload. `None` when the 2xx
    /// response carried no parseable record.
    Success(Option<ServerLecture>),
    /// Terminal: classified transport or HTTP failure
    Error(ApiError),
}

/// Consumer half of an upload session.
pub struct UploadSession {
    events: mpsc::Receiver<UploadEvent>,
    cancel: CancellationToken,
}

impl UploadSession {
    pub(crate) fn channel() -> (EventFeed, UploadSession) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let cancel = CancellationToken::new();
        (
            EventFeed {
                tx,
                cancel: cancel.clone(),
            },
            UploadSession { events: rx, cancel },
        )
    }

    /// Next event, or `None` once the session is over.
    pub async fn next_event(&mut self) -> Option<UploadEvent> {
        self.events.recv().await
    }

    /// Aborts the in-flight upload. In-progress byte writes stop promptly,
    /// open file handles are released and no further events are produced.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Producer half, owned by the upload task.
pub(crate) struct EventFeed {
    tx: mpsc::Sender<UploadEvent>,
    cancel: CancellationToken,
}

impl EventFeed {
    pub(crate) fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub(crate) fn progress_handle(&self) -> ProgressHandle {
        ProgressHandle {
            tx: self.tx.clone(),
        }
    }

    pub(crate) async fn loading(&self) {
        let _ = self.tx.send(UploadEvent::Loading).await;
    }

    /// Delivers the terminal event, consuming the feed so nothing can follow.
    pub(crate) async fn finish(self, result: Result<Option<ServerLecture>, ApiError>) {
        let event = match result {
            Ok(lecture) => UploadEvent::Success(lecture),
            Err(e) => UploadEvent::Error(e),
        };
        let _ = self.tx.send(event).await;
    }
}

/// Cloneable, non-blocking progress emitter usable from stream adapters.
#[derive(Clone)]
pub(crate) struct ProgressHandle {
    tx: mpsc::Sender<UploadEvent>,
}

impl ProgressHandle {
    /// Drops the event when the consumer is slow or detached.
    pub(crate) fn emit(&self, percent: u8) {
        let _ = self.tx.try_send(UploadEvent::Progress(percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_producer_order_with_one_terminal() {
        let (feed, mut session) = UploadSession::channel();

        tokio::spawn(async move {
            feed.loading().await;
            let progress = feed.progress_handle();
            progress.emit(25);
            progress.emit(50);
            feed.finish(Ok(None)).await;
        });

        assert!(matches!(session.next_event().await, Some(UploadEvent::Loading)));
        assert!(matches!(
            session.next_event().await,
            Some(UploadEvent::Progress(25))
        ));
        assert!(matches!(
            session.next_event().await,
            Some(UploadEvent::Progress(50))
        ));
        assert!(matches!(
            session.next_event().await,
            Some(UploadEvent::Success(None))
        ));
        // the feed is consumed by the terminal event; the channel closes
        assert!(session.next_event().await.is_none());
    }

    #[tokio::test]
    async fn cancel_trips_the_token_for_the_producer() {
        let (feed, session) = UploadSession::channel();
        let token = feed.cancellation();

        assert!(!token.is_cancelled());
        session.cancel();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn dropping_the_session_cancels_and_silences_the_feed() {
        let (feed, session) = UploadSession::channel();
        let token = feed.cancellation();
        let progress = feed.progress_handle();
        drop(session);

        assert!(token.is_cancelled());
        // sends to a detached consumer are silently discarded
        progress.emit(10);
        feed.finish(Err(ApiError::NotFound)).await;
    }
}
