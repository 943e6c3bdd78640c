use crate::bus::Event;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// `next()` for queue consumers; returns `None` once the bus shuts the queue down.
pub trait EventReceiverExt<T> {
    fn next_event(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Event> EventReceiverExt<T> for mpsc::Receiver<Arc<T>> {
    async fn next_event(&mut self) -> Option<Arc<T>> {
        self.recv().await
    }
}
