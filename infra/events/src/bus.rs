use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// Default queue buffer.
pub const DEFAULT_CAPACITY: usize = 128;

/// Marker trait for types that can travel over the [`EventBus`].
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

type Erased = Box<dyn Any + Send + Sync>;

#[derive(Debug)]
struct QueueState {
    capacity: usize,
    sender: Erased,
    /// Receiver parked until a consumer claims it.
    parked: Option<Erased>,
}

impl QueueState {
    fn new<T: Event>(capacity: usize) -> Self {
        trace!(event = type_name::<T>(), capacity, "Initializing new event queue");
        let (tx, rx) = mpsc::channel::<Arc<T>>(capacity);
        Self { capacity, sender: Box::new(tx), parked: Some(Box::new(rx)) }
    }

    fn sender<T: Event>(&self) -> Result<mpsc::Sender<Arc<T>>, EventBusError> {
        self.sender.downcast_ref::<mpsc::Sender<Arc<T>>>().cloned().ok_or_else(|| {
            EventBusError::TypeMismatch {
                message: type_name::<T>().into(),
                context: Some("Unexpected queue sender type".into()),
            }
        })
    }
}

/// Type-indexed work queues shared by all feature slices.
///
/// Queues are created lazily on first enqueue or consume; the event's [`TypeId`] decides
/// which queue it travels on.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    queues: Arc<RwLock<FxHashMap<TypeId, QueueState>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the single consumer end of the work queue for `T`.
    ///
    /// Events enqueued before the consumer arrives are kept (up to `capacity`).
    ///
    /// # Errors
    /// * [`EventBusError::InvalidCapacity`] for a zero capacity.
    /// * [`EventBusError::ReceiverTaken`] if the queue already has a consumer.
    pub fn consume<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<mpsc::Receiver<Arc<T>>, EventBusError> {
        let capacity = validate_capacity(capacity)?;
        let mut queues = self.queues.write();
        let state =
            queues.entry(TypeId::of::<T>()).or_insert_with(|| QueueState::new::<T>(capacity));

        if state.capacity != capacity {
            warn!(
                event = type_name::<T>(),
                existing_capacity = state.capacity,
                requested_capacity = capacity,
                "Queue already initialized with a different capacity"
            );
        }

        let parked = state.parked.take().ok_or_else(|| EventBusError::ReceiverTaken {
            message: type_name::<T>().into(),
            context: None,
        })?;

        parked.downcast::<mpsc::Receiver<Arc<T>>>().map(|rx| *rx).map_err(|_| {
            EventBusError::TypeMismatch {
                message: type_name::<T>().into(),
                context: Some("Unexpected queue receiver type".into()),
            }
        })
    }

    /// Enqueues `event` for the consumer of `T` without waiting.
    ///
    /// # Errors
    /// * [`EventBusError::ChannelFull`] if the queue buffer is exhausted.
    /// * [`EventBusError::ChannelClosed`] if the consumer was dropped.
    pub fn enqueue<T: Event>(&self, event: T) -> Result<(), EventBusError> {
        let sender = self.sender::<T>()?;

        sender.try_send(Arc::new(event)).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => EventBusError::ChannelFull {
                message: type_name::<T>().into(),
                context: None,
            },
            mpsc::error::TrySendError::Closed(_) => EventBusError::ChannelClosed {
                message: type_name::<T>().into(),
                context: None,
            },
        })
    }

    /// Drops every queue, closing all receivers.
    ///
    /// Returns the number of queues that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut queues = self.queues.write();
        let count = queues.len();
        queues.clear();
        count
    }

    fn sender<T: Event>(&self) -> Result<mpsc::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        if let Some(state) = self.queues.read().get(&id) {
            return state.sender::<T>();
        }

        let mut queues = self.queues.write();
        queues.entry(id).or_insert_with(|| QueueState::new::<T>(DEFAULT_CAPACITY)).sender::<T>()
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity == 0 {
        return Err(EventBusError::InvalidCapacity {
            message: "capacity must be >= 1".into(),
            context: None,
        });
    }
    Ok(capacity)
}
