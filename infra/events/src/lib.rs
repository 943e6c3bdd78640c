//! # Event Bus
//!
//! Typed in-process work queues between feature slices.
//!
//! Each event type has one bounded queue that hands events to exactly one consumer, in order.
//! Background workers (confirmation mail, featured speaker) drain queues so request handlers
//! never wait on them. Events are identified by their Rust type.
//!
//! # Example
//!
//! ```rust
//! use confhub_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Debug)]
//! struct SessionScheduled { speaker: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut queue = bus.consume::<SessionScheduled>(16)?;
//!
//!     bus.enqueue(SessionScheduled { speaker: "Grace".to_owned() })?;
//!
//!     let event = queue.next_event().await.expect("queued event");
//!     assert_eq!(event.speaker, "Grace");
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{DEFAULT_CAPACITY, Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
