use std::borrow::Cow;

/// Errors raised while wiring or using event channels.
#[confhub_derive::confhub_error]
pub enum EventBusError {
    /// An erased channel handle did not downcast to the requested event type.
    #[error("Type mismatch{}: {message}", format_context(context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The work queue for the event type already has its consumer.
    #[error("Queue receiver already taken{}: {message}", format_context(context))]
    ReceiverTaken { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The bounded work queue cannot accept more events.
    #[error("Channel full{}: {message}", format_context(context))]
    ChannelFull { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The consumer of the work queue is gone.
    #[error("Channel closed{}: {message}", format_context(context))]
    ChannelClosed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Channel capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
