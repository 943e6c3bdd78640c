use std::borrow::Cow;

/// Errors of the storage layer.
#[confhub_derive::confhub_error]
pub enum DatabaseError {
    /// Missing or malformed builder parameters.
    #[error("Validation error{}: {message}", format_context(context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The engine could not be started or stayed unhealthy.
    #[error("Database connection failed{}: {message}", format_context(context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Root credentials were rejected.
    #[error("Authentication failed{}: {message}", format_context(context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("SurrealDB error{}: {source}", format_context(context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// A migration failed or an applied migration was changed afterwards.
    #[error("Migration error{}: {message}", format_context(context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal database error{}: {message}", format_context(context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
