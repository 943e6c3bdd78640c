use axum::extract::FromRef;
use confhub_database::Database;
use confhub_domain::config::ApiConfig;
use confhub_domain::registry::{FeatureSlice, InitializedSlice};
use confhub_event_bus::EventBus;
use fxhash::FxHashMap;
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[confhub_derive::confhub_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Feature slice not registered{}: {message}", format_context(context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// What every request handler can reach: configuration, the store, the event bus and the
/// registered feature slices.
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub events: EventBus,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Looks up slice `T`; handlers turn the error into a 500.
    ///
    /// # Errors
    /// Returns [`ApiStateError::MissingSlice`] if `T` was not registered at startup.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: type_name::<T>().into(),
            context: None,
        })
    }

    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.inner.slices.len()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.config.clone()
    }
}

/// Collects the shared services and slices. Only the database is mandatory; the config and
/// bus fall back to their defaults.
#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    events: Option<EventBus>,
    slices: Vec<InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    #[must_use]
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.push(slice);
        self
    }

    #[must_use]
    pub fn register_slices(mut self, slices: impl IntoIterator<Item = InitializedSlice>) -> Self {
        self.slices.extend(slices);
        self
    }

    /// # Errors
    /// Returns [`ApiStateError::Validation`] without a database or when the same slice type
    /// is registered twice.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let database = self.database.ok_or_else(|| ApiStateError::Validation {
            message: "Database not provided".into(),
            context: None,
        })?;

        let mut slices = FxHashMap::default();
        for slice in self.slices {
            let name = slice.name;
            if slices.insert(slice.id, slice).is_some() {
                return Err(ApiStateError::Validation {
                    message: format!("Feature slice '{name}' registered more than once").into(),
                    context: None,
                });
            }
        }

        Ok(ApiState {
            inner: Arc::new(ApiStateInner {
                config: self.config.unwrap_or_default(),
                database,
                events: self.events.unwrap_or_default(),
                slices,
            }),
        })
    }
}
