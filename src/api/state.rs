//! Shared state handed to every request handler.
//!
//! Besides the business catalog, the state owns the clock that cancellation
//! estimates fall back to when a request does not say when it was made.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ConfigLoader;

type Clock = dyn Fn() -> DateTime<Utc> + Send + Sync;

/// The loaded catalog plus the server clock.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<ConfigLoader>,
    clock: Arc<Clock>,
}

impl AppState {
    /// Builds the state around a loaded catalog, using the system clock.
    pub fn new(catalog: ConfigLoader) -> Self {
        Self::with_clock(catalog, Utc::now)
    }

    /// Builds the state with a custom clock, e.g. a fixed instant for
    /// reproducible refund estimates.
    pub fn with_clock<F>(catalog: ConfigLoader, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            catalog: Arc::new(catalog),
            clock: Arc::new(clock),
        }
    }

    /// Returns the business catalog.
    pub fn config(&self) -> &ConfigLoader {
        &self.catalog
    }

    /// Current time according to the server clock.
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.catalog.engine().name)
            .field("businesses", &self.catalog.config().businesses().len())
            .finish_non_exhaustive()
    }
}
