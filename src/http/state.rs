//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::models::{Clock, SystemClock};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Evaluation-instant source for show partitioning
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state with the given repository and the
    /// system wall clock.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock, e.g. with a fixed instant in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
