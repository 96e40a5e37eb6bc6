//! Implements a struct that holds the state of the REST server.

use crate::stores::LedgerStore;

/// The state shared by the API's route handlers.
///
/// The only cross-request state this service holds is the ledger store, which
/// owns the database connection pool. It is created once at startup and
/// injected into each handler invocation through axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: LedgerStore,
{
    /// The store for reading customers and appending transactions.
    pub store: S,
}

impl<S> AppState<S>
where
    S: LedgerStore,
{
    /// Create a new [AppState].
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
