//! Crebito is a minimal financial-ledger HTTP API.
//!
//! It exposes two operations: append a signed transaction (credit or debit)
//! to a customer's account, and read a customer's current balance plus their
//! last ten transactions. Balance consistency under concurrent writes is
//! owned by the external MySQL database through the `create_transaction`
//! stored procedure; this service is a thin orchestration layer that parses,
//! validates, and passes through.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod config;
mod error;
mod models;
mod routing;
mod state;
mod statement;
pub mod stores;
mod transaction;

pub use config::{ConfigError, DatabaseConfig};
pub use error::Error;
pub use models::{Customer, CustomerId, NewTransaction, TransactionKind, TransactionRecord};
pub use routing::build_router;
pub use state::AppState;
pub use statement::{BalanceSnapshot, StatementResponse};
pub use transaction::{DESCRIPTION_LENGTH_LIMIT, TransactionResponse};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
