//! Defines the ledger store trait and its implementations.

mod memory;
mod mysql;

use async_trait::async_trait;

pub use memory::InMemoryLedgerStore;
pub use mysql::MySqlLedgerStore;

use crate::{
    Error,
    models::{Customer, CustomerId, NewTransaction, TransactionRecord},
};

/// Handles the retrieval of customers and the creation of transactions.
///
/// The balance invariant (`saldo >= -limite`) is enforced *inside* the store,
/// atomically with the write. Implementers must reject a transaction that
/// would break it with [Error::TransactionRejected] and leave no trace of it;
/// callers perform no balance arithmetic of their own.
#[async_trait]
pub trait LedgerStore: Clone + Send + Sync + 'static {
    /// Look up a customer by ID.
    ///
    /// Returns `Ok(None)` when no customer has the given ID.
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, Error>;

    /// Atomically validate and apply a transaction to a customer's balance.
    ///
    /// # Errors
    /// Returns [Error::TransactionRejected] if the store refuses the
    /// transaction, e.g. because it would push the balance below the
    /// overdraft limit. Nothing is persisted in that case.
    async fn create_transaction(
        &self,
        id: CustomerId,
        transaction: &NewTransaction,
    ) -> Result<(), Error>;

    /// Retrieve the customer's 10 most recent transactions, most recent
    /// first.
    async fn recent_transactions(
        &self,
        id: CustomerId,
    ) -> Result<Vec<TransactionRecord>, Error>;
}
