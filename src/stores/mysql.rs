//! Implements the MySQL backed ledger store.
//!
//! This is the production store: a thin gateway over the external database
//! that owns both entities and the balance invariant. The only mutating call,
//! the `create_transaction` stored procedure, is treated as a black box. Its
//! reference implementation ships in `db/init.sql`, but this store never
//! depends on its internals, only on the contract that it raises an error
//! when the transaction must not be applied.

use async_trait::async_trait;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};

use crate::{
    Error,
    config::DatabaseConfig,
    models::{Customer, CustomerId, NewTransaction, TransactionRecord},
    stores::LedgerStore,
};

/// Reads customers and submits transactions over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlLedgerStore {
    pool: MySqlPool,
}

impl MySqlLedgerStore {
    /// Create a new store from an existing connection `pool`.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool using `config` and create a store backed by it.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached. Callers at startup
    /// should treat this as fatal.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(config.connect_options())
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl LedgerStore for MySqlLedgerStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, Error> {
        sqlx::query_as("SELECT id, limite, saldo FROM clientes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::from)
    }

    async fn create_transaction(
        &self,
        id: CustomerId,
        transaction: &NewTransaction,
    ) -> Result<(), Error> {
        sqlx::query("CALL create_transaction(?, ?, ?, ?)")
            .bind(id)
            .bind(transaction.valor)
            .bind(transaction.tipo)
            .bind(&transaction.descricao)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|error| {
                // Any error raised by the procedure means the transaction was
                // not applied. The limit violation is the expected case.
                tracing::debug!("create_transaction({id}) rejected: {error}");
                Error::TransactionRejected
            })
    }

    async fn recent_transactions(
        &self,
        id: CustomerId,
    ) -> Result<Vec<TransactionRecord>, Error> {
        sqlx::query_as(
            "SELECT valor, tipo, descricao, realizada_em
            FROM transacoes
            WHERE cliente_id = ?
            ORDER BY id DESC
            LIMIT 10",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::from)
    }
}
