//! Implements an in-memory ledger store.
//!
//! Mirrors the stored procedure's atomic check-and-apply under a mutex so
//! that handler tests can exercise the rejection path without a database
//! server. Also handy for running the server locally without MySQL.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    Error,
    models::{Customer, CustomerId, NewTransaction, TransactionRecord},
    stores::LedgerStore,
};

/// Holds customers and transactions in memory behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    customers: HashMap<CustomerId, Customer>,
    // Kept in insertion order, the in-memory stand-in for the transacoes
    // table's autoincrement ID.
    transactions: Vec<(CustomerId, TransactionRecord)>,
}

impl InMemoryLedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a customer with the given overdraft limit and a zero balance.
    pub fn add_customer(&self, id: CustomerId, limite: i32) {
        let mut inner = self
            .inner
            .lock()
            .expect("could not acquire the ledger lock");

        inner.customers.insert(
            id,
            Customer {
                id,
                limite,
                saldo: 0,
            },
        );
    }

    /// The number of transactions recorded for a customer.
    pub fn transaction_count(&self, id: CustomerId) -> usize {
        self.inner
            .lock()
            .expect("could not acquire the ledger lock")
            .transactions
            .iter()
            .filter(|(cliente_id, _)| *cliente_id == id)
            .count()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, Error> {
        let inner = self
            .inner
            .lock()
            .expect("could not acquire the ledger lock");

        Ok(inner.customers.get(&id).cloned())
    }

    async fn create_transaction(
        &self,
        id: CustomerId,
        transaction: &NewTransaction,
    ) -> Result<(), Error> {
        let mut inner = self
            .inner
            .lock()
            .expect("could not acquire the ledger lock");
        let Inner {
            customers,
            transactions,
        } = &mut *inner;

        let customer = customers.get_mut(&id).ok_or(Error::TransactionRejected)?;

        let saldo = customer.saldo + transaction.tipo.signed(transaction.valor);
        if saldo < -customer.limite {
            return Err(Error::TransactionRejected);
        }

        customer.saldo = saldo;
        transactions.push((
            id,
            TransactionRecord {
                valor: transaction.valor,
                tipo: transaction.tipo,
                descricao: transaction.descricao.clone(),
                realizada_em: OffsetDateTime::now_utc(),
            },
        ));

        Ok(())
    }

    async fn recent_transactions(
        &self,
        id: CustomerId,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let inner = self
            .inner
            .lock()
            .expect("could not acquire the ledger lock");

        Ok(inner
            .transactions
            .iter()
            .rev()
            .filter(|(cliente_id, _)| *cliente_id == id)
            .take(10)
            .map(|(_, record)| record.clone())
            .collect())
    }
}
