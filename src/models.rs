//! This file defines the core types of the ledger: customers and the
//! transactions appended to their accounts.
//!
//! Both entities are owned and persisted by the external database. The
//! service never mutates them in memory, it only reads snapshots and submits
//! new transactions through a [store](crate::stores::LedgerStore).

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The ID of a customer account.
///
/// Customers are provisioned externally, this service never creates them.
pub type CustomerId = i32;

/// A snapshot of a customer account as stored in the `clientes` table.
///
/// All monetary amounts are integers in minor currency units. `saldo` may be
/// negative, but the database guarantees `saldo >= -limite` after every
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Customer {
    /// The customer's ID.
    pub id: CustomerId,
    /// The overdraft limit.
    pub limite: i32,
    /// The current balance.
    pub saldo: i32,
}

/// The direction of a transaction: credit (`"c"`) or debit (`"d"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TransactionKind {
    /// Money paid into the account.
    #[serde(rename = "c")]
    #[sqlx(rename = "c")]
    Credit,
    /// Money taken out of the account.
    #[serde(rename = "d")]
    #[sqlx(rename = "d")]
    Debit,
}

impl TransactionKind {
    /// Parse the single-letter wire representation.
    ///
    /// Returns `None` for anything other than `"c"` or `"d"`.
    pub fn parse(tipo: &str) -> Option<Self> {
        match tipo {
            "c" => Some(Self::Credit),
            "d" => Some(Self::Debit),
            _ => None,
        }
    }

    /// The single-letter wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "c",
            Self::Debit => "d",
        }
    }

    /// Apply this kind's sign to a transaction amount.
    pub fn signed(&self, valor: i32) -> i32 {
        match self {
            Self::Credit => valor,
            Self::Debit => -valor,
        }
    }
}

/// A validated transaction ready to be submitted to the database.
///
/// `valor` is the amount's magnitude, the sign is implied by `tipo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// The transaction amount, strictly positive.
    pub valor: i32,
    /// Whether the transaction is a credit or a debit.
    pub tipo: TransactionKind,
    /// Free text describing the transaction, between 1 and 10 characters.
    pub descricao: String,
}

/// A transaction as stored in the `transacoes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TransactionRecord {
    /// The transaction amount, strictly positive.
    pub valor: i32,
    /// Whether the transaction is a credit or a debit.
    pub tipo: TransactionKind,
    /// Free text describing the transaction.
    pub descricao: String,
    /// When the transaction was applied, assigned by the database at insert.
    #[serde(with = "time::serde::rfc3339")]
    pub realizada_em: OffsetDateTime,
}
