//! Defines the endpoint for appending a transaction to a customer's account.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    Error,
    models::{CustomerId, NewTransaction, TransactionKind},
    state::AppState,
    stores::LedgerStore,
};

/// The maximum length of a transaction description, in characters.
pub const DESCRIPTION_LENGTH_LIMIT: usize = 10;

/// The response body for a successfully applied transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// The customer's overdraft limit.
    pub limite: i32,
    /// The customer's balance after the transaction.
    pub saldo: i32,
}

/// A route handler for appending a transaction to a customer's account.
///
/// The body is taken as raw bytes rather than through `Json` so that the
/// handler controls the failure status codes: an unparsable body responds
/// 404 and a body with invalid fields responds 422, both with empty bodies.
///
/// Validation is fail-fast, the first failing check wins and nothing is
/// persisted. The balance-limit check itself happens inside the store,
/// atomically with the write.
pub async fn create_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response
where
    S: LedgerStore,
{
    let Some(customer_id) = parse_customer_id(&id) else {
        return Error::CustomerNotFound.into_response();
    };

    let transaction = match parse_transaction(&body) {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };

    match apply_transaction(&state.store, customer_id, &transaction).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Parse a raw path segment as a customer ID.
///
/// Returns `None` unless the segment is a well-formed positive integer.
/// Malformed IDs are rejected before any query is made and respond 404, the
/// same as an unknown customer.
pub(crate) fn parse_customer_id(raw: &str) -> Option<CustomerId> {
    raw.parse().ok().filter(|id| *id > 0)
}

/// Validate a raw request body into a [NewTransaction].
fn parse_transaction(body: &[u8]) -> Result<NewTransaction, Error> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| Error::MalformedBody)?;
    let Value::Object(fields) = payload else {
        return Err(Error::MalformedBody);
    };

    let valor = require_field(&fields, "valor")?;
    let tipo = require_field(&fields, "tipo")?;
    let descricao = require_field(&fields, "descricao")?;

    let valor = valor
        .as_i64()
        .filter(|valor| *valor > 0)
        .and_then(|valor| i32::try_from(valor).ok())
        .ok_or(Error::InvalidAmount)?;

    let tipo = tipo
        .as_str()
        .and_then(TransactionKind::parse)
        .ok_or(Error::InvalidTransactionKind)?;

    let descricao = descricao.as_str().ok_or(Error::InvalidDescription)?;
    if descricao.chars().count() > DESCRIPTION_LENGTH_LIMIT {
        return Err(Error::InvalidDescription);
    }

    Ok(NewTransaction {
        valor,
        tipo,
        descricao: descricao.to_owned(),
    })
}

/// A field is required to be present, non-null, and not an empty string.
fn require_field<'a>(
    fields: &'a serde_json::Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, Error> {
    fields
        .get(name)
        .filter(|value| !value.is_null())
        .filter(|value| value.as_str() != Some(""))
        .ok_or(Error::MissingField(name))
}

async fn apply_transaction<S>(
    store: &S,
    customer_id: CustomerId,
    transaction: &NewTransaction,
) -> Result<TransactionResponse, Error>
where
    S: LedgerStore,
{
    store
        .find_customer(customer_id)
        .await?
        .ok_or(Error::CustomerNotFound)?;

    store.create_transaction(customer_id, transaction).await?;

    // Re-read rather than compute: the database owns the balance.
    let customer = store
        .find_customer(customer_id)
        .await?
        .ok_or(Error::CustomerNotFound)?;

    Ok(TransactionResponse {
        limite: customer.limite,
        saldo: customer.saldo,
    })
}
