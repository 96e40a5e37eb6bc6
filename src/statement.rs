//! Defines the endpoint for reading a customer's account statement.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    models::{CustomerId, TransactionRecord},
    state::AppState,
    stores::LedgerStore,
    transaction::parse_customer_id,
};

/// The response body for an account statement.
#[derive(Debug, Serialize)]
pub struct StatementResponse {
    /// The balance snapshot at the time the statement was generated.
    pub saldo: BalanceSnapshot,
    /// The 10 most recent transactions, most recent first. Empty when the
    /// customer has no transactions.
    pub ultimas_transacoes: Vec<TransactionRecord>,
}

/// A customer's balance at a point in time.
#[derive(Debug, Serialize)]
pub struct BalanceSnapshot {
    /// The current balance.
    pub total: i32,
    /// The wall-clock time the statement was generated, not derived from any
    /// stored transaction.
    #[serde(with = "time::serde::rfc3339")]
    pub data_extrato: OffsetDateTime,
    /// The overdraft limit.
    pub limite: i32,
}

/// A route handler for reading a customer's balance and recent transactions.
///
/// Responds 404 with an empty body for unknown or malformed customer IDs.
/// Unlike the transaction endpoint, a database fault here is not part of the
/// request contract and responds 500.
pub async fn get_statement_endpoint<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response
where
    S: LedgerStore,
{
    let Some(customer_id) = parse_customer_id(&id) else {
        return Error::CustomerNotFound.into_response();
    };

    match build_statement(&state.store, customer_id).await {
        Ok(statement) => (StatusCode::OK, Json(statement)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn build_statement<S>(
    store: &S,
    customer_id: CustomerId,
) -> Result<StatementResponse, Error>
where
    S: LedgerStore,
{
    let customer = store
        .find_customer(customer_id)
        .await?
        .ok_or(Error::CustomerNotFound)?;

    let ultimas_transacoes = store.recent_transactions(customer_id).await?;

    Ok(StatementResponse {
        saldo: BalanceSnapshot {
            total: customer.saldo,
            data_extrato: OffsetDateTime::now_utc(),
            limite: customer.limite,
        },
        ultimas_transacoes,
    })
}

#[cfg(test)]
mod get_statement_endpoint_tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use serde_json::Value;

    use crate::{
        models::{NewTransaction, TransactionKind},
        state::AppState,
        statement::get_statement_endpoint,
        stores::{InMemoryLedgerStore, LedgerStore},
    };

    fn state_with_customer(id: i32, limite: i32) -> AppState<InMemoryLedgerStore> {
        let store = InMemoryLedgerStore::new();
        store.add_customer(id, limite);
        AppState::new(store)
    }

    async fn get(state: AppState<InMemoryLedgerStore>, id: &str) -> Response {
        get_statement_endpoint(State(state), Path(id.to_owned())).await
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn append(
        state: &AppState<InMemoryLedgerStore>,
        valor: i32,
        tipo: TransactionKind,
        descricao: &str,
    ) {
        state
            .store
            .create_transaction(
                1,
                &NewTransaction {
                    valor,
                    tipo,
                    descricao: descricao.to_owned(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn returns_an_empty_statement_for_a_customer_without_transactions() {
        let state = state_with_customer(1, 1000);

        let response = get(state, "1").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["saldo"]["total"], 0);
        assert_eq!(body["saldo"]["limite"], 1000);
        assert_eq!(body["ultimas_transacoes"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn returns_the_balance_and_the_latest_transaction_first() {
        let state = state_with_customer(1, 1000);
        append(&state, 500, TransactionKind::Debit, "compra").await;

        let response = get(state, "1").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["saldo"]["total"], -500);
        assert_eq!(body["ultimas_transacoes"][0]["valor"], 500);
        assert_eq!(body["ultimas_transacoes"][0]["tipo"], "d");
        assert_eq!(body["ultimas_transacoes"][0]["descricao"], "compra");
        assert!(
            body["ultimas_transacoes"][0]["realizada_em"]
                .as_str()
                .is_some()
        );
    }

    #[tokio::test]
    async fn caps_the_statement_at_the_ten_most_recent_transactions() {
        let state = state_with_customer(1, 0);
        for valor in 1..=12 {
            append(&state, valor, TransactionKind::Credit, "deposito").await;
        }

        let response = get(state, "1").await;

        let transacoes = body_json(response).await["ultimas_transacoes"].clone();
        let transacoes = transacoes.as_array().unwrap();
        assert_eq!(transacoes.len(), 10);
        assert_eq!(transacoes.first().unwrap()["valor"], 12);
        assert_eq!(transacoes.last().unwrap()["valor"], 3);
    }

    #[tokio::test]
    async fn statement_timestamp_is_generated_per_request() {
        let state = state_with_customer(1, 1000);

        let response = get(state, "1").await;

        let data_extrato = body_json(response).await["saldo"]["data_extrato"].clone();
        let data_extrato = data_extrato.as_str().unwrap().to_owned();
        // RFC 3339, e.g. 2024-02-01T12:00:00Z.
        assert!(
            time::OffsetDateTime::parse(
                &data_extrato,
                &time::format_description::well_known::Rfc3339
            )
            .is_ok(),
            "data_extrato {data_extrato:?}"
        );
    }

    #[tokio::test]
    async fn repeated_statements_report_the_same_balance() {
        let state = state_with_customer(1, 1000);
        append(&state, 250, TransactionKind::Credit, "deposito").await;

        let first = body_json(get(state.clone(), "1").await).await;
        let second = body_json(get(state, "1").await).await;

        assert_eq!(first["saldo"]["total"], second["saldo"]["total"]);
        assert_eq!(first["saldo"]["limite"], second["saldo"]["limite"]);
        assert_eq!(first["ultimas_transacoes"], second["ultimas_transacoes"]);
    }

    #[tokio::test]
    async fn responds_404_to_an_unknown_customer() {
        let state = state_with_customer(1, 1000);

        let response = get(state, "999").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responds_404_to_a_malformed_customer_id() {
        for id in ["abc", "-1", "0", ""] {
            let state = state_with_customer(1, 1000);

            let response = get(state, id).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "id {id:?}");
        }
    }
}
