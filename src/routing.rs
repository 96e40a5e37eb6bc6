//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    state::AppState,
    statement::get_statement_endpoint,
    stores::LedgerStore,
    transaction::create_transaction_endpoint,
};

/// The route for appending a transaction to a customer's account.
pub const TRANSACTIONS: &str = "/clientes/{id}/transacoes";
/// The route for reading a customer's account statement.
pub const STATEMENT: &str = "/clientes/{id}/extrato";

/// Return a router with all the app's routes.
///
/// Any method and path combination outside the two routes above, including a
/// wrong method on a known path, falls through to a plain-text 404.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: LedgerStore,
{
    Router::new()
        .route(
            TRANSACTIONS,
            post(create_transaction_endpoint::<S>).fallback(get_404_not_found),
        )
        .route(
            STATEMENT,
            get(get_statement_endpoint::<S>).fallback(get_404_not_found),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{routing::build_router, state::AppState, stores::InMemoryLedgerStore};

    fn test_server() -> TestServer {
        let store = InMemoryLedgerStore::new();
        store.add_customer(1, 1000);

        TestServer::new(build_router(AppState::new(store)))
    }

    #[tokio::test]
    async fn unrouted_paths_respond_404_not_found() {
        let server = test_server();

        for path in ["/", "/clientes", "/clientes/1", "/clientes/1/saldo"] {
            let response = server.get(path).await;

            assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "path {path}");
            assert_eq!(response.text(), "Not Found", "path {path}");
        }
    }

    #[tokio::test]
    async fn wrong_methods_on_known_paths_respond_404_not_found() {
        let server = test_server();

        let response = server.get("/clientes/1/transacoes").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Not Found");

        let response = server.post("/clientes/1/extrato").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Not Found");
    }

    #[tokio::test]
    async fn transactions_and_statement_round_trip() {
        let server = test_server();

        let response = server
            .post("/clientes/1/transacoes")
            .json(&json!({"valor": 500, "tipo": "d", "descricao": "compra"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        response.assert_json(&json!({"limite": 1000, "saldo": -500}));

        let response = server.get("/clientes/1/extrato").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["saldo"]["total"], -500);
        assert_eq!(body["saldo"]["limite"], 1000);
        assert_eq!(body["ultimas_transacoes"][0]["valor"], 500);
        assert_eq!(body["ultimas_transacoes"][0]["tipo"], "d");
    }

    #[tokio::test]
    async fn a_rejected_transaction_responds_422_with_an_empty_body() {
        let server = test_server();

        let response = server
            .post("/clientes/1/transacoes")
            .json(&json!({"valor": 1001, "tipo": "d", "descricao": "compra"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.text(), "");
    }

    #[tokio::test]
    async fn statement_for_an_unknown_customer_responds_404_with_an_empty_body() {
        let server = test_server();

        let response = server.get("/clientes/999/extrato").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "");
    }
}
