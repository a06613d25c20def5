use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use nexus_core::{ClientStore, StoreError};
use nexus_desk::{ClientDesk, ClientForm, DeskError};
use nexus_ledger::PortfolioSummary;
use nexus_platform::{ClientListResponse, ErrorResponse, RecordPaymentRequest};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub desk: Arc<ClientDesk<Arc<dyn ClientStore>>>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/summary", get(summary))
        .route("/clients/{id}", put(update_client))
        .route("/clients/{id}/payments", post(record_payment))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let clients = state.desk.load_clients().await.map_err(desk_error)?;
    Ok(Json(ClientListResponse { clients }))
}

async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientForm>,
) -> Result<(StatusCode, Json<ClientListResponse>), ApiError> {
    let clients = state
        .desk
        .save_client(None, payload)
        .await
        .map_err(desk_error)?;
    Ok((StatusCode::CREATED, Json(ClientListResponse { clients })))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientForm>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let clients = state
        .desk
        .save_client(Some(id), payload)
        .await
        .map_err(desk_error)?;
    Ok(Json(ClientListResponse { clients }))
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let clients = state
        .desk
        .record_payment(id, &payload.amount)
        .await
        .map_err(desk_error)?;
    Ok(Json(ClientListResponse { clients }))
}

async fn summary(State(state): State<AppState>) -> Result<Json<PortfolioSummary>, ApiError> {
    state.desk.summary().await.map(Json).map_err(desk_error)
}

fn desk_error(err: DeskError) -> ApiError {
    match err {
        DeskError::Validation(err) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                field: Some(err.field.to_string()),
                message: err.message,
            }),
        ),
        DeskError::Store(StoreError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                field: None,
                message: format!("client {id} not found"),
            }),
        ),
        // Already logged by the desk; the backend detail stays server-side.
        DeskError::Store(StoreError::Backend(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                field: None,
                message: "client store unavailable, nothing was changed".to_string(),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use nexus_store::InMemoryClientStore;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let store: Arc<dyn ClientStore> = Arc::new(InMemoryClientStore::new());
        build_router(AppState {
            desk: Arc::new(ClientDesk::new(store)),
        })
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    fn client_form(free_amount: &str) -> Value {
        json!({
            "name": "Valeria Soto",
            "phone": "555-0123",
            "destination": "Cartagena",
            "travel_date": "2026-12-15",
            "free_amount": free_amount,
        })
    }

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let (status, body) = send(&router(), "GET", "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("ok".to_string()));
    }

    #[tokio::test]
    async fn create_then_pay_in_two_steps() {
        let router = router();

        let (status, body) = send(&router, "POST", "/clients", Some(client_form("1000"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let client = &body["clients"][0];
        assert_eq!(decimal(&client["my_commission"]), Decimal::from(150));
        assert_eq!(client["status"], "pending");
        let id = client["id"].as_str().unwrap().to_string();

        let uri = format!("/clients/{id}/payments");
        let (status, body) = send(&router, "POST", &uri, Some(json!({ "amount": "600" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["clients"][0]["monto_pagado"]), Decimal::from(600));
        assert_eq!(body["clients"][0]["status"], "pending");

        let (_, body) = send(&router, "POST", &uri, Some(json!({ "amount": "400" }))).await;
        assert_eq!(decimal(&body["clients"][0]["monto_pagado"]), Decimal::from(1000));
        assert_eq!(body["clients"][0]["status"], "paid");

        let (status, summary) = send(&router, "GET", "/clients/summary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["paid_count"], 1);
        assert_eq!(decimal(&summary["total_commission"]), Decimal::from(150));
    }

    #[tokio::test]
    async fn non_positive_payment_is_a_field_error() {
        let router = router();
        let (_, body) = send(&router, "POST", "/clients", Some(client_form("200"))).await;
        let id = body["clients"][0]["id"].as_str().unwrap().to_string();

        let uri = format!("/clients/{id}/payments");
        let (status, body) = send(&router, "POST", &uri, Some(json!({ "amount": "-5" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "amount");

        let (_, body) = send(&router, "GET", "/clients", None).await;
        assert_eq!(decimal(&body["clients"][0]["monto_pagado"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn editing_unknown_client_is_not_found() {
        let uri = format!("/clients/{}", Uuid::new_v4());
        let (status, body) = send(&router(), "PUT", &uri, Some(client_form("300"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let mut form = client_form("300");
        form["name"] = json!("  ");
        let (status, body) = send(&router(), "POST", "/clients", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "name");
    }
}
