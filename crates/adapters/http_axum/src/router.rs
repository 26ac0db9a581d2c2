//! Axum router assembly.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use itemshim_adapter_gateway::{GatewayRequest, GatewayResponse};
use itemshim_app::faults::FaultInjector;
use itemshim_app::ports::ItemStore;

use crate::error::UnhandledError;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/health` and `/invoke` are served here; every other request falls
/// through to the gateway router. Includes a [`TraceLayer`] that logs each
/// HTTP request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, F>(state: AppState<S, F>) -> Router
where
    S: ItemStore + Send + Sync + 'static,
    F: FaultInjector + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/invoke", post(invoke::<S, F>))
        .fallback(passthrough::<S, F>)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// `POST /invoke`: the body is a raw invocation event.
async fn invoke<S, F>(
    State(state): State<AppState<S, F>>,
    Json(event): Json<serde_json::Value>,
) -> Result<Json<GatewayResponse>, UnhandledError>
where
    S: ItemStore + Send + Sync + 'static,
    F: FaultInjector + Send + Sync + 'static,
{
    let response = state.gateway.handle(event).await?;
    Ok(Json(response))
}

/// Any other request, normalized from the HTTP request itself.
async fn passthrough<S, F>(
    State(state): State<AppState<S, F>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Result<Response, UnhandledError>
where
    S: ItemStore + Send + Sync + 'static,
    F: FaultInjector + Send + Sync + 'static,
{
    let body = (!body.is_empty()).then_some(body);
    let request = GatewayRequest::new(method.as_str(), uri.path(), body);
    let response = state.gateway.dispatch(request).await?;
    Ok(into_http(response))
}

fn into_http(response: GatewayResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::with_capacity(response.headers.len());
    for (name, value) in &response.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(%name, "dropping invalid response header"),
        }
    }

    (status, headers, response.body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use itemshim_adapter_gateway::Gateway;
    use itemshim_app::faults::{FaultOutcome, FaultPlan, Operation};
    use itemshim_app::services::item_service::ItemService;
    use itemshim_domain::error::ItemShimError;
    use itemshim_domain::item::Item;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubItemStore {
        items: Mutex<Vec<Item>>,
    }

    impl ItemStore for StubItemStore {
        async fn scan(&self, limit: usize) -> Result<Vec<Item>, ItemShimError> {
            let items = self.items.lock().unwrap();
            Ok(items.iter().take(limit).cloned().collect())
        }

        async fn put(&self, item: &Item) -> Result<(), ItemShimError> {
            let mut items = self.items.lock().unwrap();
            items.retain(|existing| existing.id != item.id);
            items.push(item.clone());
            Ok(())
        }
    }

    struct AlwaysFail;

    impl FaultInjector for AlwaysFail {
        fn plan(&self, _operation: Operation) -> FaultPlan {
            FaultPlan {
                delay: Duration::ZERO,
                outcome: FaultOutcome::ServerError,
            }
        }
    }

    fn app() -> Router {
        build(AppState::new(Gateway::new(ItemService::new(
            StubItemStore::default(),
        ))))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn invoke_request(event: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/invoke")
            .header("content-type", "application/json")
            .body(Body::from(event.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_gateway_document_from_invoke() {
        let event = json!({ "httpMethod": "GET", "path": "/items" });
        let response = app().oneshot(invoke_request(&event)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = read_json(response).await;
        assert_eq!(document["statusCode"], 200);
        assert_eq!(document["headers"]["Content-Type"], "application/json");
        assert_eq!(document["headers"]["Access-Control-Allow-Origin"], "*");
        let body: Value = serde_json::from_str(document["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [], "count": 0 }));
    }

    #[tokio::test]
    async fn should_report_unrecognized_event_as_bad_gateway() {
        let response = app()
            .oneshot(invoke_request(&json!({ "nope": true })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert_eq!(body["errorType"], "UnrecognizedEvent");
    }

    #[tokio::test]
    async fn should_pass_plain_http_through_gateway() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items")
                    .body(Body::from(r#"{"id":"1","name":"Widget"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body = read_json(response).await;
        assert_eq!(body["data"]["id"], "1");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_path() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/other?x=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["path"], "/other");
    }

    #[tokio::test]
    async fn should_map_simulated_server_error_to_bad_gateway() {
        let app = build(AppState::new(Gateway::with_faults(
            ItemService::new(StubItemStore::default()),
            AlwaysFail,
        )));
        let response = app
            .oneshot(Request::builder().uri("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert_eq!(body["errorType"], "SimulatedServerError");
        assert_eq!(body["errorMessage"], "Simulated server error in list_items");
    }
}
