//! HTTP route handlers for the shopping assistant API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::catalog::Product;
use crate::errors::AssistantError;
use crate::profile::UserProfile;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/recommend", post(recommend))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shopping-agent",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model_name,
        "products": state.assistant.catalog().len()
    }))
}

/// Error payload returned on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable reason.
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorDetail>);

fn api_error(err: &AssistantError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorDetail {
            detail: err.to_string(),
        }),
    )
}

/// Chat turn request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Caller-chosen user key.
    pub user_id: String,
    /// The shopper's message.
    pub message: String,
}

/// Chat turn response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,
    /// Profile after this turn.
    pub user_profile: UserProfile,
    /// Products to show.
    pub recommendations: Vec<Product>,
}

/// Handle one chat turn.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let outcome = state
        .assistant
        .handle_turn(&request.user_id, &request.message)
        .await
        .map_err(|e| api_error(&e))?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        user_profile: outcome.user_profile,
        recommendations: outcome.recommendations,
    }))
}

/// Recommendation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// User whose stored profile drives the list.
    pub user_id: String,
}

/// Recommendation response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Products matching the stored profile.
    pub recommendations: Vec<Product>,
}

/// Recommend from the stored profile.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let recommendations = state
        .assistant
        .recommendations(&request.user_id)
        .await
        .map_err(|e| api_error(&e))?;

    Ok(Json(RecommendResponse { recommendations }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::ShoppingAssistant;
    use crate::catalog::fixtures::red_mug;
    use crate::catalog::Catalog;
    use crate::config::AssistantConfig;
    use crate::llm::fakes::FakeChatClient;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn app() -> Router {
        let client = Arc::new(FakeChatClient::new(|messages| {
            if messages[0].content.starts_with("You classify") {
                Ok("Kitchen".to_string())
            } else {
                Ok("Try the Red Mug!".to_string())
            }
        }));
        let catalog = Arc::new(Catalog::from_products(vec![red_mug()]).unwrap());
        let assistant =
            ShoppingAssistant::new(catalog, client, &AssistantConfig::default()).unwrap();
        create_router(AppState::from_assistant(assistant))
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_catalog_size() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["products"], 1);
        assert_eq!(body["model"], "fake-model");
    }

    #[tokio::test]
    async fn test_chat_then_recommend() {
        let app = app();
        let chat = serde_json::json!({"user_id": "u1", "message": "I want a red mug under 20 dollars"});
        let response = app.clone().oneshot(post_json("/chat", &chat)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["response"], "Try the Red Mug!");
        assert_eq!(body["user_profile"]["budget_range"], serde_json::json!([0, 20]));
        assert_eq!(body["user_profile"]["color"], "red");
        assert_eq!(body["recommendations"][0]["name"], "Red Mug");
        assert_eq!(body["recommendations"][0]["price"].to_string(), "10");

        let response = app
            .oneshot(post_json("/recommend", &serde_json::json!({"user_id": "u1"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["recommendations"][0]["name"], "Red Mug");
    }

    #[tokio::test]
    async fn test_recommend_without_profile_is_bad_request() {
        let response = app()
            .oneshot(post_json("/recommend", &serde_json::json!({"user_id": "nobody"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorDetail = serde_json::from_value(body_json(response).await).unwrap();
        assert!(body.detail.contains("nobody"));
    }
}
