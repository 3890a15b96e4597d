//! HTTP surface: procedure routes, service listing and storage health.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::auth::Actor;
use crate::config::AppConfig;
use crate::database::{Database, DatabaseError, Repositories};
use crate::error::ApiError;
use crate::middleware::{resolve_actor, ApiResponse, ApiResult};
use crate::rpc::{Call, ProcedureKind};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(procedure_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn procedure_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/trpc/:procedure", get(run_query).post(run_mutation))
        .route_layer(middleware::from_fn_with_state(state, resolve_actor))
}

/// Picks the storage backend from configuration: Postgres when a database
/// URL is set, the in-memory store otherwise.
pub async fn build_state(config: AppConfig) -> Result<AppState, DatabaseError> {
    let repos = match config.database.url {
        Some(_) => {
            let database = Database::connect(&config.database).await?;
            if config.database.run_migrations {
                database.migrate().await?;
            }
            Repositories::postgres(database)
        }
        None => {
            warn!("DATABASE_URL is not set; records are kept in memory and lost on exit");
            Repositories::in_memory()
        }
    };

    Ok(AppState::new(repos, config))
}

async fn run_query(
    State(state): State<AppState>,
    Path(procedure): Path<String>,
    actor: Option<Extension<Actor>>,
) -> ApiResult<Value> {
    let call = Call {
        input: Value::Null,
        actor: actor.map(|Extension(actor)| actor),
    };
    let procedures = state.procedures.clone();
    let data = procedures.dispatch(state, &procedure, ProcedureKind::Query, call).await?;
    Ok(ApiResponse::success(data))
}

async fn run_mutation(
    State(state): State<AppState>,
    Path(procedure): Path<String>,
    actor: Option<Extension<Actor>>,
    body: Bytes,
) -> ApiResult<Value> {
    // An empty body is a missing input, reported by validation.
    let input = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid_json(format!("Request body is not valid JSON: {}", e)))?
    };

    let call = Call {
        input,
        actor: actor.map(|Extension(actor)| actor),
    };
    let procedures = state.procedures.clone();
    let data = procedures.dispatch(state, &procedure, ProcedureKind::Mutation, call).await?;
    Ok(ApiResponse::success(data))
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    procedures: Vec<ProcedureInfo>,
}

#[derive(Debug, Serialize)]
struct ProcedureInfo {
    name: &'static str,
    kind: ProcedureKind,
    method: &'static str,
    path: String,
    requires_actor: bool,
}

async fn root(State(state): State<AppState>) -> ApiResponse<ServiceInfo> {
    let procedures = state
        .procedures
        .iter()
        .map(|p| ProcedureInfo {
            name: p.name,
            kind: p.kind,
            method: p.kind.method(),
            path: format!("/trpc/{}", p.name),
            requires_actor: p.requires_actor(),
        })
        .collect();

    ApiResponse::success(ServiceInfo {
        name: "Portal Admin API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Administrative backend for the municipal services portal",
        procedures,
    })
}

#[derive(Debug, Serialize)]
struct StorageStatus {
    status: &'static str,
    storage: &'static str,
    #[serde(with = "crate::schema::wire::date")]
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn health(State(state): State<AppState>) -> ApiResponse<StorageStatus> {
    let storage = state.repos.health.backend();
    let timestamp = Utc::now();

    match state.repos.health.ping().await {
        Ok(()) => ApiResponse::success(StorageStatus {
            status: "ok",
            storage,
            timestamp,
            error: None,
        }),
        Err(e) => {
            warn!(storage, "Storage health check failed: {}", e);
            ApiResponse::with_status(
                StorageStatus {
                    status: "degraded",
                    storage,
                    timestamp,
                    error: Some("storage unavailable".to_string()),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let bind_addr = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        address = %bind_addr,
        procedures = state.procedures.len(),
        storage = state.repos.health.backend(),
        "Portal admin API listening"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt, Claims};
    use crate::schema::UserRole;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::in_memory(AppConfig::development())
    }

    fn bearer(state: &AppState, user_id: i32) -> String {
        let claims = Claims::new(user_id, format!("operator{}", user_id), UserRole::Staff, 1).unwrap();
        let token = generate_jwt(&claims, &state.config.security.jwt_secret).unwrap();
        format!("Bearer {}", token)
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test]
    async fn root_lists_procedures() {
        let state = state();
        let (status, body) = send(&state, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let listed = body["data"]["procedures"].as_array().unwrap();
        assert_eq!(listed.len(), state.procedures.len());
        let publication = listed.iter().find(|p| p["name"] == "createPublication").unwrap();
        assert_eq!(publication["kind"], "mutation");
        assert_eq!(publication["method"], "POST");
        assert_eq!(publication["requires_actor"], true);
    }

    #[tokio::test]
    async fn health_reports_memory_storage() {
        let (status, body) = send(&state(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["storage"], "memory");
    }

    #[tokio::test]
    async fn query_and_mutation_round_trip() {
        let state = state();
        let payload = json!({
            "title": "Broken streetlight",
            "description": "Streetlight has been out for two weeks",
            "citizen_name": "Jane Doe",
            "citizen_email": "jane@example.com",
            "citizen_phone": null,
            "address": "123 Main St"
        });
        let (status, body) = send(&state, post("/trpc/createComplaint", payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "PENDING");

        let (status, body) = send(&state, get("/trpc/getComplaints")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn wrong_method_and_unknown_name() {
        let state = state();
        let (status, body) = send(&state, post("/trpc/getUsers", "{}")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");

        let (status, _) = send(&state, get("/trpc/createUser")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, body) = send(&state, get("/trpc/getEverything")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_and_non_object_bodies() {
        let state = state();
        let (status, body) = send(&state, post("/trpc/createUser", "{\"username\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");

        let (status, body) = send(&state, post("/trpc/createUser", "[1, 2]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"][0]["field"], "");

        let (status, body) = send(&state, post("/trpc/createUser", Body::empty())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn actor_comes_from_the_bearer_token() {
        let state = state();
        let payload = json!({
            "title": "Town Hall Meeting",
            "content": "Meeting scheduled for next week",
            "type": "EVENT",
            "author_id": 1
        })
        .to_string();

        let (status, body) = send(&state, post("/trpc/createPublication", payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let mut request = post("/trpc/createPublication", payload);
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, bearer(&state, 7).parse().unwrap());
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["author_id"], 7);
        assert!(body["data"]["published_at"].is_null());
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_even_for_queries() {
        let state = state();
        let mut request = get("/trpc/getUsers");
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, "Bearer not.a.jwt".parse().unwrap());
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn oversized_bodies_are_refused() {
        let mut config = AppConfig::development();
        config.api.max_request_size_bytes = 64;
        let state = AppState::in_memory(config);

        let padding = "x".repeat(256);
        let payload = json!({ "key": "motd", "value": padding }).to_string();
        let mut request = post("/trpc/updateSystemSetting", payload);
        request
            .headers_mut()
            .insert(header::AUTHORIZATION, bearer(&state, 1).parse().unwrap());
        let response = app(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
