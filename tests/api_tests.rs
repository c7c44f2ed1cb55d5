use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// Router de prueba con el mismo sobre {success, data|error} que la API real
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/api/university/test",
            get(|| async {
                Json(json!({
                    "success": true,
                    "message": "API funcionando correctamente",
                }))
            }),
        )
        .route(
            "/api/university/login-general",
            post(|Json(body): Json<Value>| async move {
                // credenciales desconocidas: error uniforme, sin filtrar
                // si falló el email o la contraseña
                let _ = body;
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "success": false,
                        "error": "Credenciales inválidas",
                    })),
                )
            }),
        )
        .route(
            "/api/university/comunicados-recientes",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": [],
                    "limit": 5,
                }))
            }),
        )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/university/test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_login_invalid_credentials_is_uniform() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/university/login-general")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "email": "nadie@universidad.edu",
                        "password": "incorrecta"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_recientes_default_limit() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/university/comunicados-recientes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["limit"], 5);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/university/no-existe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
