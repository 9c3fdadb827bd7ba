use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use test_utils::factory;
use tower::ServiceExt;

use crate::server::{router::router, state::AppState, util::token::hash_token};


fn app(db: &DatabaseConnection) -> Router {
    router().with_state(AppState::new(db.clone(), Duration::hours(1)))
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends one request and returns the status with the JSON body, `Null` when empty.
async fn send(db: &DatabaseConnection, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(db).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Creates a registered user with a live bearer token.
async fn signed_in(db: &DatabaseConnection, admin: bool) -> (entity::user::Model, String) {
    let user = factory::user::UserFactory::new(db)
        .admin(admin)
        .build()
        .await
        .unwrap();
    let token = format!("token-for-{}", user.id);
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash(hash_token(&token))
        .build()
        .await
        .unwrap();

    (user, token)
}
