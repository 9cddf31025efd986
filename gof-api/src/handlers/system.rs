use axum::Json;

use crate::dto::HelloResponse;

pub const HELLO_MESSAGE: &str = "Hello from the goodness-of-fit backend!";

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: HELLO_MESSAGE.to_string(),
    })
}

pub async fn health_check() -> &'static str {
    "OK"
}
