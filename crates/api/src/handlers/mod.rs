pub mod categories;
pub mod grocery;
pub mod items;

use axum::Json;

use crate::response::MessageResponse;

/// GET /hello
///
/// Liveness probe kept for existing clients.
pub async fn hello() -> Json<MessageResponse> {
    tracing::debug!("Hello endpoint hit");
    Json(MessageResponse {
        message: "hello, world!",
    })
}
