// src/web/handlers/system_handlers.rs
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::Request;
use tracing::{info, warn};

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}

pub fn bad_request_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

pub fn invalid_input_handler(request: &Request<'_>) -> Json<StandardErrorResponse> {
    warn!("Rejected calculator input on {}", request.uri());
    Json(StandardErrorResponse::new(
        "Request body could not be interpreted as calculator input".to_string(),
        "INVALID_INPUT".to_string(),
        vec![
            "salary and fee_percentage must be numbers".to_string(),
            format!(
                "selected_roles accepts only: {}",
                crate::types::RecruiterRole::accepted_names()
            ),
        ],
        None,
    ))
}

pub fn not_found_handler(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {}", request.uri()),
        "NOT_FOUND".to_string(),
        vec!["See GET /api/rates and POST /api/payouts".to_string()],
        None,
    ))
}

pub fn internal_error_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}
