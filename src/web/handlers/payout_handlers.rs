// src/web/handlers/payout_handlers.rs
use crate::calculator::CalculatorState;
use crate::rates::{rate_card, role_infos, RoleInfo};
use crate::types::CalculatorInput;
use crate::utils::format_currency;
use crate::web::types::*;

use rocket::serde::json::Json;
use tracing::info;

pub async fn compute_payouts_handler(
    request: Json<StandardRequest<PayoutRequest>>,
) -> Json<DataResponse<PayoutEstimate>> {
    let conversation_id = request.conversation_id();
    let request = request.into_inner().data;

    let state = CalculatorState::from(&request.input);
    let breakdown = state.breakdown();
    let recommended_tier = state.best_tier(request.placements_per_month.unwrap_or(1));

    let estimate = PayoutEstimate {
        estimate_id: uuid::Uuid::new_v4().to_string(),
        computed_at: chrono::Utc::now().to_rfc3339(),
        input: state.to_input(),
        breakdown,
        recommended_tier,
    };

    info!(
        "Estimate {}: fee {} across [{}], recommended tier {}",
        estimate.estimate_id,
        format_currency(estimate.breakdown.effective_fee),
        state.selected_roles(),
        recommended_tier
    );

    Json(DataResponse::success(
        format!(
            "Placement fee {} with {} role(s) selected",
            format_currency(estimate.breakdown.effective_fee),
            state.selected_roles().len()
        ),
        estimate,
        conversation_id,
    ))
}

pub async fn get_rates_handler() -> Json<RateCardResponse> {
    Json(DataResponse::success(
        "Commission rates per subscription tier".to_string(),
        rate_card(),
        None,
    ))
}

pub async fn get_roles_handler() -> Json<DataResponse<Vec<RoleInfo>>> {
    Json(DataResponse::success(
        "Recruiter roles".to_string(),
        role_infos(),
        None,
    ))
}

pub async fn get_defaults_handler() -> Json<DataResponse<CalculatorInput>> {
    Json(DataResponse::success(
        "Default calculator input".to_string(),
        CalculatorInput::default(),
        None,
    ))
}
