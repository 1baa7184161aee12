// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::environment::EnvironmentConfig;
use crate::rates::RoleInfo;
use crate::types::CalculatorInput;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket};
use tracing::{error, info};

// CORS Fairing
pub struct Cors {
    pub allow_origin: String,
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new(
            "Access-Control-Allow-Origin",
            self.allow_origin.clone(),
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/payouts", data = "<request>")]
pub async fn compute_payouts(
    request: Json<StandardRequest<PayoutRequest>>,
) -> Json<DataResponse<PayoutEstimate>> {
    handlers::compute_payouts_handler(request).await
}

#[get("/rates")]
pub async fn get_rates() -> Json<RateCardResponse> {
    handlers::get_rates_handler().await
}

#[get("/roles")]
pub async fn get_roles() -> Json<DataResponse<Vec<RoleInfo>>> {
    handlers::get_roles_handler().await
}

#[get("/defaults")]
pub async fn get_defaults() -> Json<DataResponse<CalculatorInput>> {
    handlers::get_defaults_handler().await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    handlers::bad_request_handler()
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    handlers::not_found_handler(request)
}

#[rocket::catch(422)]
pub fn unprocessable(request: &Request<'_>) -> Json<StandardErrorResponse> {
    handlers::invalid_input_handler(request)
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    handlers::internal_error_handler()
}

/// Assemble the API without launching it.
pub fn build_rocket(config: &EnvironmentConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port))
        .merge(("log_level", "off"));

    rocket::custom(figment)
        .attach(Cors {
            allow_origin: config.cors_origin.clone(),
        })
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                compute_payouts,
                get_rates,
                get_roles,
                get_defaults,
                health,
                options,
            ],
        )
}

pub async fn start_web_server(config: EnvironmentConfig) -> Result<()> {
    info!("Starting payout calculator API server");
    info!("Server: http://{}:{}", config.address, config.port);
    info!("CORS origin: {}", config.cors_origin);

    if let Err(e) = build_rocket(&config).launch().await {
        error!("Server failed: {}", e);
        return Err(anyhow::anyhow!("Server failed: {}", e));
    }

    Ok(())
}
