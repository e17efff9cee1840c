use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, schedule, time_interval, user};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Host account
        .route("/api/v1/users", post(user::create_user))
        .route("/api/v1/users/profile", put(user::update_profile))
        .route("/api/v1/users/time-intervals", post(time_interval::set_time_intervals))
        .route("/api/v1/users/connect-calendar", post(user::connect_calendar))

        // Public scheduling flow
        .route("/api/v1/users/{username}", get(user::get_profile))
        .route("/api/v1/users/{username}/time-intervals", get(time_interval::list_time_intervals))
        .route("/api/v1/users/{username}/calendar", get(schedule::get_month_grid))
        .route("/api/v1/users/{username}/availability", get(schedule::get_day_availability))
        .route("/api/v1/users/{username}/schedule", post(schedule::create_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        host = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
