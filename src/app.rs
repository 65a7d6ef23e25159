use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/reset-password", post(handlers::reset_password))
        .route("/api/session", get(handlers::session))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::add_habit),
        )
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/marks", post(handlers::set_mark))
        .route("/api/month", get(handlers::month_view))
        .route(
            "/api/metrics",
            get(handlers::get_metrics).post(handlers::set_metrics),
        )
        .route("/api/chat", get(handlers::get_chat).post(handlers::post_chat))
        .route("/api/report", get(handlers::report))
        .route("/api/voice", get(handlers::get_voice).post(handlers::set_voice))
        .route("/api/photo", get(handlers::get_photo).post(handlers::set_photo))
        .with_state(state)
}
