use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::Role;
use crate::state::SharedState;

pub mod auth;
mod error;
pub mod extract;
mod health;
mod menus;
mod notifications;
pub mod rate_limit;
mod reports;
mod types;
mod users;
mod validation;
mod wellness;

pub use error::ApiError;
pub use rate_limit::RateLimiter;
pub use types::*;

use crate::services::{
    AuthService, MenuService, NotificationService, ReportService, TokenService, UserService,
    WellnessService,
};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub rate_limiter: Arc<RateLimiter>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.shared.tokens
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthService {
        self.shared.auth_service.as_ref()
    }

    #[must_use]
    pub fn users(&self) -> &dyn UserService {
        self.shared.user_service.as_ref()
    }

    #[must_use]
    pub fn reports(&self) -> &dyn ReportService {
        self.shared.report_service.as_ref()
    }

    #[must_use]
    pub fn wellness(&self) -> &dyn WellnessService {
        self.shared.wellness_service.as_ref()
    }

    #[must_use]
    pub fn menus(&self) -> &dyn MenuService {
        self.shared.menu_service.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &dyn NotificationService {
        self.shared.notification_service.as_ref()
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    let rate_limiter = Arc::new(RateLimiter::new(&shared.config.rate_limit));

    Arc::new(AppState {
        shared,
        rate_limiter,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let public_auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ));

    let api_router = Router::new()
        .merge(create_protected_router(state.clone()))
        .merge(public_auth_routes)
        .route("/health", get(health::health))
        .fallback(route_not_found)
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Routes open to any holder of `roles`, on top of bearer authentication.
fn gated(roles: &'static [Role], routes: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    routes.route_layer(middleware::from_fn_with_state(roles, auth::require_roles))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let report_staff = gated(
        Role::REPORT_STAFF,
        Router::new().route("/reports/{id}/status", patch(reports::update_report_status)),
    );

    let wellness_staff = gated(
        Role::WELLNESS_STAFF,
        Router::new()
            .route("/wellness/users/{id}/records", get(wellness::list_user_records))
            .route("/wellness/users/{id}/summary", get(wellness::user_summary)),
    );

    let menu_staff = gated(
        Role::MENU_STAFF,
        Router::new()
            .route("/menus", post(menus::create_menu))
            .route("/menus/{id}", put(menus::update_menu))
            .route("/menus/{id}/ratings", get(menus::list_ratings)),
    );

    let admin = gated(
        Role::ADMIN_ONLY,
        Router::new()
            .route("/facilities", post(reports::create_facility))
            .route("/users", get(users::list_users))
            .route(
                "/users/{id}",
                get(users::get_user).delete(users::delete_user),
            )
            .route("/users/{id}/roles", put(users::set_roles))
            .route("/users/{id}/active", patch(users::set_active)),
    );

    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/password", put(auth::change_password))
        .route("/facilities", get(reports::list_facilities))
        .route("/reports/priorities", get(reports::list_priorities))
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/reports/{id}", get(reports::get_report))
        .route(
            "/wellness/records",
            get(wellness::list_my_records).post(wellness::create_record),
        )
        .route("/wellness/summary", get(wellness::my_summary))
        .route("/menus", get(menus::list_menus))
        .route("/menus/today", get(menus::today))
        .route("/menus/date/{date}", get(menus::get_menu_by_date))
        .route("/menus/{id}", get(menus::get_menu))
        .route("/menus/{id}/ratings", post(menus::rate_menu))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/{id}/read", patch(notifications::mark_read))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .merge(report_staff)
        .merge(wellness_staff)
        .merge(menu_staff)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
