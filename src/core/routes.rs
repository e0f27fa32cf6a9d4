// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{auth, catalog, cors, health, static_files, users};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Accounts
        .route("/login", post(auth::login_handler))
        .route("/register", post(auth::register_handler))
        .route("/users", get(users::list_users_handler))
        .route("/update-role", post(users::update_role_handler))

        // Classes and equipment
        .route(
            "/classes",
            get(catalog::list_classes_handler).post(catalog::save_class_handler),
        )
        .route(
            "/equipment",
            get(catalog::list_equipment_handler).post(catalog::save_equipment_handler),
        )

        .route("/health", get(health::health_handler))

        // Everything else is a static file
        .fallback(static_files::static_file_handler)

        .layer(middleware::from_fn(cors::cors_middleware))
        .with_state(state)
}
