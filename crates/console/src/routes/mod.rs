//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Identification page (email form)
//! POST /identify               - Identify account, route to next onboarding step
//! GET  /login                  - Password page
//! POST /api/login              - Login proxy (sets the session cookie)
//! POST /api/logout             - Logout (clears the session cookie)
//!
//! # Onboarding
//! GET  /signup/password        - Password creation page
//! POST /signup/password        - Set password, re-route
//! GET  /signup/profile         - Profile information page
//! POST /signup/profile         - Save profile, re-route
//! GET  /signup/confirm         - Final confirmation page
//! POST /signup/confirm         - Confirm account, re-route
//!
//! # Admin (behind the access gate)
//! GET  /admin                  - Dashboard
//! GET  /admin/categories       - Category list (q filter)
//! GET  /admin/categories/new   - New category form
//! POST /admin/categories       - Create category
//! GET  /admin/categories/{id}/edit   - Edit category form
//! POST /admin/categories/{id}        - Update category
//! POST /admin/categories/{id}/delete - Delete category
//! GET  /admin/sites            - Site list (q + category filter, pagination)
//! GET  /admin/sites/new        - New site form
//! POST /admin/sites            - Create site (multipart)
//! GET  /admin/sites/{id}/edit  - Edit site form
//! POST /admin/sites/{id}       - Update site (multipart)
//! POST /admin/sites/{id}/delete - Delete site
//! GET  /admin/users            - User list (read-only, q filter)
//! ```

pub mod admin;
pub mod categories;
pub mod identify;
pub mod login;
pub mod signup;
pub mod sites;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the onboarding routes router.
pub fn signup_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/password",
            get(signup::password_page).post(signup::submit_password),
        )
        .route(
            "/profile",
            get(signup::profile_page).post(signup::submit_profile),
        )
        .route(
            "/confirm",
            get(signup::confirm_page).post(signup::submit_confirm),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route("/categories/new", get(categories::new))
        .route("/categories/{id}/edit", get(categories::edit))
        .route("/categories/{id}", post(categories::update))
        .route("/categories/{id}/delete", post(categories::delete))
        .route("/sites", get(sites::index).post(sites::create))
        .route("/sites/new", get(sites::new))
        .route("/sites/{id}/edit", get(sites::edit))
        .route("/sites/{id}", post(sites::update))
        .route("/sites/{id}/delete", post(sites::delete))
        .route("/users", get(users::index))
}

/// Create all routes for the console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(identify::page))
        .route("/identify", post(identify::identify))
        .route("/login", get(login::page))
        .route("/api/login", post(login::login))
        .route("/api/logout", post(login::logout))
        .nest("/signup", signup_routes())
        .nest("/admin", admin_routes())
}
