use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{ads, users, AppState};
use crate::middleware::with_standard_layers;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/ads", get(ads::list_ads).post(ads::create_ad))
        .route(
            "/ads/{id}",
            get(ads::get_ad).put(ads::update_ad).delete(ads::delete_ad),
        )
        .route("/ads/{id}/status", put(ads::change_ad_status))
        .route("/users", post(users::create_user))
        .route("/users/login", post(users::login_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    with_standard_layers(Router::new().nest("/api/v1", api)).with_state(state)
}
