use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{create_social_user, get_current_user, update_current_user};

pub fn build_user_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/social", post(create_social_user))
        .route("/me", get(get_current_user).put(update_current_user));

    Router::new().nest("/users", routers)
}
