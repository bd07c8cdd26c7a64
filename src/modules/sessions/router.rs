use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_session, delete_session, get_session, get_sessions, no_longer_participate,
    participate, update_session,
};

pub fn init_sessions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_sessions).post(create_session))
        .route(
            "/{id}",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route(
            "/{id}/participate/{user_id}",
            post(participate).delete(no_longer_participate),
        )
}
