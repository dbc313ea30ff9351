//! HTTP routes for playground endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{execute, index, root_redirect, show, update, PlaygroundAppState};

/// Creates the playground router.
///
/// # Routes
///
/// - `GET /` - Redirect to `/playground`
/// - `GET /playground` - Index of active tools
/// - `GET /playground/tools/:locator` - Tool page (slug or id)
/// - `PUT /playground/tools/:locator` - Save data / configuration
/// - `POST /playground/tools/:locator/execute` - Run the tool
///
/// Every route expects `auth_middleware` to be layered on top.
pub fn playground_routes(state: PlaygroundAppState) -> Router {
    Router::new()
        .route("/", get(root_redirect))
        .route("/playground", get(index))
        .route("/playground/tools/:locator", get(show).put(update))
        .route("/playground/tools/:locator/execute", post(execute))
        .with_state(state)
}
