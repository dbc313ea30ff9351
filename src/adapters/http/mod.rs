//! HTTP adapters - axum router for the playground.

pub mod middleware;
pub mod playground;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};

use crate::domain::execution::ExecutorRegistry;
use crate::ports::{SessionValidator, ToolRepository, UserToolStateRepository, ViewRenderer};

pub use middleware::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use playground::{playground_routes, PlaygroundAppState};

/// Everything the HTTP surface needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub tools: Arc<dyn ToolRepository>,
    pub states: Arc<dyn UserToolStateRepository>,
    pub executors: Arc<ExecutorRegistry>,
    pub renderer: Arc<dyn ViewRenderer>,
    pub validator: Arc<dyn SessionValidator>,
    pub login_path: String,
    pub session_cookie: String,
}

/// Builds the authenticated application router.
///
/// Cross-cutting layers (tracing, timeouts, CORS, panic capture) are added
/// by the server binary.
pub fn app_router(deps: AppDependencies) -> Router {
    let auth = AuthState::new(deps.validator, deps.login_path, deps.session_cookie);
    let state = PlaygroundAppState::new(deps.tools, deps.states, deps.executors, deps.renderer);

    playground_routes(state).layer(from_fn_with_state(auth, auth_middleware))
}
