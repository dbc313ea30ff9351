//! HTTP handlers for playground endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::playground::{
    ActiveToolResolver, ExecuteToolCommand, ExecuteToolHandler, GetToolForDisplayHandler,
    GetToolForDisplayQuery, ListActiveToolsHandler, ListActiveToolsQuery, UpdateToolCommand,
    UpdateToolHandler, UserStateService,
};
use crate::domain::execution::{ComputationError, ExecutorRegistry};
use crate::domain::playground::{PlaygroundError, ToolLocator};
use crate::ports::{ToolRepository, UserToolStateRepository, ViewRenderer};

use super::dto::{
    ErrorResponse, IndexProps, ShowProps, ToolResponse, UpdateToolRequest, UpdateToolResponse,
    ValidationErrorResponse,
};

/// View rendered for the playground index.
pub const INDEX_VIEW: &str = "Playground/Index";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlaygroundAppState {
    list_handler: Arc<ListActiveToolsHandler>,
    show_handler: Arc<GetToolForDisplayHandler>,
    update_handler: Arc<UpdateToolHandler>,
    execute_handler: Arc<ExecuteToolHandler>,
    renderer: Arc<dyn ViewRenderer>,
}

impl PlaygroundAppState {
    pub fn new(
        tools: Arc<dyn ToolRepository>,
        states: Arc<dyn UserToolStateRepository>,
        executors: Arc<ExecutorRegistry>,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        let resolver = ActiveToolResolver::new(tools.clone());
        let state_service = UserStateService::new(states);

        Self {
            list_handler: Arc::new(ListActiveToolsHandler::new(tools.clone())),
            show_handler: Arc::new(GetToolForDisplayHandler::new(
                resolver.clone(),
                state_service.clone(),
            )),
            update_handler: Arc::new(UpdateToolHandler::new(
                resolver.clone(),
                state_service,
                tools,
            )),
            execute_handler: Arc::new(ExecuteToolHandler::new(resolver, executors)),
            renderer,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Redirect to the playground
pub async fn root_redirect(RequireAuth(_user): RequireAuth) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/playground")]).into_response()
}

/// GET /playground - List active tools
pub async fn index(
    State(state): State<PlaygroundAppState>,
    RequireAuth(_user): RequireAuth,
    OriginalUri(uri): OriginalUri,
) -> Response {
    match state.list_handler.handle(ListActiveToolsQuery).await {
        Ok(tools) => {
            let props = IndexProps {
                tools: tools.iter().map(ToolResponse::from).collect(),
            };
            render_page(&state, INDEX_VIEW, &props, &uri.to_string())
        }
        Err(e) => handle_playground_error(e, "index", None),
    }
}

/// GET /playground/tools/:locator - Show a tool with the caller's saved data
pub async fn show(
    State(state): State<PlaygroundAppState>,
    RequireAuth(user): RequireAuth,
    Path(locator): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let locator = ToolLocator::parse(&locator);
    let query = GetToolForDisplayQuery {
        locator: locator.clone(),
        user_id: user.id,
    };

    match state.show_handler.handle(query).await {
        Ok(display) => {
            let props = ShowProps {
                tool: ToolResponse::from(&display.tool),
                saved_data: display.saved_data,
            };
            render_page(&state, &display.tool.view_name(), &props, &uri.to_string())
        }
        Err(e) => handle_playground_error(e, "show", Some(&locator)),
    }
}

/// PUT /playground/tools/:locator - Replace saved data and/or configuration
pub async fn update(
    State(state): State<PlaygroundAppState>,
    RequireAuth(user): RequireAuth,
    Path(locator): Path<String>,
    body: Result<Json<UpdateToolRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse::field("body", rejection.body_text())),
            )
                .into_response()
        }
    };

    let locator = ToolLocator::parse(&locator);
    let cmd = UpdateToolCommand {
        locator: locator.clone(),
        user_id: user.id,
        saved_data: req.saved_data,
        configuration: req.configuration,
    };

    match state.update_handler.handle(cmd).await {
        Ok(result) => {
            let response = UpdateToolResponse {
                tool: ToolResponse::from(&result.tool),
                saved_data: result.saved_data,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_playground_error(e, "update", Some(&locator)),
    }
}

/// POST /playground/tools/:locator/execute - Run the tool's computation
///
/// An empty body runs the tool with no input. A body that is not JSON
/// yields an `{error}` value once the tool has passed the access gate.
pub async fn execute(
    State(state): State<PlaygroundAppState>,
    RequireAuth(user): RequireAuth,
    Path(locator): Path<String>,
    body: Bytes,
) -> Response {
    let locator = ToolLocator::parse(&locator);
    let cmd = ExecuteToolCommand {
        locator: locator.clone(),
        user_id: user.id,
        input: execution_input(&body),
    };

    match state.execute_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_playground_error(e, "execute", Some(&locator)),
    }
}

fn execution_input(body: &[u8]) -> Result<Value, ComputationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    serde_json::from_slice(body)
        .map_err(|e| ComputationError::new(format!("Invalid JSON body: {}", e)))
}

fn render_page<P: serde::Serialize>(
    state: &PlaygroundAppState,
    view: &str,
    props: &P,
    url: &str,
) -> Response {
    match serde_json::to_value(props) {
        Ok(props) => {
            let page = state.renderer.render(view, props, url);
            (StatusCode::OK, [(header::VARY, "Accept")], Json(page)).into_response()
        }
        Err(e) => handle_playground_error(
            PlaygroundError::infrastructure(format!("Failed to serialize props: {}", e)),
            "render",
            None,
        ),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_playground_error(
    error: PlaygroundError,
    operation: &str,
    locator: Option<&ToolLocator>,
) -> Response {
    match error {
        PlaygroundError::NotFound(locator) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("Tool not found: {}", locator))),
        )
            .into_response(),
        PlaygroundError::ValidationFailed { field, message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse::field(field, message)),
        )
            .into_response(),
        PlaygroundError::Conflict(message) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::conflict(message))).into_response()
        }
        PlaygroundError::Infrastructure(message) => {
            let locator = locator.map_or_else(|| "-".to_string(), ToString::to_string);
            tracing::error!(operation, %locator, error = %message, "Playground request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_execute_body_is_empty_input() {
        assert_eq!(execution_input(b""), Ok(json!({})));
        assert_eq!(execution_input(b" \r\n"), Ok(json!({})));
        assert_eq!(execution_input(br#"{"text":"hi"}"#), Ok(json!({"text": "hi"})));
    }

    #[test]
    fn broken_execute_body_is_a_computation_error() {
        let err = execution_input(b"{\"text\": ").unwrap_err();
        assert!(err.message().starts_with("Invalid JSON body"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_playground_error(
            PlaygroundError::NotFound("word-counter".to_string()),
            "show",
            None,
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_failed_maps_to_422() {
        let response = handle_playground_error(
            PlaygroundError::validation("saved_data", "The saved data field must be an array."),
            "update",
            None,
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response =
            handle_playground_error(PlaygroundError::conflict("taken"), "update", None);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn infrastructure_maps_to_500_without_details() {
        let response = handle_playground_error(
            PlaygroundError::infrastructure("password authentication failed for user"),
            "execute",
            Some(&ToolLocator::parse("calculator")),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(!body.contains("password"));
    }
}
