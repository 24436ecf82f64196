use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::repository::SessionRepository;
use super::service::AssistantService;
use super::session::{SessionId, SubmitOutcome};
use crate::error::AppError;
use crate::roles::Role;

#[derive(Debug, Deserialize)]
pub(crate) struct StartSessionRequest {
    pub(crate) role: Role,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskRequest {
    pub(crate) text: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) role: Option<String>,
}

/// Router builder exposing the role picker, chat sessions, and dashboard.
pub fn assistant_router<R>(service: Arc<AssistantService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/roles", get(roles_handler::<R>))
        .route("/api/v1/dashboard", get(dashboard_handler::<R>))
        .route("/api/v1/sessions", post(start_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R>).delete(end_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/messages",
            post(ask_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/dashboard",
            get(session_dashboard_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn roles_handler<R>(State(service): State<Arc<AssistantService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    (StatusCode::OK, Json(service.roles())).into_response()
}

pub(crate) async fn dashboard_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    let role = query
        .role
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(str::parse::<Role>)
        .transpose()?;

    Ok((StatusCode::OK, Json(service.dashboard(role))).into_response())
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    let view = service.start_session(request.role)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    let view = service.session(&SessionId(session_id))?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

pub(crate) async fn ask_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Path(session_id): Path<String>,
    Json(request): Json<AskRequest>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    let response = service.ask(&SessionId(session_id), &request.text)?;
    if response.outcome == SubmitOutcome::Ignored {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok((StatusCode::ACCEPTED, Json(response)).into_response())
}

pub(crate) async fn end_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    service.end_session(&SessionId(session_id))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub(crate) async fn session_dashboard_handler<R>(
    State(service): State<Arc<AssistantService<R>>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError>
where
    R: SessionRepository + 'static,
{
    let dashboard = service.session_dashboard(&SessionId(session_id))?;
    Ok((StatusCode::OK, Json(dashboard)).into_response())
}
