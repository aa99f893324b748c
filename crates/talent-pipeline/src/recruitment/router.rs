use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::candidates::CandidateService;
use super::domain::{
    ApplicationId, CandidateId, CandidateKanbanEntry, InterviewStepId, NewCandidate, NotesChange,
    PositionId, StageUpdate,
};
use super::error::RecruitmentError;
use super::gateway::RecruitmentGateway;
use super::kanban::KanbanService;
use super::stage::StageUpdateService;

/// Services shared by every recruitment handler, built around one gateway handle.
pub struct RecruitmentServices<G> {
    pub stages: StageUpdateService<G>,
    pub kanban: KanbanService<G>,
    pub candidates: CandidateService<G>,
}

impl<G> RecruitmentServices<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            stages: StageUpdateService::new(gateway.clone()),
            kanban: KanbanService::new(gateway.clone()),
            candidates: CandidateService::new(gateway),
        }
    }
}

/// Router builder exposing the candidate, application and position endpoints.
pub fn recruitment_router<G>(services: Arc<RecruitmentServices<G>>) -> Router
where
    G: RecruitmentGateway + 'static,
{
    Router::new()
        .route("/candidates", post(create_candidate_handler::<G>))
        .route("/candidates/", post(create_candidate_handler::<G>))
        .route("/candidates/:id", get(candidate_handler::<G>))
        .route(
            "/candidates/:id/stage",
            put(update_candidate_stage_handler::<G>),
        )
        .route(
            "/applications/:id/stage",
            put(update_application_stage_handler::<G>),
        )
        .route(
            "/positions/:id/candidates",
            get(position_candidates_handler::<G>),
        )
        .with_state(services)
}

/// `{error, message}` response body with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        let err = Self::new(StatusCode::BAD_REQUEST, error, message);
        warn!(error = %err.error, message = %err.message, "request rejected");
        err
    }

    /// Map a service failure; `operation` labels errors that have no dedicated status.
    fn from_service(operation: &'static str, err: RecruitmentError) -> Self {
        match err {
            RecruitmentError::NotFound(missing) => {
                Self::new(StatusCode::NOT_FOUND, missing.label(), missing.message())
            }
            RecruitmentError::Validation(detail) | RecruitmentError::Conflict(detail) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid candidate data", detail)
            }
            RecruitmentError::Gateway(source) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                operation,
                source.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PositionCandidatesResponse {
    pub(crate) position_id: PositionId,
    pub(crate) total_candidates: usize,
    pub(crate) candidates: Vec<CandidateKanbanEntry>,
}

pub(crate) async fn update_candidate_stage_handler<G>(
    State(services): State<Arc<RecruitmentServices<G>>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError>
where
    G: RecruitmentGateway + 'static,
{
    let candidate_id = CandidateId(parse_id(&raw_id, "candidate")?);
    let update = parse_stage_update(body)?;

    let view = services
        .stages
        .update_candidate_stage(candidate_id, update)
        .await
        .map_err(|err| ApiError::from_service("Error updating candidate stage", err))?;

    let payload = json!({
        "message": "Candidate stage updated successfully",
        "data": view,
    });
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn update_application_stage_handler<G>(
    State(services): State<Arc<RecruitmentServices<G>>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError>
where
    G: RecruitmentGateway + 'static,
{
    let application_id = ApplicationId(parse_id(&raw_id, "application")?);
    let update = parse_stage_update(body)?;

    let view = services
        .stages
        .update_application_stage(application_id, update)
        .await
        .map_err(|err| ApiError::from_service("Error updating application stage", err))?;

    let payload = json!({
        "message": "Application stage updated successfully",
        "data": view,
    });
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn position_candidates_handler<G>(
    State(services): State<Arc<RecruitmentServices<G>>>,
    Path(raw_id): Path<String>,
) -> Result<Json<PositionCandidatesResponse>, ApiError>
where
    G: RecruitmentGateway + 'static,
{
    let position_id = PositionId(parse_id(&raw_id, "position")?);

    let candidates = services
        .kanban
        .candidates_by_position(position_id)
        .await
        .map_err(|err| ApiError::from_service("Error fetching position candidates", err))?;

    Ok(Json(PositionCandidatesResponse {
        position_id,
        total_candidates: candidates.len(),
        candidates,
    }))
}

pub(crate) async fn create_candidate_handler<G>(
    State(services): State<Arc<RecruitmentServices<G>>>,
    body: Result<Json<NewCandidate>, JsonRejection>,
) -> Result<Response, ApiError>
where
    G: RecruitmentGateway + 'static,
{
    let Json(candidate) = body.map_err(|rejection| {
        ApiError::bad_request("Invalid candidate data", rejection.body_text())
    })?;

    let stored = services
        .candidates
        .create_candidate(candidate)
        .await
        .map_err(|err| ApiError::from_service("Error creating candidate", err))?;

    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

pub(crate) async fn candidate_handler<G>(
    State(services): State<Arc<RecruitmentServices<G>>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError>
where
    G: RecruitmentGateway + 'static,
{
    let candidate_id = CandidateId(parse_id(&raw_id, "candidate")?);

    let detail = services
        .candidates
        .candidate(candidate_id)
        .await
        .map_err(|err| ApiError::from_service("Error fetching candidate", err))?;

    Ok((StatusCode::OK, Json(detail)).into_response())
}

/// Parse a path id; `entity` is the lowercase record name used in the error text.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        let mut capitalized = entity.to_string();
        if let Some(first) = capitalized.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        ApiError::bad_request(
            format!("Invalid {entity} ID format"),
            format!("{capitalized} ID must be a valid number"),
        )
    })
}

/// Validate a stage-update body before any service call.
pub(crate) fn parse_stage_update(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StageUpdate, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        ApiError::bad_request("Invalid request body", rejection.body_text())
    })?;
    let Value::Object(fields) = body else {
        return Err(ApiError::bad_request(
            "Invalid request body",
            "Request body must be a JSON object",
        ));
    };

    let missing_step = || {
        ApiError::bad_request(
            "Missing required field",
            "currentInterviewStep is required",
        )
    };
    let current_interview_step = match fields.get("currentInterviewStep") {
        None | Some(Value::Null) => return Err(missing_step()),
        Some(Value::Number(number)) => integral(number).ok_or_else(|| {
            ApiError::bad_request(
                "Invalid data type",
                "currentInterviewStep must be an integer",
            )
        })?,
        Some(_) => {
            return Err(ApiError::bad_request(
                "Invalid data type",
                "currentInterviewStep must be a number",
            ))
        }
    };
    // Step ids start at 1; zero counts as not provided.
    if current_interview_step == 0 {
        return Err(missing_step());
    }

    let notes = match fields.get("notes") {
        None => NotesChange::Unchanged,
        Some(Value::Null) => NotesChange::Cleared,
        Some(Value::String(notes)) => NotesChange::Replaced(notes.clone()),
        Some(_) => {
            return Err(ApiError::bad_request(
                "Invalid data type",
                "notes must be a string",
            ))
        }
    };

    Ok(StageUpdate {
        current_interview_step: InterviewStepId(current_interview_step),
        notes,
    })
}

/// JSON numbers such as `3.0` count as integers; anything past 2^53 is rejected.
fn integral(number: &serde_json::Number) -> Option<i64> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER)
            .map(|value| value as i64)
    })
}
