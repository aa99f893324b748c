use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::recruitment::domain::{
    Application, ApplicationId, ApplicationStageView, Candidate, CandidateId, Interview,
    InterviewStep, InterviewStepId, NewCandidate, NotesChange, Position, PositionApplication,
    PositionId, StageUpdate,
};
use crate::recruitment::gateway::{GatewayError, RecruitmentGateway};
use crate::recruitment::memory::{InMemoryRecruitmentGateway, RecruitmentSnapshot};
use crate::recruitment::router::{recruitment_router, RecruitmentServices};

pub(super) fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid date")
}

pub(super) fn candidate(id: i64, first: &str, last: &str) -> Candidate {
    Candidate {
        id: CandidateId(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_ascii_lowercase()),
        phone: None,
        address: None,
    }
}

pub(super) fn step(id: i64, name: &str, order_index: i32) -> InterviewStep {
    InterviewStep {
        id: InterviewStepId(id),
        name: name.to_string(),
        order_index,
    }
}

pub(super) fn application(
    id: i64,
    candidate_id: i64,
    position_id: i64,
    applied_on: DateTime<Utc>,
    step_id: i64,
    scores: &[Option<i32>],
) -> Application {
    Application {
        id: ApplicationId(id),
        position_id: PositionId(position_id),
        candidate_id: CandidateId(candidate_id),
        application_date: applied_on,
        current_interview_step: InterviewStepId(step_id),
        notes: None,
        interviews: scores.iter().map(|score| Interview { score: *score }).collect(),
    }
}

/// Candidate 1 applied to positions 7 and 8 (8 is more recent), candidate 2 to position 7,
/// candidates 3 and 42 have no applications, position 9 has none either.
pub(super) fn snapshot() -> RecruitmentSnapshot {
    RecruitmentSnapshot {
        candidates: vec![
            candidate(1, "Ada", "Lovelace"),
            candidate(2, "Grace", "Hopper"),
            candidate(3, "Alan", "Turing"),
            candidate(42, "Katherine", "Johnson"),
        ],
        positions: vec![
            Position {
                id: PositionId(7),
                title: "Senior Backend Engineer".to_string(),
            },
            Position {
                id: PositionId(8),
                title: "Data Analyst".to_string(),
            },
            Position {
                id: PositionId(9),
                title: "Product Designer".to_string(),
            },
        ],
        interview_steps: vec![
            step(1, "Initial Screening", 1),
            step(2, "Technical Interview", 2),
            step(3, "Manager Interview", 3),
        ],
        applications: vec![
            application(10, 1, 7, date(2024, 1, 10), 1, &[Some(7), Some(8)]),
            application(11, 2, 7, date(2024, 2, 1), 2, &[]),
            application(12, 1, 8, date(2024, 3, 5), 1, &[Some(8), Some(9), None]),
        ],
    }
}

pub(super) fn gateway() -> Arc<InMemoryRecruitmentGateway> {
    Arc::new(InMemoryRecruitmentGateway::from_snapshot(snapshot()).expect("fixture is consistent"))
}

pub(super) fn stage_update(step_id: i64, notes: NotesChange) -> StageUpdate {
    StageUpdate {
        current_interview_step: InterviewStepId(step_id),
        notes,
    }
}

pub(super) fn router_with<G>(gateway: Arc<G>) -> axum::Router
where
    G: RecruitmentGateway + 'static,
{
    recruitment_router(Arc::new(RecruitmentServices::new(gateway)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Delegates to the in-memory gateway while counting every call and every write.
#[derive(Default)]
pub(super) struct CountingGateway {
    inner: InMemoryRecruitmentGateway,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingGateway {
    pub(super) fn seeded() -> Self {
        Self {
            inner: InMemoryRecruitmentGateway::from_snapshot(snapshot())
                .expect("fixture is consistent"),
            ..Self::default()
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) fn inner(&self) -> &InMemoryRecruitmentGateway {
        &self.inner
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecruitmentGateway for CountingGateway {
    async fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, GatewayError> {
        self.touch();
        self.inner.candidate(id).await
    }

    async fn position(&self, id: PositionId) -> Result<Option<Position>, GatewayError> {
        self.touch();
        self.inner.position(id).await
    }

    async fn interview_step(
        &self,
        id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, GatewayError> {
        self.touch();
        self.inner.interview_step(id).await
    }

    async fn application(&self, id: ApplicationId) -> Result<Option<Application>, GatewayError> {
        self.touch();
        self.inner.application(id).await
    }

    async fn applications_for_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        self.touch();
        self.inner.applications_for_candidate(id).await
    }

    async fn applications_for_position(
        &self,
        id: PositionId,
    ) -> Result<Vec<PositionApplication>, GatewayError> {
        self.touch();
        self.inner.applications_for_position(id).await
    }

    async fn update_application_stage(
        &self,
        id: ApplicationId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, GatewayError> {
        self.touch();
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update_application_stage(id, update).await
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, GatewayError> {
        self.touch();
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_candidate(candidate).await
    }
}

pub(super) struct UnavailableGateway;

fn offline<T>() -> Result<T, GatewayError> {
    Err(GatewayError::Unavailable("database offline".to_string()))
}

#[async_trait]
impl RecruitmentGateway for UnavailableGateway {
    async fn candidate(&self, _id: CandidateId) -> Result<Option<Candidate>, GatewayError> {
        offline()
    }

    async fn position(&self, _id: PositionId) -> Result<Option<Position>, GatewayError> {
        offline()
    }

    async fn interview_step(
        &self,
        _id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, GatewayError> {
        offline()
    }

    async fn application(&self, _id: ApplicationId) -> Result<Option<Application>, GatewayError> {
        offline()
    }

    async fn applications_for_candidate(
        &self,
        _id: CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        offline()
    }

    async fn applications_for_position(
        &self,
        _id: PositionId,
    ) -> Result<Vec<PositionApplication>, GatewayError> {
        offline()
    }

    async fn update_application_stage(
        &self,
        _id: ApplicationId,
        _update: &StageUpdate,
    ) -> Result<ApplicationStageView, GatewayError> {
        offline()
    }

    async fn insert_candidate(&self, _candidate: NewCandidate) -> Result<Candidate, GatewayError> {
        offline()
    }
}
