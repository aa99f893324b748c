use async_trait::async_trait;

use super::domain::{
    Application, ApplicationId, ApplicationStageView, Candidate, CandidateId, InterviewStep,
    InterviewStepId, NewCandidate, Position, PositionApplication, PositionId, StageUpdate,
};

/// Persistence boundary for the recruitment services.
///
/// Lookups return `Ok(None)` for missing records; `Err` is reserved for storage failures so the
/// services decide which absence is a client error.
#[async_trait]
pub trait RecruitmentGateway: Send + Sync {
    async fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, GatewayError>;

    async fn position(&self, id: PositionId) -> Result<Option<Position>, GatewayError>;

    async fn interview_step(
        &self,
        id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, GatewayError>;

    async fn application(&self, id: ApplicationId) -> Result<Option<Application>, GatewayError>;

    /// Every application the candidate has submitted, in storage order.
    async fn applications_for_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Vec<Application>, GatewayError>;

    /// Applications of a position joined with candidate, current step and interview scores.
    async fn applications_for_position(
        &self,
        id: PositionId,
    ) -> Result<Vec<PositionApplication>, GatewayError>;

    /// Write the stage fields of one application and return it joined with its relations.
    async fn update_application_stage(
        &self,
        id: ApplicationId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, GatewayError>;

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, GatewayError>;
}

/// Error enumeration for gateway failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record conflicts with existing data: {0}")]
    Conflict(String),
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}
