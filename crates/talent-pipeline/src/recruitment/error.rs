use super::domain::{ApplicationId, CandidateId, InterviewStepId, PositionId};
use super::gateway::GatewayError;

/// Missing record, tagged with the entity the handler reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("Candidate not found")]
    Candidate(CandidateId),
    #[error("Application not found")]
    Application(ApplicationId),
    #[error("Interview step not found")]
    InterviewStep(InterviewStepId),
    #[error("No active application found for this candidate")]
    ActiveApplication(CandidateId),
    #[error("Position not found")]
    Position(PositionId),
}

impl NotFound {
    /// Short label used as the `error` field of HTTP responses.
    pub const fn label(&self) -> &'static str {
        match self {
            NotFound::Candidate(_) => "Candidate not found",
            NotFound::Application(_) => "Application not found",
            NotFound::InterviewStep(_) => "Interview step not found",
            NotFound::ActiveApplication(_) => "No active application",
            NotFound::Position(_) => "Position not found",
        }
    }

    /// Human readable detail used as the `message` field of HTTP responses.
    pub fn message(&self) -> String {
        match self {
            NotFound::Candidate(id) => format!("Candidate with ID {id} does not exist"),
            NotFound::Application(id) => format!("Application with ID {id} does not exist"),
            NotFound::InterviewStep(_) => "The specified interview step does not exist".to_string(),
            NotFound::ActiveApplication(_) => {
                "No active application found for this candidate".to_string()
            }
            NotFound::Position(id) => format!("Position with ID {id} does not exist"),
        }
    }
}

/// Error raised by the recruitment services.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
