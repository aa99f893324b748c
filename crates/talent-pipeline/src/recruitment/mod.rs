//! Recruitment pipeline: interview stage updates, position kanban listings and the candidate
//! collaborator endpoints.
//!
//! Services own the business rules and talk to storage only through [`RecruitmentGateway`], so
//! the HTTP router and the CLI board share one code path and tests can swap the store.

pub mod candidates;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod kanban;
pub mod memory;
pub mod router;
pub mod stage;

#[cfg(test)]
mod tests;

pub use candidates::CandidateService;
pub use domain::{
    Application, ApplicationId, ApplicationStageView, Candidate, CandidateDetail, CandidateId,
    CandidateKanbanEntry, Interview, InterviewStep, InterviewStepId, NewCandidate, NotesChange,
    Position, PositionApplication, PositionId, StageUpdate,
};
pub use error::{NotFound, RecruitmentError};
pub use gateway::{GatewayError, RecruitmentGateway};
pub use kanban::{average_score, KanbanService};
pub use memory::{InMemoryRecruitmentGateway, RecruitmentSnapshot, SnapshotError};
pub use router::{recruitment_router, ApiError, RecruitmentServices};
pub use stage::{active_application, StageUpdateService};
