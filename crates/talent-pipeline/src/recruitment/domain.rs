use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a stored candidate.
    CandidateId
);
record_id!(
    /// Identifier of an open position.
    PositionId
);
record_id!(
    /// Identifier of a hiring pipeline stage.
    InterviewStepId
);
record_id!(
    /// Identifier of a candidate's application to a position.
    ApplicationId
);

/// Person tracked through one or more hiring pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    pub title: String,
}

impl Position {
    pub fn summary(&self) -> PositionSummary {
        PositionSummary {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Named, ordered phase of a hiring pipeline ("Phone Screen", "Onsite", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewStep {
    pub id: InterviewStepId,
    pub name: String,
    pub order_index: i32,
}

impl InterviewStep {
    pub fn summary(&self) -> InterviewStepSummary {
        InterviewStepSummary {
            id: self.id,
            name: self.name.clone(),
            order_index: self.order_index,
        }
    }
}

/// Interview held as part of an application. Unscored interviews carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    #[serde(default)]
    pub score: Option<i32>,
}

/// One candidate's progress through one position's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub position_id: PositionId,
    pub candidate_id: CandidateId,
    pub application_date: DateTime<Utc>,
    pub current_interview_step: InterviewStepId,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewStepSummary {
    pub id: InterviewStepId,
    pub name: String,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub id: PositionId,
    pub title: String,
}

/// Application returned after a stage change, joined with its candidate, step and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStageView {
    pub id: ApplicationId,
    pub position_id: PositionId,
    pub candidate_id: CandidateId,
    pub application_date: DateTime<Utc>,
    pub current_interview_step: InterviewStepId,
    pub notes: Option<String>,
    pub candidate: CandidateSummary,
    pub interview_step: InterviewStepSummary,
    pub position: PositionSummary,
}

/// How a stage update treats the stored notes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NotesChange {
    /// Field omitted from the request.
    #[default]
    Unchanged,
    /// Field sent as `null`.
    Cleared,
    Replaced(String),
}

impl NotesChange {
    pub fn apply(&self, notes: &mut Option<String>) {
        match self {
            NotesChange::Unchanged => {}
            NotesChange::Cleared => *notes = None,
            NotesChange::Replaced(value) => *notes = Some(value.clone()),
        }
    }
}

/// Requested transition of an application's current interview step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageUpdate {
    pub current_interview_step: InterviewStepId,
    pub notes: NotesChange,
}

/// Application row as the kanban query returns it: joined candidate, step and interview scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionApplication {
    pub application_id: ApplicationId,
    pub candidate: Candidate,
    pub interview_step: InterviewStep,
    pub interviews: Vec<Interview>,
}

/// Kanban card for one application of a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateKanbanEntry {
    pub candidate_id: CandidateId,
    pub full_name: String,
    pub current_interview_step: InterviewStepId,
    pub current_interview_step_name: String,
    pub average_score: Option<f64>,
    pub application_id: ApplicationId,
}

/// Payload accepted by candidate creation before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Application listed on the candidate detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplicationSummary {
    pub application_id: ApplicationId,
    pub position_id: PositionId,
    pub current_interview_step: InterviewStepId,
    pub application_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub applications: Vec<CandidateApplicationSummary>,
}

impl CandidateDetail {
    pub fn new(candidate: Candidate, applications: &[Application]) -> Self {
        let applications = applications
            .iter()
            .map(|application| CandidateApplicationSummary {
                application_id: application.id,
                position_id: application.position_id,
                current_interview_step: application.current_interview_step,
                application_date: application.application_date,
            })
            .collect();

        Self {
            candidate,
            applications,
        }
    }
}
