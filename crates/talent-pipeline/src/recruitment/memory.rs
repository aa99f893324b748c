use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, ApplicationStageView, Candidate, CandidateId, InterviewStep,
    InterviewStepId, NewCandidate, Position, PositionApplication, PositionId, StageUpdate,
};
use super::gateway::{GatewayError, RecruitmentGateway};

/// Serialized form of every record the in-memory gateway holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentSnapshot {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub interview_steps: Vec<InterviewStep>,
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl RecruitmentSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = File::open(path.as_ref()).map_err(|source| SnapshotError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        serde_json::from_reader(reader).map_err(SnapshotError::Json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("duplicate {kind} id {id} in snapshot")]
    DuplicateId { kind: &'static str, id: i64 },
    #[error("application {application} references missing {kind} {id}")]
    DanglingReference {
        application: ApplicationId,
        kind: &'static str,
        id: i64,
    },
}

#[derive(Debug, Default)]
struct Tables {
    candidates: BTreeMap<CandidateId, Candidate>,
    positions: BTreeMap<PositionId, Position>,
    interview_steps: BTreeMap<InterviewStepId, InterviewStep>,
    applications: BTreeMap<ApplicationId, Application>,
}

impl Tables {
    fn candidate(&self, id: CandidateId) -> Result<&Candidate, GatewayError> {
        self.candidates
            .get(&id)
            .ok_or_else(|| GatewayError::NotFound(format!("candidate {id}")))
    }

    fn position(&self, id: PositionId) -> Result<&Position, GatewayError> {
        self.positions
            .get(&id)
            .ok_or_else(|| GatewayError::NotFound(format!("position {id}")))
    }

    fn interview_step(&self, id: InterviewStepId) -> Result<&InterviewStep, GatewayError> {
        self.interview_steps
            .get(&id)
            .ok_or_else(|| GatewayError::NotFound(format!("interview step {id}")))
    }

    fn stage_view(&self, application: &Application) -> Result<ApplicationStageView, GatewayError> {
        Ok(ApplicationStageView {
            id: application.id,
            position_id: application.position_id,
            candidate_id: application.candidate_id,
            application_date: application.application_date,
            current_interview_step: application.current_interview_step,
            notes: application.notes.clone(),
            candidate: self.candidate(application.candidate_id)?.summary(),
            interview_step: self
                .interview_step(application.current_interview_step)?
                .summary(),
            position: self.position(application.position_id)?.summary(),
        })
    }
}

/// Lock-protected store implementing [`RecruitmentGateway`].
///
/// Rows come back in ascending id order, which is the "native order" the kanban listing exposes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecruitmentGateway {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRecruitmentGateway {
    /// Build a gateway from a snapshot, rejecting duplicate ids and dangling references.
    pub fn from_snapshot(snapshot: RecruitmentSnapshot) -> Result<Self, SnapshotError> {
        let mut tables = Tables::default();

        for candidate in snapshot.candidates {
            let id = candidate.id;
            if tables.candidates.insert(id, candidate).is_some() {
                return Err(SnapshotError::DuplicateId {
                    kind: "candidate",
                    id: id.0,
                });
            }
        }
        for position in snapshot.positions {
            let id = position.id;
            if tables.positions.insert(id, position).is_some() {
                return Err(SnapshotError::DuplicateId {
                    kind: "position",
                    id: id.0,
                });
            }
        }
        for step in snapshot.interview_steps {
            let id = step.id;
            if tables.interview_steps.insert(id, step).is_some() {
                return Err(SnapshotError::DuplicateId {
                    kind: "interview step",
                    id: id.0,
                });
            }
        }
        for application in snapshot.applications {
            let dangling = |kind: &'static str, id: i64| SnapshotError::DanglingReference {
                application: application.id,
                kind,
                id,
            };
            if !tables.candidates.contains_key(&application.candidate_id) {
                return Err(dangling("candidate", application.candidate_id.0));
            }
            if !tables.positions.contains_key(&application.position_id) {
                return Err(dangling("position", application.position_id.0));
            }
            if !tables
                .interview_steps
                .contains_key(&application.current_interview_step)
            {
                return Err(dangling(
                    "interview step",
                    application.current_interview_step.0,
                ));
            }

            let id = application.id;
            if tables.applications.insert(id, application).is_some() {
                return Err(SnapshotError::DuplicateId {
                    kind: "application",
                    id: id.0,
                });
            }
        }

        Ok(Self {
            tables: Arc::new(RwLock::new(tables)),
        })
    }

    /// Current contents, in the same shape the gateway was seeded with.
    pub fn snapshot(&self) -> Result<RecruitmentSnapshot, GatewayError> {
        let tables = self.read()?;
        Ok(RecruitmentSnapshot {
            candidates: tables.candidates.values().cloned().collect(),
            positions: tables.positions.values().cloned().collect(),
            interview_steps: tables.interview_steps.values().cloned().collect(),
            applications: tables.applications.values().cloned().collect(),
        })
    }

    /// Every interview step ordered by `orderIndex`, then id.
    pub fn interview_steps(&self) -> Result<Vec<InterviewStep>, GatewayError> {
        let tables = self.read()?;
        let mut steps: Vec<InterviewStep> = tables.interview_steps.values().cloned().collect();
        steps.sort_by_key(|step| (step.order_index, step.id));
        Ok(steps)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, GatewayError> {
        self.tables
            .read()
            .map_err(|_| GatewayError::Unavailable("recruitment store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, GatewayError> {
        self.tables
            .write()
            .map_err(|_| GatewayError::Unavailable("recruitment store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecruitmentGateway for InMemoryRecruitmentGateway {
    async fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, GatewayError> {
        Ok(self.read()?.candidates.get(&id).cloned())
    }

    async fn position(&self, id: PositionId) -> Result<Option<Position>, GatewayError> {
        Ok(self.read()?.positions.get(&id).cloned())
    }

    async fn interview_step(
        &self,
        id: InterviewStepId,
    ) -> Result<Option<InterviewStep>, GatewayError> {
        Ok(self.read()?.interview_steps.get(&id).cloned())
    }

    async fn application(&self, id: ApplicationId) -> Result<Option<Application>, GatewayError> {
        Ok(self.read()?.applications.get(&id).cloned())
    }

    async fn applications_for_candidate(
        &self,
        id: CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        let tables = self.read()?;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.candidate_id == id)
            .cloned()
            .collect())
    }

    async fn applications_for_position(
        &self,
        id: PositionId,
    ) -> Result<Vec<PositionApplication>, GatewayError> {
        let tables = self.read()?;
        tables
            .applications
            .values()
            .filter(|application| application.position_id == id)
            .map(|application| -> Result<PositionApplication, GatewayError> {
                Ok(PositionApplication {
                    application_id: application.id,
                    candidate: tables.candidate(application.candidate_id)?.clone(),
                    interview_step: tables
                        .interview_step(application.current_interview_step)?
                        .clone(),
                    interviews: application.interviews.clone(),
                })
            })
            .collect()
    }

    async fn update_application_stage(
        &self,
        id: ApplicationId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, GatewayError> {
        let mut tables = self.write()?;

        let mut updated = tables
            .applications
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("application {id}")))?;
        updated.current_interview_step = update.current_interview_step;
        update.notes.apply(&mut updated.notes);

        // Resolve every relation before the row is replaced so a failed join writes nothing.
        let view = tables.stage_view(&updated)?;
        tables.applications.insert(id, updated);
        Ok(view)
    }

    async fn insert_candidate(&self, candidate: NewCandidate) -> Result<Candidate, GatewayError> {
        let mut tables = self.write()?;

        let duplicate = tables
            .candidates
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&candidate.email));
        if duplicate {
            return Err(GatewayError::Conflict(format!(
                "candidate email {}",
                candidate.email
            )));
        }

        let next_id = tables
            .candidates
            .keys()
            .next_back()
            .map_or(1, |last| last.0 + 1);
        let stored = Candidate {
            id: CandidateId(next_id),
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            phone: candidate.phone,
            address: candidate.address,
        };
        tables.candidates.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
