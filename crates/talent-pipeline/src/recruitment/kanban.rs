use std::sync::Arc;

use tracing::{debug, error, warn};

use super::domain::{CandidateKanbanEntry, Interview, PositionApplication, PositionId};
use super::error::{NotFound, RecruitmentError};
use super::gateway::RecruitmentGateway;

/// Builds the per-position kanban listing.
pub struct KanbanService<G> {
    gateway: Arc<G>,
}

impl<G> KanbanService<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// One card per application of the position, in gateway order.
    pub async fn candidates_by_position(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<CandidateKanbanEntry>, RecruitmentError> {
        let result = self.load(position_id).await;
        match &result {
            Ok(entries) => debug!(
                position_id = position_id.0,
                cards = entries.len(),
                "kanban built"
            ),
            Err(RecruitmentError::Gateway(source)) => {
                error!(position_id = position_id.0, error = %source, "kanban query failed")
            }
            Err(other) => warn!(position_id = position_id.0, error = %other, "kanban rejected"),
        }
        result
    }

    async fn load(
        &self,
        position_id: PositionId,
    ) -> Result<Vec<CandidateKanbanEntry>, RecruitmentError> {
        self.gateway
            .position(position_id)
            .await?
            .ok_or(NotFound::Position(position_id))?;

        let applications = self.gateway.applications_for_position(position_id).await?;
        Ok(applications.iter().map(kanban_entry).collect())
    }
}

fn kanban_entry(application: &PositionApplication) -> CandidateKanbanEntry {
    CandidateKanbanEntry {
        candidate_id: application.candidate.id,
        full_name: application.candidate.full_name(),
        current_interview_step: application.interview_step.id,
        current_interview_step_name: application.interview_step.name.clone(),
        average_score: average_score(&application.interviews),
        application_id: application.application_id,
    }
}

/// Mean of the scored interviews rounded to two decimals.
///
/// Halves round toward positive infinity, so `-0.125` becomes `-0.12`.
/// `None` when nothing is scored. A mean that rounds to zero is reported as `None` too.
pub fn average_score(interviews: &[Interview]) -> Option<f64> {
    let scores: Vec<f64> = interviews
        .iter()
        .filter_map(|interview| interview.score)
        .map(f64::from)
        .collect();

    if scores.is_empty() {
        return None;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let rounded = (mean * 100.0 + 0.5).floor() / 100.0;
    (rounded != 0.0).then_some(rounded)
}
