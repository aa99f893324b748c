use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Application, ApplicationId, ApplicationStageView, CandidateId, StageUpdate};
use super::error::{NotFound, RecruitmentError};
use super::gateway::RecruitmentGateway;

/// Moves applications between interview steps.
///
/// Existence checks and the write are separate gateway calls; a record removed in between
/// surfaces as a gateway error rather than a typed not-found.
pub struct StageUpdateService<G> {
    gateway: Arc<G>,
}

impl<G> StageUpdateService<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Update the stage of the candidate's most recent application.
    pub async fn update_candidate_stage(
        &self,
        candidate_id: CandidateId,
        update: StageUpdate,
    ) -> Result<ApplicationStageView, RecruitmentError> {
        let result = self.candidate_stage(candidate_id, &update).await;
        if let Err(err) = &result {
            log_failure("candidate", candidate_id.0, err);
        }
        result
    }

    /// Update the stage of one application by id.
    pub async fn update_application_stage(
        &self,
        application_id: ApplicationId,
        update: StageUpdate,
    ) -> Result<ApplicationStageView, RecruitmentError> {
        let result = self.application_stage(application_id, &update).await;
        if let Err(err) = &result {
            log_failure("application", application_id.0, err);
        }
        result
    }

    async fn candidate_stage(
        &self,
        candidate_id: CandidateId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, RecruitmentError> {
        self.gateway
            .candidate(candidate_id)
            .await?
            .ok_or(NotFound::Candidate(candidate_id))?;
        self.ensure_step_exists(update).await?;

        let applications = self.gateway.applications_for_candidate(candidate_id).await?;
        let active_id = active_application(&applications)
            .map(|application| application.id)
            .ok_or(NotFound::ActiveApplication(candidate_id))?;

        self.write(active_id, update).await
    }

    async fn application_stage(
        &self,
        application_id: ApplicationId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, RecruitmentError> {
        self.gateway
            .application(application_id)
            .await?
            .ok_or(NotFound::Application(application_id))?;
        self.ensure_step_exists(update).await?;

        self.write(application_id, update).await
    }

    async fn ensure_step_exists(&self, update: &StageUpdate) -> Result<(), RecruitmentError> {
        self.gateway
            .interview_step(update.current_interview_step)
            .await?
            .ok_or(NotFound::InterviewStep(update.current_interview_step))?;
        Ok(())
    }

    async fn write(
        &self,
        application_id: ApplicationId,
        update: &StageUpdate,
    ) -> Result<ApplicationStageView, RecruitmentError> {
        let view = self
            .gateway
            .update_application_stage(application_id, update)
            .await?;
        info!(
            application_id = application_id.0,
            interview_step = view.current_interview_step.0,
            "application stage updated"
        );
        Ok(view)
    }
}

/// The application with the latest `applicationDate`; equal dates resolve to the highest id.
pub fn active_application(applications: &[Application]) -> Option<&Application> {
    applications
        .iter()
        .max_by_key(|application| (application.application_date, application.id))
}

fn log_failure(target: &'static str, id: i64, err: &RecruitmentError) {
    match err {
        RecruitmentError::Gateway(source) => {
            tracing::error!(target_kind = target, id, error = %source, "stage update failed");
        }
        other => warn!(target_kind = target, id, error = %other, "stage update rejected"),
    }
}
