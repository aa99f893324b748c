use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_pipeline::recruitment::{
    InMemoryRecruitmentGateway, RecruitmentSnapshot, SnapshotError,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the store backing the service, seeded from a snapshot file when one is given.
pub(crate) fn load_gateway(
    seed: Option<&Path>,
) -> Result<InMemoryRecruitmentGateway, SnapshotError> {
    let Some(path) = seed else {
        warn!("no seed snapshot configured, starting with an empty recruitment store");
        return Ok(InMemoryRecruitmentGateway::default());
    };

    let snapshot = RecruitmentSnapshot::from_path(path)?;
    info!(
        path = %path.display(),
        candidates = snapshot.candidates.len(),
        positions = snapshot.positions.len(),
        applications = snapshot.applications.len(),
        "seed snapshot loaded"
    );
    InMemoryRecruitmentGateway::from_snapshot(snapshot)
}
