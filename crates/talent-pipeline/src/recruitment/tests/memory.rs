use super::common::*;

use crate::recruitment::domain::{CandidateId, NewCandidate, NotesChange, PositionId};
use crate::recruitment::gateway::{GatewayError, RecruitmentGateway};
use crate::recruitment::memory::{InMemoryRecruitmentGateway, RecruitmentSnapshot, SnapshotError};

fn new_candidate(email: &str) -> NewCandidate {
    NewCandidate {
        first_name: "Margaret".to_string(),
        last_name: "Hamilton".to_string(),
        email: email.to_string(),
        phone: Some("+1 555 0100".to_string()),
        address: None,
    }
}

#[test]
fn snapshot_rejects_dangling_references() {
    let mut broken = snapshot();
    broken.applications.push(application(20, 1, 99, date(2024, 6, 1), 1, &[]));

    match InMemoryRecruitmentGateway::from_snapshot(broken) {
        Err(SnapshotError::DanglingReference { kind, id, .. }) => {
            assert_eq!(kind, "position");
            assert_eq!(id, 99);
        }
        other => panic!("expected dangling reference, got {other:?}"),
    }
}

#[test]
fn snapshot_rejects_duplicate_ids() {
    let mut broken = snapshot();
    broken.interview_steps.push(step(2, "Duplicate", 9));

    assert!(matches!(
        InMemoryRecruitmentGateway::from_snapshot(broken),
        Err(SnapshotError::DuplicateId {
            kind: "interview step",
            id: 2
        })
    ));
}

#[test]
fn snapshot_parses_camel_case_json() {
    let raw = r#"{
        "candidates": [{
            "id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"
        }],
        "positions": [{"id": 7, "title": "Engineer"}],
        "interviewSteps": [{"id": 1, "name": "Screening", "orderIndex": 1}],
        "applications": [{
            "id": 10, "positionId": 7, "candidateId": 1,
            "applicationDate": "2024-01-10T09:00:00Z",
            "currentInterviewStep": 1,
            "interviews": [{"score": 4}, {"score": null}, {}]
        }]
    }"#;

    let parsed = RecruitmentSnapshot::from_reader(raw.as_bytes()).expect("valid snapshot");
    assert_eq!(parsed.applications[0].interviews.len(), 3);
    assert_eq!(parsed.applications[0].notes, None);
    assert!(InMemoryRecruitmentGateway::from_snapshot(parsed).is_ok());

    assert!(matches!(
        RecruitmentSnapshot::from_reader("{".as_bytes()),
        Err(SnapshotError::Json(_))
    ));
}

#[tokio::test]
async fn insert_candidate_assigns_next_id_and_rejects_duplicate_email() {
    let gateway = gateway();

    let stored = gateway
        .insert_candidate(new_candidate("margaret@example.com"))
        .await
        .expect("insert succeeds");
    assert_eq!(stored.id, CandidateId(43));
    assert_eq!(stored.phone.as_deref(), Some("+1 555 0100"));

    let duplicate = gateway
        .insert_candidate(new_candidate("ADA@example.com"))
        .await;
    assert!(matches!(duplicate, Err(GatewayError::Conflict(_))));
}

#[tokio::test]
async fn update_of_missing_application_is_a_gateway_error() {
    let gateway = gateway();

    let result = gateway
        .update_application_stage(
            crate::recruitment::domain::ApplicationId(500),
            &stage_update(1, NotesChange::Unchanged),
        )
        .await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

#[tokio::test]
async fn position_rows_come_back_in_id_order() {
    let gateway = gateway();

    let rows = gateway
        .applications_for_position(PositionId(7))
        .await
        .expect("query succeeds");
    let ids: Vec<i64> = rows.iter().map(|row| row.application_id.0).collect();
    assert_eq!(ids, vec![10, 11]);

    let steps = gateway.interview_steps().expect("steps");
    assert_eq!(steps.first().map(|step| step.order_index), Some(1));
}
