use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Candidate, CandidateDetail, CandidateId, NewCandidate};
use super::error::{NotFound, RecruitmentError};
use super::gateway::{GatewayError, RecruitmentGateway};

const MAX_NAME_LENGTH: usize = 100;

/// Candidate intake and lookup backing the `/candidates` collaborator routes.
pub struct CandidateService<G> {
    gateway: Arc<G>,
}

impl<G> CandidateService<G>
where
    G: RecruitmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn create_candidate(
        &self,
        candidate: NewCandidate,
    ) -> Result<Candidate, RecruitmentError> {
        let candidate = normalize(candidate);
        if let Err(reason) = validate(&candidate) {
            warn!(%reason, "candidate payload rejected");
            return Err(RecruitmentError::Validation(reason));
        }

        match self.gateway.insert_candidate(candidate).await {
            Ok(stored) => {
                info!(candidate_id = stored.id.0, "candidate created");
                Ok(stored)
            }
            Err(GatewayError::Conflict(_)) => {
                warn!("candidate email already registered");
                Err(RecruitmentError::Conflict(
                    "A candidate with this email already exists".to_string(),
                ))
            }
            Err(other) => {
                tracing::error!(error = %other, "candidate insert failed");
                Err(other.into())
            }
        }
    }

    /// The candidate with a summary of every application it has submitted.
    pub async fn candidate(
        &self,
        candidate_id: CandidateId,
    ) -> Result<CandidateDetail, RecruitmentError> {
        let Some(candidate) = self.gateway.candidate(candidate_id).await? else {
            warn!(candidate_id = candidate_id.0, "candidate not found");
            return Err(NotFound::Candidate(candidate_id).into());
        };
        let applications = self.gateway.applications_for_candidate(candidate_id).await?;
        Ok(CandidateDetail::new(candidate, &applications))
    }
}

fn normalize(candidate: NewCandidate) -> NewCandidate {
    let optional = |value: Option<String>| {
        value
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
    };

    NewCandidate {
        first_name: candidate.first_name.trim().to_string(),
        last_name: candidate.last_name.trim().to_string(),
        email: candidate.email.trim().to_string(),
        phone: optional(candidate.phone),
        address: optional(candidate.address),
    }
}

fn validate(candidate: &NewCandidate) -> Result<(), String> {
    for (field, value) in [
        ("firstName", &candidate.first_name),
        ("lastName", &candidate.last_name),
    ] {
        if value.is_empty() {
            return Err(format!("{field} is required"));
        }
        if value.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "{field} must be at most {MAX_NAME_LENGTH} characters"
            ));
        }
    }

    if candidate.email.is_empty() {
        return Err("email is required".to_string());
    }
    if !is_valid_email(&candidate.email) {
        return Err("email must be a valid address".to_string());
    }

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(first: &str, last: &str, email: &str) -> NewCandidate {
        NewCandidate {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn validate_requires_names_and_email() {
        assert_eq!(
            validate(&payload("", "Lovelace", "ada@example.com")),
            Err("firstName is required".to_string())
        );
        assert_eq!(
            validate(&payload("Ada", "", "ada@example.com")),
            Err("lastName is required".to_string())
        );
        assert_eq!(
            validate(&payload("Ada", "Lovelace", "")),
            Err("email is required".to_string())
        );
        assert!(validate(&payload("Ada", "Lovelace", "ada@example.com")).is_ok());
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("ada @example.com"));
    }

    #[test]
    fn normalize_trims_and_drops_blank_optionals() {
        let mut raw = payload("  Ada ", " Lovelace", " ada@example.com ");
        raw.phone = Some("   ".to_string());
        raw.address = Some(" 12 St James's Square ".to_string());

        let normalized = normalize(raw);
        assert_eq!(normalized.first_name, "Ada");
        assert_eq!(normalized.email, "ada@example.com");
        assert_eq!(normalized.phone, None);
        assert_eq!(normalized.address.as_deref(), Some("12 St James's Square"));
    }

    #[test]
    fn long_names_are_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = validate(&payload(&long, "Lovelace", "ada@example.com")).unwrap_err();
        assert!(err.contains("at most 100"));
    }
}
