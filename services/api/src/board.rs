use crate::infra::load_gateway;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use talent_pipeline::error::AppError;
use talent_pipeline::recruitment::{
    CandidateKanbanEntry, InterviewStep, KanbanService, NotFound, Position, PositionId,
    RecruitmentError, RecruitmentGateway,
};

#[derive(Args, Debug)]
pub(crate) struct BoardArgs {
    /// Position whose candidates are listed
    #[arg(long)]
    pub(crate) position: i64,
    /// JSON snapshot holding candidates, positions, steps and applications
    #[arg(long)]
    pub(crate) seed: PathBuf,
}

pub(crate) async fn run_board(args: BoardArgs) -> Result<(), AppError> {
    let BoardArgs { position, seed } = args;
    let position_id = PositionId(position);

    let gateway = Arc::new(load_gateway(Some(&seed))?);
    let entries = KanbanService::new(gateway.clone())
        .candidates_by_position(position_id)
        .await?;
    let position = gateway
        .position(position_id)
        .await?
        .ok_or(RecruitmentError::from(NotFound::Position(position_id)))?;
    let steps = gateway.interview_steps()?;

    let stdout = io::stdout();
    render_board(&mut stdout.lock(), &position, &steps, &entries)?;
    Ok(())
}

/// Text rendering of a position board, one column per interview step in pipeline order.
pub(crate) fn render_board<W: Write>(
    out: &mut W,
    position: &Position,
    steps: &[InterviewStep],
    entries: &[CandidateKanbanEntry],
) -> io::Result<()> {
    writeln!(out, "{} (position {})", position.title, position.id)?;
    writeln!(out, "{} candidate(s)", entries.len())?;

    for step in steps {
        let cards: Vec<&CandidateKanbanEntry> = entries
            .iter()
            .filter(|entry| entry.current_interview_step == step.id)
            .collect();
        if cards.is_empty() {
            continue;
        }

        writeln!(out, "\n{} [{}]", step.name, cards.len())?;
        for card in cards {
            let score = card
                .average_score
                .map(|score| format!("{score:.2}"))
                .unwrap_or_else(|| "no score".to_string());
            writeln!(
                out,
                "- {} (candidate {}, application {}): {}",
                card.full_name, card.candidate_id, card.application_id, score
            )?;
        }
    }

    out.flush()
}
