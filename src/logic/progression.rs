//! Progression: applying validated results to matches and propagating
//! winners/losers through the graph, plus the cascading undo.

use crate::models::{
    CompetitorId, CompetitorSource, MatchGraph, MatchId, MatchStatus, MatchTarget, Tournament,
    TournamentError, TournamentState,
};

/// What a successful result report did to the bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOutcome {
    /// The winner (and loser, for a semifinal feeding a third-place match)
    /// advanced; the bracket continues.
    Advanced,
    /// The final was resolved; the bracket is finished.
    BracketCompleted { champion: CompetitorId },
}

/// Apply a result to one match and propagate it.
///
/// Validation happens before any mutation, so a failed call leaves the graph
/// untouched. Once the bracket is completed, every further report is
/// rejected, except against a still-open third-place match, which sits
/// outside the progression chain.
pub fn report_result(
    graph: &mut MatchGraph,
    match_id: MatchId,
    score_1: i32,
    score_2: i32,
) -> Result<ReportOutcome, TournamentError> {
    let m = graph.get(match_id).ok_or(TournamentError::MatchNotFound(match_id))?;
    if graph.is_completed() && graph.third_place_id() != Some(match_id) {
        return Err(TournamentError::AlreadyCompleted(match_id));
    }
    match m.status {
        MatchStatus::Completed => return Err(TournamentError::AlreadyCompleted(match_id)),
        MatchStatus::Pending => return Err(TournamentError::MatchNotReady(match_id)),
        MatchStatus::Ready | MatchStatus::InProgress => {}
    }
    if score_1 < 0 || score_2 < 0 || score_1 == score_2 {
        return Err(TournamentError::InvalidScore { score_1, score_2 });
    }
    let (one, two) = m
        .competitors()
        .ok_or(TournamentError::MatchNotReady(match_id))?;
    let (winner, loser) = if score_1 > score_2 { (one, two) } else { (two, one) };
    let winner_to = m.winner_to;
    let loser_to = m.loser_to;
    let is_final = graph.final_match_id() == match_id;

    if let Some(m) = graph.get_mut(match_id) {
        m.score = Some((score_1 as u32, score_2 as u32));
        m.winner = Some(winner);
        m.status = MatchStatus::Completed;
    }
    if let Some(target) = winner_to {
        resolve_slot(graph, target, winner);
    }
    if let Some(target) = loser_to {
        resolve_slot(graph, target, loser);
    }

    if is_final {
        graph.set_completed(true);
        Ok(ReportOutcome::BracketCompleted { champion: winner })
    } else {
        Ok(ReportOutcome::Advanced)
    }
}

/// Rewrite a downstream slot to the concrete competitor; the downstream
/// match becomes Ready once both its sources are concrete.
fn resolve_slot(graph: &mut MatchGraph, target: MatchTarget, competitor: CompetitorId) {
    if let Some(m) = graph.get_mut(target.match_id) {
        *m.source_mut(target.side) = CompetitorSource::Concrete(competitor);
        if m.status == MatchStatus::Pending
            && m.source_1.is_resolved()
            && m.source_2.is_resolved()
        {
            m.status = MatchStatus::Ready;
        }
    }
}

/// Undo a completed match and cascade forward: every downstream slot that
/// consumed this match's winner or loser reverts to its pointer, and any
/// downstream match that had already completed is cleared recursively.
///
/// Clearing a match that is not completed is a no-op. This is the only
/// supported way to change a recorded result.
pub fn clear_result(graph: &mut MatchGraph, match_id: MatchId) -> Result<(), TournamentError> {
    let m = graph.get(match_id).ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.status != MatchStatus::Completed {
        return Ok(());
    }
    clear_cascade(graph, match_id);
    Ok(())
}

fn clear_cascade(graph: &mut MatchGraph, match_id: MatchId) {
    let (winner_to, loser_to) = match graph.get_mut(match_id) {
        Some(m) => {
            m.score = None;
            m.winner = None;
            // Its own sources are still resolved, so the match is scorable again.
            m.status = MatchStatus::Ready;
            (m.winner_to, m.loser_to)
        }
        None => return,
    };
    if graph.final_match_id() == match_id {
        graph.set_completed(false);
    }
    let links = [
        (winner_to, CompetitorSource::WinnerOf(match_id)),
        (loser_to, CompetitorSource::LoserOf(match_id)),
    ];
    for (target, pointer) in links {
        let Some(target) = target else { continue };
        let downstream_completed = graph
            .get(target.match_id)
            .is_some_and(|m| m.status == MatchStatus::Completed);
        if downstream_completed {
            clear_cascade(graph, target.match_id);
        }
        if let Some(m) = graph.get_mut(target.match_id) {
            *m.source_mut(target.side) = pointer;
            m.status = MatchStatus::Pending;
        }
    }
}

/// Mark a ready match as live (scorekeeping). Already-live matches are left
/// alone.
pub fn start_match(graph: &mut MatchGraph, match_id: MatchId) -> Result<(), TournamentError> {
    let m = graph
        .get_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    match m.status {
        MatchStatus::Ready => {
            m.status = MatchStatus::InProgress;
            Ok(())
        }
        MatchStatus::InProgress => Ok(()),
        MatchStatus::Pending => Err(TournamentError::MatchNotReady(match_id)),
        MatchStatus::Completed => Err(TournamentError::AlreadyCompleted(match_id)),
    }
}

/// Report a result through the tournament wrapper; resolving the final moves
/// the tournament to Completed.
pub fn report_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_1: i32,
    score_2: i32,
) -> Result<ReportOutcome, TournamentError> {
    let graph = tournament
        .bracket
        .as_mut()
        .ok_or(TournamentError::BracketNotGenerated)?;
    let outcome = report_result(graph, match_id, score_1, score_2)?;
    if matches!(outcome, ReportOutcome::BracketCompleted { .. }) {
        tournament.state = TournamentState::Completed;
    }
    Ok(outcome)
}

/// Clear a result through the tournament wrapper; un-completing the bracket
/// moves the tournament back to InProgress.
pub fn clear_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
) -> Result<(), TournamentError> {
    let graph = tournament
        .bracket
        .as_mut()
        .ok_or(TournamentError::BracketNotGenerated)?;
    clear_result(graph, match_id)?;
    let still_completed = graph.is_completed();
    if tournament.state == TournamentState::Completed && !still_completed {
        tournament.state = TournamentState::InProgress;
    }
    Ok(())
}

/// Mark a match live through the tournament wrapper.
pub fn start_tournament_match(
    tournament: &mut Tournament,
    match_id: MatchId,
) -> Result<(), TournamentError> {
    let graph = tournament
        .bracket
        .as_mut()
        .ok_or(TournamentError::BracketNotGenerated)?;
    start_match(graph, match_id)
}
