//! Bracket construction: match tree shape from the seeded competitor list,
//! and the tournament-level generate/regenerate operations.

use crate::logic::seeding::{form_balanced_teams, seed_teams_by_rating, shuffle_competitors};
use crate::models::{
    BracketMatch, BracketRound, CompetitorId, CompetitorSource, MatchGraph, MatchId, MatchTarget,
    Side, Team, Tournament, TournamentError, TournamentFormat, TournamentState,
};

/// Build a single-elimination match graph from an ordered seed list
/// (strongest first).
///
/// With `n` seeds and `p` the largest power of two at most `n`: the lowest
/// `2*(n-p)` seeds play a preliminary round, whose winners join the byed
/// seeds in round 1 (`p/2` matches); each later round halves until the
/// final. Pairing within a round is sequential adjacent (seed `2i` vs
/// `2i+1`). With `third_place` and at least four main-round competitors, one
/// extra match takes the semifinal losers; it feeds nothing.
pub fn build_bracket(
    seeds: &[CompetitorId],
    third_place: bool,
) -> Result<MatchGraph, TournamentError> {
    let n = seeds.len();
    if n < 2 {
        return Err(TournamentError::InsufficientParticipants {
            required: 2,
            actual: n,
        });
    }

    let p = largest_power_of_two_at_most(n);
    let byes = 2 * p - n;
    let mut matches: Vec<BracketMatch> = Vec::with_capacity(n);

    // Preliminary round: the lowest 2*(n-p) seeds, adjacent pairing. Empty
    // when n is a power of two.
    let mut round_sources: Vec<CompetitorSource> = seeds[..byes]
        .iter()
        .map(|&id| CompetitorSource::Concrete(id))
        .collect();
    for (slot, pair) in seeds[byes..].chunks(2).enumerate() {
        let m = BracketMatch::new(
            BracketRound::Preliminary,
            slot,
            CompetitorSource::Concrete(pair[0]),
            CompetitorSource::Concrete(pair[1]),
        );
        round_sources.push(CompetitorSource::WinnerOf(m.id));
        matches.push(m);
    }

    // Main rounds: p competitors enter round 1; each round halves.
    let round_count = p.trailing_zeros();
    let mut last_round_ids: Vec<MatchId> = Vec::new();
    for round in 1..=round_count {
        let mut ids = Vec::with_capacity(round_sources.len() / 2);
        for (slot, pair) in round_sources.chunks(2).enumerate() {
            let m = BracketMatch::new(BracketRound::Main(round), slot, pair[0], pair[1]);
            ids.push(m.id);
            matches.push(m);
        }
        round_sources = ids.iter().map(|&id| CompetitorSource::WinnerOf(id)).collect();
        last_round_ids = ids;
    }
    let final_id = last_round_ids[0];

    // Third place: sourced from the semifinal losers. Skipped when there is
    // no semifinal round to source from.
    let mut third_place_id = None;
    if third_place && round_count >= 2 {
        let semis: Vec<MatchId> = matches
            .iter()
            .filter(|m| m.round == BracketRound::Main(round_count - 1))
            .map(|m| m.id)
            .collect();
        let m = BracketMatch::new(
            BracketRound::ThirdPlace,
            0,
            CompetitorSource::LoserOf(semis[0]),
            CompetitorSource::LoserOf(semis[1]),
        );
        third_place_id = Some(m.id);
        matches.push(m);
    }

    wire_forward_pointers(&mut matches);
    Ok(MatchGraph::new(matches, final_id, third_place_id))
}

/// Set `winner_to`/`loser_to` on every match referenced by a pointer source.
fn wire_forward_pointers(matches: &mut [BracketMatch]) {
    let mut links: Vec<(MatchId, MatchTarget, bool)> = Vec::new();
    for m in matches.iter() {
        for side in [Side::One, Side::Two] {
            let target = MatchTarget {
                match_id: m.id,
                side,
            };
            match *m.source(side) {
                CompetitorSource::WinnerOf(src) => links.push((src, target, true)),
                CompetitorSource::LoserOf(src) => links.push((src, target, false)),
                _ => {}
            }
        }
    }
    for (src, target, is_winner) in links {
        if let Some(m) = matches.iter_mut().find(|m| m.id == src) {
            if is_winner {
                m.winner_to = Some(target);
            } else {
                m.loser_to = Some(target);
            }
        }
    }
}

fn largest_power_of_two_at_most(n: usize) -> usize {
    1 << (usize::BITS - 1 - n.leading_zeros())
}

/// Seed the configured format and build the match graph. Pure: the
/// tournament is only read.
fn seed_and_build(
    tournament: &Tournament,
) -> Result<(Vec<Team>, MatchGraph), TournamentError> {
    match tournament.config.format {
        TournamentFormat::Solo => {
            let mut seeds: Vec<CompetitorId> =
                tournament.participants.iter().map(|p| p.id).collect();
            shuffle_competitors(&mut seeds);
            let graph = build_bracket(&seeds, tournament.config.third_place_match)?;
            Ok((Vec::new(), graph))
        }
        TournamentFormat::Teams { team_size } => {
            let teams = form_balanced_teams(
                &tournament.participants,
                team_size,
                tournament.config.balance_threshold_pct,
            )?;
            let seeds = seed_teams_by_rating(&teams);
            let graph = build_bracket(&seeds, tournament.config.third_place_match)?;
            Ok((teams, graph))
        }
    }
}

/// Commit a freshly built bracket onto the tournament.
fn install_bracket(tournament: &mut Tournament, teams: Vec<Team>, graph: MatchGraph) {
    for p in &mut tournament.participants {
        p.team_id = teams
            .iter()
            .find(|t| t.members.contains(&p.id))
            .map(|t| t.id);
    }
    tournament.teams = teams;
    tournament.bracket = Some(graph);
    tournament.state = TournamentState::InProgress;
}

/// Generate the bracket from the current roster (Registration only). Seeds
/// per the configured format and moves the tournament to InProgress. Fails
/// without touching the tournament if seeding or building fails.
pub fn generate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Registration {
        return Err(TournamentError::InvalidState);
    }
    if tournament.bracket.is_some() {
        return Err(TournamentError::BracketAlreadyGenerated);
    }
    let (teams, graph) = seed_and_build(tournament)?;
    install_bracket(tournament, teams, graph);
    Ok(())
}

/// Destructively regenerate the bracket: discards every match result, all
/// teams, and the old graph, then reseeds from the same roster. This is the
/// only path that replaces an existing bracket.
pub fn regenerate_bracket(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.bracket.is_none() {
        return Err(TournamentError::BracketNotGenerated);
    }
    if !matches!(
        tournament.state,
        TournamentState::InProgress | TournamentState::Completed
    ) {
        return Err(TournamentError::InvalidState);
    }
    let (teams, graph) = seed_and_build(tournament)?;
    install_bracket(tournament, teams, graph);
    Ok(())
}
