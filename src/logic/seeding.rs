//! Seeding: random shuffle for solo brackets, rating-balanced team formation
//! for team brackets.

use crate::models::{
    CompetitorId, Participant, Team, TeamId, TournamentError, DEFAULT_BALANCE_THRESHOLD_PCT,
};
use rand::seq::SliceRandom;

/// Shuffle competitors into a uniformly random seed order.
///
/// `SliceRandom::shuffle` is a Fisher-Yates permutation over an unbiased
/// uniform sampler, so every ordering is equally likely.
pub fn shuffle_competitors(competitors: &mut [CompetitorId]) {
    competitors.shuffle(&mut rand::thread_rng());
}

/// Form rating-balanced teams of exactly `team_size` members.
///
/// Participants are sorted descending by effective rating, then each is
/// assigned to the not-yet-full team with the lowest aggregate rating.
/// Participants left over after exact division are excluded from every team.
///
/// Fails with `InsufficientParticipants` when fewer than `2 * team_size`
/// participants are available, and with `UnbalancedTeams` when the spread
/// between the strongest and weakest team average exceeds `threshold_pct`.
pub fn form_balanced_teams(
    participants: &[Participant],
    team_size: usize,
    threshold_pct: f64,
) -> Result<Vec<Team>, TournamentError> {
    assert!(team_size > 0, "team_size must be positive");
    let required = 2 * team_size;
    if participants.len() < required {
        return Err(TournamentError::InsufficientParticipants {
            required,
            actual: participants.len(),
        });
    }

    let mut sorted: Vec<&Participant> = participants.iter().collect();
    // Stable sort: ties keep registration order, so the assignment is deterministic.
    sorted.sort_by_key(|p| std::cmp::Reverse(p.effective_rating()));

    let team_count = participants.len() / team_size;
    let mut rosters: Vec<(Vec<&Participant>, i32)> = vec![(Vec::new(), 0); team_count];

    // Leftovers past team_count * team_size never enter a team.
    for p in sorted.into_iter().take(team_count * team_size) {
        let (roster, rating) = rosters
            .iter_mut()
            .filter(|(roster, _)| roster.len() < team_size)
            .min_by_key(|(_, rating)| *rating)
            .unwrap_or_else(|| unreachable!("capacity equals the number of assigned participants"));
        roster.push(p);
        *rating += p.effective_rating();
    }

    let averages: Vec<f64> = rosters
        .iter()
        .map(|(_, rating)| f64::from(*rating) / team_size as f64)
        .collect();
    let max = averages.iter().copied().fold(f64::MIN, f64::max);
    let min = averages.iter().copied().fold(f64::MAX, f64::min);
    let spread_pct = (max - min) / min * 100.0;
    if spread_pct > threshold_pct {
        return Err(TournamentError::UnbalancedTeams {
            spread_pct,
            threshold_pct,
        });
    }

    Ok(rosters
        .into_iter()
        .enumerate()
        .map(|(i, (roster, rating))| {
            Team::new(
                format!("Team {}", i + 1),
                roster.into_iter().map(|p| p.id).collect(),
                rating,
            )
        })
        .collect())
}

/// Form balanced teams with the default spread threshold.
pub fn form_balanced_teams_default(
    participants: &[Participant],
    team_size: usize,
) -> Result<Vec<Team>, TournamentError> {
    form_balanced_teams(participants, team_size, DEFAULT_BALANCE_THRESHOLD_PCT)
}

/// Seed order for teams: strongest aggregate rating first, so the weakest
/// teams land in the preliminary round.
pub fn seed_teams_by_rating(teams: &[Team]) -> Vec<TeamId> {
    let mut ordered: Vec<&Team> = teams.iter().collect();
    ordered.sort_by_key(|t| std::cmp::Reverse(t.rating));
    ordered.into_iter().map(|t| t.id).collect()
}
