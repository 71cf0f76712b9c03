//! Integration tests for seeding: shuffle, balanced team formation, and the
//! rating fallback chain.

use esports_bracket_web::{
    form_balanced_teams, form_balanced_teams_default, seed_teams_by_rating, shuffle_competitors,
    CompetitorId, Participant, TournamentError, DEFAULT_RATING,
};
use uuid::Uuid;

fn roster(ratings: &[i32]) -> Vec<Participant> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, &r)| Participant::new(format!("P{i}"), Some(r)))
        .collect()
}

#[test]
fn shuffle_keeps_the_same_competitors() {
    let original: Vec<CompetitorId> = (0..16).map(|_| Uuid::new_v4()).collect();
    let mut shuffled = original.clone();
    shuffle_competitors(&mut shuffled);
    assert_eq!(shuffled.len(), original.len());
    let mut a = original.clone();
    let mut b = shuffled.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn greedy_fill_balances_the_reference_roster() {
    // 8 players, teams of 2: greedy min-fill gives sums 4200/4200/4200/3800,
    // a spread of about 10.5%.
    let players = roster(&[3000, 2800, 2600, 2000, 1800, 1600, 1400, 1200]);
    let teams = form_balanced_teams_default(&players, 2).unwrap();

    assert_eq!(teams.len(), 4);
    for team in &teams {
        assert_eq!(team.members.len(), 2);
    }
    let mut sums: Vec<i32> = teams.iter().map(|t| t.rating).collect();
    sums.sort_unstable();
    assert_eq!(sums, vec![3800, 4200, 4200, 4200]);

    let averages: Vec<f64> = teams.iter().map(|t| t.average_rating()).collect();
    let max = averages.iter().copied().fold(f64::MIN, f64::max);
    let min = averages.iter().copied().fold(f64::MAX, f64::min);
    let spread = (max - min) / min * 100.0;
    assert!(spread <= 20.0, "spread was {spread:.1}%");
}

#[test]
fn lopsided_ratings_fail_instead_of_returning_bad_teams() {
    let players = roster(&[10_000, 100, 100, 100]);
    assert!(matches!(
        form_balanced_teams_default(&players, 2),
        Err(TournamentError::UnbalancedTeams { .. })
    ));
}

#[test]
fn custom_threshold_is_honored() {
    // Spread is ~10.5%; a 5% threshold rejects it.
    let players = roster(&[3000, 2800, 2600, 2000, 1800, 1600, 1400, 1200]);
    assert!(matches!(
        form_balanced_teams(&players, 2, 5.0),
        Err(TournamentError::UnbalancedTeams { threshold_pct, .. }) if threshold_pct == 5.0
    ));
}

#[test]
fn too_few_participants_for_two_teams() {
    let players = roster(&[1500, 1400, 1300]);
    assert!(matches!(
        form_balanced_teams_default(&players, 2),
        Err(TournamentError::InsufficientParticipants { required: 4, actual: 3 })
    ));
}

#[test]
fn leftover_participants_are_excluded() {
    // 5 players, teams of 2: the weakest is left out entirely.
    let players = roster(&[2000, 1900, 1800, 1700, 1000]);
    let weakest = players[4].id;
    let teams = form_balanced_teams_default(&players, 2).unwrap();

    assert_eq!(teams.len(), 2);
    let assigned: usize = teams.iter().map(|t| t.members.len()).sum();
    assert_eq!(assigned, 4);
    assert!(teams.iter().all(|t| !t.members.contains(&weakest)));
}

#[test]
fn team_seeding_is_strongest_first() {
    let players = roster(&[3000, 2800, 2600, 2000, 1800, 1600, 1400, 1200]);
    let teams = form_balanced_teams_default(&players, 2).unwrap();
    let order = seed_teams_by_rating(&teams);
    let ratings: Vec<i32> = order
        .iter()
        .map(|id| teams.iter().find(|t| t.id == *id).unwrap().rating)
        .collect();
    let mut sorted = ratings.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ratings, sorted);
}

#[test]
fn rating_falls_back_through_the_precedence_chain() {
    let unrated = Participant::new("A", None);
    assert_eq!(unrated.effective_rating(), DEFAULT_RATING);

    let invalid = Participant::new("B", Some(-5));
    assert_eq!(invalid.effective_rating(), DEFAULT_RATING);

    let zero = Participant::new("C", Some(0));
    assert_eq!(zero.effective_rating(), DEFAULT_RATING);

    let rated = Participant::new("D", Some(1500));
    assert_eq!(rated.effective_rating(), 1500);

    let mut overridden = Participant::new("E", Some(1500));
    overridden.rating_override = Some(2000);
    assert_eq!(overridden.effective_rating(), 2000);

    // An invalid override falls back to the registration rating.
    let mut bad_override = Participant::new("F", Some(1500));
    bad_override.rating_override = Some(0);
    assert_eq!(bad_override.effective_rating(), 1500);

    // Both sources invalid: the hardcoded default wins.
    let mut hopeless = Participant::new("G", Some(-1));
    hopeless.rating_override = Some(-2);
    assert_eq!(hopeless.effective_rating(), DEFAULT_RATING);
}

#[test]
fn invalid_ratings_use_the_default_during_formation() {
    // Two unrated players both resolve to DEFAULT_RATING, so formation stays balanced.
    let mut players = roster(&[1000, 1000]);
    players.push(Participant::new("X", None));
    players.push(Participant::new("Y", Some(-100)));
    let teams = form_balanced_teams_default(&players, 2).unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].rating, 2000);
    assert_eq!(teams[1].rating, 2000);
}
