//! Integration tests for result progression: advancement, validation,
//! completion, and the cascading undo.

use esports_bracket_web::{
    build_bracket, clear_result, report_result, start_match, BracketRound, CompetitorId,
    CompetitorSource, MatchGraph, MatchId, MatchStatus, ReportOutcome, TournamentError,
};
use uuid::Uuid;

fn seeds(n: usize) -> Vec<CompetitorId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn graph_of(n: usize, third_place: bool) -> MatchGraph {
    build_bracket(&seeds(n), third_place).unwrap()
}

fn round_ids(graph: &MatchGraph, round: BracketRound) -> Vec<MatchId> {
    graph.round_matches(round).iter().map(|m| m.id).collect()
}

#[test]
fn winner_advances_into_downstream_slot() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    let (one, _two) = graph.get(m0).unwrap().competitors().unwrap();

    let outcome = report_result(graph, m0, 2, 1).unwrap();
    assert_eq!(outcome, ReportOutcome::Advanced);

    let m0_after = graph.get(m0).unwrap();
    assert_eq!(m0_after.status, MatchStatus::Completed);
    assert_eq!(m0_after.winner, Some(one));
    assert_eq!(m0_after.score, Some((2, 1)));

    let final_match = graph.final_match().unwrap();
    assert_eq!(final_match.source_1, CompetitorSource::Concrete(one));
    // The other semifinal is unplayed, so the final is still pending.
    assert_eq!(final_match.status, MatchStatus::Pending);
}

#[test]
fn completing_round_1_makes_round_2_ready() {
    let graph = &mut graph_of(8, false);
    for id in round_ids(graph, BracketRound::Main(1)) {
        report_result(graph, id, 1, 0).unwrap();
    }
    let round_2 = graph.round_matches(BracketRound::Main(2));
    assert_eq!(round_2.len(), 2);
    for m in round_2 {
        assert_eq!(m.status, MatchStatus::Ready);
        assert!(m.source_1.is_resolved());
        assert!(m.source_2.is_resolved());
    }
    // Round 2 is now exactly the scorable set.
    assert_eq!(graph.ready_matches().len(), 2);
}

#[test]
fn reporting_an_unready_match_fails() {
    let graph = &mut graph_of(4, false);
    let final_id = graph.final_match().unwrap().id;
    assert!(matches!(
        report_result(graph, final_id, 1, 0),
        Err(TournamentError::MatchNotReady(id)) if id == final_id
    ));
}

#[test]
fn unknown_match_fails() {
    let graph = &mut graph_of(4, false);
    let bogus = Uuid::new_v4();
    assert!(matches!(
        report_result(graph, bogus, 1, 0),
        Err(TournamentError::MatchNotFound(id)) if id == bogus
    ));
    assert!(matches!(
        clear_result(graph, bogus),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn draws_and_negative_scores_are_rejected() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    assert!(matches!(
        report_result(graph, m0, 2, 2),
        Err(TournamentError::InvalidScore { score_1: 2, score_2: 2 })
    ));
    assert!(matches!(
        report_result(graph, m0, -1, 0),
        Err(TournamentError::InvalidScore { .. })
    ));
    // The failed calls left the match untouched.
    assert_eq!(graph.get(m0).unwrap().status, MatchStatus::Ready);
}

#[test]
fn double_report_fails_instead_of_overwriting() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    report_result(graph, m0, 3, 1).unwrap();
    assert!(matches!(
        report_result(graph, m0, 3, 1),
        Err(TournamentError::AlreadyCompleted(id)) if id == m0
    ));
    assert_eq!(graph.get(m0).unwrap().score, Some((3, 1)));
}

#[test]
fn resolving_the_final_completes_the_bracket() {
    let graph = &mut graph_of(4, false);
    for id in round_ids(graph, BracketRound::Main(1)) {
        report_result(graph, id, 1, 0).unwrap();
    }
    let final_id = graph.final_match().unwrap().id;
    let outcome = report_result(graph, final_id, 13, 9).unwrap();
    let expected = graph.final_match().unwrap().winner.unwrap();
    assert_eq!(outcome, ReportOutcome::BracketCompleted { champion: expected });
    assert!(graph.is_completed());
    assert_eq!(graph.champion(), Some(expected));
}

#[test]
fn no_reports_accepted_after_completion() {
    let graph = &mut graph_of(4, false);
    let round_1 = round_ids(graph, BracketRound::Main(1));
    for &id in &round_1 {
        report_result(graph, id, 1, 0).unwrap();
    }
    let final_id = graph.final_match().unwrap().id;
    report_result(graph, final_id, 2, 0).unwrap();

    for &id in &round_1 {
        assert!(matches!(
            report_result(graph, id, 5, 3),
            Err(TournamentError::AlreadyCompleted(_))
        ));
    }
}

#[test]
fn third_place_is_scorable_after_the_final() {
    let graph = &mut graph_of(4, true);
    for id in round_ids(graph, BracketRound::Main(1)) {
        report_result(graph, id, 2, 0).unwrap();
    }
    let final_id = graph.final_match().unwrap().id;
    report_result(graph, final_id, 1, 0).unwrap();
    assert!(graph.is_completed());

    // The third-place match sits outside the chain and can still be scored.
    let third = graph.third_place_match().unwrap();
    assert_eq!(third.status, MatchStatus::Ready);
    let third_id = third.id;
    report_result(graph, third_id, 7, 5).unwrap();
    assert_eq!(graph.get(third_id).unwrap().status, MatchStatus::Completed);
    assert!(matches!(
        report_result(graph, third_id, 7, 5),
        Err(TournamentError::AlreadyCompleted(_))
    ));
}

#[test]
fn semifinal_losers_feed_the_third_place_match() {
    let graph = &mut graph_of(4, true);
    let semis = round_ids(graph, BracketRound::Main(1));
    let mut losers = Vec::new();
    for id in semis {
        report_result(graph, id, 0, 1).unwrap();
        losers.push(graph.get(id).unwrap().loser().unwrap());
    }
    let third = graph.third_place_match().unwrap();
    assert_eq!(third.status, MatchStatus::Ready);
    assert_eq!(third.source_1, CompetitorSource::Concrete(losers[0]));
    assert_eq!(third.source_2, CompetitorSource::Concrete(losers[1]));
}

#[test]
fn clear_then_rereport_restores_the_graph() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    report_result(graph, m0, 2, 1).unwrap();
    let snapshot = graph.clone();

    clear_result(graph, m0).unwrap();
    assert_eq!(graph.get(m0).unwrap().status, MatchStatus::Ready);
    assert_eq!(graph.get(m0).unwrap().winner, None);
    let final_match = graph.final_match().unwrap();
    assert_eq!(final_match.source_1, CompetitorSource::WinnerOf(m0));
    assert_eq!(final_match.status, MatchStatus::Pending);

    report_result(graph, m0, 2, 1).unwrap();
    assert_eq!(*graph, snapshot);
}

#[test]
fn clearing_cascades_through_completed_downstream_matches() {
    let graph = &mut graph_of(4, false);
    let round_1 = round_ids(graph, BracketRound::Main(1));
    for &id in &round_1 {
        report_result(graph, id, 1, 0).unwrap();
    }
    let final_id = graph.final_match().unwrap().id;
    report_result(graph, final_id, 4, 2).unwrap();
    assert!(graph.is_completed());

    clear_result(graph, round_1[0]).unwrap();

    // The final consumed the cleared winner, so it was cleared too.
    let final_match = graph.final_match().unwrap();
    assert_eq!(final_match.status, MatchStatus::Pending);
    assert_eq!(final_match.winner, None);
    assert_eq!(final_match.score, None);
    assert_eq!(final_match.source_1, CompetitorSource::WinnerOf(round_1[0]));
    assert!(!graph.is_completed());

    // The untouched semifinal keeps its result and still feeds the final.
    let other = graph.get(round_1[1]).unwrap();
    assert_eq!(other.status, MatchStatus::Completed);
    assert!(final_match.source_2.is_resolved());
}

#[test]
fn clearing_a_semifinal_also_clears_a_completed_third_place() {
    let graph = &mut graph_of(4, true);
    let semis = round_ids(graph, BracketRound::Main(1));
    for &id in &semis {
        report_result(graph, id, 1, 0).unwrap();
    }
    let third_id = graph.third_place_match().unwrap().id;
    report_result(graph, third_id, 9, 7).unwrap();

    clear_result(graph, semis[0]).unwrap();

    let third = graph.third_place_match().unwrap();
    assert_eq!(third.status, MatchStatus::Pending);
    assert_eq!(third.winner, None);
    assert_eq!(third.source_1, CompetitorSource::LoserOf(semis[0]));
}

#[test]
fn clearing_a_match_without_a_result_is_a_no_op() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    let before = graph.clone();
    clear_result(graph, m0).unwrap();
    assert_eq!(*graph, before);
}

#[test]
fn start_match_transitions() {
    let graph = &mut graph_of(4, false);
    let m0 = round_ids(graph, BracketRound::Main(1))[0];
    let final_id = graph.final_match().unwrap().id;

    assert!(matches!(
        start_match(graph, final_id),
        Err(TournamentError::MatchNotReady(_))
    ));

    start_match(graph, m0).unwrap();
    assert_eq!(graph.get(m0).unwrap().status, MatchStatus::InProgress);
    // Starting an already-live match is harmless.
    start_match(graph, m0).unwrap();

    // A live match can be scored.
    report_result(graph, m0, 1, 0).unwrap();
    assert!(matches!(
        start_match(graph, m0),
        Err(TournamentError::AlreadyCompleted(_))
    ));
}
