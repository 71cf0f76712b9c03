//! Esports tournament web app: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    build_bracket, clear_match_result, clear_result, form_balanced_teams,
    form_balanced_teams_default, generate_bracket, import_participants_csv, regenerate_bracket,
    report_match_result, report_result, seed_teams_by_rating, shuffle_competitors, start_match,
    start_tournament_match, ReportOutcome,
};
pub use models::{
    BracketMatch, BracketRound, CompetitorId, CompetitorSource, MatchGraph, MatchId, MatchStatus,
    MatchTarget, Participant, ParticipantId, Side, Team, TeamId, Tournament, TournamentConfig,
    TournamentError, TournamentFormat, TournamentId, TournamentState,
    DEFAULT_BALANCE_THRESHOLD_PCT, DEFAULT_RATING,
};
