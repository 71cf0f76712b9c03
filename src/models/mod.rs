//! Data structures for the bracket engine: participants, teams, matches, the
//! match graph, and tournament state.

mod graph;
mod matches;
mod participant;
mod tournament;

pub use graph::MatchGraph;
pub use matches::{
    BracketMatch, BracketRound, CompetitorId, CompetitorSource, MatchId, MatchStatus, MatchTarget,
    Side,
};
pub use participant::{Participant, ParticipantId, Team, TeamId, DEFAULT_RATING};
pub use tournament::{
    Tournament, TournamentConfig, TournamentError, TournamentFormat, TournamentId, TournamentState,
    DEFAULT_BALANCE_THRESHOLD_PCT,
};
