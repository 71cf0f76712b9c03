//! The match graph: every match of a generated bracket plus structural queries.
//!
//! The graph is read-only from outside the crate; all mutation goes through
//! the progression engine so match invariants hold.

use crate::models::matches::{
    BracketMatch, BracketRound, CompetitorId, MatchId, MatchStatus, MatchTarget,
};
use serde::{Deserialize, Serialize};

/// Directed graph of bracket matches with winner/loser advancement pointers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchGraph {
    matches: Vec<BracketMatch>,
    final_match: MatchId,
    third_place: Option<MatchId>,
    /// Set once the final has been resolved.
    completed: bool,
}

impl MatchGraph {
    pub(crate) fn new(
        matches: Vec<BracketMatch>,
        final_match: MatchId,
        third_place: Option<MatchId>,
    ) -> Self {
        Self {
            matches,
            final_match,
            third_place,
            completed: false,
        }
    }

    /// All matches, preliminary round first, then main rounds in order, then
    /// the third-place match.
    pub fn matches(&self) -> &[BracketMatch] {
        &self.matches
    }

    pub fn get(&self, id: MatchId) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: MatchId) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Matches of one round, in slot order.
    pub fn round_matches(&self, round: BracketRound) -> Vec<&BracketMatch> {
        self.matches.iter().filter(|m| m.round == round).collect()
    }

    /// Matches a competitor appears in (only resolved appearances count).
    pub fn matches_for(&self, competitor: CompetitorId) -> Vec<&BracketMatch> {
        self.matches
            .iter()
            .filter(|m| m.involves(competitor))
            .collect()
    }

    /// Where the winner of the given match advances to, if anywhere.
    pub fn feeds_into(&self, id: MatchId) -> Option<MatchTarget> {
        self.get(id).and_then(|m| m.winner_to)
    }

    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.get(self.final_match)
    }

    pub fn third_place_match(&self) -> Option<&BracketMatch> {
        self.third_place.and_then(|id| self.get(id))
    }

    pub(crate) fn final_match_id(&self) -> MatchId {
        self.final_match
    }

    pub(crate) fn third_place_id(&self) -> Option<MatchId> {
        self.third_place
    }

    /// Number of main rounds (the final is round `round_count()`).
    pub fn round_count(&self) -> u32 {
        self.matches
            .iter()
            .filter_map(|m| match m.round {
                BracketRound::Main(r) => Some(r),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn has_preliminary_round(&self) -> bool {
        self.matches
            .iter()
            .any(|m| m.round == BracketRound::Preliminary)
    }

    /// Whether the final has been resolved.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Winner of the final, once it has been resolved.
    pub fn champion(&self) -> Option<CompetitorId> {
        self.final_match().and_then(|m| m.winner)
    }

    /// Matches that can be scored right now.
    pub fn ready_matches(&self) -> Vec<&BracketMatch> {
        self.matches
            .iter()
            .filter(|m| matches!(m.status, MatchStatus::Ready | MatchStatus::InProgress))
            .collect()
    }
}
