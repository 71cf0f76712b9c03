//! Match, competitor source, and round data structures for the bracket.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Identifier of whoever occupies one side of a match: a participant id in
/// solo tournaments, a team id in team tournaments.
pub type CompetitorId = ParticipantId;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

/// Round a match belongs to.
///
/// `Preliminary` is the play-in round for non-power-of-two fields. `Main(r)`
/// runs from 1 (first full round) up to the final. `ThirdPlace` sits outside
/// the main progression chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketRound {
    Preliminary,
    Main(u32),
    ThirdPlace,
}

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// One or both competitor sources still point at an unfinished match.
    #[default]
    Pending,
    /// Both competitors known; no result yet.
    Ready,
    /// Marked live by the scorekeeper.
    InProgress,
    /// Winner determined, score recorded.
    Completed,
}

/// Where one side of a match comes from.
///
/// `WinnerOf`/`LoserOf` are unresolved pointers until the referenced match
/// completes; the progression engine rewrites them to `Concrete` in place
/// and restores the pointer when a result is cleared.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorSource {
    Unresolved,
    Concrete(CompetitorId),
    WinnerOf(MatchId),
    LoserOf(MatchId),
}

impl CompetitorSource {
    /// The concrete competitor, if this source has been resolved.
    pub fn competitor(&self) -> Option<CompetitorId> {
        match self {
            CompetitorSource::Concrete(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, CompetitorSource::Concrete(_))
    }
}

/// Forward pointer: which match (and which of its sides) a result feeds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchTarget {
    pub match_id: MatchId,
    pub side: Side,
}

/// A single bracket match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub round: BracketRound,
    /// Index of this match within its round.
    pub slot: usize,
    pub source_1: CompetitorSource,
    pub source_2: CompetitorSource,
    /// None until the match is completed.
    pub score: Option<(u32, u32)>,
    pub winner: Option<CompetitorId>,
    pub status: MatchStatus,
    /// Match the winner advances to. None for the final and the third-place match.
    pub winner_to: Option<MatchTarget>,
    /// Match the loser advances to. Set only on semifinals feeding a third-place match.
    pub loser_to: Option<MatchTarget>,
}

impl BracketMatch {
    /// Create a match with no result. Status is `Ready` when both sources
    /// are already concrete, `Pending` otherwise.
    pub fn new(
        round: BracketRound,
        slot: usize,
        source_1: CompetitorSource,
        source_2: CompetitorSource,
    ) -> Self {
        let status = if source_1.is_resolved() && source_2.is_resolved() {
            MatchStatus::Ready
        } else {
            MatchStatus::Pending
        };
        Self {
            id: Uuid::new_v4(),
            round,
            slot,
            source_1,
            source_2,
            score: None,
            winner: None,
            status,
            winner_to: None,
            loser_to: None,
        }
    }

    pub fn source(&self, side: Side) -> &CompetitorSource {
        match side {
            Side::One => &self.source_1,
            Side::Two => &self.source_2,
        }
    }

    pub(crate) fn source_mut(&mut self, side: Side) -> &mut CompetitorSource {
        match side {
            Side::One => &mut self.source_1,
            Side::Two => &mut self.source_2,
        }
    }

    /// Both competitors, when both sources are resolved.
    pub fn competitors(&self) -> Option<(CompetitorId, CompetitorId)> {
        Some((self.source_1.competitor()?, self.source_2.competitor()?))
    }

    /// The losing competitor of a completed match.
    pub fn loser(&self) -> Option<CompetitorId> {
        let winner = self.winner?;
        let (one, two) = self.competitors()?;
        Some(if winner == one { two } else { one })
    }

    /// Whether the given competitor occupies (or occupied) a side of this match.
    pub fn involves(&self, competitor: CompetitorId) -> bool {
        self.source_1.competitor() == Some(competitor)
            || self.source_2.competitor() == Some(competitor)
    }
}
