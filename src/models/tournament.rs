//! Tournament, TournamentConfig, TournamentState, and TournamentError.

use crate::models::graph::MatchGraph;
use crate::models::matches::{CompetitorId, MatchId};
use crate::models::participant::{Participant, ParticipantId, Team};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentError {
    /// Not enough participants for the requested operation.
    InsufficientParticipants { required: usize, actual: usize },
    /// Greedy team formation could not keep the rating spread under the threshold.
    UnbalancedTeams { spread_pct: f64, threshold_pct: f64 },
    /// No match with this id in the bracket.
    MatchNotFound(MatchId),
    /// One or both competitors of the match are not yet determined.
    MatchNotReady(MatchId),
    /// The match (or the whole bracket) already has a result.
    AlreadyCompleted(MatchId),
    /// Tied or negative score.
    InvalidScore { score_1: i32, score_2: i32 },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// A participant with this name already exists (names are unique, case-insensitive).
    DuplicateParticipantName,
    /// Participant names must be non-empty after trimming.
    EmptyParticipantName,
    /// Participant not found in the roster.
    ParticipantNotFound(ParticipantId),
    /// The operation needs a generated bracket.
    BracketNotGenerated,
    /// A bracket already exists; regeneration is a separate, destructive action.
    BracketAlreadyGenerated,
    /// A CSV roster row could not be parsed.
    InvalidCsvRow { line: u64 },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientParticipants { required, actual } => {
                write!(f, "Need at least {} participants (have {})", required, actual)
            }
            TournamentError::UnbalancedTeams { spread_pct, threshold_pct } => {
                write!(
                    f,
                    "Team rating spread {:.1}% exceeds the {:.1}% threshold",
                    spread_pct, threshold_pct
                )
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match is not ready: both competitors must be decided first")
            }
            TournamentError::AlreadyCompleted(_) => {
                write!(f, "Match already has a result; clear it before re-scoring")
            }
            TournamentError::InvalidScore { score_1, score_2 } => {
                write!(
                    f,
                    "Invalid score {}-{}: draws and negative scores are not allowed",
                    score_1, score_2
                )
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::DuplicateParticipantName => {
                write!(f, "A participant with this name already exists")
            }
            TournamentError::EmptyParticipantName => write!(f, "Participant name must not be empty"),
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::BracketNotGenerated => write!(f, "Bracket has not been generated"),
            TournamentError::BracketAlreadyGenerated => {
                write!(f, "Bracket already generated; use regenerate to discard it")
            }
            TournamentError::InvalidCsvRow { line } => {
                write!(f, "Invalid roster row on line {}", line)
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Solo (individual bracket) or team (rating-balanced team formation) event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    Solo,
    Teams { team_size: usize },
}

/// Spread threshold used when no explicit one is configured.
pub const DEFAULT_BALANCE_THRESHOLD_PCT: f64 = 20.0;

/// Bracket generation settings, fixed at tournament creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default)]
    pub format: TournamentFormat,
    /// Add a third-place match fed by the semifinal losers.
    #[serde(default)]
    pub third_place_match: bool,
    /// Maximum allowed (max-min)/min team rating spread, in percent.
    #[serde(default = "default_balance_threshold")]
    pub balance_threshold_pct: f64,
}

fn default_balance_threshold() -> f64 {
    DEFAULT_BALANCE_THRESHOLD_PCT
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            format: TournamentFormat::Solo,
            third_place_match: false,
            balance_threshold_pct: DEFAULT_BALANCE_THRESHOLD_PCT,
        }
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding participants; no bracket yet.
    #[default]
    Registration,
    /// Bracket generated; results being reported.
    InProgress,
    /// Final resolved; bracket finished.
    Completed,
}

/// Full tournament state: roster, teams, bracket, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: TournamentConfig,
    pub participants: Vec<Participant>,
    /// Teams formed during seeding (team tournaments only).
    pub teams: Vec<Team>,
    /// Generated match graph; None until generation.
    pub bracket: Option<MatchGraph>,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Registration state with no participants.
    pub fn new(name: impl Into<String>, config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            config,
            participants: Vec::new(),
            teams: Vec::new(),
            bracket: None,
            state: TournamentState::Registration,
        }
    }

    /// Create a tournament with an initial roster (e.g. in tests). Still in Registration.
    pub fn with_participants(
        name: impl Into<String>,
        config: TournamentConfig,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            participants,
            ..Self::new(name, config)
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Display name for a competitor id: a participant in solo tournaments,
    /// a team in team tournaments.
    pub fn competitor_name(&self, id: CompetitorId) -> Option<&str> {
        self.participant(id)
            .map(|p| p.name.as_str())
            .or_else(|| self.teams.iter().find(|t| t.id == id).map(|t| t.name.as_str()))
    }

    /// Add a participant (Registration only). Names are trimmed and must be
    /// unique, case-insensitive.
    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        rating: Option<i32>,
    ) -> Result<ParticipantId, TournamentError> {
        if self.state != TournamentState::Registration {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyParticipantName);
        }
        let is_duplicate = self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateParticipantName);
        }
        let participant = Participant::new(name_trimmed, rating);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Remove a participant by id (Registration only).
    pub fn remove_participant(&mut self, participant_id: ParticipantId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Registration {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
        self.participants.remove(idx);
        Ok(())
    }

    /// Set or clear an organizer rating override (Registration only).
    pub fn set_rating_override(
        &mut self,
        participant_id: ParticipantId,
        rating: Option<i32>,
    ) -> Result<(), TournamentError> {
        if self.state != TournamentState::Registration {
            return Err(TournamentError::InvalidState);
        }
        let p = self
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
        p.rating_override = rating;
        Ok(())
    }
}
