//! Participant and Team data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in matches and lookups).
pub type ParticipantId = Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Rating used when a participant registered without one (or with an invalid one).
pub const DEFAULT_RATING: i32 = 1000;

/// A registered participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Rating supplied at registration. None or non-positive values are ignored.
    pub rating: Option<i32>,
    /// Organizer-set override; takes precedence over `rating`.
    pub rating_override: Option<i32>,
    /// Team the participant was assigned to during seeding (team tournaments only).
    pub team_id: Option<TeamId>,
}

impl Participant {
    /// Create a new participant with the given name and optional registration rating.
    pub fn new(name: impl Into<String>, rating: Option<i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rating,
            rating_override: None,
            team_id: None,
        }
    }

    /// Rating used for seeding: override, then registration rating, then
    /// [`DEFAULT_RATING`]. A missing, zero, or negative source falls through
    /// to the next one, so the result is always positive.
    pub fn effective_rating(&self) -> i32 {
        for source in [self.rating_override, self.rating] {
            if let Some(r) = source {
                if r > 0 {
                    return r;
                }
            }
        }
        DEFAULT_RATING
    }
}

/// A team formed during seeding (team tournaments). Membership is fixed once
/// the bracket has been generated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub members: Vec<ParticipantId>,
    /// Sum of member effective ratings at formation time.
    pub rating: i32,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<ParticipantId>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
            rating,
        }
    }

    /// Average member rating (the spread check compares averages).
    pub fn average_rating(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        f64::from(self.rating) / self.members.len() as f64
    }
}
