// Roster, fixture and result records exchanged with the calling layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque member identifier as issued by the platform's user store.
pub type MemberId = String;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// A league roster entry. Read-only from the engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: MemberId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Member {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Member {
            user_id: user_id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sides and match status
// ---------------------------------------------------------------------------

/// One side of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Lifecycle of a live fixture in the result workflow. The engine only ever
/// reads matches that reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Submitted,
    Confirmed,
    Disputed,
    Completed,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A generated fixture, before any result exists.
///
/// `team_a` and `team_b` hold one member for singles and two for doubles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub week_number: u32,
    pub team_a: Vec<MemberId>,
    pub team_b: Vec<MemberId>,
}

impl ScheduledMatch {
    /// All members taking part, side A first.
    pub fn members(&self) -> impl Iterator<Item = &MemberId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    pub fn involves(&self, member_id: &str) -> bool {
        self.members().any(|m| m == member_id)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A match row as produced by the result workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub status: MatchStatus,
    pub week_number: u32,
    #[serde(default)]
    pub winner: Option<Side>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Per-set game counts for racket sports, stored as `[side_a, side_b]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetScores {
    pub sets: Vec<[u32; 2]>,
}

/// One member's row for one match.
///
/// Which of the numeric fields is populated depends on the scoring format:
/// `score` for team-vs-team, `time_seconds` for time trials, `points` for
/// points leagues, `set_scores` for racket sports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub match_id: String,
    pub user_id: MemberId,
    #[serde(default)]
    pub team: Option<Side>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub time_seconds: Option<f64>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub set_scores: Option<SetScores>,
}

impl Participant {
    /// A bare participant row with only the side filled in.
    pub fn on_side(match_id: impl Into<String>, user_id: impl Into<String>, team: Side) -> Self {
        Participant {
            match_id: match_id.into(),
            user_id: user_id.into(),
            team: Some(team),
            score: None,
            time_seconds: None,
            points: None,
            set_scores: None,
        }
    }
}
