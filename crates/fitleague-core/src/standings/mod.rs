// Standings computation.
//
// Standings are never stored. Each call re-derives them from the completed
// matches, their participant rows and the roster. Every roster member gets a
// row, played or not. Ranks are 1-based positions after a stable sort, so
// statistically tied members keep roster order and still get distinct ranks.

mod performance;
mod team_vs_team;
mod teams;
mod win_loss;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RulesError;
use crate::model::{Match, Member, MemberId, Participant};

pub use teams::{calculate_team_standings, team_key, TeamStanding};

// ---------------------------------------------------------------------------
// Scoring formats
// ---------------------------------------------------------------------------

/// How results are turned into standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    /// One point per win, no draws.
    Singles,
    /// Same accounting as singles, credited to each member of the side.
    Doubles,
    /// 3 points for a win, 1 for a draw, from recorded side scores.
    TeamVsTeam,
    /// Finishing-position points within each timed session.
    IndividualTime,
    /// Sum of recorded points.
    IndividualPoints,
}

impl ScoringFormat {
    pub const ALL: [ScoringFormat; 5] = [
        ScoringFormat::Singles,
        ScoringFormat::Doubles,
        ScoringFormat::TeamVsTeam,
        ScoringFormat::IndividualTime,
        ScoringFormat::IndividualPoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringFormat::Singles => "singles",
            ScoringFormat::Doubles => "doubles",
            ScoringFormat::TeamVsTeam => "team_vs_team",
            ScoringFormat::IndividualTime => "individual_time",
            ScoringFormat::IndividualPoints => "individual_points",
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringFormat {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ScoringFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| RulesError::UnknownFormat(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One member's line in the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub user_id: MemberId,
    pub name: String,
    pub rank: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: f64,
    #[serde(rename = "goalDifference")]
    pub goal_difference: f64,
    #[serde(rename = "totalTime")]
    pub total_time: f64,
    #[serde(rename = "totalPoints")]
    pub total_points: f64,
}

impl Standing {
    fn empty(member: &Member) -> Self {
        Standing {
            user_id: member.user_id.clone(),
            name: member.name.clone(),
            rank: 0,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0.0,
            goal_difference: 0.0,
            total_time: 0.0,
            total_points: 0.0,
        }
    }
}

/// Compute the league table for `format`.
///
/// Only matches with status `completed` count, and only participant rows
/// belonging to those matches are read. Rows for people who are not on the
/// roster are ignored.
pub fn calculate_standings(
    format: ScoringFormat,
    matches: &[Match],
    participants: &[Participant],
    members: &[Member],
) -> Vec<Standing> {
    let results = CompletedResults::collect(matches, participants);
    let mut ledger = Ledger::seeded(members);

    let standings = match format {
        ScoringFormat::Singles | ScoringFormat::Doubles => {
            win_loss::tally(&results, &mut ledger);
            ledger.ranked(win_loss::compare)
        }
        ScoringFormat::TeamVsTeam => {
            team_vs_team::tally(&results, &mut ledger);
            ledger.ranked(team_vs_team::compare)
        }
        ScoringFormat::IndividualTime => {
            performance::tally_times(&results, &mut ledger);
            ledger.ranked(performance::compare_points)
        }
        ScoringFormat::IndividualPoints => {
            performance::tally_points(&results, &mut ledger);
            ledger.ranked(performance::compare_total_points)
        }
    };

    debug!(
        "{} standings: {} members, {} completed matches",
        format,
        standings.len(),
        results.matches.len()
    );
    standings
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Completed matches in input order, with their participant rows grouped by
/// match id (rows keep input order too).
pub(crate) struct CompletedResults<'a> {
    pub matches: Vec<&'a Match>,
    rows: HashMap<&'a str, Vec<&'a Participant>>,
}

impl<'a> CompletedResults<'a> {
    pub fn collect(matches: &'a [Match], participants: &'a [Participant]) -> Self {
        let matches: Vec<&Match> = matches.iter().filter(|m| m.is_completed()).collect();
        let mut rows: HashMap<&str, Vec<&Participant>> =
            matches.iter().map(|m| (m.id.as_str(), Vec::new())).collect();
        for p in participants {
            if let Some(bucket) = rows.get_mut(p.match_id.as_str()) {
                bucket.push(p);
            }
        }
        CompletedResults { matches, rows }
    }

    /// Participant rows for a completed match.
    pub fn rows(&self, match_id: &str) -> &[&'a Participant] {
        self.rows.get(match_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every participant row across all completed matches.
    pub fn all_rows(&self) -> impl Iterator<Item = &'a Participant> + '_ {
        self.matches
            .iter()
            .flat_map(move |m| self.rows(&m.id).iter().copied())
    }
}

/// Roster-seeded accumulator for per-member standings.
pub(crate) struct Ledger {
    rows: Vec<Standing>,
    index: HashMap<MemberId, usize>,
}

impl Ledger {
    pub fn seeded(members: &[Member]) -> Self {
        let mut rows = Vec::with_capacity(members.len());
        let mut index = HashMap::with_capacity(members.len());
        for member in members {
            if index.contains_key(&member.user_id) {
                continue;
            }
            index.insert(member.user_id.clone(), rows.len());
            rows.push(Standing::empty(member));
        }
        Ledger { rows, index }
    }

    /// The row for `user_id`, or `None` if they are not on the roster.
    pub fn row(&mut self, user_id: &str) -> Option<&mut Standing> {
        match self.index.get(user_id) {
            Some(&i) => Some(&mut self.rows[i]),
            None => {
                debug!("ignoring result row for {user_id}: not on the roster");
                None
            }
        }
    }

    /// Stable-sort the rows and number them 1..=n.
    pub fn ranked<F>(mut self, compare: F) -> Vec<Standing>
    where
        F: FnMut(&Standing, &Standing) -> Ordering,
    {
        self.rows.sort_by(compare);
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }
        self.rows
    }
}

/// Descending comparison for float stats. Total, so NaN cannot break a sort.
pub(crate) fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
