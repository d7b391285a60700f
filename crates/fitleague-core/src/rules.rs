// League rules document: sport-specific match mechanics, standings policy,
// submission and attendance policy.
//
// The document is a tagged union keyed by `sport`, so a running league can
// never carry racket-sport match settings and vice versa. Untyped input is
// validated once in `LeagueRules::from_json` and passed around typed after that.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::model::MemberId;
use crate::standings::ScoringFormat;

/// Current version of the rules document layout.
pub const RULES_VERSION: u32 = 1;

/// Running leagues never require more ranked sessions than this.
const MAX_MIN_SESSIONS: u32 = 3;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Tennis,
    Pickleball,
    Running,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Tennis => "tennis",
            Sport::Pickleball => "pickleball",
            Sport::Running => "running",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "tennis" => Ok(Sport::Tennis),
            "pickleball" => Ok(Sport::Pickleball),
            "running" => Ok(Sport::Running),
            _ => Err(RulesError::UnknownSport(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Singles,
    Doubles,
}

impl MatchMode {
    /// Lenient parse used by the builder: anything but "doubles" is singles.
    pub fn from_option(s: &str) -> Self {
        if normalize(s) == "doubles" {
            MatchMode::Doubles
        } else {
            MatchMode::Singles
        }
    }
}

/// How doubles partners are chosen from week to week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerMode {
    RandomWeekly,
    FixedPairs,
}

impl PartnerMode {
    /// Map the rotation option offered to league owners ("random" /
    /// "assigned") to a partner mode. Unrecognised values rotate randomly.
    pub fn from_rotation(s: &str) -> Self {
        match normalize(s).as_str() {
            "assigned" | "fixed" | "fixed_pairs" => PartnerMode::FixedPairs,
            _ => PartnerMode::RandomWeekly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    PersonalProgress,
    AbsolutePerformance,
}

impl ComparisonMode {
    pub fn from_option(s: &str) -> Self {
        match normalize(s).as_str() {
            "absolute_performance" | "absolute" => ComparisonMode::AbsolutePerformance,
            _ => ComparisonMode::PersonalProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringInput {
    SetScores,
    GameScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickleballScoring {
    SideOut,
    Rally,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    TimeTrial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    ImprovementPercent,
    BestTime,
}

/// Ordered standings criteria. Which ones apply depends on the sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    Wins,
    HeadToHead,
    SetDiff,
    GameDiff,
    PointDiff,
    SessionsCompleted,
    BestResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submitter {
    AnyParticipant,
    SelfReported,
    Organizer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatePolicy {
    Allow,
    MarkLate,
    Forfeit,
}

// ---------------------------------------------------------------------------
// Document sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRules {
    pub cadence: Cadence,
    pub starts_on: Option<NaiveDate>,
    pub season_weeks: u32,
}

/// Who plays with whom. Shared by every racket sport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub mode: MatchMode,
    pub doubles_partner_mode: Option<PartnerMode>,
    pub fixed_pairs: Option<Vec<[MemberId; 2]>>,
}

impl Lineup {
    fn for_options(match_type: &str, rotation_type: &str) -> Self {
        match MatchMode::from_option(match_type) {
            MatchMode::Singles => Lineup {
                mode: MatchMode::Singles,
                doubles_partner_mode: None,
                fixed_pairs: None,
            },
            MatchMode::Doubles => {
                let partner_mode = PartnerMode::from_rotation(rotation_type);
                let fixed_pairs = match partner_mode {
                    PartnerMode::FixedPairs => Some(Vec::new()),
                    PartnerMode::RandomWeekly => None,
                };
                Lineup {
                    mode: MatchMode::Doubles,
                    doubles_partner_mode: Some(partner_mode),
                    fixed_pairs,
                }
            }
        }
    }

    fn validate(&self) -> Result<(), RulesError> {
        match (self.mode, self.doubles_partner_mode, &self.fixed_pairs) {
            (MatchMode::Singles, None, None) => Ok(()),
            (MatchMode::Singles, _, _) => Err(invalid(
                "match.doubles_partner_mode",
                "partner settings must be null for singles",
            )),
            (MatchMode::Doubles, None, _) => Err(invalid(
                "match.doubles_partner_mode",
                "required for doubles",
            )),
            (MatchMode::Doubles, Some(PartnerMode::RandomWeekly), None) => Ok(()),
            (MatchMode::Doubles, Some(PartnerMode::RandomWeekly), Some(_)) => Err(invalid(
                "match.fixed_pairs",
                "must be null when partners rotate randomly",
            )),
            (MatchMode::Doubles, Some(PartnerMode::FixedPairs), None) => Err(invalid(
                "match.fixed_pairs",
                "required when partners are fixed",
            )),
            (MatchMode::Doubles, Some(PartnerMode::FixedPairs), Some(pairs)) => {
                validate_pairs(pairs)
            }
        }
    }
}

fn validate_pairs(pairs: &[[MemberId; 2]]) -> Result<(), RulesError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for [first, second] in pairs {
        if first == second {
            return Err(invalid(
                "match.fixed_pairs",
                format!("member {first} cannot partner themselves"),
            ));
        }
        for id in [first, second] {
            if !seen.insert(id.as_str()) {
                return Err(invalid(
                    "match.fixed_pairs",
                    format!("member {id} appears in more than one pair"),
                ));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TennisMatchRules {
    #[serde(flatten)]
    pub lineup: Lineup,
    pub scoring_input: ScoringInput,
    pub best_of_sets: u32,
    pub games_per_set: u32,
    /// Games-all score at which a set is decided by tiebreak.
    pub tiebreak_at: u32,
    pub tiebreak_points_to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleballMatchRules {
    #[serde(flatten)]
    pub lineup: Lineup,
    pub scoring_input: ScoringInput,
    pub best_of_games: u32,
    pub points_to_win: u32,
    pub win_by: u32,
    pub scoring_system: PickleballScoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningSessions {
    pub default_session_type: SessionType,
    pub comparison_mode: ComparisonMode,
    pub distance_tolerance_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacketStandings {
    pub points_per_win: u32,
    pub points_per_loss: u32,
    pub tie_breakers: Vec<TieBreaker>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStandings {
    pub ranking_metric: RankingMetric,
    pub best_n_weeks: Option<u32>,
    pub drop_worst_k_weeks: u32,
    pub min_sessions_for_ranking: u32,
    pub tie_breakers: Vec<TieBreaker>,
}

/// The sport-specific half of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sport", rename_all = "snake_case")]
pub enum SportRules {
    Tennis {
        #[serde(rename = "match")]
        match_rules: TennisMatchRules,
        standings: RacketStandings,
    },
    Pickleball {
        #[serde(rename = "match")]
        match_rules: PickleballMatchRules,
        standings: RacketStandings,
    },
    Running {
        sessions: RunningSessions,
        standings: RunningStandings,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRules {
    pub submitted_by: Submitter,
    pub requires_opponent_confirmation: bool,
    pub requires_organizer_confirmation: bool,
    pub auto_confirm_after_hours: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRules {
    pub check_in_required: bool,
    pub check_in_window_minutes: u32,
    pub self_check_in_allowed: bool,
    pub late_policy: LatePolicy,
}

// ---------------------------------------------------------------------------
// The document
// ---------------------------------------------------------------------------

/// Immutable, versioned rules attached to a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRules {
    pub version: u32,
    pub schedule: ScheduleRules,
    #[serde(flatten)]
    pub sport: SportRules,
    pub submissions: SubmissionRules,
    pub attendance: AttendanceRules,
}

/// Which fixture algorithm a league's rules call for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixturePlan {
    SinglesRoundRobin,
    DoublesRandom,
    /// Fixed partners. `pairs` is empty when the organizer has not assigned
    /// any, in which case roster order decides the pairs.
    DoublesAssigned { pairs: Vec<[MemberId; 2]> },
    /// Sessions are self-scheduled; no fixtures are generated.
    NoFixtures,
}

impl LeagueRules {
    pub fn sport(&self) -> Sport {
        match self.sport {
            SportRules::Tennis { .. } => Sport::Tennis,
            SportRules::Pickleball { .. } => Sport::Pickleball,
            SportRules::Running { .. } => Sport::Running,
        }
    }

    /// Partner settings for racket sports, `None` for running.
    pub fn lineup(&self) -> Option<&Lineup> {
        match &self.sport {
            SportRules::Tennis { match_rules, .. } => Some(&match_rules.lineup),
            SportRules::Pickleball { match_rules, .. } => Some(&match_rules.lineup),
            SportRules::Running { .. } => None,
        }
    }

    fn lineup_mut(&mut self) -> Option<&mut Lineup> {
        match &mut self.sport {
            SportRules::Tennis { match_rules, .. } => Some(&mut match_rules.lineup),
            SportRules::Pickleball { match_rules, .. } => Some(&mut match_rules.lineup),
            SportRules::Running { .. } => None,
        }
    }

    pub fn fixture_plan(&self) -> FixturePlan {
        let Some(lineup) = self.lineup() else {
            return FixturePlan::NoFixtures;
        };
        match (lineup.mode, lineup.doubles_partner_mode) {
            (MatchMode::Singles, _) => FixturePlan::SinglesRoundRobin,
            (MatchMode::Doubles, Some(PartnerMode::FixedPairs)) => FixturePlan::DoublesAssigned {
                pairs: lineup.fixed_pairs.clone().unwrap_or_default(),
            },
            (MatchMode::Doubles, _) => FixturePlan::DoublesRandom,
        }
    }

    /// The standings format that matches how results are recorded under
    /// these rules.
    pub fn scoring_format(&self) -> ScoringFormat {
        match self.lineup() {
            None => ScoringFormat::IndividualTime,
            Some(lineup) if lineup.mode == MatchMode::Doubles => ScoringFormat::Doubles,
            Some(_) => ScoringFormat::Singles,
        }
    }

    /// Replace the fixed doubles pairs. Only valid for fixed-partner leagues.
    pub fn with_fixed_pairs(mut self, pairs: Vec<[MemberId; 2]>) -> Result<Self, RulesError> {
        let lineup = self.lineup_mut().ok_or_else(|| {
            invalid("match.fixed_pairs", "running leagues have no partners")
        })?;
        if lineup.doubles_partner_mode != Some(PartnerMode::FixedPairs) {
            return Err(invalid(
                "match.fixed_pairs",
                "league does not use fixed partners",
            ));
        }
        validate_pairs(&pairs)?;
        lineup.fixed_pairs = Some(pairs);
        Ok(self)
    }

    /// Check the invariants the type system cannot express.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.schedule.season_weeks == 0 {
            return Err(invalid("schedule.season_weeks", "must be at least 1"));
        }
        match &self.sport {
            SportRules::Tennis { match_rules, .. } => match_rules.lineup.validate()?,
            SportRules::Pickleball { match_rules, .. } => match_rules.lineup.validate()?,
            SportRules::Running {
                sessions,
                standings,
            } => {
                if sessions.distance_tolerance_percent > 100 {
                    return Err(invalid(
                        "sessions.distance_tolerance_percent",
                        "must be between 0 and 100",
                    ));
                }
                if standings.min_sessions_for_ranking > self.schedule.season_weeks {
                    return Err(invalid(
                        "standings.min_sessions_for_ranking",
                        "cannot exceed the season length",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a stored rules document.
    pub fn from_json(text: &str) -> Result<Self, RulesError> {
        let rules: LeagueRules = serde_json::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_json(&self) -> Result<String, RulesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the rules document for a new league from the options a league owner
/// picks. Never fails: unrecognised option strings fall back to defaults.
///
/// * `match_type`: "singles" or "doubles" (racket sports only).
/// * `rotation_type`: "random" or "assigned" (doubles only).
/// * `running_comparison_mode`: "personal_progress" or "absolute_performance"
///   (running only).
pub fn build_league_rules(
    sport: Sport,
    match_type: &str,
    rotation_type: &str,
    running_comparison_mode: &str,
    starts_on: Option<NaiveDate>,
    season_weeks: u32,
) -> LeagueRules {
    let season_weeks = season_weeks.max(1);
    let schedule = ScheduleRules {
        cadence: Cadence::Weekly,
        starts_on,
        season_weeks,
    };

    match sport {
        Sport::Tennis => LeagueRules {
            version: RULES_VERSION,
            schedule,
            sport: SportRules::Tennis {
                match_rules: TennisMatchRules {
                    lineup: Lineup::for_options(match_type, rotation_type),
                    scoring_input: ScoringInput::SetScores,
                    best_of_sets: 3,
                    games_per_set: 6,
                    tiebreak_at: 6,
                    tiebreak_points_to: 7,
                },
                standings: RacketStandings {
                    points_per_win: 1,
                    points_per_loss: 0,
                    tie_breakers: vec![
                        TieBreaker::Wins,
                        TieBreaker::HeadToHead,
                        TieBreaker::SetDiff,
                        TieBreaker::GameDiff,
                    ],
                },
            },
            submissions: racket_submissions(),
            attendance: racket_attendance(),
        },
        Sport::Pickleball => LeagueRules {
            version: RULES_VERSION,
            schedule,
            sport: SportRules::Pickleball {
                match_rules: PickleballMatchRules {
                    lineup: Lineup::for_options(match_type, rotation_type),
                    scoring_input: ScoringInput::GameScores,
                    best_of_games: 3,
                    points_to_win: 11,
                    win_by: 2,
                    scoring_system: PickleballScoring::SideOut,
                },
                standings: RacketStandings {
                    points_per_win: 1,
                    points_per_loss: 0,
                    tie_breakers: vec![
                        TieBreaker::Wins,
                        TieBreaker::HeadToHead,
                        TieBreaker::GameDiff,
                        TieBreaker::PointDiff,
                    ],
                },
            },
            submissions: racket_submissions(),
            attendance: racket_attendance(),
        },
        Sport::Running => {
            let comparison_mode = ComparisonMode::from_option(running_comparison_mode);
            let ranking_metric = match comparison_mode {
                ComparisonMode::PersonalProgress => RankingMetric::ImprovementPercent,
                ComparisonMode::AbsolutePerformance => RankingMetric::BestTime,
            };
            LeagueRules {
                version: RULES_VERSION,
                schedule,
                sport: SportRules::Running {
                    sessions: RunningSessions {
                        default_session_type: SessionType::TimeTrial,
                        comparison_mode,
                        distance_tolerance_percent: 5,
                    },
                    standings: RunningStandings {
                        ranking_metric,
                        best_n_weeks: None,
                        drop_worst_k_weeks: 1,
                        min_sessions_for_ranking: season_weeks.min(MAX_MIN_SESSIONS),
                        tie_breakers: vec![TieBreaker::SessionsCompleted, TieBreaker::BestResult],
                    },
                },
                submissions: SubmissionRules {
                    submitted_by: Submitter::SelfReported,
                    requires_opponent_confirmation: false,
                    requires_organizer_confirmation: false,
                    auto_confirm_after_hours: None,
                },
                attendance: AttendanceRules {
                    check_in_required: true,
                    check_in_window_minutes: 15,
                    self_check_in_allowed: true,
                    late_policy: LatePolicy::MarkLate,
                },
            }
        }
    }
}

fn racket_submissions() -> SubmissionRules {
    SubmissionRules {
        submitted_by: Submitter::AnyParticipant,
        requires_opponent_confirmation: true,
        requires_organizer_confirmation: false,
        auto_confirm_after_hours: Some(48),
    }
}

fn racket_attendance() -> AttendanceRules {
    AttendanceRules {
        check_in_required: false,
        check_in_window_minutes: 30,
        self_check_in_allowed: true,
        late_policy: LatePolicy::Allow,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

fn invalid(field: &str, message: impl Into<String>) -> RulesError {
    RulesError::InvalidRules {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
